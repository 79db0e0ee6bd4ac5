// perfdoc - Benchmark Performance Report Generator
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Narrative synthesizer.
//!
//! Turns a [`DerivedTable`] into report prose: an executive summary, one
//! paragraph per optimized variant and a scaling-trend paragraph. The
//! statistics behind each sentence are exposed as [`VariantSummary`] so they
//! can be checked independently of the wording.
//!
//! This is a pure function of the table. It knows nothing about the
//! document engine.
//!
//! # Tie-breaking
//!
//! Minimum and maximum improvement rows are chosen by a strict comparison
//! while walking rows in ascending size order, so the first occurrence wins.

use crate::error::{ReportError, Result};
use crate::metrics::mean_speedup;
use crate::model::{DerivedRow, DerivedTable};
use crate::variant::Variant;
use serde::Serialize;

/// Speedup and improvement of one variant at one size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowPoint {
    /// Problem size.
    pub size: u64,
    /// Speedup at this size.
    pub speedup: f64,
    /// Improvement at this size, in percent.
    pub improvement_pct: f64,
}

impl RowPoint {
    fn of(row: &DerivedRow, variant: Variant) -> Self {
        Self {
            size: row.size,
            speedup: row.speedup(variant),
            improvement_pct: row.improvement(variant),
        }
    }
}

/// Overall behavior of a variant across sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Faster than the baseline at every size.
    AlwaysFaster,
    /// Slower than (or tied with) the baseline at every size.
    AlwaysSlower,
    /// Faster at some sizes, slower at others.
    Mixed,
}

/// Extremal statistics for one optimized variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantSummary {
    /// The variant.
    pub variant: Variant,
    /// Mean speedup across all sizes.
    pub mean_speedup: f64,
    /// Row with the lowest improvement (first occurrence on ties).
    pub min: RowPoint,
    /// Row with the highest improvement (first occurrence on ties).
    pub max: RowPoint,
    /// Smallest-size row.
    pub first: RowPoint,
    /// Largest-size row.
    pub last: RowPoint,
    /// Number of sizes where the variant beat the baseline.
    pub faster_count: usize,
    /// Number of sizes.
    pub row_count: usize,
    /// Template selector.
    pub verdict: Verdict,
}

/// Computes the summary for one optimized variant.
///
/// Returns `None` for an empty table or the baseline.
pub fn summarize(table: &DerivedTable, variant: Variant) -> Option<VariantSummary> {
    if variant.is_baseline() {
        return None;
    }
    let rows = table.rows();
    let first_row = rows.first()?;
    let last_row = rows.last()?;

    let mut min = RowPoint::of(first_row, variant);
    let mut max = min;
    for row in &rows[1..] {
        let point = RowPoint::of(row, variant);
        if point.improvement_pct < min.improvement_pct {
            min = point;
        }
        if point.improvement_pct > max.improvement_pct {
            max = point;
        }
    }

    let faster_count = rows
        .iter()
        .filter(|r| r.metric(variant).is_some_and(|m| m.is_faster()))
        .count();
    let verdict = if faster_count == rows.len() {
        Verdict::AlwaysFaster
    } else if faster_count == 0 {
        Verdict::AlwaysSlower
    } else {
        Verdict::Mixed
    };

    Some(VariantSummary {
        variant,
        mean_speedup: mean_speedup(table, variant)?,
        min,
        max,
        first: RowPoint::of(first_row, variant),
        last: RowPoint::of(last_row, variant),
        faster_count,
        row_count: rows.len(),
        verdict,
    })
}

/// Paragraph describing one optimized variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantParagraph {
    /// The variant described.
    pub variant: Variant,
    /// Paragraph text.
    pub text: String,
}

/// Report prose in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narrative {
    /// Executive summary paragraph.
    pub executive_summary: String,
    /// One paragraph per optimized variant, in declaration order.
    pub variants: Vec<VariantParagraph>,
    /// Scaling-trend paragraph.
    pub scaling: String,
    /// Statistics the paragraphs were built from.
    pub summaries: Vec<VariantSummary>,
}

impl Narrative {
    /// All paragraphs: summary, per-variant, scaling.
    pub fn paragraphs(&self) -> Vec<String> {
        std::iter::once(self.executive_summary.clone())
            .chain(self.variants.iter().map(|p| p.text.clone()))
            .chain(std::iter::once(self.scaling.clone()))
            .collect()
    }
}

/// Builds the narrative for a derived table.
///
/// # Arguments
///
/// * `table` - Derived metrics, ascending by size
/// * `subject` - Name of the benchmarked routine
///
/// # Errors
///
/// Returns [`ReportError::EmptyResultSet`] for an empty table.
pub fn synthesize(table: &DerivedTable, subject: &str) -> Result<Narrative> {
    let summaries: Vec<VariantSummary> = Variant::OPTIMIZED
        .iter()
        .filter_map(|v| summarize(table, *v))
        .collect();
    if summaries.len() != Variant::OPTIMIZED_COUNT {
        return Err(ReportError::EmptyResultSet);
    }

    Ok(Narrative {
        executive_summary: executive_summary(table, &summaries, subject),
        variants: summaries
            .iter()
            .map(|s| VariantParagraph {
                variant: s.variant,
                text: variant_paragraph(s),
            })
            .collect(),
        scaling: scaling_paragraph(table, &summaries),
        summaries,
    })
}

/// One decimal, with infinities spelled `inf` / `-inf`.
fn decimal_text(value: f64) -> String {
    if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{:.1}", value)
    }
}

fn speedup_text(speedup: f64) -> String {
    decimal_text(speedup)
}

fn pct_text(pct: f64) -> String {
    decimal_text(pct)
}

fn size_range(table: &DerivedTable) -> String {
    match (table.first(), table.last()) {
        (Some(first), Some(last)) if table.len() > 1 => {
            format!("Across all problem sizes (n={} to n={})", first.size, last.size)
        }
        (Some(only), _) => format!("At the single measured problem size (n={})", only.size),
        _ => String::new(),
    }
}

fn executive_summary(table: &DerivedTable, summaries: &[VariantSummary], subject: &str) -> String {
    let mut best = &summaries[0];
    for s in &summaries[1..] {
        if s.mean_speedup > best.mean_speedup {
            best = s;
        }
    }

    let mut text = format!("{} of {}, ", size_range(table), subject);
    if best.mean_speedup > 1.0 {
        text.push_str(&format!(
            "the {} optimization demonstrates the largest performance gain with an average \
             speedup of {}x over the baseline implementation.",
            best.variant.label(),
            speedup_text(best.mean_speedup)
        ));
    } else {
        text.push_str(&format!(
            "none of the optimized variants beats the baseline on average; the closest is {} \
             with an average speedup of {}x.",
            best.variant.label(),
            speedup_text(best.mean_speedup)
        ));
    }

    let others: Vec<String> = summaries
        .iter()
        .filter(|s| s.variant != best.variant)
        .map(|s| {
            let direction = if s.mean_speedup > 1.0 {
                "improves on"
            } else {
                "falls behind"
            };
            format!(
                "{} {} the baseline with an average speedup of {}x",
                s.variant.label(),
                direction,
                speedup_text(s.mean_speedup)
            )
        })
        .collect();
    if !others.is_empty() {
        text.push_str(&format!(" By comparison, {}.", others.join(", while ")));
    }
    text
}

fn variant_paragraph(s: &VariantSummary) -> String {
    let label = s.variant.label();
    let mut text = format!("{} OPTIMIZATION: ", label.to_uppercase());
    let single = s.row_count == 1;

    match s.verdict {
        Verdict::AlwaysFaster => {
            text.push_str(&format!(
                "The {} variant outperforms the baseline at every problem size. ",
                label
            ));
            if single {
                text.push_str(&format!(
                    "Performance improves by {}% at n={}, a {}x speedup.",
                    pct_text(s.max.improvement_pct),
                    s.max.size,
                    speedup_text(s.max.speedup)
                ));
            } else {
                text.push_str(&format!(
                    "Performance improvements range from {}% (n={}) to {}% (n={}). \
                     The best speedup of {}x occurs at n={}, while the lowest speedup of {}x \
                     occurs at n={}.",
                    pct_text(s.min.improvement_pct),
                    s.min.size,
                    pct_text(s.max.improvement_pct),
                    s.max.size,
                    speedup_text(s.max.speedup),
                    s.max.size,
                    speedup_text(s.min.speedup),
                    s.min.size
                ));
            }
        }
        Verdict::AlwaysSlower => {
            text.push_str(&format!(
                "The {} variant does not beat the baseline at any problem size. ",
                label
            ));
            if single {
                text.push_str(&format!(
                    "It changes execution time by {}% at n={}.",
                    pct_text(-s.min.improvement_pct),
                    s.min.size
                ));
            } else {
                text.push_str(&format!(
                    "It adds between {}% and {}% to the execution time depending on problem \
                     size.",
                    pct_text(-s.max.improvement_pct),
                    pct_text(-s.min.improvement_pct)
                ));
            }
            text.push_str(&format!(
                " The worst case occurs at n={}, where it takes {}x as long as the baseline.",
                s.min.size,
                speedup_text(1.0 / s.min.speedup)
            ));
        }
        Verdict::Mixed => {
            text.push_str(&format!(
                "The {} variant gives mixed results: it is faster than the baseline at {} of {} \
                 problem sizes. Performance changes range from {}% (n={}) to {}% (n={}). \
                 The optimization is most effective at n={} with a {}x speedup.",
                label,
                s.faster_count,
                s.row_count,
                pct_text(s.min.improvement_pct),
                s.min.size,
                pct_text(s.max.improvement_pct),
                s.max.size,
                s.max.size,
                speedup_text(s.max.speedup)
            ));
        }
    }

    text.push_str(&format!(
        " Average speedup across all sizes: {}x.",
        speedup_text(s.mean_speedup)
    ));
    text
}

fn trend_word(first: f64, last: f64) -> &'static str {
    if speedup_text(first) == speedup_text(last) {
        "stable"
    } else if last > first {
        "increasing"
    } else {
        "decreasing"
    }
}

fn scaling_paragraph(table: &DerivedTable, summaries: &[VariantSummary]) -> String {
    let (Some(first), Some(last)) = (table.first(), table.last()) else {
        return String::new();
    };
    if table.len() < 2 {
        return format!(
            "SCALING BEHAVIOR: No scaling data available: only one problem size (n={}) was \
             measured.",
            first.size
        );
    }

    let mut text = format!(
        "SCALING BEHAVIOR: As problem size increases from n={} to n={}:",
        first.size, last.size
    );
    for s in summaries {
        text.push_str(&format!(
            "\n- {}: Speedup changes from {}x to {}x ({})",
            s.variant.label(),
            speedup_text(s.first.speedup),
            speedup_text(s.last.speedup),
            trend_word(s.first.speedup, s.last.speedup)
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive;
    use crate::model::{ResultRow, ResultTable};

    fn table(rows: &[(u64, [f64; Variant::COUNT])]) -> DerivedTable {
        let rows = rows
            .iter()
            .map(|(size, times)| {
                let mut row = ResultRow::empty(*size);
                row.times = times.map(Some);
                row
            })
            .collect();
        derive(&ResultTable::new(rows).split_complete().0)
    }

    #[test]
    fn test_max_tie_resolves_to_first_size() {
        // AVX2 improvements: 25%, 25%, 12.5%
        let t = table(&[
            (256, [1.0, 0.75, 1.0, 1.0]),
            (512, [2.0, 1.5, 2.0, 2.0]),
            (1024, [4.0, 3.5, 4.0, 4.0]),
        ]);
        let s = summarize(&t, Variant::Avx2).unwrap();
        assert_eq!(s.max.size, 256);
        assert_eq!(s.min.size, 1024);
    }

    #[test]
    fn test_min_tie_resolves_to_first_size() {
        let t = table(&[
            (256, [1.0, 0.5, 1.0, 1.0]),
            (512, [2.0, 1.5, 2.0, 2.0]),
            (1024, [4.0, 3.0, 4.0, 4.0]),
        ]);
        // AVX2 improvements: 50%, 25%, 25%
        let s = summarize(&t, Variant::Avx2).unwrap();
        assert_eq!(s.min.size, 512);
    }

    #[test]
    fn test_verdicts() {
        let t = table(&[(256, [1.0, 0.5, 0.9, 2.0]), (512, [2.0, 0.4, 2.5, 4.0])]);
        assert_eq!(summarize(&t, Variant::Avx2).unwrap().verdict, Verdict::AlwaysFaster);
        assert_eq!(summarize(&t, Variant::Unroll).unwrap().verdict, Verdict::Mixed);
        assert_eq!(
            summarize(&t, Variant::Interchange).unwrap().verdict,
            Verdict::AlwaysSlower
        );
        assert!(summarize(&t, Variant::Baseline).is_none());
    }

    #[test]
    fn test_paragraph_order_and_content() {
        let t = table(&[(256, [1.0, 0.5, 0.9, 2.0]), (4096, [16.0, 4.0, 14.0, 48.0])]);
        let narrative = synthesize(&t, "matrix-vector multiplication").unwrap();
        let paragraphs = narrative.paragraphs();

        assert_eq!(paragraphs.len(), 2 + Variant::OPTIMIZED_COUNT);
        assert!(paragraphs[0].starts_with("Across all problem sizes (n=256 to n=4096)"));
        assert!(paragraphs[0].contains("AVX2 optimization demonstrates the largest"));
        assert!(paragraphs[1].starts_with("AVX2 OPTIMIZATION:"));
        assert!(paragraphs[1].contains("from 50.0% (n=256) to 75.0% (n=4096)"));
        assert!(paragraphs[2].starts_with("UNROLL OPTIMIZATION:"));
        assert!(paragraphs[3].starts_with("INTERCHANGE OPTIMIZATION:"));
        assert!(paragraphs[3].contains("takes 3.0x as long as the baseline"));
        assert!(paragraphs[4].contains("- AVX2: Speedup changes from 2.0x to 4.0x (increasing)"));
    }

    #[test]
    fn test_single_row_table() {
        let t = table(&[(256, [1.0, 0.5, 0.8, 2.0])]);
        let narrative = synthesize(&t, "mv").unwrap();
        let s = &narrative.summaries[0];
        assert_eq!(s.min, s.max);
        assert_eq!(s.first, s.last);
        assert!(narrative.scaling.contains("No scaling data available"));
        assert!(narrative.executive_summary.starts_with("At the single measured problem size (n=256)"));
        assert!(!narrative.variants[0].text.contains("range from"));
    }

    #[test]
    fn test_zero_baseline_reads_as_negative_infinity() {
        // Zero baseline at n=256 makes every variant infinitely slower there.
        let t = table(&[(256, [0.0, 1.0, 1.0, 1.0]), (512, [2.0, 1.0, 1.0, 4.0])]);
        let narrative = synthesize(&t, "mv").unwrap();
        let avx2 = &narrative.variants[0].text;
        assert_eq!(narrative.summaries[0].verdict, Verdict::Mixed);
        assert!(avx2.contains("range from -inf% (n=256) to 50.0% (n=512)"));
        assert!(!avx2.contains(" inf%"));
    }

    #[test]
    fn test_decimal_text() {
        assert_eq!(decimal_text(2.04), "2.0");
        assert_eq!(decimal_text(f64::INFINITY), "inf");
        assert_eq!(decimal_text(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(matches!(
            synthesize(&DerivedTable::default(), "mv"),
            Err(ReportError::EmptyResultSet)
        ));
    }

    #[test]
    fn test_no_variant_beats_baseline() {
        let t = table(&[(64, [1.0, 2.0, 1.5, 3.0]), (128, [1.0, 2.0, 1.25, 3.0])]);
        let narrative = synthesize(&t, "mv").unwrap();
        assert!(narrative
            .executive_summary
            .contains("none of the optimized variants beats the baseline"));
        assert!(narrative.scaling.contains("Unroll: Speedup changes from 0.7x to 0.8x (increasing)"));
    }

    #[test]
    fn test_infinite_speedup_is_described() {
        let t = table(&[(64, [1.0, 0.0, 0.5, 2.0]), (128, [2.0, 0.0, 1.0, 4.0])]);
        let narrative = synthesize(&t, "mv").unwrap();
        assert!(narrative.variants[0].text.contains("infx"));
        assert!(narrative.scaling.contains("AVX2: Speedup changes from infx to infx (stable)"));
    }
}
