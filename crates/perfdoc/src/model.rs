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

//! Tabular data model for timing results.
//!
//! The types form a chain, each produced from the previous one and never
//! edited in place:
//!
//! ```text
//! ResultTable (Option<f64> per variant)
//!     └─ split_complete() ─> CompleteTable (f64 per variant)
//!                                └─ metrics::derive() ─> DerivedTable
//! ```

use crate::variant::Variant;
use serde::Serialize;

/// One problem size with a possibly-absent time per variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// Problem size.
    pub size: u64,
    /// Times indexed by [`Variant::index`].
    pub times: [Option<f64>; Variant::COUNT],
}

impl ResultRow {
    /// Creates a row with every time absent.
    pub fn empty(size: u64) -> Self {
        Self {
            size,
            times: [None; Variant::COUNT],
        }
    }

    /// Time for a variant, if measured.
    pub fn time(&self, variant: Variant) -> Option<f64> {
        self.times[variant.index()]
    }

    /// Variants without a time in this row, in declaration order.
    pub fn missing(&self) -> Vec<Variant> {
        Variant::ALL
            .into_iter()
            .filter(|v| self.time(*v).is_none())
            .collect()
    }

    /// Returns whether every variant has a time.
    pub fn is_complete(&self) -> bool {
        self.times.iter().all(Option::is_some)
    }
}

/// A row removed by the all-or-nothing filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedRow {
    /// Problem size of the removed row.
    pub size: u64,
    /// Variants that had no time.
    pub missing: Vec<Variant>,
}

/// Timing results keyed by ascending, unique problem size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Builds a table, sorting rows by size.
    ///
    /// Callers guarantee sizes are unique; the loader rejects duplicates
    /// before constructing the table.
    pub fn new(mut rows: Vec<ResultRow>) -> Self {
        rows.sort_by_key(|r| r.size);
        Self { rows }
    }

    /// Rows in ascending size order.
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Applies the all-or-nothing row filter.
    ///
    /// Rows with a time for every variant are kept exactly once, in order;
    /// every other row is reported as dropped.
    pub fn split_complete(&self) -> (CompleteTable, Vec<DroppedRow>) {
        let mut kept = Vec::new();
        let mut dropped = Vec::new();

        for row in &self.rows {
            let mut times = [0.0; Variant::COUNT];
            let mut complete = true;
            for variant in Variant::ALL {
                match row.time(variant) {
                    Some(t) => times[variant.index()] = t,
                    None => complete = false,
                }
            }
            if complete {
                kept.push(TimedRow {
                    size: row.size,
                    times,
                });
            } else {
                dropped.push(DroppedRow {
                    size: row.size,
                    missing: row.missing(),
                });
            }
        }

        (CompleteTable { rows: kept }, dropped)
    }
}

/// A row with a time for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedRow {
    /// Problem size.
    pub size: u64,
    /// Times indexed by [`Variant::index`].
    pub times: [f64; Variant::COUNT],
}

impl TimedRow {
    /// Time for a variant.
    pub fn time(&self, variant: Variant) -> f64 {
        self.times[variant.index()]
    }
}

/// A result table in which every row is complete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompleteTable {
    rows: Vec<TimedRow>,
}

impl CompleteTable {
    /// Rows in ascending size order.
    pub fn rows(&self) -> &[TimedRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Comparison of one optimized variant against the baseline at one size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metric {
    /// `baseline / variant`; `+inf` when the variant time is zero.
    pub speedup: f64,
    /// `(baseline - variant) / baseline * 100`.
    pub improvement_pct: f64,
}

impl Metric {
    /// Returns whether the variant beat the baseline.
    pub fn is_faster(&self) -> bool {
        self.speedup > 1.0
    }
}

/// A complete row augmented with per-variant metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedRow {
    /// Problem size.
    pub size: u64,
    /// Times indexed by [`Variant::index`].
    pub times: [f64; Variant::COUNT],
    /// Metrics indexed by [`Variant::optimized_index`].
    pub metrics: [Metric; Variant::OPTIMIZED_COUNT],
}

impl DerivedRow {
    /// Time for a variant.
    pub fn time(&self, variant: Variant) -> f64 {
        self.times[variant.index()]
    }

    /// Metrics for an optimized variant, `None` for the baseline.
    pub fn metric(&self, variant: Variant) -> Option<&Metric> {
        variant.optimized_index().map(|i| &self.metrics[i])
    }

    /// Speedup of an optimized variant. The baseline's speedup is 1.0.
    pub fn speedup(&self, variant: Variant) -> f64 {
        self.metric(variant).map_or(1.0, |m| m.speedup)
    }

    /// Improvement of an optimized variant. The baseline's is 0.0.
    pub fn improvement(&self, variant: Variant) -> f64 {
        self.metric(variant).map_or(0.0, |m| m.improvement_pct)
    }
}

/// Output of the metric deriver, in ascending size order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedTable {
    rows: Vec<DerivedRow>,
}

impl DerivedTable {
    pub(crate) fn from_rows(rows: Vec<DerivedRow>) -> Self {
        Self { rows }
    }

    /// Rows in ascending size order.
    pub fn rows(&self) -> &[DerivedRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Problem sizes in order.
    pub fn sizes(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.size).collect()
    }

    /// First (smallest size) row.
    pub fn first(&self) -> Option<&DerivedRow> {
        self.rows.first()
    }

    /// Last (largest size) row.
    pub fn last(&self) -> Option<&DerivedRow> {
        self.rows.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_by_size() {
        let table = ResultTable::new(vec![ResultRow::empty(512), ResultRow::empty(256)]);
        let sizes: Vec<u64> = table.rows().iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![256, 512]);
    }

    #[test]
    fn test_split_complete_is_all_or_nothing() {
        let mut full = ResultRow::empty(256);
        full.times = [Some(1.0), Some(0.5), Some(0.8), Some(2.0)];
        let mut partial = ResultRow::empty(1024);
        partial.times = [Some(4.0), None, Some(3.0), Some(9.0)];

        let (complete, dropped) = ResultTable::new(vec![partial, full]).split_complete();
        assert_eq!(complete.len(), 1);
        assert_eq!(complete.rows()[0].size, 256);
        assert_eq!(
            dropped,
            vec![DroppedRow {
                size: 1024,
                missing: vec![Variant::Avx2],
            }]
        );
    }

    #[test]
    fn test_zero_time_is_not_absent() {
        let mut row = ResultRow::empty(64);
        row.times = [Some(0.0); Variant::COUNT];
        assert!(row.is_complete());
        assert!(row.missing().is_empty());
    }

    #[test]
    fn test_baseline_metric_accessors() {
        let row = DerivedRow {
            size: 8,
            times: [1.0, 0.5, 0.5, 2.0],
            metrics: [Metric {
                speedup: 2.0,
                improvement_pct: 50.0,
            }; Variant::OPTIMIZED_COUNT],
        };
        assert!(row.metric(Variant::Baseline).is_none());
        assert_eq!(row.speedup(Variant::Baseline), 1.0);
        assert_eq!(row.improvement(Variant::Avx2), 50.0);
    }
}
