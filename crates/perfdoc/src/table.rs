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

//! Table formatter.
//!
//! Renders the derived table as three fixed-width text tables: raw times,
//! speedup factors and percentage improvements. Column order follows
//! [`Variant::ALL`] / [`Variant::OPTIMIZED`]. Rust's float formatting is
//! locale-independent, so output never contains thousands separators or a
//! decimal comma.

use crate::model::DerivedTable;
use crate::variant::Variant;
use serde::Serialize;

/// Title of the execution time table.
pub const TIMES_TITLE: &str = "Execution Times (seconds)";

/// Title of the speedup table.
pub const SPEEDUP_TITLE: &str = "Speedup Factors (relative to baseline)";

/// Title of the improvement table.
pub const IMPROVEMENT_TITLE: &str = "Performance Improvements (% relative to baseline)";

const SIZE_HEADER: &str = "n";
const COLUMN_GAP: &str = "  ";

/// A titled table of pre-formatted cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextTable {
    /// Table caption.
    pub title: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Rows of formatted cells, one cell per header.
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Width of each column: the widest of its header and cells.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }
        widths
    }

    /// Renders header, separator and rows with right-aligned columns.
    pub fn render(&self) -> Vec<String> {
        let widths = self.column_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        lines.push(join_aligned(&self.headers, &widths));
        let total = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
        lines.push("-".repeat(total));
        for row in &self.rows {
            lines.push(join_aligned(row, &widths));
        }
        lines
    }
}

fn join_aligned(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:>width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
}

/// Formats seconds with 6 decimals.
pub fn format_time(seconds: f64) -> String {
    format!("{:.6}", seconds)
}

/// Formats a speedup factor with 2 decimals and an `x` suffix.
pub fn format_speedup(speedup: f64) -> String {
    if speedup.is_infinite() {
        return "infx".to_string();
    }
    format!("{:.2}x", speedup)
}

/// Formats an improvement with an explicit sign, 1 decimal and `%`.
pub fn format_improvement(pct: f64) -> String {
    if pct.is_infinite() {
        return if pct > 0.0 { "+inf%" } else { "-inf%" }.to_string();
    }
    format!("{:+.1}%", pct)
}

fn headers(variants: &[Variant]) -> Vec<String> {
    std::iter::once(SIZE_HEADER.to_string())
        .chain(variants.iter().map(|v| v.label().to_string()))
        .collect()
}

/// Raw execution time per size and variant.
pub fn execution_times(table: &DerivedTable) -> TextTable {
    TextTable {
        title: TIMES_TITLE.to_string(),
        headers: headers(&Variant::ALL),
        rows: table
            .rows()
            .iter()
            .map(|row| {
                std::iter::once(row.size.to_string())
                    .chain(Variant::ALL.iter().map(|v| format_time(row.time(*v))))
                    .collect()
            })
            .collect(),
    }
}

/// Speedup factor per size and optimized variant.
pub fn speedup_factors(table: &DerivedTable) -> TextTable {
    TextTable {
        title: SPEEDUP_TITLE.to_string(),
        headers: headers(&Variant::OPTIMIZED),
        rows: table
            .rows()
            .iter()
            .map(|row| {
                std::iter::once(row.size.to_string())
                    .chain(row.metrics.iter().map(|m| format_speedup(m.speedup)))
                    .collect()
            })
            .collect(),
    }
}

/// Percentage improvement per size and optimized variant.
pub fn improvements(table: &DerivedTable) -> TextTable {
    TextTable {
        title: IMPROVEMENT_TITLE.to_string(),
        headers: headers(&Variant::OPTIMIZED),
        rows: table
            .rows()
            .iter()
            .map(|row| {
                std::iter::once(row.size.to_string())
                    .chain(row.metrics.iter().map(|m| format_improvement(m.improvement_pct)))
                    .collect()
            })
            .collect(),
    }
}

/// The three analysis tables in report order.
pub fn analysis_tables(table: &DerivedTable) -> [TextTable; 3] {
    [
        execution_times(table),
        speedup_factors(table),
        improvements(table),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive;
    use crate::model::{ResultRow, ResultTable};

    fn derived() -> DerivedTable {
        let mut a = ResultRow::empty(256);
        a.times = [Some(1.0), Some(0.5), Some(0.8), Some(2.0)];
        let mut b = ResultRow::empty(4096);
        b.times = [Some(12.5), Some(2.5), Some(10.0), Some(50.0)];
        derive(&ResultTable::new(vec![a, b]).split_complete().0)
    }

    #[test]
    fn test_cell_formats() {
        assert_eq!(format_time(0.0123456789), "0.012346");
        assert_eq!(format_time(1234.5), "1234.500000");
        assert_eq!(format_speedup(2.0), "2.00x");
        assert_eq!(format_speedup(f64::INFINITY), "infx");
        assert_eq!(format_improvement(50.0), "+50.0%");
        assert_eq!(format_improvement(-300.0), "-300.0%");
        assert_eq!(format_improvement(0.0), "+0.0%");
        assert_eq!(format_improvement(f64::NEG_INFINITY), "-inf%");
    }

    #[test]
    fn test_headers_follow_declaration_order() {
        let [times, speedups, improvements] = analysis_tables(&derived());
        assert_eq!(times.headers, vec!["n", "Baseline", "AVX2", "Unroll", "Interchange"]);
        assert_eq!(speedups.headers, vec!["n", "AVX2", "Unroll", "Interchange"]);
        assert_eq!(improvements.headers, speedups.headers);
        assert_eq!(times.title, TIMES_TITLE);
    }

    #[test]
    fn test_rows() {
        let table = derived();
        assert_eq!(
            execution_times(&table).rows[0],
            vec!["256", "1.000000", "0.500000", "0.800000", "2.000000"]
        );
        assert_eq!(speedup_factors(&table).rows[1], vec!["4096", "5.00x", "1.25x", "0.25x"]);
        assert_eq!(
            improvements(&table).rows[1],
            vec!["4096", "+80.0%", "+20.0%", "-300.0%"]
        );
    }

    #[test]
    fn test_render_alignment() {
        let lines = speedup_factors(&derived()).render();
        assert_eq!(lines.len(), 4);
        let width = lines[0].len();
        assert!(lines.iter().all(|l| l.len() == width));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with(" 256"));
        assert!(lines[3].ends_with("0.25x"));
    }
}
