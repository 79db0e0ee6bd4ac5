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

//! Console summary of processed results.

use crate::model::{DerivedTable, DroppedRow};
use crate::narrative::Narrative;
use crate::table::analysis_tables;

const RULE_WIDTH: usize = 80;

/// Formats the analysis tables, dropped sizes and optional narrative.
pub fn format_summary(
    table: &DerivedTable,
    dropped: &[DroppedRow],
    narrative: Option<&Narrative>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    out.push_str("BENCHMARK SUMMARY\n");
    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    out.push_str(&format!("Problem sizes: {}\n", table.len()));

    if !dropped.is_empty() {
        out.push_str("\nExcluded sizes:\n");
        for row in dropped {
            let missing: Vec<&str> = row.missing.iter().map(|v| v.id()).collect();
            out.push_str(&format!("  - n={} (missing: {})\n", row.size, missing.join(", ")));
        }
    }

    for text_table in analysis_tables(table) {
        out.push_str(&format!("\n{}\n", text_table.title));
        for line in text_table.render() {
            out.push_str(&line);
            out.push('\n');
        }
    }

    if let Some(narrative) = narrative {
        out.push_str(&format!("\n{}\n", "-".repeat(RULE_WIDTH)));
        out.push_str("ANALYSIS:\n");
        out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));
        for paragraph in narrative.paragraphs() {
            out.push_str(&paragraph);
            out.push_str("\n\n");
        }
    }

    out
}

/// Prints the summary to stdout.
pub fn print_summary(table: &DerivedTable, dropped: &[DroppedRow], narrative: Option<&Narrative>) {
    print!("{}", format_summary(table, dropped, narrative));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive;
    use crate::model::{ResultRow, ResultTable};
    use crate::variant::Variant;

    #[test]
    fn test_summary_lists_tables_and_drops() {
        let mut row = ResultRow::empty(256);
        row.times = [Some(1.0), Some(0.5), Some(0.8), Some(2.0)];
        let table = derive(&ResultTable::new(vec![row]).split_complete().0);
        let dropped = [DroppedRow {
            size: 512,
            missing: vec![Variant::Unroll, Variant::Interchange],
        }];

        let text = format_summary(&table, &dropped, None);
        assert!(text.contains("Problem sizes: 1"));
        assert!(text.contains("n=512 (missing: unroll, interchange)"));
        assert!(text.contains("Execution Times (seconds)"));
        assert!(text.contains("Performance Improvements (% relative to baseline)"));
        assert!(!text.contains("ANALYSIS:"));
    }
}
