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

//! Metric deriver.
//!
//! Computes speedup and percentage improvement of every optimized variant
//! relative to the baseline. Pure: no I/O, no hidden state.

use crate::model::{CompleteTable, DerivedRow, DerivedTable, Metric, TimedRow};
use crate::variant::Variant;

/// Compares one variant time against the baseline time.
///
/// A zero variant time yields an infinite speedup, which is reported rather
/// than treated as an error. Two zero times compare as equal: speedup 1.0 and
/// improvement 0%. A zero baseline against a nonzero variant gives `-inf`.
///
/// # Examples
///
/// ```
/// use perfdoc::metrics::compare;
///
/// let m = compare(2.0, 0.4);
/// assert!((m.speedup - 5.0).abs() < 1e-12);
/// assert!((m.improvement_pct - 80.0).abs() < 1e-12);
/// assert!(compare(1.0, 0.0).speedup.is_infinite());
/// ```
pub fn compare(baseline: f64, variant: f64) -> Metric {
    let speedup = if variant == 0.0 {
        if baseline == 0.0 {
            1.0
        } else {
            f64::INFINITY
        }
    } else {
        baseline / variant
    };

    let improvement_pct = if baseline == 0.0 {
        if variant == 0.0 {
            0.0
        } else {
            f64::NEG_INFINITY
        }
    } else {
        (baseline - variant) / baseline * 100.0
    };

    Metric {
        speedup,
        improvement_pct,
    }
}

/// Derives metrics for one complete row.
pub fn derive_row(row: &TimedRow) -> DerivedRow {
    let baseline = row.time(Variant::Baseline);
    let metrics = Variant::OPTIMIZED.map(|v| compare(baseline, row.time(v)));
    DerivedRow {
        size: row.size,
        times: row.times,
        metrics,
    }
}

/// Derives metrics for every row, preserving ascending size order.
pub fn derive(table: &CompleteTable) -> DerivedTable {
    DerivedTable::from_rows(table.rows().iter().map(derive_row).collect())
}

/// Arithmetic mean of a variant's speedup across all rows.
///
/// Returns `None` for an empty table or the baseline.
pub fn mean_speedup(table: &DerivedTable, variant: Variant) -> Option<f64> {
    if table.is_empty() || variant.is_baseline() {
        return None;
    }
    let sum: f64 = table.rows().iter().map(|r| r.speedup(variant)).sum();
    Some(sum / table.len() as f64)
}
