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

//! JSON export of derived metrics.
//!
//! JSON has no representation for infinity, so infinite speedups and
//! improvements are written as `null`.

use crate::error::{ReportError, Result};
use crate::model::{DerivedTable, DroppedRow};
use crate::variant::Variant;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

fn finite(value: f64) -> Value {
    if value.is_finite() {
        json!(value)
    } else {
        Value::Null
    }
}

/// Builds the JSON document for a derived table.
pub fn to_value(table: &DerivedTable, dropped: &[DroppedRow]) -> Value {
    let rows: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| {
            let mut times = Map::new();
            for variant in Variant::ALL {
                times.insert(variant.id().to_string(), finite(row.time(variant)));
            }
            let mut metrics = Map::new();
            for variant in Variant::OPTIMIZED {
                metrics.insert(
                    variant.id().to_string(),
                    json!({
                        "speedup": finite(row.speedup(variant)),
                        "improvement_pct": finite(row.improvement(variant)),
                    }),
                );
            }
            json!({
                "n": row.size,
                "times": times,
                "metrics": metrics,
            })
        })
        .collect();

    json!({
        "variants": Variant::ALL.iter().map(|v| v.id()).collect::<Vec<_>>(),
        "rows": rows,
        "dropped": dropped,
    })
}

/// Serializes a derived table as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ReportError::Render`] if serialization fails.
pub fn to_json(table: &DerivedTable, dropped: &[DroppedRow]) -> Result<String> {
    serde_json::to_string_pretty(&to_value(table, dropped))
        .map_err(|e| ReportError::render("json", e))
}

/// Writes the JSON export to `path`.
pub fn export_json(table: &DerivedTable, dropped: &[DroppedRow], path: &Path) -> Result<()> {
    fs::write(path, to_json(table, dropped)?).map_err(|e| ReportError::io_error(path, e))
}
