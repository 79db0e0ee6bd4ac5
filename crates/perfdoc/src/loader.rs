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

//! Result set loader.
//!
//! Parses benchmark results into a [`ResultTable`]. Three shapes are
//! accepted from JSON and YAML, plus CSV with a header row:
//!
//! - an array of flat records: `[{"n": 256, "baseline": 1.0, "avx2": 0.5}]`
//! - a mapping from size to per-variant times: `{"256": {"baseline": 1.0}}`
//! - a column-oriented frame: `{"n": {"0": 256}, "baseline": {"0": 1.0}}`
//!
//! Source field names are mapped to canonical variants with the configured
//! column map; unmapped fields are ignored. A `null`, missing or `NA` value
//! is an absent sample, which is distinct from a measured zero.

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::model::{ResultRow, ResultTable};
use crate::variant::Variant;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Cell spellings treated as an absent sample.
const ABSENT_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null", "none", "failed"];

/// Serialization of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Pick by file extension, falling back to JSON.
    #[default]
    Auto,
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
    /// CSV with a header row.
    Csv,
}

impl InputFormat {
    /// Resolves `Auto` against a file path.
    pub fn resolve(self, path: &Path) -> InputFormat {
        if self != InputFormat::Auto {
            return self;
        }
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => InputFormat::Csv,
            Some("yaml") | Some("yml") => InputFormat::Yaml,
            _ => InputFormat::Json,
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "json" => Ok(InputFormat::Json),
            "yaml" | "yml" => Ok(InputFormat::Yaml),
            "csv" => Ok(InputFormat::Csv),
            other => Err(format!("unknown input format '{}'", other)),
        }
    }
}

type Record = Vec<(String, Value)>;

/// Loads benchmark results using the column map of a [`ReportConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ResultSetLoader<'a> {
    config: &'a ReportConfig,
}

impl<'a> ResultSetLoader<'a> {
    /// Creates a loader bound to a configuration.
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Reads and parses a results file.
    ///
    /// An unreadable file is reported as malformed input, since the run
    /// cannot proceed and nothing has been written yet.
    pub fn load_file(&self, path: &Path, format: InputFormat) -> Result<ResultTable> {
        let source_name = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| ReportError::malformed(&source_name, format!("cannot read file: {}", e)))?;
        self.load_str(&content, format.resolve(path), &source_name)
    }

    /// Parses results from a string.
    ///
    /// # Arguments
    ///
    /// * `content` - Serialized results
    /// * `format` - Serialization; `Auto` is treated as JSON
    /// * `source_name` - Label used in error messages
    ///
    /// # Errors
    ///
    /// - [`ReportError::MalformedInput`] if the content is not tabular, a
    ///   size is not a positive integer, a time is negative or not numeric,
    ///   or a (size, variant) pair appears twice.
    /// - [`ReportError::MissingColumn`] if a variant has no column in any
    ///   record of a non-empty input.
    pub fn load_str(
        &self,
        content: &str,
        format: InputFormat,
        source_name: &str,
    ) -> Result<ResultTable> {
        let records = match format {
            InputFormat::Csv => csv_records(content, source_name)?,
            InputFormat::Yaml => {
                let yaml: serde_yaml::Value = serde_yaml::from_str(content)
                    .map_err(|e| ReportError::malformed(source_name, e.to_string()))?;
                let value = serde_json::to_value(yaml)
                    .map_err(|e| ReportError::malformed(source_name, e.to_string()))?;
                self.value_records(value, source_name)?
            }
            InputFormat::Json | InputFormat::Auto => {
                let value: Value = serde_json::from_str(content)
                    .map_err(|e| ReportError::malformed(source_name, e.to_string()))?;
                self.value_records(value, source_name)?
            }
        };

        let table = self.normalize(records, source_name)?;
        debug!(source = source_name, rows = table.len(), "loaded result table");
        Ok(table)
    }

    fn value_records(&self, value: Value, source_name: &str) -> Result<Vec<Record>> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(map) => Ok(map.into_iter().collect()),
                    other => Err(ReportError::malformed(
                        source_name,
                        format!("record {} is {}, expected an object", i, kind(&other)),
                    )),
                })
                .collect(),
            Value::Object(map) => {
                let column_oriented = map
                    .iter()
                    .any(|(k, v)| self.config.is_size_field(k) && v.is_object());
                if column_oriented {
                    column_records(map, source_name)
                } else {
                    self.size_keyed_records(map, source_name)
                }
            }
            other => Err(ReportError::malformed(
                source_name,
                format!("top level is {}, expected an array or object", kind(&other)),
            )),
        }
    }

    fn size_keyed_records(&self, map: Map<String, Value>, source_name: &str) -> Result<Vec<Record>> {
        let size_field = self
            .config
            .size_fields
            .first()
            .cloned()
            .ok_or_else(|| ReportError::invalid_config("size_fields", "must not be empty"))?;
        map.into_iter()
            .map(|(key, value)| match value {
                Value::Object(fields) => {
                    let mut record: Record = fields.into_iter().collect();
                    record.push((size_field.clone(), Value::String(key)));
                    Ok(record)
                }
                other => Err(ReportError::malformed(
                    source_name,
                    format!("entry for size '{}' is {}, expected an object", key, kind(&other)),
                )),
            })
            .collect()
    }

    fn normalize(&self, records: Vec<Record>, source_name: &str) -> Result<ResultTable> {
        if records.is_empty() {
            return Ok(ResultTable::default());
        }

        let mut seen = [false; Variant::COUNT];
        let mut rows: BTreeMap<u64, ResultRow> = BTreeMap::new();

        for (i, record) in records.into_iter().enumerate() {
            let size_value = record
                .iter()
                .find(|(field, _)| self.config.is_size_field(field))
                .map(|(_, v)| v)
                .ok_or_else(|| {
                    ReportError::malformed(
                        source_name,
                        format!(
                            "record {} has no size field (expected one of: {})",
                            i,
                            self.config.size_fields.join(", ")
                        ),
                    )
                })?;
            let size = parse_size(size_value)
                .map_err(|reason| ReportError::malformed(source_name, format!("record {}: {}", i, reason)))?;

            let row = rows.entry(size).or_insert_with(|| ResultRow::empty(size));

            for (field, value) in &record {
                let Some(variant) = self.config.variant_for(field) else {
                    continue;
                };
                seen[variant.index()] = true;

                let time = parse_time(value).map_err(|reason| {
                    ReportError::malformed(
                        source_name,
                        format!("size {}, field '{}': {}", size, field, reason),
                    )
                })?;
                let Some(time) = time else {
                    continue;
                };

                let slot = &mut row.times[variant.index()];
                if slot.is_some() {
                    return Err(ReportError::malformed(
                        source_name,
                        format!("duplicate sample for size {} and variant '{}'", size, variant),
                    ));
                }
                *slot = Some(time);
            }
        }

        if let Some(variant) = Variant::ALL.into_iter().find(|v| !seen[v.index()]) {
            return Err(ReportError::MissingColumn { variant });
        }

        Ok(ResultTable::new(rows.into_values().collect()))
    }
}

fn csv_records(content: &str, source_name: &str) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ReportError::malformed(source_name, e.to_string()))?
        .clone();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| ReportError::malformed(source_name, e.to_string()))?;
        let record = headers
            .iter()
            .zip(row.iter())
            .map(|(h, cell)| {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (h.to_string(), value)
            })
            .collect();
        records.push(record);
    }
    Ok(records)
}

/// Transposes a column-oriented frame into records keyed by row label.
fn column_records(map: Map<String, Value>, source_name: &str) -> Result<Vec<Record>> {
    let mut by_label: BTreeMap<String, Record> = BTreeMap::new();
    for (column, cells) in map {
        let cells = match cells {
            Value::Object(cells) => cells,
            other => {
                return Err(ReportError::malformed(
                    source_name,
                    format!("column '{}' is {}, expected an object", column, kind(&other)),
                ))
            }
        };
        for (label, value) in cells {
            by_label
                .entry(label)
                .or_default()
                .push((column.clone(), value));
        }
    }
    Ok(by_label.into_values().collect())
}

fn parse_size(value: &Value) -> std::result::Result<u64, String> {
    let size = match value {
        Value::Number(n) => match n.as_u64() {
            Some(u) => Some(u),
            None => n.as_f64().and_then(integral),
        },
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    };
    match size {
        Some(0) => Err("size must be a positive integer, got 0".to_string()),
        Some(size) => Ok(size),
        None => Err(format!("size must be a positive integer, got {}", value)),
    }
}

fn integral(f: f64) -> Option<u64> {
    if f.is_finite() && f >= 1.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

/// Parses a time cell. `Ok(None)` is an absent sample.
fn parse_time(value: &Value) -> std::result::Result<Option<f64>, String> {
    let time = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("time {} is not representable", n))?,
        Value::String(s) => {
            let s = s.trim();
            if ABSENT_MARKERS.iter().any(|m| m.eq_ignore_ascii_case(s)) {
                return Ok(None);
            }
            s.parse::<f64>()
                .map_err(|_| format!("time '{}' is not a number", s))?
        }
        other => return Err(format!("time is {}, expected a number", kind(other))),
    };

    if !time.is_finite() {
        // Timed-out runs are recorded as infinity by the harness.
        debug!(time, "treating non-finite time as a failed run");
        return Ok(None);
    }
    if time < 0.0 {
        return Err(format!("time {} is negative", time));
    }
    Ok(Some(time))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
