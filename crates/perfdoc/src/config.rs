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

//! Report configuration.
//!
//! [`ReportConfig`] is an immutable value handed to the pipeline entry point.
//! It holds the fixed file names, the source-field to variant mapping used by
//! the loader, the archive file list and the fixed chapter text. Nothing in
//! the pipeline reads ambient state, so tests can run with alternate
//! configurations side by side.

use crate::error::{ReportError, Result};
use crate::variant::Variant;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default input file written by the benchmark harness.
pub const DEFAULT_INPUT: &str = "results.json";

/// Default report file name.
pub const DEFAULT_REPORT: &str = "report.pdf";

/// Default temporary chart image.
pub const DEFAULT_CHART: &str = "performance_chart.png";

/// Default log file included in the archive.
pub const DEFAULT_LOG: &str = "LOG.txt";

/// Default archiver program.
pub const DEFAULT_ARCHIVER: &str = "tar";

/// Default chart size in pixels.
pub const DEFAULT_CHART_SIZE: (u32, u32) = (1200, 700);

const DEFAULT_APPENDIX_TEXT: &str = "Each variant was built from the same sources with \
the same optimization level and timed by the benchmark harness once per problem size. \
Times are wall-clock seconds for a single run, so small differences at the smallest \
sizes are within measurement noise.\n\n\
Speedup is the baseline time divided by the variant time; values above 1.0x mean the \
variant is faster. Improvement is the relative reduction in time against the baseline, \
in percent; negative values mean the variant is slower. Problem sizes for which any \
variant failed to produce a time are excluded from every table, the chart and the \
analysis.";

/// Mapping of one source field name to a canonical variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Field name as it appears in the input.
    pub source: String,
    /// Canonical variant the field holds times for.
    pub variant: Variant,
}

impl ColumnMapping {
    /// Creates a new mapping.
    pub fn new(source: impl Into<String>, variant: Variant) -> Self {
        Self {
            source: source.into(),
            variant,
        }
    }
}

/// Immutable configuration for one report run.
///
/// # Example
///
/// ```
/// use perfdoc::config::ReportConfig;
///
/// let config = ReportConfig::default()
///     .with_input_path("bench/results.csv")
///     .with_report_path("hw1.pdf")
///     .with_title("HW1 Performance Report");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Benchmark results file.
    pub input_path: PathBuf,
    /// Final report document.
    pub report_path: PathBuf,
    /// Temporary chart image, removed after composition.
    pub chart_path: PathBuf,
    /// Log file listed in the archive.
    pub log_path: PathBuf,
    /// Document title, also used as the running page header.
    pub title: String,
    /// Name of the benchmarked routine, used in narrative text.
    pub subject: String,
    /// How the baseline was built, used in the overview chapter.
    pub baseline_description: String,
    /// Source field name to canonical variant mapping.
    pub column_map: Vec<ColumnMapping>,
    /// Field names accepted as the problem size.
    pub size_fields: Vec<String>,
    /// Source files to bundle into the archive, relative to the working
    /// directory. The report and log are appended by [`Self::archive_candidates`].
    pub archive_files: Vec<PathBuf>,
    /// External archiver program.
    pub archiver: String,
    /// Title of the closing appendix chapter.
    pub appendix_title: String,
    /// Body of the closing appendix chapter.
    pub appendix_text: String,
    /// Chart size in pixels (width, height).
    pub chart_size: (u32, u32),
}

impl ReportConfig {
    /// Default source-field mapping.
    ///
    /// Covers the canonical ids, `<id>_time` columns and the field names
    /// emitted by the matrix-vector benchmark harness.
    pub fn default_column_map() -> Vec<ColumnMapping> {
        let mut map = Vec::new();
        for variant in Variant::ALL {
            map.push(ColumnMapping::new(variant.id(), variant));
            map.push(ColumnMapping::new(format!("{}_time", variant.id()), variant));
        }
        map.push(ColumnMapping::new("baseline_Mv_time", Variant::Baseline));
        map.push(ColumnMapping::new("hw1_avx2_time", Variant::Avx2));
        map.push(ColumnMapping::new("hw1_unroll_time", Variant::Unroll));
        map.push(ColumnMapping::new("hw1_interchange_time", Variant::Interchange));
        map
    }

    /// Loads a configuration file. YAML is used for `.yaml`/`.yml`, JSON
    /// otherwise. Missing fields take their default values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::invalid_config(path.display().to_string(), format!("cannot read file: {}", e))
        })?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let config: ReportConfig = if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| ReportError::invalid_config(path.display().to_string(), e.to_string()))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| ReportError::invalid_config(path.display().to_string(), e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.column_map.is_empty() {
            return Err(ReportError::invalid_config("column_map", "must not be empty"));
        }
        for variant in Variant::ALL {
            if !self.column_map.iter().any(|m| m.variant == variant) {
                return Err(ReportError::invalid_config(
                    "column_map",
                    format!("no source field maps to variant '{}'", variant),
                ));
            }
        }
        for mapping in &self.column_map {
            let claimed: Vec<Variant> = self
                .column_map
                .iter()
                .filter(|m| m.source == mapping.source)
                .map(|m| m.variant)
                .collect();
            if claimed.iter().any(|v| *v != mapping.variant) {
                return Err(ReportError::invalid_config(
                    "column_map",
                    format!("field '{}' maps to more than one variant", mapping.source),
                ));
            }
        }
        if self.size_fields.is_empty() {
            return Err(ReportError::invalid_config("size_fields", "must not be empty"));
        }
        for (name, path) in [
            ("input_path", &self.input_path),
            ("report_path", &self.report_path),
            ("chart_path", &self.chart_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ReportError::invalid_config(name, "must not be empty"));
            }
        }
        if self.archiver.trim().is_empty() {
            return Err(ReportError::invalid_config("archiver", "must not be empty"));
        }
        if self.chart_size.0 == 0 || self.chart_size.1 == 0 {
            return Err(ReportError::invalid_config("chart_size", "must be non-zero"));
        }
        Ok(())
    }

    /// Looks up the variant a source field maps to.
    pub fn variant_for(&self, field: &str) -> Option<Variant> {
        self.column_map
            .iter()
            .find(|m| m.source == field)
            .map(|m| m.variant)
    }

    /// Returns whether the field names the problem size.
    pub fn is_size_field(&self, field: &str) -> bool {
        self.size_fields.iter().any(|f| f == field)
    }

    /// Sets the input file.
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Every file the packager should try to bundle: the declared sources,
    /// then the report, then the log, without duplicates.
    pub fn archive_candidates(&self) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = Vec::with_capacity(self.archive_files.len() + 2);
        let declared = self.archive_files.iter();
        for file in declared.chain([&self.report_path, &self.log_path]) {
            if !candidates.contains(file) {
                candidates.push(file.clone());
            }
        }
        candidates
    }

    /// Sets the report file.
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    /// Sets the log file listed in the archive.
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    /// Sets the temporary chart file.
    pub fn with_chart_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chart_path = path.into();
        self
    }

    /// Sets the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the column map.
    pub fn with_column_map(mut self, column_map: Vec<ColumnMapping>) -> Self {
        self.column_map = column_map;
        self
    }

    /// Replaces the archive file list.
    pub fn with_archive_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.archive_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the archiver program.
    pub fn with_archiver(mut self, archiver: impl Into<String>) -> Self {
        self.archiver = archiver.into();
        self
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            report_path: PathBuf::from(DEFAULT_REPORT),
            chart_path: PathBuf::from(DEFAULT_CHART),
            log_path: PathBuf::from(DEFAULT_LOG),
            title: "Performance Report".to_string(),
            subject: "matrix-vector multiplication".to_string(),
            baseline_description: "a baseline compiled with g++ -O3".to_string(),
            column_map: Self::default_column_map(),
            size_fields: vec!["n".to_string(), "size".to_string()],
            archive_files: vec![
                PathBuf::from("Mv.cpp"),
                PathBuf::from("hw1.cpp"),
                PathBuf::from("Makefile"),
                PathBuf::from("run_benchmarks.sh"),
            ],
            archiver: DEFAULT_ARCHIVER.to_string(),
            appendix_title: "Methodology".to_string(),
            appendix_text: DEFAULT_APPENDIX_TEXT.to_string(),
            chart_size: DEFAULT_CHART_SIZE,
        }
    }
}
