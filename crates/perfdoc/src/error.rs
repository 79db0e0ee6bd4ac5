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

//! Error types for the report pipeline.
//!
//! Every fatal condition in the pipeline is a [`ReportError`] variant. Each
//! variant knows which pipeline [`Stage`] raises it, so the CLI can print a
//! diagnostic naming the failing stage. Non-fatal conditions (dropped input
//! rows, missing archive files) are not errors; they are logged and carried
//! in the stage outputs instead.

use crate::variant::Variant;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for report pipeline operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Pipeline stage, used to attribute errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Configuration loading and validation.
    Config,
    /// Reading and normalizing the input file.
    Load,
    /// Filtering rows and computing metrics.
    Derive,
    /// Rendering the comparison chart.
    Chart,
    /// Writing the document artifact.
    Emit,
    /// Building the archive.
    Package,
}

impl Stage {
    /// Returns the stage as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Config => "config",
            Stage::Load => "load",
            Stage::Derive => "derive",
            Stage::Chart => "chart",
            Stage::Emit => "emit",
            Stage::Package => "package",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a report run.
///
/// # Examples
///
/// ```
/// use perfdoc::error::{ReportError, Stage};
///
/// let err = ReportError::malformed("results.json", "expected an array or object");
/// assert_eq!(err.stage(), Stage::Load);
/// assert!(err.to_string().contains("results.json"));
/// ```
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input cannot be parsed as tabular timing data.
    #[error("Malformed input '{source_name}': {reason}")]
    MalformedInput {
        /// Path or label of the offending input.
        source_name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A declared variant has no column in any record.
    #[error("Missing column: no record contains data for variant '{variant}'")]
    MissingColumn {
        /// The variant without data.
        variant: Variant,
    },

    /// The input parsed but no row has a value for every variant.
    #[error("Empty result set: no problem size has a valid time for every variant")]
    EmptyResultSet,

    /// The chart or document engine failed to produce its artifact.
    #[error("Failed to render {artifact}: {message}")]
    Render {
        /// Artifact being produced (e.g. "chart", "report").
        artifact: String,
        /// Engine error message.
        message: String,
    },

    /// The external archiver could not be run or exited unsuccessfully.
    #[error("Archiver '{command}' failed: {reason}")]
    ArchiveProcess {
        /// Command line that was attempted.
        command: String,
        /// Spawn error or captured stderr.
        reason: String,
    },

    /// Invalid configuration parameter.
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name.
        parameter: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// I/O failure outside the input file (config files, extra exports).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error.
        path: PathBuf,
        /// The error message.
        message: String,
    },
}

impl ReportError {
    /// Create a malformed input error.
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a render error for the named artifact.
    pub fn render(artifact: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Render {
            artifact: artifact.into(),
            message: message.to_string(),
        }
    }

    /// Create an archiver failure.
    pub fn archive(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ArchiveProcess {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// The pipeline stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            ReportError::MalformedInput { .. } | ReportError::MissingColumn { .. } => Stage::Load,
            ReportError::EmptyResultSet => Stage::Derive,
            ReportError::Render { artifact, .. } if artifact == "chart" => Stage::Chart,
            ReportError::Render { .. } => Stage::Emit,
            ReportError::ArchiveProcess { .. } => Stage::Package,
            ReportError::InvalidConfig { .. } => Stage::Config,
            ReportError::Io { .. } => Stage::Emit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = ReportError::malformed("results.json", "size must be positive");
        assert_eq!(
            err.to_string(),
            "Malformed input 'results.json': size must be positive"
        );
    }

    #[test]
    fn test_missing_column_display() {
        let err = ReportError::MissingColumn {
            variant: Variant::Unroll,
        };
        assert!(err.to_string().contains("'unroll'"));
    }

    #[test]
    fn test_stage_attribution() {
        assert_eq!(ReportError::EmptyResultSet.stage(), Stage::Derive);
        assert_eq!(ReportError::render("chart", "no font").stage(), Stage::Chart);
        assert_eq!(ReportError::render("report", "disk full").stage(), Stage::Emit);
        assert_eq!(ReportError::archive("tar cvf x.tar", "exit 2").stage(), Stage::Package);
        assert_eq!(
            ReportError::invalid_config("column_map", "empty").stage(),
            Stage::Config
        );
    }

    #[test]
    fn test_every_stage_has_an_error() {
        let stages: Vec<Stage> = [
            ReportError::invalid_config("title", "empty"),
            ReportError::malformed("results.json", "bad"),
            ReportError::EmptyResultSet,
            ReportError::render("chart", "no font"),
            ReportError::render("report", "disk full"),
            ReportError::archive("tar", "exit 2"),
        ]
        .iter()
        .map(ReportError::stage)
        .collect();

        for stage in &stages {
            // Exhaustive so a new stage without an error fails to compile here.
            match stage {
                Stage::Config
                | Stage::Load
                | Stage::Derive
                | Stage::Chart
                | Stage::Emit
                | Stage::Package => {}
            }
        }
        let names: Vec<&str> = stages.iter().map(Stage::as_str).collect();
        assert_eq!(names, vec!["config", "load", "derive", "chart", "emit", "package"]);
    }

    #[test]
    fn test_io_error_display() {
        let err = ReportError::io_error(
            "out/report.md",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("out/report.md"));
        assert!(msg.contains("permission denied"));
    }
}
