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

//! Report pipeline.
//!
//! Runs the stages in order:
//!
//! ```text
//! load -> split complete rows -> derive -> narrative
//!      -> chart -> compose -> emit -> [markdown, json] -> [package]
//! ```
//!
//! Empty input is refused before any artifact is created. The chart image is
//! temporary: it is deleted once the report is emitted, and also when a
//! later stage fails.

use crate::archive::{ArchiveOutcome, ArtifactPackager};
use crate::chart::ChartEngine;
use crate::composer::ReportComposer;
use crate::config::ReportConfig;
use crate::document::DocumentEngine;
use crate::error::{ReportError, Result};
use crate::export::export_json;
use crate::loader::{InputFormat, ResultSetLoader};
use crate::markdown::MarkdownEngine;
use crate::metrics::derive;
use crate::model::{DerivedTable, DroppedRow};
use crate::narrative::{synthesize, Narrative};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Per-run options that are not part of the report configuration.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Input serialization.
    pub format: InputFormat,
    /// Also write the report as Markdown.
    pub markdown_path: Option<PathBuf>,
    /// Also write the derived metrics as JSON.
    pub json_path: Option<PathBuf>,
    /// Bundle the declared files after emission.
    pub package: bool,
    /// Directory the archiver runs in.
    pub work_dir: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            format: InputFormat::Auto,
            markdown_path: None,
            json_path: None,
            package: true,
            work_dir: PathBuf::from("."),
        }
    }
}

impl RunOptions {
    /// Sets the input format.
    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    /// Requests a Markdown copy of the report.
    pub fn with_markdown(mut self, path: impl Into<PathBuf>) -> Self {
        self.markdown_path = Some(path.into());
        self
    }

    /// Requests a JSON export of the derived metrics.
    pub fn with_json(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_path = Some(path.into());
        self
    }

    /// Enables or disables packaging.
    pub fn with_package(mut self, package: bool) -> Self {
        self.package = package;
        self
    }

    /// Sets the archiver working directory.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }
}

/// Analysis results, before any artifact is written.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Rows read from the input.
    pub rows_loaded: usize,
    /// Derived metrics of the complete rows.
    pub table: DerivedTable,
    /// Rows removed by the all-or-nothing filter.
    pub dropped: Vec<DroppedRow>,
    /// Report prose.
    pub narrative: Narrative,
}

/// What a pipeline run produced.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    /// Rows read from the input.
    pub rows_loaded: usize,
    /// Rows present in the report.
    pub rows_reported: usize,
    /// Rows removed by the all-or-nothing filter.
    pub dropped: Vec<DroppedRow>,
    /// Emitted report document.
    pub report_path: PathBuf,
    /// Markdown copy, if requested.
    pub markdown_path: Option<PathBuf>,
    /// JSON export, if requested.
    pub json_path: Option<PathBuf>,
    /// Packaging outcome, if packaging ran.
    pub archive: Option<ArchiveOutcome>,
}

/// Deletes the temporary chart when dropped.
struct ChartGuard<'a> {
    path: &'a Path,
}

impl Drop for ChartGuard<'_> {
    fn drop(&mut self) {
        match fs::remove_file(self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed temporary chart"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove temporary chart"
            ),
        }
    }
}

/// Loads, filters and derives metrics without writing anything.
///
/// # Errors
///
/// Returns the loader's errors, or [`ReportError::EmptyResultSet`] when no
/// row has a time for every variant.
pub fn analyze(config: &ReportConfig, format: InputFormat) -> Result<Analysis> {
    let input = &config.input_path;
    info!(input = %input.display(), "loading results");
    let results = ResultSetLoader::new(config).load_file(input, format)?;

    let (complete, dropped) = results.split_complete();
    for row in &dropped {
        let missing: Vec<&str> = row.missing.iter().map(|v| v.id()).collect();
        warn!(n = row.size, missing = %missing.join(","), "dropping incomplete row");
    }
    if complete.is_empty() {
        return Err(ReportError::EmptyResultSet);
    }

    let table = derive(&complete);
    let narrative = synthesize(&table, &config.subject)?;
    info!(
        loaded = results.len(),
        kept = table.len(),
        dropped = dropped.len(),
        "derived metrics"
    );

    Ok(Analysis {
        rows_loaded: results.len(),
        table,
        dropped,
        narrative,
    })
}

/// End-to-end report generator.
///
/// # Example
///
/// ```no_run
/// use perfdoc::chart::PlottersChart;
/// use perfdoc::config::ReportConfig;
/// use perfdoc::pdf::PdfEngine;
/// use perfdoc::pipeline::{Pipeline, RunOptions};
///
/// let config = ReportConfig::default();
/// let chart = PlottersChart::new(config.title.clone(), config.chart_size);
/// let pipeline = Pipeline::new(config, chart, PdfEngine::new());
/// let summary = pipeline.run(&RunOptions::default().with_package(false))?;
/// println!("wrote {}", summary.report_path.display());
/// # Ok::<(), perfdoc::ReportError>(())
/// ```
#[derive(Debug)]
pub struct Pipeline<C, D> {
    config: ReportConfig,
    chart_engine: C,
    document_engine: D,
}

impl<C: ChartEngine, D: DocumentEngine> Pipeline<C, D> {
    /// Creates a pipeline.
    pub fn new(config: ReportConfig, chart_engine: C, document_engine: D) -> Self {
        Self {
            config,
            chart_engine,
            document_engine,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Loads, filters and derives metrics without writing anything.
    pub fn analyze(&self, format: InputFormat) -> Result<Analysis> {
        analyze(&self.config, format)
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns the first stage error; [`ReportError::stage`] names the stage.
    pub fn run(&self, options: &RunOptions) -> Result<PipelineSummary> {
        let analysis = self.analyze(options.format)?;

        let chart_path = self.config.chart_path.as_path();
        let chart_guard = ChartGuard { path: chart_path };
        info!(path = %chart_path.display(), "rendering chart");
        self.chart_engine.render(&analysis.table, chart_path)?;

        let document = ReportComposer::new(&self.config)
            .with_excluded(&analysis.dropped)
            .compose(&analysis.table, &analysis.narrative, chart_path)?;

        let report_path = self.config.report_path.clone();
        info!(path = %report_path.display(), "emitting report");
        self.document_engine.emit(&document, &report_path)?;

        if let Some(path) = &options.markdown_path {
            info!(path = %path.display(), "writing markdown");
            MarkdownEngine::new().emit(&document, path)?;
        }
        if let Some(path) = &options.json_path {
            info!(path = %path.display(), "writing json");
            export_json(&analysis.table, &analysis.dropped, path)?;
        }
        drop(chart_guard);

        let archive = if options.package {
            let outcome = ArtifactPackager::new(
                &options.work_dir,
                self.config.archive_candidates(),
                self.config.archiver.clone(),
            )
            .package()?;
            info!(
                archive = %outcome.archive.display(),
                included = outcome.included.len(),
                missing = outcome.missing.len(),
                "archive created"
            );
            Some(outcome)
        } else {
            None
        };

        Ok(PipelineSummary {
            rows_loaded: analysis.rows_loaded,
            rows_reported: analysis.table.len(),
            dropped: analysis.dropped,
            report_path,
            markdown_path: options.markdown_path.clone(),
            json_path: options.json_path.clone(),
            archive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_guard_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        fs::write(&path, b"png").unwrap();
        {
            let _guard = ChartGuard { path: &path };
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_chart_guard_ignores_absent_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-written.png");
        drop(ChartGuard { path: &path });
        assert!(!path.exists());
    }

    #[test]
    fn test_run_options_builders() {
        let options = RunOptions::default()
            .with_format(InputFormat::Csv)
            .with_markdown("r.md")
            .with_package(false);
        assert_eq!(options.format, InputFormat::Csv);
        assert_eq!(options.markdown_path, Some(PathBuf::from("r.md")));
        assert!(options.json_path.is_none());
        assert!(!options.package);
    }
}
