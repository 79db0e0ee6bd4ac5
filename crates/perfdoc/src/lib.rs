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

//! perfdoc - Benchmark Performance Report Generator
//!
//! Turns raw timing results of a baseline and several optimized variants of
//! a routine into a PDF report with a chart, comparison tables and a written
//! analysis, then bundles the deliverables into an archive.
//!
//! ## Pipeline
//!
//! ```text
//! Loader -> Metric Deriver -> { Chart, Tables, Narrative } -> Composer
//!        -> Document Engine -> Packager
//! ```
//!
//! ## Modules
//!
//! - **Data**: [`variant`], [`model`], [`loader`], [`metrics`]
//! - **Content**: [`table`], [`narrative`], [`chart`]
//! - **Documents**: [`document`], [`composer`], [`pdf`], [`markdown`]
//! - **Outputs**: [`console`], [`export`], [`archive`]
//! - **Orchestration**: [`config`], [`error`], [`pipeline`]
//!
//! ## Usage
//!
//! ```no_run
//! use perfdoc::{Pipeline, PdfEngine, PlottersChart, ReportConfig, RunOptions};
//!
//! let config = ReportConfig::default().with_report_path("hw1.pdf");
//! let chart = PlottersChart::default();
//! let summary = Pipeline::new(config, chart, PdfEngine::new()).run(&RunOptions::default())?;
//! println!("{} rows reported", summary.rows_reported);
//! # Ok::<(), perfdoc::ReportError>(())
//! ```

pub mod archive;
pub mod chart;
pub mod composer;
pub mod config;
pub mod console;
pub mod document;
pub mod error;
pub mod export;
pub mod loader;
pub mod markdown;
pub mod metrics;
pub mod model;
pub mod narrative;
pub mod pdf;
pub mod pipeline;
pub mod table;
pub mod variant;

// Re-export key types for convenience
pub use archive::{ArchiveOutcome, ArchiveWarning, ArtifactPackager};
pub use chart::{ChartEngine, PlottersChart};
pub use composer::ReportComposer;
pub use config::{ColumnMapping, ReportConfig};
pub use document::{Block, Chapter, DocumentEngine, ReportDocument};
pub use error::{ReportError, Result, Stage};
pub use loader::{InputFormat, ResultSetLoader};
pub use markdown::MarkdownEngine;
pub use model::{DerivedRow, DerivedTable, DroppedRow, Metric, ResultRow, ResultTable};
pub use narrative::{Narrative, Verdict, VariantSummary};
pub use pdf::PdfEngine;
pub use pipeline::{Analysis, Pipeline, PipelineSummary, RunOptions};
pub use table::TextTable;
pub use variant::Variant;
