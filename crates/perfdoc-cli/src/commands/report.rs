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


//! Report command - runs the full pipeline

use super::input_config;
use crate::cli::InputArgs;
use perfdoc::{PdfEngine, Pipeline, PlottersChart, Result, RunOptions};
use std::path::PathBuf;
use tracing::debug;

/// Generate the report and, unless disabled, the archive.
pub fn report(
    input: &InputArgs,
    output: Option<PathBuf>,
    markdown: Option<PathBuf>,
    json: Option<PathBuf>,
    package: bool,
) -> Result<()> {
    let mut config = input_config(input)?;
    if let Some(output) = output {
        config = config.with_report_path(output);
    }
    config.validate()?;

    let mut options = RunOptions::default()
        .with_format(input.format)
        .with_package(package);
    if let Some(path) = markdown {
        options = options.with_markdown(path);
    }
    if let Some(path) = json {
        options = options.with_json(path);
    }

    debug!(?options, "report run options");
    let chart = PlottersChart::new(
        "Performance Comparison: Execution Time vs Problem Size",
        config.chart_size,
    );
    let summary = Pipeline::new(config, chart, PdfEngine::new()).run(&options)?;

    println!(
        "Report written to {} ({} problem sizes)",
        summary.report_path.display(),
        summary.rows_reported
    );
    for dropped in &summary.dropped {
        println!("  excluded n={}", dropped.size);
    }
    if let Some(path) = &summary.markdown_path {
        println!("Markdown written to {}", path.display());
    }
    if let Some(path) = &summary.json_path {
        println!("Metrics written to {}", path.display());
    }
    if let Some(archive) = &summary.archive {
        println!(
            "Archive {} created with {} files",
            archive.archive.display(),
            archive.included.len()
        );
        for warning in &archive.missing {
            println!("  skipped {}: {}", warning.file.display(), warning.reason);
        }
    }
    Ok(())
}
