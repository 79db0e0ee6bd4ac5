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


//! perfdoc Command Line Interface

use clap::Parser;
use perfdoc_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// perfdoc - benchmark performance report generator
///
/// Turns benchmark timing results into a PDF report with a chart, speedup
/// tables and a written analysis, and packages the deliverables.
///
/// # Examples
///
/// ```bash
/// # Full report from results.json, archived as <dir>.tar
/// perfdoc report
///
/// # Custom input and output, no archive
/// perfdoc report --input bench/results.csv --output hw1.pdf --no-archive
///
/// # Print the analysis only
/// perfdoc summary --input results.json
/// ```
#[derive(Parser)]
#[command(name = "perfdoc")]
#[command(author, version, about = "perfdoc - benchmark performance report generator", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let directive = if verbose { "perfdoc=debug" } else { "perfdoc=info" };
    let filter = match directive.parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error [{}]: {}", e.stage(), e);
            ExitCode::FAILURE
        }
    }
}
