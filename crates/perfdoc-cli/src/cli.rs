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


//! CLI command definitions and argument parsing.

use crate::commands;
use clap::{Args, Subcommand};
use perfdoc::{InputFormat, Result};
use std::path::PathBuf;

/// Options shared by commands that read benchmark results.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Benchmark results file (defaults to the configured input)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Report configuration file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Input format (auto, json, yaml, csv)
    #[arg(short, long, default_value = "auto")]
    pub format: InputFormat,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the PDF report and package the deliverables
    ///
    /// Loads the results, derives speedups, renders the chart, writes the
    /// report and bundles the declared files into `<dir>.tar`.
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// Report output path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also write the report as Markdown
        #[arg(long, value_name = "FILE")]
        markdown: Option<PathBuf>,

        /// Also write the derived metrics as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Skip packaging
        #[arg(long)]
        no_archive: bool,
    },

    /// Print the analysis without writing any file
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Print only the tables
        #[arg(long)]
        tables_only: bool,
    },

    /// Bundle the declared deliverables into an archive
    Package {
        /// Report configuration file (JSON or YAML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Directory to archive from
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns the pipeline error; its stage identifies what failed.
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Report {
                input,
                output,
                markdown,
                json,
                no_archive,
            } => commands::report(&input, output, markdown, json, !no_archive),
            Commands::Summary { input, tables_only } => commands::summary(&input, tables_only),
            Commands::Package { config, dir } => commands::package(config.as_deref(), &dir),
        }
    }
}
