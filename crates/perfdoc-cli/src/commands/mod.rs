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


//! CLI command implementations

mod package;
mod report;
mod summary;

pub use package::package;
pub use report::report;
pub use summary::summary;

use crate::cli::InputArgs;
use perfdoc::{ReportConfig, Result};
use std::path::Path;

/// Loads the configuration file, if any, and applies the input override.
fn load_config(config: Option<&Path>) -> Result<ReportConfig> {
    match config {
        Some(path) => ReportConfig::from_file(path),
        None => Ok(ReportConfig::default()),
    }
}

fn input_config(args: &InputArgs) -> Result<ReportConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(input) = &args.input {
        config = config.with_input_path(input);
    }
    Ok(config)
}
