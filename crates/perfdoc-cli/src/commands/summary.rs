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


//! Summary command - prints the analysis to stdout

use super::input_config;
use crate::cli::InputArgs;
use perfdoc::console::print_summary;
use perfdoc::pipeline::analyze;
use perfdoc::Result;

/// Print the tables and, unless disabled, the narrative.
pub fn summary(input: &InputArgs, tables_only: bool) -> Result<()> {
    let config = input_config(input)?;
    config.validate()?;

    let analysis = analyze(&config, input.format)?;

    let narrative = (!tables_only).then_some(&analysis.narrative);
    print_summary(&analysis.table, &analysis.dropped, narrative);
    Ok(())
}
