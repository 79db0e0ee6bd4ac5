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


//! Package command - bundles deliverables without regenerating them

use super::load_config;
use perfdoc::archive::package_declared;
use perfdoc::Result;
use std::path::Path;
use tracing::debug;

/// Archive the configured file list from `dir`.
pub fn package(config: Option<&Path>, dir: &Path) -> Result<()> {
    let config = load_config(config)?;
    debug!(dir = %dir.display(), archiver = %config.archiver, "packaging deliverables");
    let outcome = package_declared(dir, &config)?;

    println!(
        "Archive {} created with {} files",
        outcome.archive.display(),
        outcome.included.len()
    );
    for file in &outcome.included {
        println!("  + {}", file.display());
    }
    for warning in &outcome.missing {
        println!("  skipped {}: {}", warning.file.display(), warning.reason);
    }
    Ok(())
}
