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

//! Artifact packager.
//!
//! Bundles the declared deliverables into `<dir>.tar` by invoking an
//! external archiver as `<archiver> cvf <archive> <files...>` inside the
//! working directory. Declared files that do not exist are skipped with a
//! warning; only a failure of the archiver itself is fatal.

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const FALLBACK_ARCHIVE_STEM: &str = "archive";

/// A declared archive file that was not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveWarning {
    /// Path as declared.
    pub file: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Result of a packaging run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveOutcome {
    /// Path of the created archive.
    pub archive: PathBuf,
    /// Files passed to the archiver, in declaration order.
    pub included: Vec<PathBuf>,
    /// Declared files that were skipped.
    pub missing: Vec<ArchiveWarning>,
}

/// Packages report artifacts with an external archiver.
#[derive(Debug, Clone)]
pub struct ArtifactPackager {
    work_dir: PathBuf,
    candidates: Vec<PathBuf>,
    archiver: String,
}

impl ArtifactPackager {
    /// Creates a packager.
    ///
    /// # Arguments
    ///
    /// * `work_dir` - Directory the archiver runs in; names the archive
    /// * `candidates` - Declared files, relative to `work_dir`
    /// * `archiver` - Program invoked as `<archiver> cvf <archive> <files...>`
    pub fn new(
        work_dir: impl Into<PathBuf>,
        candidates: Vec<PathBuf>,
        archiver: impl Into<String>,
    ) -> Self {
        Self {
            work_dir: work_dir.into(),
            candidates,
            archiver: archiver.into(),
        }
    }

    /// Archive file name: the working directory's base name plus `.tar`.
    pub fn archive_name(&self) -> String {
        let resolved = self
            .work_dir
            .canonicalize()
            .unwrap_or_else(|_| self.work_dir.clone());
        let stem = resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| FALLBACK_ARCHIVE_STEM.to_string());
        format!("{}.tar", stem)
    }

    /// Splits candidates into existing files and warnings for missing ones.
    pub fn partition(&self) -> (Vec<PathBuf>, Vec<ArchiveWarning>) {
        let mut included = Vec::new();
        let mut missing = Vec::new();
        for candidate in &self.candidates {
            if self.work_dir.join(candidate).is_file() {
                included.push(candidate.clone());
            } else {
                tracing::warn!(file = %candidate.display(), "archive file not found, skipping");
                missing.push(ArchiveWarning {
                    file: candidate.clone(),
                    reason: "file not found".to_string(),
                });
            }
        }
        (included, missing)
    }

    /// Runs the archiver.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::ArchiveProcess`] if no declared file exists,
    /// the archiver cannot be started, or it exits unsuccessfully.
    pub fn package(&self) -> Result<ArchiveOutcome> {
        let archive_name = self.archive_name();
        let (included, missing) = self.partition();
        let command_line = command_line(&self.archiver, &archive_name, &included);

        if included.is_empty() {
            return Err(ReportError::archive(
                command_line,
                "none of the declared files exist",
            ));
        }

        tracing::info!(archive = %archive_name, files = included.len(), "packaging artifacts");
        let output = Command::new(&self.archiver)
            .arg("cvf")
            .arg(&archive_name)
            .args(&included)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ReportError::archive(command_line.clone(), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = match output.status.code() {
                Some(code) if stderr.is_empty() => format!("exit status {}", code),
                Some(code) => format!("exit status {}: {}", code, stderr),
                None => format!("terminated by signal: {}", stderr),
            };
            return Err(ReportError::archive(command_line, reason));
        }

        Ok(ArchiveOutcome {
            archive: self.work_dir.join(&archive_name),
            included,
            missing,
        })
    }
}

fn command_line(archiver: &str, archive: &str, files: &[PathBuf]) -> String {
    let mut parts = vec![archiver.to_string(), "cvf".to_string(), archive.to_string()];
    parts.extend(files.iter().map(|f| f.display().to_string()));
    parts.join(" ")
}

/// Packages the files declared in a configuration from `work_dir`.
pub fn package_declared(work_dir: &Path, config: &ReportConfig) -> Result<ArchiveOutcome> {
    ArtifactPackager::new(work_dir, config.archive_candidates(), config.archiver.clone()).package()
}
