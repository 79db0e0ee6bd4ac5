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


//! Packaging scenarios against the system `tar`.

use perfdoc::{ArtifactPackager, ReportError, Stage};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn tar_entries(archive: &std::path::Path) -> Vec<String> {
    let output = Command::new("tar").arg("tf").arg(archive).output().unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn work_dir() -> (tempfile::TempDir, PathBuf) {
    let root = tempfile::tempdir().unwrap();
    let work = root.path().join("hw1");
    fs::create_dir(&work).unwrap();
    (root, work)
}

#[test]
fn test_archive_contains_existing_files_only() {
    let (_root, work) = work_dir();
    fs::write(work.join("Mv.cpp"), "int main() {}").unwrap();
    fs::write(work.join("report.pdf"), "%PDF").unwrap();

    let packager = ArtifactPackager::new(
        &work,
        vec![
            PathBuf::from("Mv.cpp"),
            PathBuf::from("hw1.cpp"),
            PathBuf::from("report.pdf"),
        ],
        "tar",
    );
    let outcome = packager.package().unwrap();

    assert_eq!(outcome.archive, work.join("hw1.tar"));
    assert!(outcome.archive.exists());
    assert_eq!(
        outcome.included,
        vec![PathBuf::from("Mv.cpp"), PathBuf::from("report.pdf")]
    );
    assert_eq!(outcome.missing.len(), 1);
    assert_eq!(outcome.missing[0].file, PathBuf::from("hw1.cpp"));

    let entries = tar_entries(&outcome.archive);
    assert_eq!(entries, vec!["Mv.cpp", "report.pdf"]);
}

#[test]
fn test_unknown_archiver_is_fatal() {
    let (_root, work) = work_dir();
    fs::write(work.join("Mv.cpp"), "int main() {}").unwrap();

    let err = ArtifactPackager::new(
        &work,
        vec![PathBuf::from("Mv.cpp")],
        "perfdoc-archiver-that-does-not-exist",
    )
    .package()
    .unwrap_err();

    assert!(matches!(err, ReportError::ArchiveProcess { .. }));
    assert_eq!(err.stage(), Stage::Package);
}

#[test]
fn test_archiver_nonzero_exit_is_fatal() {
    let (_root, work) = work_dir();
    fs::write(work.join("Mv.cpp"), "int main() {}").unwrap();

    // `false` ignores its arguments and exits with status 1.
    let err = ArtifactPackager::new(&work, vec![PathBuf::from("Mv.cpp")], "false")
        .package()
        .unwrap_err();
    assert!(err.to_string().contains("exit status 1"));
}
