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


//! End-to-end pipeline scenarios with recording fake engines.
//!
//! The fakes write small placeholder files so the tests exercise the real
//! file lifecycle (temporary chart, report path, extras) without depending
//! on fonts or a PDF writer.

use perfdoc::{
    Block, ChartEngine, DerivedTable, DocumentEngine, InputFormat, Pipeline, ReportConfig,
    ReportDocument, ReportError, RunOptions, Stage,
};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

// ===== Fake engines =====

#[derive(Default)]
struct ChartLog {
    rendered_sizes: Vec<Vec<u64>>,
}

struct FakeChart {
    log: Rc<RefCell<ChartLog>>,
    fail: bool,
}

impl ChartEngine for FakeChart {
    fn render(&self, table: &DerivedTable, path: &Path) -> perfdoc::Result<()> {
        self.log.borrow_mut().rendered_sizes.push(table.sizes());
        if self.fail {
            return Err(ReportError::render("chart", "no usable font"));
        }
        fs::write(path, b"fake png").map_err(|e| ReportError::io_error(path, e))
    }
}

#[derive(Default)]
struct DocLog {
    chapter_titles: Vec<String>,
    chart_existed: bool,
    table_rows: Vec<usize>,
}

struct FakeDoc {
    log: Rc<RefCell<DocLog>>,
    fail: bool,
}

impl DocumentEngine for FakeDoc {
    fn emit(&self, document: &ReportDocument, path: &Path) -> perfdoc::Result<()> {
        let mut log = self.log.borrow_mut();
        log.chapter_titles = document.chapters.iter().map(|c| c.title.clone()).collect();
        log.chart_existed = document
            .chapters
            .iter()
            .flat_map(|c| c.images())
            .all(|p| p.exists());
        log.table_rows = document
            .chapters
            .iter()
            .flat_map(|c| c.blocks.iter())
            .filter_map(|b| match b {
                Block::Table(t) => Some(t.rows.len()),
                _ => None,
            })
            .collect();
        if self.fail {
            return Err(ReportError::render("report", "disk full"));
        }
        fs::write(path, b"%PDF-fake").map_err(|e| ReportError::io_error(path, e))
    }
}

// ===== Helpers =====

struct Fixture {
    dir: TempDir,
    config: ReportConfig,
    chart_log: Rc<RefCell<ChartLog>>,
    doc_log: Rc<RefCell<DocLog>>,
}

impl Fixture {
    fn new(input_name: &str, content: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(input_name);
        fs::write(&input, content).unwrap();
        let config = ReportConfig::default()
            .with_input_path(input)
            .with_report_path(dir.path().join("report.pdf"))
            .with_chart_path(dir.path().join("performance_chart.png"));
        Self {
            dir,
            config,
            chart_log: Rc::default(),
            doc_log: Rc::default(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn pipeline(&self, chart_fails: bool, doc_fails: bool) -> Pipeline<FakeChart, FakeDoc> {
        Pipeline::new(
            self.config.clone(),
            FakeChart {
                log: Rc::clone(&self.chart_log),
                fail: chart_fails,
            },
            FakeDoc {
                log: Rc::clone(&self.doc_log),
                fail: doc_fails,
            },
        )
    }

    fn options(&self) -> RunOptions {
        RunOptions::default()
            .with_package(false)
            .with_work_dir(self.dir.path())
    }
}

const TWO_SIZES: &str = r#"{
    "256": {"baseline": 1.0, "avx2": 0.5, "unroll": 0.8, "interchange": 2.0},
    "512": {"baseline": 2.0, "avx2": 0.4, "unroll": 1.0, "interchange": 4.0}
}"#;

// ===== Successful runs =====

#[test]
fn test_full_run_writes_report_and_removes_chart() {
    let fx = Fixture::new("results.json", TWO_SIZES);
    let summary = fx.pipeline(false, false).run(&fx.options()).unwrap();

    assert_eq!(summary.rows_loaded, 2);
    assert_eq!(summary.rows_reported, 2);
    assert!(summary.dropped.is_empty());
    assert!(summary.archive.is_none());
    assert_eq!(summary.report_path, fx.path("report.pdf"));
    assert!(fx.path("report.pdf").exists());

    assert!(fx.doc_log.borrow().chart_existed, "chart must exist while emitting");
    assert!(!fx.path("performance_chart.png").exists(), "chart must be removed");
    assert_eq!(fx.chart_log.borrow().rendered_sizes, vec![vec![256, 512]]);
}

#[test]
fn test_chapters_in_fixed_order() {
    let fx = Fixture::new("results.json", TWO_SIZES);
    fx.pipeline(false, false).run(&fx.options()).unwrap();

    assert_eq!(
        fx.doc_log.borrow().chapter_titles,
        vec![
            "1. Optimization Techniques",
            "2. Performance Chart",
            "3. Performance Analysis",
            "4. Detailed Performance Analysis",
            "5. Methodology",
        ]
    );
    assert_eq!(fx.doc_log.borrow().table_rows, vec![2, 2, 2]);
}

#[test]
fn test_incomplete_row_is_dropped() {
    let content = r#"[
        {"n": 256, "baseline_Mv_time": 1.0, "hw1_avx2_time": 0.5, "hw1_unroll_time": 0.8, "hw1_interchange_time": 2.0},
        {"n": 1024, "baseline_Mv_time": 16.0, "hw1_avx2_time": null, "hw1_unroll_time": 12.0, "hw1_interchange_time": 40.0},
        {"n": 512, "baseline_Mv_time": 2.0, "hw1_avx2_time": 0.4, "hw1_unroll_time": 1.0, "hw1_interchange_time": 4.0}
    ]"#;
    let fx = Fixture::new("results.json", content);
    let summary = fx.pipeline(false, false).run(&fx.options()).unwrap();

    assert_eq!(summary.rows_loaded, 3);
    assert_eq!(summary.rows_reported, 2);
    assert_eq!(summary.dropped.len(), 1);
    assert_eq!(summary.dropped[0].size, 1024);
    assert_eq!(fx.chart_log.borrow().rendered_sizes, vec![vec![256, 512]]);
}

#[test]
fn test_csv_input() {
    let content = "n,baseline,avx2,unroll,interchange\n256,1.0,0.5,0.8,2.0\n512,2.0,0.4,NA,4.0\n";
    let fx = Fixture::new("results.csv", content);
    let summary = fx.pipeline(false, false).run(&fx.options()).unwrap();
    assert_eq!(summary.rows_reported, 1);
    assert_eq!(summary.dropped[0].size, 512);
}

#[test]
fn test_markdown_and_json_extras() {
    let fx = Fixture::new("results.json", TWO_SIZES);
    let options = fx
        .options()
        .with_markdown(fx.path("report.md"))
        .with_json(fx.path("metrics.json"));
    let summary = fx.pipeline(false, false).run(&options).unwrap();

    assert_eq!(summary.markdown_path, Some(fx.path("report.md")));
    let md = fs::read_to_string(fx.path("report.md")).unwrap();
    assert!(md.contains("## 3. Performance Analysis"));
    assert!(md.contains("| 512 | 5.00x | 2.00x | 0.50x |"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(fx.path("metrics.json")).unwrap()).unwrap();
    assert_eq!(json["rows"][1]["metrics"]["avx2"]["speedup"], 5.0);
}

// ===== Failures =====

#[test]
fn test_empty_input_creates_nothing() {
    let fx = Fixture::new("results.json", "[]");
    let err = fx.pipeline(false, false).run(&fx.options()).unwrap_err();

    assert!(matches!(err, ReportError::EmptyResultSet));
    assert_eq!(err.stage(), Stage::Derive);
    assert!(fx.chart_log.borrow().rendered_sizes.is_empty());
    assert!(!fx.path("performance_chart.png").exists());
    assert!(!fx.path("report.pdf").exists());
}

#[test]
fn test_all_rows_incomplete_is_empty_result_set() {
    let content = r#"{"256": {"baseline": 1.0, "avx2": null, "unroll": 0.8, "interchange": 2.0}}"#;
    let fx = Fixture::new("results.json", content);
    let err = fx.pipeline(false, false).run(&fx.options()).unwrap_err();
    assert!(matches!(err, ReportError::EmptyResultSet));
    assert!(!fx.path("report.pdf").exists());
}

#[test]
fn test_missing_input_file_is_load_error() {
    let fx = Fixture::new("results.json", TWO_SIZES);
    let pipeline = Pipeline::new(
        fx.config.clone().with_input_path(fx.path("absent.json")),
        FakeChart {
            log: Rc::clone(&fx.chart_log),
            fail: false,
        },
        FakeDoc {
            log: Rc::clone(&fx.doc_log),
            fail: false,
        },
    );
    let err = pipeline.run(&fx.options()).unwrap_err();
    assert!(matches!(err, ReportError::MalformedInput { .. }));
    assert_eq!(err.stage(), Stage::Load);
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_missing_variant_column() {
    let content = r#"[{"n": 256, "baseline": 1.0, "avx2": 0.5, "unroll": 0.8}]"#;
    let fx = Fixture::new("results.json", content);
    let err = fx.pipeline(false, false).run(&fx.options()).unwrap_err();
    assert!(matches!(err, ReportError::MissingColumn { .. }));
}

#[test]
fn test_chart_failure_is_fatal() {
    let fx = Fixture::new("results.json", TWO_SIZES);
    let err = fx.pipeline(true, false).run(&fx.options()).unwrap_err();
    assert_eq!(err.stage(), Stage::Chart);
    assert!(fx.doc_log.borrow().chapter_titles.is_empty());
    assert!(!fx.path("report.pdf").exists());
}

#[test]
fn test_emit_failure_still_removes_chart() {
    let fx = Fixture::new("results.json", TWO_SIZES);
    let err = fx.pipeline(false, true).run(&fx.options()).unwrap_err();
    assert_eq!(err.stage(), Stage::Emit);
    assert!(!fx.path("performance_chart.png").exists());
    assert!(!fx.path("report.pdf").exists());
}

#[test]
fn test_analyze_writes_nothing() {
    let fx = Fixture::new("results.json", TWO_SIZES);
    let analysis = fx.pipeline(false, false).analyze(InputFormat::Auto).unwrap();
    assert_eq!(analysis.table.len(), 2);
    assert_eq!(analysis.narrative.paragraphs().len(), 5);
    assert!(fx.chart_log.borrow().rendered_sizes.is_empty());
    assert!(!fx.path("report.pdf").exists());
}
