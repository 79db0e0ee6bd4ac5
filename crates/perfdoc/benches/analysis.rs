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


//! Analysis benchmarks.
//!
//! Measures loading, metric derivation, narrative synthesis and table
//! formatting for synthetic result sets of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use perfdoc::metrics::derive;
use perfdoc::narrative::synthesize;
use perfdoc::table::analysis_tables;
use perfdoc::{InputFormat, ReportConfig, ResultSetLoader, ResultTable};

const ROW_COUNTS: [usize; 3] = [8, 64, 512];

/// Synthetic results in the harness's record format.
fn results_json(rows: usize) -> String {
    let records: Vec<String> = (0..rows)
        .map(|i| {
            let n = 16 * (i + 1);
            let base = (n * n) as f64 * 1e-9;
            format!(
                r#"{{"n": {}, "baseline_Mv_time": {}, "hw1_avx2_time": {}, "hw1_unroll_time": {}, "hw1_interchange_time": {}}}"#,
                n,
                base,
                base / 3.5,
                base / 1.4,
                base * 2.2
            )
        })
        .collect();
    format!("[{}]", records.join(","))
}

fn load(config: &ReportConfig, json: &str) -> ResultTable {
    ResultSetLoader::new(config)
        .load_str(json, InputFormat::Json, "bench")
        .expect("synthetic input is valid")
}

fn bench_load(c: &mut Criterion) {
    let config = ReportConfig::default();
    let mut group = c.benchmark_group("load");
    for rows in ROW_COUNTS {
        let json = results_json(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &json, |b, json| {
            b.iter(|| load(&config, black_box(json)))
        });
    }
    group.finish();
}

fn bench_derive_and_narrate(c: &mut Criterion) {
    let config = ReportConfig::default();
    let mut group = c.benchmark_group("derive_and_narrate");
    for rows in ROW_COUNTS {
        let complete = load(&config, &results_json(rows)).split_complete().0;
        group.bench_with_input(BenchmarkId::from_parameter(rows), &complete, |b, complete| {
            b.iter(|| {
                let derived = derive(black_box(complete));
                let narrative = synthesize(&derived, &config.subject).expect("non-empty");
                let tables = analysis_tables(&derived);
                black_box((narrative, tables))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load, bench_derive_and_narrate);
criterion_main!(benches);
