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

//! Report composer.
//!
//! Assembles chart, tables and narrative into a [`ReportDocument`] with a
//! fixed chapter order:
//!
//! 1. Optimization Techniques
//! 2. Performance Chart
//! 3. Performance Analysis
//! 4. Detailed Performance Analysis
//! 5. the configured appendix (Methodology by default)

use crate::config::ReportConfig;
use crate::document::{Block, Chapter, ReportDocument};
use crate::error::{ReportError, Result};
use crate::model::{DerivedTable, DroppedRow};
use crate::narrative::Narrative;
use crate::table::analysis_tables;
use crate::variant::Variant;
use chrono::{DateTime, Local};
use std::path::Path;

/// Builds report documents from pipeline outputs.
#[derive(Debug, Clone)]
pub struct ReportComposer<'a> {
    config: &'a ReportConfig,
    generated_at: DateTime<Local>,
    excluded: Vec<DroppedRow>,
}

impl<'a> ReportComposer<'a> {
    /// Creates a composer stamped with the current time.
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            generated_at: Local::now(),
            excluded: Vec::new(),
        }
    }

    /// Overrides the generation timestamp.
    pub fn with_generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Lists sizes the row filter removed, noted in the analysis chapter.
    pub fn with_excluded(mut self, excluded: &[DroppedRow]) -> Self {
        self.excluded = excluded.to_vec();
        self
    }

    /// Composes the report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::EmptyResultSet`] when `table` has no rows.
    pub fn compose(
        &self,
        table: &DerivedTable,
        narrative: &Narrative,
        chart_path: &Path,
    ) -> Result<ReportDocument> {
        if table.is_empty() {
            return Err(ReportError::EmptyResultSet);
        }

        Ok(ReportDocument {
            title: self.config.title.clone(),
            subtitle: format!("Performance analysis of {}", self.config.subject),
            generated_at: self.generated_at,
            chapters: vec![
                self.techniques(),
                self.chart(chart_path),
                self.analysis(table),
                detailed_analysis(narrative),
                self.appendix(),
            ],
        })
    }

    fn techniques(&self) -> Chapter {
        let mut chapter = Chapter::new("1. Optimization Techniques").with_block(Block::Paragraph(
            format!(
                "This report compares {} optimized implementations of {} against {}.",
                Variant::OPTIMIZED_COUNT,
                self.config.subject,
                self.config.baseline_description
            ),
        ));
        for variant in Variant::ALL {
            let text = if variant.is_baseline() {
                format!(
                    "{} All speedups and improvements are relative to this variant.",
                    variant.description()
                )
            } else {
                variant.description().to_string()
            };
            chapter = chapter
                .with_block(Block::Heading(variant.label().to_string()))
                .with_block(Block::Paragraph(text));
        }
        chapter
    }

    fn chart(&self, chart_path: &Path) -> Chapter {
        Chapter::new("2. Performance Chart")
            .with_block(Block::Paragraph(
                "Execution time of every variant by problem size. Both axes are logarithmic; \
                 lower is better."
                    .to_string(),
            ))
            .with_block(Block::Image(chart_path.to_path_buf()))
    }

    fn analysis(&self, table: &DerivedTable) -> Chapter {
        let mut chapter = Chapter::new("3. Performance Analysis");
        for text_table in analysis_tables(table) {
            chapter = chapter.with_block(Block::Table(text_table));
        }
        if !self.excluded.is_empty() {
            let sizes: Vec<String> = self
                .excluded
                .iter()
                .map(|d| {
                    let missing: Vec<&str> = d.missing.iter().map(|v| v.label()).collect();
                    format!("n={} (no time for {})", d.size, missing.join(", "))
                })
                .collect();
            chapter = chapter.with_block(Block::Paragraph(format!(
                "Excluded problem sizes: {}.",
                sizes.join("; ")
            )));
        }
        chapter
    }

    fn appendix(&self) -> Chapter {
        self.config
            .appendix_text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .fold(
                Chapter::new(format!("5. {}", self.config.appendix_title)),
                |chapter, p| chapter.with_block(Block::Paragraph(p.to_string())),
            )
    }
}

fn detailed_analysis(narrative: &Narrative) -> Chapter {
    let mut chapter = Chapter::new("4. Detailed Performance Analysis")
        .with_block(Block::Heading("Executive Summary".to_string()))
        .with_block(Block::Paragraph(narrative.executive_summary.clone()));
    for paragraph in &narrative.variants {
        chapter = chapter.with_block(Block::Paragraph(paragraph.text.clone()));
    }
    chapter.with_block(Block::Paragraph(narrative.scaling.clone()))
}
