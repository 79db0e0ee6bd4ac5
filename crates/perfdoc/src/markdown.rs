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

//! Markdown export for report documents.

use crate::document::{Block, DocumentEngine, ReportDocument};
use crate::error::{ReportError, Result};
use crate::table::TextTable;
use std::fs;
use std::path::Path;

/// Writes the report as a Markdown file.
///
/// The chart image is a temporary artifact, so image blocks become a note
/// pointing at the PDF report instead of a link.
#[derive(Debug, Clone, Default)]
pub struct MarkdownEngine;

impl MarkdownEngine {
    /// Creates a new Markdown engine.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentEngine for MarkdownEngine {
    fn emit(&self, document: &ReportDocument, path: &Path) -> Result<()> {
        fs::write(path, render(document)).map_err(|e| ReportError::io_error(path, e))
    }
}

fn pipe_table(table: &TextTable) -> String {
    let mut md = format!("**{}**\n\n", table.title);
    md.push_str(&format!("| {} |\n", table.headers.join(" | ")));
    md.push_str(&format!(
        "|{}|\n",
        table.headers.iter().map(|_| "---:").collect::<Vec<_>>().join("|")
    ));
    for row in &table.rows {
        md.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    md
}

/// Renders a document as Markdown text.
pub fn render(document: &ReportDocument) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", document.title));
    if !document.subtitle.is_empty() {
        md.push_str(&format!("{}\n\n", document.subtitle));
    }
    md.push_str(&format!("**Generated:** {}\n\n", document.date_line()));

    for chapter in &document.chapters {
        md.push_str(&format!("## {}\n\n", chapter.title));
        for block in &chapter.blocks {
            match block {
                Block::Heading(text) => md.push_str(&format!("### {}\n\n", text)),
                Block::Paragraph(text) => {
                    md.push_str(text);
                    md.push_str("\n\n");
                }
                Block::Table(table) => {
                    md.push_str(&pipe_table(table));
                    md.push('\n');
                }
                Block::Image(path) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    md.push_str(&format!("*Figure {} is embedded in the PDF report.*\n\n", name));
                }
            }
        }
    }

    md
}
