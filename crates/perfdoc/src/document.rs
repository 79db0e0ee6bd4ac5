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

//! Engine-neutral report document.
//!
//! The composer builds a [`ReportDocument`]; a [`DocumentEngine`] lays it out
//! into a concrete file format.

use crate::error::Result;
use crate::table::TextTable;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// A content block inside a chapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Sub-heading.
    Heading(String),
    /// Prose paragraph. Embedded `\n` starts a new line.
    Paragraph(String),
    /// Fixed-width table.
    Table(TextTable),
    /// Image file, scaled to the text width.
    Image(PathBuf),
}

/// A numbered chapter.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// Chapter heading, including its number.
    pub title: String,
    /// Content in order.
    pub blocks: Vec<Block>,
}

impl Chapter {
    /// Creates an empty chapter.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Appends a block.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Images referenced by this chapter.
    pub fn images(&self) -> impl Iterator<Item = &Path> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Image(path) => Some(path.as_path()),
            _ => None,
        })
    }
}

/// A complete report ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    /// Title shown on the first page and in the running header.
    pub title: String,
    /// Line under the title naming what was benchmarked.
    pub subtitle: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Local>,
    /// Chapters in presentation order.
    pub chapters: Vec<Chapter>,
}

impl ReportDocument {
    /// Generation date as printed on the title page, e.g. `March 04, 2025`.
    pub fn date_line(&self) -> String {
        self.generated_at.format("%B %d, %Y").to_string()
    }

    /// Chapter titles in order.
    pub fn chapter_titles(&self) -> Vec<&str> {
        self.chapters.iter().map(|c| c.title.as_str()).collect()
    }
}

/// Lays out a [`ReportDocument`] into a file.
pub trait DocumentEngine {
    /// Writes the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReportError::Render`] when layout or writing fails.
    fn emit(&self, document: &ReportDocument, path: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_line() {
        let doc = ReportDocument {
            title: "t".to_string(),
            subtitle: String::new(),
            generated_at: Local.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap(),
            chapters: vec![],
        };
        assert_eq!(doc.date_line(), "March 04, 2025");
    }

    #[test]
    fn test_chapter_images() {
        let chapter = Chapter::new("2. Performance Chart")
            .with_block(Block::Paragraph("p".to_string()))
            .with_block(Block::Image(PathBuf::from("chart.png")));
        let images: Vec<&Path> = chapter.images().collect();
        assert_eq!(images, vec![Path::new("chart.png")]);
    }
}
