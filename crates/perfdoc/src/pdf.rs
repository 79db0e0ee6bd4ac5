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

//! PDF document engine.
//!
//! Lays a [`ReportDocument`] out on A4 pages with the PDF built-in fonts:
//! Helvetica for prose, Courier for tables. Every page carries the report
//! title as a running header and a `Page N` footer.
//!
//! Built-in fonts carry no metrics in `printpdf`, so line wrapping uses an
//! average glyph width per face. Courier is monospaced, which keeps table
//! columns aligned exactly.
//!
//! The file is written to `<path>.partial` and renamed into place once
//! complete; a failed emission leaves no file at `path`.

use crate::document::{Block, DocumentEngine, ReportDocument};
use crate::error::{ReportError, Result};
use crate::table::TextTable;
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const CONTENT_TOP: f32 = PAGE_HEIGHT - MARGIN - 4.0;
const CONTENT_BOTTOM: f32 = MARGIN;
const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;

const TITLE_SIZE: f32 = 20.0;
const CHAPTER_SIZE: f32 = 15.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.5;
const DECORATION_SIZE: f32 = 8.0;
const MAX_TABLE_SIZE: f32 = 9.0;

/// Average glyph width as a fraction of the font size.
const HELVETICA_EM: f32 = 0.5;
const COURIER_EM: f32 = 0.6;

#[derive(Debug, Clone, Copy)]
enum Face {
    Regular,
    Bold,
    Mono,
}

fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * LINE_SPACING
}

fn chars_per_line(size: f32, em: f32) -> usize {
    ((TEXT_WIDTH / (size * PT_TO_MM * em)).floor() as usize).max(1)
}

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// Words longer than a line are kept whole on their own line.
pub(crate) fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

/// PDF engine backed by `printpdf`.
#[derive(Debug, Clone, Default)]
pub struct PdfEngine;

impl PdfEngine {
    /// Creates a new PDF engine.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentEngine for PdfEngine {
    fn emit(&self, document: &ReportDocument, path: &Path) -> Result<()> {
        let partial = partial_path(path);
        let written = layout(document).and_then(|writer| writer.save(&partial));
        if let Err(e) = written {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
        fs::rename(&partial, path).map_err(|e| {
            let _ = fs::remove_file(&partial);
            ReportError::render("report", format!("cannot write '{}': {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "pdf written");
        Ok(())
    }
}

fn layout(document: &ReportDocument) -> Result<PageWriter> {
    let mut writer = PageWriter::new(&document.title)?;

    writer.line(&document.title, TITLE_SIZE, Face::Bold);
    if !document.subtitle.is_empty() {
        writer.paragraph(&document.subtitle, HEADING_SIZE, Face::Regular);
    }
    writer.paragraph(&document.date_line(), BODY_SIZE, Face::Regular);
    writer.gap(8.0);

    for chapter in &document.chapters {
        writer.ensure(line_height(CHAPTER_SIZE) + 3.0 * line_height(BODY_SIZE));
        writer.line(&chapter.title, CHAPTER_SIZE, Face::Bold);
        writer.gap(2.0);
        for block in &chapter.blocks {
            match block {
                Block::Heading(text) => {
                    writer.gap(2.0);
                    writer.ensure(line_height(HEADING_SIZE) + 2.0 * line_height(BODY_SIZE));
                    writer.line(text, HEADING_SIZE, Face::Bold);
                }
                Block::Paragraph(text) => {
                    writer.paragraph(text, BODY_SIZE, Face::Regular);
                    writer.gap(3.0);
                }
                Block::Table(table) => {
                    writer.table(table);
                    writer.gap(4.0);
                }
                Block::Image(image) => {
                    writer.image(image)?;
                    writer.gap(4.0);
                }
            }
        }
        writer.gap(6.0);
    }

    Ok(writer)
}

struct PageWriter {
    doc: PdfDocumentReference,
    header: String,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    mono: IndirectFontRef,
    layer: PdfLayerReference,
    page_no: usize,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let font = |face| {
            doc.add_builtin_font(face)
                .map_err(|e| ReportError::render("report", e))
        };
        let regular = font(BuiltinFont::Helvetica)?;
        let bold = font(BuiltinFont::HelveticaBold)?;
        let mono = font(BuiltinFont::Courier)?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut writer = Self {
            doc,
            header: title.to_string(),
            regular,
            bold,
            mono,
            layer,
            page_no: 1,
            y: CONTENT_TOP,
        };
        writer.decorate();
        Ok(writer)
    }

    fn font(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Mono => &self.mono,
        }
    }

    fn decorate(&self) {
        self.layer.use_text(
            self.header.as_str(),
            DECORATION_SIZE,
            Mm(MARGIN),
            Mm(PAGE_HEIGHT - MARGIN / 2.0),
            &self.regular,
        );
        self.layer.use_text(
            format!("Page {}", self.page_no),
            DECORATION_SIZE,
            Mm(PAGE_WIDTH / 2.0 - 6.0),
            Mm(MARGIN / 2.0),
            &self.regular,
        );
    }

    fn new_page(&mut self) {
        self.page_no += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Page {}", self.page_no),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = CONTENT_TOP;
        self.decorate();
    }

    /// Starts a new page unless `height` millimetres still fit.
    fn ensure(&mut self, height: f32) {
        if self.y - height < CONTENT_BOTTOM && self.y < CONTENT_TOP {
            self.new_page();
        }
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn line(&mut self, text: &str, size: f32, face: Face) {
        let height = line_height(size);
        self.ensure(height);
        self.y -= height;
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.y), self.font(face));
    }

    fn paragraph(&mut self, text: &str, size: f32, face: Face) {
        let em = match face {
            Face::Mono => COURIER_EM,
            _ => HELVETICA_EM,
        };
        let width = chars_per_line(size, em);
        for source_line in text.split('\n') {
            for line in wrap(source_line, width) {
                self.line(&line, size, face);
            }
        }
    }

    fn table(&mut self, table: &TextTable) {
        let lines = table.render();
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(1).max(1);
        let fit = TEXT_WIDTH / (widest as f32 * COURIER_EM * PT_TO_MM);
        let size = fit.min(MAX_TABLE_SIZE);

        self.ensure(line_height(BODY_SIZE) + 3.0 * line_height(size));
        self.line(&table.title, BODY_SIZE, Face::Bold);
        for line in &lines {
            self.line(line, size, Face::Mono);
        }
    }

    fn image(&mut self, path: &Path) -> Result<()> {
        let embed_error = |e: &dyn std::fmt::Display| {
            ReportError::render("report", format!("cannot embed '{}': {}", path.display(), e))
        };
        let source = image_crate::open(path).map_err(|e| embed_error(&e))?;
        let (px_width, px_height) = source.dimensions();
        if px_width == 0 || px_height == 0 {
            return Err(embed_error(&"image has no pixels"));
        }

        let max_height = CONTENT_TOP - CONTENT_BOTTOM;
        let mut width = TEXT_WIDTH;
        let mut height = width * px_height as f32 / px_width as f32;
        if height > max_height {
            height = max_height;
            width = height * px_width as f32 / px_height as f32;
        }
        let dpi = px_width as f32 * 25.4 / width;

        self.ensure(height);
        self.y -= height;
        let rgb = DynamicImage::ImageRgb8(source.to_rgb8());
        Image::from_dynamic_image(&rgb).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN)),
                translate_y: Some(Mm(self.y)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn save(self, path: &Path) -> Result<()> {
        let write_error = |e: io::Error| {
            ReportError::render("report", format!("cannot write '{}': {}", path.display(), e))
        };
        let file = File::create(path).map_err(write_error)?;
        let mut out = BufWriter::new(file);
        self.doc
            .save(&mut out)
            .map_err(|e| ReportError::render("report", e))?;
        out.flush().map_err(write_error)
    }
}
