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

//! Chart renderer.
//!
//! Draws execution time against problem size, one line per variant. Both
//! axes are logarithmic: the x axis plots `log2(n)` on a linear range with
//! tick labels only at the measured sizes, and the y axis is log-scaled
//! seconds. Non-positive times cannot be placed on a log axis and are left
//! out of the drawing; they are still in the tables.

use crate::error::{ReportError, Result};
use crate::model::DerivedTable;
use crate::variant::Variant;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const TITLE_FONT_SIZE: u32 = 32;
const AXIS_LABEL_FONT_SIZE: u32 = 22;
const TICK_LABEL_FONT_SIZE: u32 = 18;
const LEGEND_FONT_SIZE: u32 = 18;

/// Line colors, indexed by [`Variant::index`].
const COLORS: [RGBColor; Variant::COUNT] = [
    RGBColor(90, 90, 90),   // Baseline - grey
    RGBColor(66, 133, 244), // AVX2 - blue
    RGBColor(52, 168, 83),  // Unroll - green
    RGBColor(234, 67, 53),  // Interchange - red
];

/// Plottable points of one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Variant the line belongs to.
    pub variant: Variant,
    /// `(size, seconds)` points with positive times, ascending by size.
    pub points: Vec<(u64, f64)>,
}

/// Extracts one series per variant, in declaration order.
pub fn chart_series(table: &DerivedTable) -> Vec<ChartSeries> {
    Variant::ALL
        .iter()
        .map(|variant| ChartSeries {
            variant: *variant,
            points: table
                .rows()
                .iter()
                .map(|row| (row.size, row.time(*variant)))
                .filter(|(_, t)| *t > 0.0)
                .collect(),
        })
        .collect()
}

/// Draws a chart image for a derived table.
pub trait ChartEngine {
    /// Renders the chart to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Render`] with artifact `"chart"` on failure.
    fn render(&self, table: &DerivedTable, path: &Path) -> Result<()>;
}

/// PNG chart renderer backed by plotters.
#[derive(Debug, Clone)]
pub struct PlottersChart {
    title: String,
    size: (u32, u32),
}

impl PlottersChart {
    /// Creates a renderer producing images of `size` pixels.
    pub fn new(title: impl Into<String>, size: (u32, u32)) -> Self {
        Self {
            title: title.into(),
            size,
        }
    }
}

impl Default for PlottersChart {
    fn default() -> Self {
        Self::new(
            "Performance Comparison: Execution Time vs Problem Size",
            crate::config::DEFAULT_CHART_SIZE,
        )
    }
}

impl ChartEngine for PlottersChart {
    fn render(&self, table: &DerivedTable, path: &Path) -> Result<()> {
        draw(&self.title, self.size, table, path).map_err(|e| ReportError::render("chart", e))?;
        tracing::debug!(path = %path.display(), "chart written");
        Ok(())
    }
}

fn seconds_tick(seconds: f64) -> String {
    if seconds >= 1.0 {
        format!("{:.0}s", seconds)
    } else if seconds >= 1e-3 {
        format!("{:.0}ms", seconds * 1e3)
    } else {
        format!("{:.0}µs", seconds * 1e6)
    }
}

fn y_range(series: &[ChartSeries]) -> (f64, f64) {
    let times = series.iter().flat_map(|s| s.points.iter().map(|(_, t)| *t));
    let (lo, hi) = times.fold((f64::MAX, 0.0_f64), |(lo, hi), t| (lo.min(t), hi.max(t)));
    if hi <= 0.0 {
        return (1e-3, 1.0);
    }
    (lo * 0.5, hi * 2.0)
}

fn draw(
    title: &str,
    size: (u32, u32),
    table: &DerivedTable,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let series = chart_series(table);
    let sizes = table.sizes();
    let ticks: Vec<f64> = sizes.iter().map(|n| (*n as f64).log2()).collect();

    let (x_lo, x_hi) = match (ticks.first(), ticks.last()) {
        (Some(lo), Some(hi)) => (lo - 0.5, hi + 0.5),
        _ => (0.0, 1.0),
    };
    let (y_lo, y_hi) = y_range(&series);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(x_lo..x_hi, (y_lo..y_hi).log_scale())?;

    // Size labels are drawn at the measured points below, so the mesh
    // leaves its own x labels blank.
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(ticks.len().max(2))
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|y| seconds_tick(*y))
        .x_desc("Problem Size (n)")
        .y_desc("Execution Time (seconds)")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    chart.draw_series(ticks.iter().map(|x| {
        PathElement::new(vec![(*x, y_lo), (*x, y_hi)], BLACK.mix(0.1))
    }))?;
    chart.draw_series(ticks.iter().zip(&sizes).map(|(x, n)| {
        Text::new(
            n.to_string(),
            (*x, y_lo),
            ("sans-serif", TICK_LABEL_FONT_SIZE)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        )
    }))?;

    for line in &series {
        if line.points.is_empty() {
            continue;
        }
        let color = COLORS[line.variant.index()];
        let data: Vec<(f64, f64)> = line
            .points
            .iter()
            .map(|(n, t)| ((*n as f64).log2(), *t))
            .collect();

        chart
            .draw_series(LineSeries::new(data.clone(), color.stroke_width(3)))?
            .label(line.variant.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));

        chart.draw_series(PointSeries::of_element(
            data,
            5,
            color.filled(),
            &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
        ))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;

    root.present()?;
    Ok(())
}
