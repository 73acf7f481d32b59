//! PNG chart of daily message counts with the two annotation blocks.
//!
//! Layout, top to bottom: title, a line chart of messages per day, the two
//! scope labels, the left and right summary boxes side by side, and an
//! attribution footer.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use tracing::{debug, info};

use crate::analytics::{Metric, UsageAggregate, UsageSummary};
use crate::error::{Result, UsageError};
use crate::report::{annotation_blocks, scope_labels};
use crate::util::atomic_write_by_path;

/// Chart title.
pub const TITLE: &str = "Daily ChatGPT Message Count with Token & Word Summary";

/// Legend label of the message series.
pub const SERIES_LABEL: &str = "Messages/day";

/// Footer text.
pub const ATTRIBUTION: &str = "Tool courtesy of carsonruebel.com";

/// Approximate number of labelled ticks on the date axis.
const TARGET_X_LABELS: usize = 20;

/// Chart dimensions and fonts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Font size of the summary boxes.
    pub box_font_size: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 750,
            box_font_size: 12,
        }
    }
}

/// Spacing between labelled ticks, aiming for about [`TARGET_X_LABELS`] labels.
pub fn tick_step(days: usize) -> usize {
    (days / TARGET_X_LABELS).max(1)
}

/// Day indices that get a date label: every [`tick_step`]-th day from the first.
pub fn label_positions(days: usize) -> Vec<usize> {
    (0..days).step_by(tick_step(days)).collect()
}

fn render_err<E: std::fmt::Display>(e: E) -> UsageError {
    UsageError::render(e.to_string())
}

/// Render the chart to `path`, replacing any existing file.
pub fn render_chart(
    aggregate: &UsageAggregate,
    summary: &UsageSummary,
    path: &Path,
    options: &ChartOptions,
) -> Result<()> {
    atomic_write_by_path(path, |tmp| draw(aggregate, summary, tmp, options))?;
    info!(path = %path.display(), "Chart saved");
    Ok(())
}

fn draw(
    aggregate: &UsageAggregate,
    summary: &UsageSummary,
    path: &Path,
    options: &ChartOptions,
) -> Result<()> {
    let days = aggregate.days();
    let messages = aggregate.series(Metric::Messages);
    let max_messages = messages.iter().copied().max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    // Bottom band holds the scope labels, both boxes, and the footer.
    let band_height = options.height * 30 / 100;
    let (plot_area, band) = root.split_vertically(options.height - band_height);

    let positions = label_positions(days.len());
    let label_count = positions.len();
    debug!(days = days.len(), labels = label_count, "Drawing message series");

    let x_axis = (0usize..days.len().max(1)).with_key_points(positions);
    let mut chart = ChartBuilder::on(&plot_area)
        .caption(TITLE, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(70)
        .y_label_area_size(55)
        .build_cartesian_2d(x_axis, 0u64..max_messages + max_messages / 10 + 1)
        .map_err(render_err)?;

    let date_label = |idx: &usize| days.get(*idx).map(|d| d.date.to_string()).unwrap_or_default();

    chart
        .configure_mesh()
        .x_labels(label_count.max(1))
        .x_label_formatter(&date_label)
        .x_label_style(
            ("sans-serif", 11)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Date")
        .y_desc("# Messages")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            messages.iter().enumerate().map(|(i, &m)| (i, m)),
            &BLUE,
        ))
        .map_err(render_err)?
        .label(SERIES_LABEL)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(
            messages
                .iter()
                .enumerate()
                .map(|(i, &m)| Circle::new((i, m), 3, BLUE.filled())),
        )
        .map_err(render_err)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    let labels = scope_labels(aggregate.options().role_scope);
    draw_band(&band, summary, labels, options)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_band<DB: DrawingBackend>(
    band: &DrawingArea<DB, plotters::coord::Shift>,
    summary: &UsageSummary,
    (left_label, right_label): (&str, &str),
    options: &ChartOptions,
) -> Result<()> {
    let (width, height) = band.dim_in_pixel();
    let (width, height) = (width as i32, height as i32);
    let font = options.box_font_size as i32;
    let line_height = font + font / 3;

    let label_style = ("monospace", font).into_font().color(&RGBColor(0x22, 0x22, 0x22));
    let box_style = ("monospace", font).into_font().color(&BLACK);

    let (left, right) = annotation_blocks(summary);
    let boxes = [
        (width / 100, left_label, left),
        (width * 635 / 1000, right_label, right),
    ];

    let label_y = 2;
    let box_top = label_y + line_height + 4;

    for (x, label, text) in &boxes {
        band.draw(&Text::new(*label, (*x + 6, label_y), label_style.clone()))
            .map_err(render_err)?;

        let lines: Vec<&str> = text.split('\n').collect();
        let box_width = lines
            .iter()
            .map(|l| l.chars().count() as i32)
            .max()
            .unwrap_or(0)
            * font
            * 6
            / 10
            + 12;
        let box_height = lines.len() as i32 * line_height + 10;

        band.draw(&Rectangle::new(
            [(*x, box_top), (*x + box_width, box_top + box_height)],
            WHITE.mix(0.85).filled(),
        ))
        .map_err(render_err)?;
        band.draw(&Rectangle::new(
            [(*x, box_top), (*x + box_width, box_top + box_height)],
            BLACK.stroke_width(1),
        ))
        .map_err(render_err)?;

        for (i, line) in lines.iter().enumerate() {
            let y = box_top + 5 + i as i32 * line_height;
            band.draw(&Text::new(*line, (*x + 6, y), box_style.clone()))
                .map_err(render_err)?;
        }
    }

    let footer_style = ("monospace", font * 9 / 10)
        .into_font()
        .color(&RGBColor(0x22, 0x22, 0x22))
        .pos(Pos::new(HPos::Right, VPos::Bottom));
    band.draw(&Text::new(ATTRIBUTION, (width - 8, height - 4), footer_style))
        .map_err(render_err)?;

    Ok(())
}
