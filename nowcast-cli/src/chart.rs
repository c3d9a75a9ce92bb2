//! Terminal line chart for precipitation series.
//!
//! The chart is drawn with ratatui into an off-screen buffer, then the
//! buffer is flattened into lines with ANSI colour codes so it can be
//! printed like any other text.

use chrono::{DateTime, Local};
use nowcast_core::{Series, SeriesColor};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Chart, Dataset, GraphType, Widget},
};

const RESET: &str = "\x1b[0m";

/// Axis labelling requested from a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLabels {
    /// chrono format string for x values, which are epoch seconds.
    pub x_time_format: &'static str,
    pub y_unit: &'static str,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            x_time_format: nowcast_core::normalize::CLOCK_FORMAT,
            y_unit: "mm",
        }
    }
}

/// Anything that turns series into a printable multi-line string.
pub trait ChartRenderer {
    fn render(&self, series: &[Series], axes: &AxisLabels) -> String;
}

/// Braille line chart sized for a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalChart {
    width: u16,
    height: u16,
}

impl TerminalChart {
    pub const MIN_WIDTH: u16 = 40;
    pub const MAX_WIDTH: u16 = 120;

    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.clamp(Self::MIN_WIDTH, Self::MAX_WIDTH),
            height: height.max(8),
        }
    }

    /// Use the current terminal width, falling back to 80 columns.
    pub fn fit_terminal() -> Self {
        let width = ratatui::crossterm::terminal::size()
            .map(|(w, _)| w)
            .unwrap_or(80);
        Self::new(width, 16)
    }
}

impl Default for TerminalChart {
    fn default() -> Self {
        Self::new(80, 16)
    }
}

fn to_color(color: SeriesColor) -> Color {
    match color {
        SeriesColor::Cyan => Color::Cyan,
        SeriesColor::Purple => Color::Magenta,
        SeriesColor::Yellow => Color::Yellow,
    }
}

fn ansi_fg(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
        Color::Magenta => "\x1b[35m",
        Color::Cyan => "\x1b[36m",
        Color::Gray | Color::White => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        _ => RESET,
    }
}

fn time_label(x: f64, format: &str) -> String {
    DateTime::from_timestamp(x.round() as i64, 0)
        .map(|ts| ts.with_timezone(&Local).format(format).to_string())
        .unwrap_or_default()
}

fn x_bounds(series: &[Series]) -> Option<[f64; 2]> {
    let (min, max) = series
        .iter()
        .filter_map(Series::x_range)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });

    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    // A single sample still needs a non-empty axis.
    Some(if max > min { [min, max] } else { [min, min + 60.0] })
}

fn y_top(series: &[Series]) -> f64 {
    let max = series.iter().map(Series::max_y).fold(0.0, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

/// Flatten a buffer into text, emitting an escape code whenever the foreground changes.
fn buffer_to_ansi(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        let mut current = Color::Reset;

        for x in area.left()..area.right() {
            let Some(cell) = buf.cell((x, y)) else {
                continue;
            };
            if cell.fg != current {
                line.push_str(ansi_fg(cell.fg));
                current = cell.fg;
            }
            line.push_str(cell.symbol());
        }

        out.push_str(line.trim_end());
        if current != Color::Reset {
            out.push_str(RESET);
        }
        out.push('\n');
    }

    out
}

impl ChartRenderer for TerminalChart {
    fn render(&self, series: &[Series], axes: &AxisLabels) -> String {
        let Some([x_min, x_max]) = x_bounds(series) else {
            return "No forecast data available.\n".to_string();
        };
        let y_max = y_top(series);

        let datasets: Vec<Dataset<'_>> = series
            .iter()
            .map(|s| {
                Dataset::default()
                    .name(s.label.clone())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(to_color(s.color)))
                    .data(&s.points)
            })
            .collect();

        let x_labels: Vec<String> = [x_min, (x_min + x_max) / 2.0, x_max]
            .into_iter()
            .map(|x| time_label(x, axes.x_time_format))
            .collect();
        let y_labels: Vec<String> = [0.0, y_max / 2.0, y_max]
            .into_iter()
            .map(|y| format!("{y:.1}"))
            .collect();

        let chart = Chart::new(datasets)
            .x_axis(Axis::default().bounds([x_min, x_max]).labels(x_labels))
            .y_axis(
                Axis::default()
                    .title(axes.y_unit)
                    .bounds([0.0, y_max])
                    .labels(y_labels),
            )
            .legend_position(None);

        let area = Rect::new(0, 0, self.width, self.height);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);

        buffer_to_ansi(&buf)
    }
}
