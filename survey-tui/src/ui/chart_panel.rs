//! Chart panel: per-country horizontal bars, stacked by subanswer.
//!
//! Bars are drawn cell by cell on a 0-100 axis. Segment edges are scaled from
//! the cumulative offsets, so adjacent segments always meet without gaps.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use survey_core::series::{AXIS_LABEL, AXIS_MAX, LEGEND_TITLE};
use survey_core::{ChartSeries, ErrorKind, Palette, SeriesBody};

use crate::app::{AppState, ChartView};
use crate::theme;

/// Width of the country label column.
const LABEL_WIDTH: u16 = 8;
/// Room for the axis corner plus the trailing ` 100%`.
const GUTTER: u16 = 6;
const TICKS: [u32; 6] = [0, 20, 40, 60, 80, 100];
const FILL: &str = "█";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.chart {
        ChartView::Ready(series) => {
            render_chart(f, area, series, app.viewer.palette(), app.bar_width)
        }
        ChartView::Failed { kind, message } => render_failed(f, area, *kind, message),
        ChartView::Empty => render_empty(f, area, app),
    }
}

fn render_empty(f: &mut Frame, area: Rect, app: &AppState) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}.", app.path().description()),
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Pick an answer (or a gradient-only question) to chart it by country.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_failed(f: &mut Frame, area: Rect, kind: ErrorKind, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Cannot chart this selection [{}]", kind.label()),
            theme::negative(),
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme::warning())),
        Line::from(""),
        Line::from(Span::styled(
            "Other nodes are unaffected. Press Esc to go back.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_chart(f: &mut Frame, area: Rect, series: &ChartSeries, palette: &Palette, bar_width: u16) {
    let width = area.width.saturating_sub(LABEL_WIDTH + GUTTER).max(1);
    let lines = chart_lines(series, palette, width, bar_width);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Every line of a rendered chart, `width` cells per 0-100 axis.
pub fn chart_lines(
    series: &ChartSeries,
    palette: &Palette,
    width: u16,
    bar_width: u16,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(title) = &series.title {
        lines.push(Line::from(Span::styled(title.clone(), theme::accent_bold())));
        lines.push(Line::from(""));
    }

    let totals = series.totals();
    for (i, country) in series.countries.iter().enumerate() {
        for row in 0..bar_width.max(1) {
            let first = row == 0;
            let label = if first { country.code() } else { "" };
            let mut spans = vec![
                Span::styled(format!("{label:>w$} ", w = LABEL_WIDTH as usize - 1), theme::text()),
                Span::styled("│", theme::muted()),
            ];
            spans.extend(bar_spans(series, i, palette, width));
            if first {
                spans.push(Span::styled(format!(" {:>3}%", totals[i]), theme::muted()));
            }
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH as usize)),
        Span::styled(format!("└{}", "─".repeat(width as usize)), theme::muted()),
    ]));
    lines.push(Line::from(Span::styled(tick_line(width), theme::muted())));
    lines.push(Line::from(Span::styled(
        centered(AXIS_LABEL, LABEL_WIDTH + 1 + width),
        theme::muted(),
    )));

    if let SeriesBody::Stacked { rows } = &series.body {
        lines.push(Line::from(""));
        let mut legend = vec![Span::styled(format!("{LEGEND_TITLE}: "), theme::accent())];
        for row in rows {
            legend.push(Span::styled(
                "■ ",
                Style::default().fg(theme::segment_color(palette, row.color_index)),
            ));
            legend.push(Span::styled(format!("{}  ", row.label), theme::text()));
        }
        lines.push(Line::from(legend));
    }

    lines
}

/// Cells covered by `percent` on a `width`-cell axis.
pub fn scale(percent: u32, width: u16) -> u16 {
    (percent.min(AXIS_MAX) * u32::from(width) / AXIS_MAX) as u16
}

/// Filled cells for country `i`, padded to `width`.
fn bar_spans(series: &ChartSeries, i: usize, palette: &Palette, width: u16) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut filled = 0u16;

    match &series.body {
        SeriesBody::Single { values } => {
            filled = scale(values[i], width);
            spans.push(Span::styled(
                FILL.repeat(filled as usize),
                Style::default().fg(theme::BAR),
            ));
        }
        SeriesBody::Stacked { rows } => {
            for row in rows {
                let start = scale(row.offsets[i], width);
                let end = scale(row.end(i), width);
                if end > start {
                    spans.push(Span::styled(
                        FILL.repeat((end - start) as usize),
                        Style::default().fg(theme::segment_color(palette, row.color_index)),
                    ));
                }
                filled = end;
            }
        }
    }

    spans.push(Span::raw(" ".repeat(width.saturating_sub(filled) as usize)));
    spans
}

fn tick_line(width: u16) -> String {
    let total = (LABEL_WIDTH + 1 + width) as usize + 4;
    let mut cells = vec![' '; total];
    for tick in TICKS {
        let at = (LABEL_WIDTH + scale(tick, width)) as usize;
        for (k, ch) in tick.to_string().chars().enumerate() {
            if let Some(cell) = cells.get_mut(at + k) {
                *cell = ch;
            }
        }
    }
    cells.into_iter().collect::<String>().trim_end().to_string()
}

fn centered(text: &str, width: u16) -> String {
    let pad = (width as usize).saturating_sub(text.chars().count()) / 2;
    format!("{}{text}", " ".repeat(pad))
}
