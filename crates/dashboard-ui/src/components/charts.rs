//! Bar and line charts drawn with ratatui's chart widgets.

use dashboard_core::formatting::format_compact;
use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::table_view::render_no_data;
use crate::themes::Theme;

const BAR_GAP: u16 = 1;
const MAX_BAR_WIDTH: u16 = 16;

/// One bar: a label, its value and the colour to draw it in.
#[derive(Debug, Clone)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    pub style: Style,
}

impl BarDatum {
    pub fn new(label: impl Into<String>, value: f64, style: Style) -> Self {
        Self {
            label: label.into(),
            value,
            style,
        }
    }
}

/// Cut `label` to at most `max_width` display columns, marking the cut with
/// `…`.
pub fn truncate_label(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        return label.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Widest bar that lets `count` bars fit in `inner_width` columns.
fn bar_width_for(count: usize, inner_width: u16) -> u16 {
    if count == 0 {
        return 1;
    }
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    let gaps = BAR_GAP.saturating_mul(count - 1);
    (inner_width.saturating_sub(gaps) / count).clamp(1, MAX_BAR_WIDTH)
}

/// Render a vertical bar chart titled `title`. Shows a "No data" line when
/// `data` is empty.
pub fn render_bar_chart(frame: &mut Frame, area: Rect, title: &str, data: &[BarDatum], theme: &Theme) {
    render_bar_chart_with_axes(frame, area, title, None, data, theme);
}

/// Like [`render_bar_chart`], with `(x_title, y_title)` shown on the bottom
/// border.
pub fn render_bar_chart_with_axes(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    axes: Option<(&str, &str)>,
    data: &[BarDatum],
    theme: &Theme,
) {
    if data.is_empty() {
        render_no_data(frame, area, title, theme);
        return;
    }

    let bar_width = bar_width_for(data.len(), area.width.saturating_sub(2));
    let bars: Vec<Bar> = data
        .iter()
        .map(|d| {
            // Bar heights are unsigned; negative values keep their text.
            let height = d.value.max(0.0).round() as u64;
            Bar::default()
                .value(height)
                .text_value(format_compact(d.value))
                .label(Line::from(truncate_label(&d.label, bar_width as usize)))
                .style(d.style)
                .value_style(theme.chart_value.patch(reverse_of(d.style)))
        })
        .collect();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.section_border)
        .title(Span::styled(format!(" {} ", title), theme.bold));
    if let Some((x_title, y_title)) = axes {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" x: {}  y: {} ", x_title, y_title),
                theme.chart_axis,
            ))
            .right_aligned(),
        );
    }

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(BAR_GAP)
        .label_style(theme.label)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Value text sits on top of the bar, so use the bar colour as background.
fn reverse_of(style: Style) -> Style {
    match style.fg {
        Some(color) => Style::default().bg(color),
        None => Style::default(),
    }
}

/// Render a line chart of `points` (x label, y value) in order, with a
/// marker on every point. Shows a "No data" line when `points` is empty.
pub fn render_line_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    axis_titles: (&str, &str),
    points: &[(String, f64)],
    theme: &Theme,
) {
    if points.is_empty() {
        render_no_data(frame, area, title, theme);
        return;
    }

    let coords: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, (_, y))| (i as f64, *y))
        .collect();

    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let y_max = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);
    let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_line)
            .data(&coords),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme.chart_line)
            .data(&coords),
    ];

    let x_labels: Vec<Line> = x_axis_labels(points)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, theme.chart_axis)))
        .collect();
    let y_labels: Vec<Line> = [0.0, y_top / 2.0, y_top]
        .iter()
        .map(|v| Line::from(Span::styled(format_compact(*v), theme.chart_axis)))
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.section_border)
                .title(Span::styled(format!(" {} ", title), theme.bold)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled(axis_titles.0, theme.label))
                .style(theme.chart_axis)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(axis_titles.1, theme.label))
                .style(theme.chart_axis)
                .bounds([0.0, y_top])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// First, middle and last x labels; fewer when there are fewer points.
fn x_axis_labels(points: &[(String, f64)]) -> Vec<String> {
    match points.len() {
        0 => Vec::new(),
        1 => vec![points[0].0.clone()],
        2 => vec![points[0].0.clone(), points[1].0.clone()],
        n => vec![
            points[0].0.clone(),
            points[n / 2].0.clone(),
            points[n - 1].0.clone(),
        ],
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
