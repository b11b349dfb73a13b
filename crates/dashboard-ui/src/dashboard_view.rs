//! The "Main Dashboard" page: header plus six analysis sections.
//!
//! Sections are stacked top to bottom starting at the scroll position; the
//! last visible one is clipped to the remaining height.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use dashboard_core::formatting::format_days;
use dashboard_core::models::RfmMetric;
use dashboard_data::analysis::DashboardReport;

use crate::components::charts::{
    render_bar_chart, render_bar_chart_with_axes, render_line_chart, BarDatum,
};
use crate::components::header::{DashboardHeader, HEADER_HEIGHT};
use crate::table_view::{render_rfm_preview, render_state_table};
use crate::themes::Theme;

/// Rows shown in the RFM preview table.
pub const RFM_PREVIEW_ROWS: usize = 5;

pub const RFM_CAPTION: &str = "Top Customers Based on RFM Parameters (customer_unique_id)";
pub const REVENUE_CHART_TITLE: &str = "Monthly E-commerce Revenue";
pub const PAYMENT_CHART_TITLE: &str = "Customer Distribution by Payment Type";
pub const PAYMENT_AXIS_TITLES: (&str, &str) = ("Payment Type", "Customer Count");

const MAX_STATE_ROWS: usize = 27;
/// Payment types are sorted by count, so this keeps the largest ones.
const MAX_PAYMENT_BARS: usize = 12;
const BAR_CHART_HEIGHT: u16 = 12;
const LINE_CHART_HEIGHT: u16 = 16;
const NO_DATA_HEIGHT: u16 = 3;

// ── Section ───────────────────────────────────────────────────────────────────

/// The dashboard sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    CustomerCountByState,
    OrderStatusDistribution,
    MeanShippingTime,
    MonthlyRevenue,
    RfmAnalysis,
    PaymentDistribution,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::CustomerCountByState,
        Section::OrderStatusDistribution,
        Section::MeanShippingTime,
        Section::MonthlyRevenue,
        Section::RfmAnalysis,
        Section::PaymentDistribution,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::CustomerCountByState => "Customer Count by State",
            Section::OrderStatusDistribution => "Order Status Distribution",
            Section::MeanShippingTime => "Mean Shipping Time",
            Section::MonthlyRevenue => "Monthly Revenue",
            Section::RfmAnalysis => "RFM Analysis",
            Section::PaymentDistribution => "Payment Distribution Analysis",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Section::CustomerCountByState => {
                "This section shows the total number of customers grouped by their respective \
                 states. It helps to identify which states have the highest number of customers."
            }
            Section::OrderStatusDistribution => {
                "This chart displays the distribution of different order statuses, showing how \
                 many orders are completed, shipped, canceled, etc. It provides insight into the \
                 overall performance of order fulfillment."
            }
            Section::MeanShippingTime => {
                "The mean shipping time indicates the average number of days taken for orders to \
                 be delivered to customers. This metric is essential for assessing the efficiency \
                 of the shipping process."
            }
            Section::MonthlyRevenue => {
                "This graph shows the total revenue generated each month, allowing us to track \
                 trends in sales over time. It can help identify peak sales periods and potential \
                 downturns."
            }
            Section::RfmAnalysis => {
                "RFM (Recency, Frequency, Monetary) analysis is used to segment customers based \
                 on their purchasing behavior. This analysis helps to identify valuable customers \
                 and tailor marketing strategies accordingly."
            }
            Section::PaymentDistribution => {
                "This section shows the distribution of customers based on the payment methods \
                 they used. Understanding payment preferences can inform decisions regarding \
                 payment options offered to customers."
            }
        }
    }

    /// Rows needed below the description.
    fn content_height(&self, report: &DashboardReport) -> u16 {
        match self {
            Section::CustomerCountByState => {
                if report.customers_by_state.is_empty() {
                    NO_DATA_HEIGHT
                } else {
                    // header row plus borders
                    report.customers_by_state.len().min(MAX_STATE_ROWS) as u16 + 3
                }
            }
            Section::OrderStatusDistribution | Section::PaymentDistribution => BAR_CHART_HEIGHT,
            Section::MeanShippingTime => 1,
            Section::MonthlyRevenue => {
                if report.monthly_revenue.is_empty() {
                    NO_DATA_HEIGHT
                } else {
                    LINE_CHART_HEIGHT
                }
            }
            Section::RfmAnalysis => rfm_preview_height(report) + 1 + BAR_CHART_HEIGHT,
        }
    }

    /// Full height of the bordered section at `width` columns.
    pub fn height(&self, report: &DashboardReport, width: u16) -> u16 {
        let inner_width = width.saturating_sub(2);
        // borders + description + spacer + content
        2 + wrapped_line_count(self.description(), inner_width) + 1 + self.content_height(report)
    }
}

fn rfm_preview_height(report: &DashboardReport) -> u16 {
    match report.rfm_preview(RFM_PREVIEW_ROWS).len() {
        0 => NO_DATA_HEIGHT,
        n => n as u16 + 3,
    }
}

/// Lines `text` occupies when word-wrapped to `width` columns.
pub fn wrapped_line_count(text: &str, width: u16) -> u16 {
    let width = width as usize;
    if width == 0 {
        return 0;
    }

    let mut lines = 1u16;
    let mut current = 0usize;
    for word in text.split_whitespace() {
        let w = word.width();
        if current == 0 {
            current = w;
        } else if current + 1 + w <= width {
            current += 1 + w;
        } else {
            lines += 1;
            current = w;
        }
        // Words longer than the line spill onto extra lines.
        while current > width {
            lines += 1;
            current -= width;
        }
    }
    lines
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the header and the sections from `scroll` onwards into `area`.
pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    report: &DashboardReport,
    scroll: usize,
    theme: &Theme,
) {
    let [header_area, body] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(area);

    let header = DashboardHeader::new(
        &report.metadata.source,
        report.metadata.rows,
        report.metadata.customers,
        theme,
    );
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

    let mut y = body.y;
    let bottom = body.y.saturating_add(body.height);
    for section in Section::ALL.iter().skip(scroll) {
        if y >= bottom {
            break;
        }
        let wanted = section.height(report, body.width);
        let height = wanted.min(bottom - y);
        let rect = Rect::new(body.x, y, body.width, height);
        render_section(frame, rect, *section, report, theme);
        y = y.saturating_add(height);
    }
}

fn render_section(
    frame: &mut Frame,
    area: Rect,
    section: Section,
    report: &DashboardReport,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.section_border)
        .title(Span::styled(format!(" {} ", section.title()), theme.section_title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let description_height = wrapped_line_count(section.description(), inner.width);
    let [description_area, _, content] = Layout::vertical([
        Constraint::Length(description_height),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(section.description(), theme.dim)).wrap(Wrap { trim: true }),
        description_area,
    );

    match section {
        Section::CustomerCountByState => {
            let shown = report.customers_by_state.len().min(MAX_STATE_ROWS);
            render_state_table(
                frame,
                content,
                &report.customers_by_state[..shown],
                report.metadata.rows,
                theme,
            );
        }
        Section::OrderStatusDistribution => {
            let data: Vec<BarDatum> = report
                .order_status
                .iter()
                .map(|s| BarDatum::new(s.status.clone(), s.count as f64, theme.status_style(&s.status)))
                .collect();
            render_bar_chart(frame, content, "Orders by Status", &data, theme);
        }
        Section::MeanShippingTime => {
            frame.render_widget(Paragraph::new(shipping_line(report, theme)), content);
        }
        Section::MonthlyRevenue => {
            let points: Vec<(String, f64)> = report
                .monthly_revenue
                .iter()
                .map(|m| (m.month.to_string(), m.revenue))
                .collect();
            render_line_chart(
                frame,
                content,
                REVENUE_CHART_TITLE,
                ("Month", "Total Revenue"),
                &points,
                theme,
            );
        }
        Section::RfmAnalysis => render_rfm(frame, content, report, theme),
        Section::PaymentDistribution => {
            let data: Vec<BarDatum> = report
                .payment_types
                .iter()
                .take(MAX_PAYMENT_BARS)
                .map(|p| BarDatum::new(p.payment_type.clone(), p.customer_count as f64, theme.chart_bar_alt))
                .collect();
            render_bar_chart_with_axes(
                frame,
                content,
                PAYMENT_CHART_TITLE,
                Some(PAYMENT_AXIS_TITLES),
                &data,
                theme,
            );
        }
    }
}

/// The shipping sentence, or a warning when no order was delivered.
pub fn shipping_line<'a>(report: &DashboardReport, theme: &'a Theme) -> Line<'a> {
    match report.mean_shipping_days {
        Some(days) => Line::from(vec![
            Span::styled("The average shipping time is ", theme.text),
            Span::styled(format_days(days), theme.value),
            Span::styled(".", theme.text),
        ]),
        None => Line::from(Span::styled(
            "No delivered orders: the average shipping time is undefined.",
            theme.warning,
        )),
    }
}

fn render_rfm(frame: &mut Frame, area: Rect, report: &DashboardReport, theme: &Theme) {
    let [preview_area, caption_area, charts_area] = Layout::vertical([
        Constraint::Length(rfm_preview_height(report)),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    render_rfm_preview(
        frame,
        preview_area,
        report.rfm_preview(RFM_PREVIEW_ROWS),
        theme,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(RFM_CAPTION, theme.bold)).centered()),
        caption_area,
    );

    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(charts_area);
    for (metric, column) in RfmMetric::ALL.iter().zip(columns.iter()) {
        let data: Vec<BarDatum> = report
            .top_customers(*metric)
            .iter()
            .map(|row| {
                BarDatum::new(
                    row.customer_unique_id.clone(),
                    metric.value(row).unwrap_or(0.0),
                    theme.chart_bar,
                )
            })
            .collect();
        render_bar_chart(frame, *column, metric.title(), &data, theme);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
