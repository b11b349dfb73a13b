//! Tabular views for the dashboard: customers per state and the RFM preview.
//!
//! Both render a bordered [`ratatui::widgets::Table`] with alternating row
//! styles. [`render_no_data`] is the shared placeholder for empty sections.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use dashboard_core::formatting;
use dashboard_core::models::{RfmMetric, RfmSummary, StateCount};

use crate::themes::Theme;

/// Column headers of the RFM preview, in table order.
pub fn rfm_columns() -> [&'static str; 4] {
    [
        "customer_unique_id",
        RfmMetric::Frequency.column(),
        RfmMetric::Monetary.column(),
        RfmMetric::Recency.column(),
    ]
}

/// Render the customers-per-state table into `area`.
///
/// `total_rows` is the table size the shares are computed against.
pub fn render_state_table(
    frame: &mut Frame,
    area: Rect,
    rows: &[StateCount],
    total_rows: usize,
    theme: &Theme,
) {
    if rows.is_empty() {
        render_no_data(frame, area, "Customers by State", theme);
        return;
    }

    let header = Row::new(
        ["State", "Customers", "Share %"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let share = formatting::percentage(row.customer_count as f64, total_rows as f64, 2);
            let state = if row.state.is_empty() {
                "(blank)".to_string()
            } else {
                row.state.clone()
            };
            Row::new(vec![
                Cell::from(state),
                Cell::from(formatting::format_number(row.customer_count as f64, 0)),
                Cell::from(format!("{:.2}", share)),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the first RFM rows as a table.
///
/// Absent recency (customers without a delivered order) shows as `n/a`.
pub fn render_rfm_preview(frame: &mut Frame, area: Rect, rows: &[RfmSummary], theme: &Theme) {
    if rows.is_empty() {
        render_no_data(frame, area, "RFM", theme);
        return;
    }

    let header = Row::new(
        rfm_columns()
            .into_iter()
            .map(|h| Cell::from(h).style(theme.table_header)),
    )
    .height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Row::new(vec![
                Cell::from(row.customer_unique_id.clone()),
                Cell::from(row.frequency.to_string()),
                Cell::from(formatting::format_number(row.monetary, 2)),
                Cell::from(format_recency(row.recency)),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    let widths = [
        Constraint::Length(34),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// `"12"` for a known recency, `"n/a"` otherwise.
pub fn format_recency(recency: Option<i64>) -> String {
    recency.map_or_else(|| "n/a".to_string(), |days| days.to_string())
}

/// Render a "No data" placeholder titled `title`.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let paragraph = Paragraph::new(Line::from(Span::styled("No data", theme.warning))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.section_border)
            .title(Span::styled(format!(" {} ", title), theme.bold)),
    );
    frame.render_widget(paragraph, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::Theme;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn states() -> Vec<StateCount> {
        vec![
            StateCount {
                state: "SP".to_string(),
                customer_count: 3,
            },
            StateCount {
                state: "RJ".to_string(),
                customer_count: 1,
            },
        ]
    }

    fn rfm_rows() -> Vec<RfmSummary> {
        vec![
            RfmSummary {
                customer_unique_id: "0000366f3b9a7992bf8c76cfdf3221e2".to_string(),
                recency: Some(160),
                frequency: 1,
                monetary: 129.9,
            },
            RfmSummary {
                customer_unique_id: "0000b849f77a49e4a4ce2b2a4ca5be3f".to_string(),
                recency: None,
                frequency: 2,
                monetary: 18.9,
            },
        ]
    }

    #[test]
    fn test_rfm_columns_follow_metric_names() {
        assert_eq!(
            rfm_columns(),
            ["customer_unique_id", "frequency", "monetary", "recency"]
        );
    }

    #[test]
    fn test_format_recency() {
        assert_eq!(format_recency(Some(12)), "12");
        assert_eq!(format_recency(Some(-3)), "-3");
        assert_eq!(format_recency(None), "n/a");
    }

    #[test]
    fn test_render_state_table_shows_headers_and_share() {
        let mut terminal = Terminal::new(TestBackend::new(50, 8)).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_state_table(frame, area, &states(), 4, &theme);
            })
            .unwrap();

        let text = rendered(&terminal);
        assert!(text.contains("State"));
        assert!(text.contains("Customers"));
        assert!(text.contains("75.00"));
        assert!(text.contains("25.00"));
    }

    #[test]
    fn test_render_state_table_empty_shows_no_data() {
        let mut terminal = Terminal::new(TestBackend::new(50, 5)).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_state_table(frame, area, &[], 0, &theme);
            })
            .unwrap();

        assert!(rendered(&terminal).contains("No data"));
    }

    #[test]
    fn test_render_rfm_preview_shows_columns_and_na() {
        let mut terminal = Terminal::new(TestBackend::new(80, 6)).unwrap();
        let theme = Theme::light();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_rfm_preview(frame, area, &rfm_rows(), &theme);
            })
            .unwrap();

        let text = rendered(&terminal);
        assert!(text.contains("customer_unique_id"));
        assert!(text.contains("recency"));
        assert!(text.contains("129.90"));
        assert!(text.contains("n/a"));
    }

    #[test]
    fn test_render_no_data_does_not_panic_on_tiny_area() {
        let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();
        let theme = Theme::classic();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_data(frame, area, "Nothing", &theme);
            })
            .unwrap();
    }
}
