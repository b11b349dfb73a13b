use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Bar-chart glyphs placed either side of the dashboard title.
pub const DECORATION_LEFT: &str = "▂▄▆█";
pub const DECORATION_RIGHT: &str = "█▆▄▂";

/// Rows occupied by [`DashboardHeader::to_lines`].
pub const HEADER_HEIGHT: u16 = 4;

/// Dashboard header rendering four lines:
///
/// 1. Title with bar decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Dataset information in `[ source | N orders | M customers ]` format.
/// 4. An empty line.
pub struct DashboardHeader<'a> {
    /// Where the rows came from, usually the CSV path.
    pub source: &'a str,
    pub orders: usize,
    pub customers: usize,
    pub theme: &'a Theme,
}

impl<'a> DashboardHeader<'a> {
    pub fn new(source: &'a str, orders: usize, customers: usize, theme: &'a Theme) -> Self {
        Self {
            source,
            orders,
            customers,
            theme,
        }
    }

    /// Render the header as exactly [`HEADER_HEIGHT`] lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let count = |n: usize| dashboard_core::formatting::format_number(n as f64, 0);

        vec![
            Line::from(vec![
                Span::styled(DECORATION_LEFT, self.theme.header_sparkle),
                Span::styled(" E-COMMERCE DATA DASHBOARD ", self.theme.header),
                Span::styled(DECORATION_RIGHT, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(format!("{} orders", count(self.orders)), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} customers", count(self.customers)),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_line_count_matches_height() {
        let theme = Theme::dark();
        let lines = DashboardHeader::new("main_data.csv", 10, 4, &theme).to_lines();
        assert_eq!(lines.len(), HEADER_HEIGHT as usize);
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let lines = DashboardHeader::new("main_data.csv", 10, 4, &theme).to_lines();
        let title = text_of(&lines[0]);

        assert!(title.contains("E-COMMERCE DATA DASHBOARD"), "got: {title}");
        assert!(title.starts_with(DECORATION_LEFT));
        assert!(title.ends_with(DECORATION_RIGHT));
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let lines = DashboardHeader::new("x.csv", 0, 0, &theme).to_lines();
        let sep = text_of(&lines[1]);

        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_info_line_groups_thousands() {
        let theme = Theme::light();
        let lines = DashboardHeader::new("data/orders.csv", 112_650, 95_420, &theme).to_lines();
        let info = text_of(&lines[2]);

        assert_eq!(
            info,
            "[ data/orders.csv | 112,650 orders | 95,420 customers ]"
        );
    }

    #[test]
    fn test_header_empty_fourth_line() {
        let theme = Theme::dark();
        let lines = DashboardHeader::new("x.csv", 1, 1, &theme).to_lines();
        assert!(text_of(&lines[3]).is_empty());
    }
}
