use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::themes::Theme;

pub const MENU_TITLE: &str = "Dashboard Menu";

/// Sidebar width in columns, borders included.
pub const MENU_WIDTH: u16 = 24;

/// Pages reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    MainDashboard,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 1] = [MenuEntry::MainDashboard];

    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::MainDashboard => "Main Dashboard",
        }
    }

    /// Entry at list position `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// A list state with the first entry selected, the sidebar's default.
pub fn default_selection() -> ListState {
    let mut state = ListState::default();
    state.select(Some(0));
    state
}

/// Render the sidebar into `area`, highlighting the selected entry.
pub fn render_menu(frame: &mut Frame, area: Rect, state: &mut ListState, theme: &Theme) {
    let items: Vec<ListItem> = MenuEntry::ALL
        .iter()
        .map(|entry| ListItem::new(Line::from(Span::styled(entry.label(), theme.menu_item))))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.menu_border)
                .title(Span::styled(format!(" {} ", MENU_TITLE), theme.menu_title)),
        )
        .highlight_style(theme.menu_selected)
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, state);
}
