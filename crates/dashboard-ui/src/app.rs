//! Application state and TUI event loop for the order dashboard.
//!
//! [`App`] owns the theme, the sidebar selection and the scroll position.
//! The loop blocks on terminal events; every event triggers a recompute of
//! the report and a redraw.

use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::{ListState, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, info};

use dashboard_data::analysis::{build_report, DashboardReport};
use dashboard_data::table::OrderTable;

use crate::components::menu::{default_selection, render_menu, MenuEntry, MENU_WIDTH};
use crate::dashboard_view::{render_dashboard, Section};
use crate::themes::Theme;

/// Sections skipped by `PgUp` / `PgDn`.
const PAGE_STEP: usize = 3;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Index of the first visible section.
    pub scroll: usize,
    /// Sidebar selection.
    pub menu_state: ListState,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            scroll: 0,
            menu_state: default_selection(),
            should_quit: false,
        }
    }

    /// The page chosen in the sidebar.
    pub fn selected_entry(&self) -> Option<MenuEntry> {
        self.menu_state.selected().and_then(MenuEntry::from_index)
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard over `table` until the user quits.
    ///
    /// The terminal is restored even when drawing or reading events fails.
    pub fn run(mut self, table: &OrderTable) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(t) => t,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(e);
            }
        };

        info!("Dashboard started on {}", table.source());

        let result = loop {
            let report = build_report(table);
            if let Err(e) = terminal.draw(|frame| self.render(frame, &report)) {
                break Err(e);
            }

            match event::read() {
                Ok(Event::Key(key)) => self.handle_key(key),
                Ok(_) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        let restore = disable_raw_mode()
            .and_then(|_| execute!(terminal.backend_mut(), LeaveAlternateScreen))
            .and_then(|_| terminal.show_cursor());

        info!("Dashboard closed");
        result.and(restore)
    }

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let last = Section::ALL.len() - 1;
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.scroll = (self.scroll + 1).min(last),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll = (self.scroll + PAGE_STEP).min(last),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_STEP),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = last,
            KeyCode::Tab | KeyCode::Enter => {
                self.menu_state.select(Some(0));
                self.scroll = 0;
            }
            _ => {}
        }
        debug!("key {:?} -> scroll {}", key.code, self.scroll);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the sidebar and the selected page into `frame`.
    pub fn render(&self, frame: &mut Frame, report: &DashboardReport) {
        let [sidebar, main] =
            Layout::horizontal([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
                .areas(frame.area());
        let [menu_area, hint_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(sidebar);

        let mut menu_state = self.menu_state.clone();
        render_menu(frame, menu_area, &mut menu_state, &self.theme);
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("↑/↓ scroll  Home top", self.theme.dim)),
                Line::from(Span::styled("q quit", self.theme.dim)),
            ]),
            hint_area,
        );

        match self.selected_entry() {
            Some(MenuEntry::MainDashboard) | None => {
                render_dashboard(frame, main, report, self.scroll, &self.theme);
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
