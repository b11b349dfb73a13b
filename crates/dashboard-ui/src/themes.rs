use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Unknown` is returned.
pub fn detect_background() -> BackgroundType {
    parse_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn parse_colorfgbg(value: Option<&str>) -> BackgroundType {
    value
        .and_then(|v| v.split(';').next_back())
        .and_then(|bg| bg.parse::<u8>().ok())
        .map(|bg| {
            if bg <= 6 {
                BackgroundType::Dark
            } else {
                BackgroundType::Light
            }
        })
        .unwrap_or(BackgroundType::Unknown)
}

/// Every style the dashboard widgets draw with.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Sidebar menu ─────────────────────────────────────────────────────────
    pub menu_title: Style,
    pub menu_item: Style,
    pub menu_selected: Style,
    pub menu_border: Style,

    // ── Sections ─────────────────────────────────────────────────────────────
    pub section_title: Style,
    pub section_border: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Bars of the RFM rankings.
    pub chart_bar: Style,
    /// Bars of the payment-type chart.
    pub chart_bar_alt: Style,
    /// Monthly revenue line and markers.
    pub chart_line: Style,
    pub chart_axis: Style,
    pub chart_value: Style,
}

/// The handful of colours a theme is derived from.
struct Palette {
    accent: Color,
    /// Foreground drawn on top of `accent`.
    on_accent: Color,
    highlight: Color,
    fg: Color,
    muted: Color,
    faint: Color,
    bar: Color,
    bar_alt: Color,
    line: Color,
    /// Whether emphasis may use the bold modifier.
    bold: bool,
}

impl Palette {
    fn strong(&self, color: Color) -> Style {
        let style = Style::default().fg(color);
        if self.bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    fn theme(self) -> Theme {
        let fg = |c: Color| Style::default().fg(c);
        Theme {
            header: self.strong(self.accent),
            header_sparkle: fg(self.highlight),
            separator: fg(self.faint),

            text: fg(self.fg),
            dim: fg(self.faint),
            bold: self.strong(self.fg),
            label: fg(self.muted),
            value: self.strong(self.fg),

            info: fg(self.accent),
            success: fg(Color::Green),
            warning: fg(Color::Yellow),
            error: fg(Color::Red),

            menu_title: self.strong(self.accent),
            menu_item: fg(self.muted),
            menu_selected: self.strong(self.on_accent).bg(self.accent),
            menu_border: fg(self.faint),

            section_title: self.strong(self.accent),
            section_border: fg(self.faint),

            table_header: self.strong(self.accent),
            table_border: fg(self.faint),
            table_row: fg(self.fg),
            table_row_alt: fg(self.muted),

            chart_bar: fg(self.bar),
            chart_bar_alt: fg(self.bar_alt),
            chart_line: fg(self.line),
            chart_axis: fg(self.muted),
            chart_value: self.strong(self.fg),
        }
    }
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Palette {
            accent: Color::Cyan,
            on_accent: Color::Black,
            highlight: Color::Yellow,
            fg: Color::White,
            muted: Color::Gray,
            faint: Color::DarkGray,
            bar: Color::Rgb(0x72, 0xBC, 0xD4),
            bar_alt: Color::Rgb(0x46, 0x82, 0xB4),
            line: Color::Rgb(0x87, 0xCE, 0xEB),
            bold: true,
        }
        .theme()
    }

    /// Light-background terminal theme with dark text.
    pub fn light() -> Self {
        Palette {
            accent: Color::Blue,
            on_accent: Color::White,
            highlight: Color::Magenta,
            fg: Color::Black,
            muted: Color::DarkGray,
            faint: Color::Gray,
            bar: Color::Rgb(0x2E, 0x86, 0xA8),
            bar_alt: Color::Rgb(0x46, 0x82, 0xB4),
            line: Color::Blue,
            bold: true,
        }
        .theme()
    }

    /// Basic ANSI colours only, no bold and no RGB.
    pub fn classic() -> Self {
        Palette {
            accent: Color::Cyan,
            on_accent: Color::Black,
            highlight: Color::White,
            fg: Color::White,
            muted: Color::Gray,
            faint: Color::DarkGray,
            bar: Color::Cyan,
            bar_alt: Color::Blue,
            line: Color::Cyan,
            bold: false,
        }
        .theme()
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Semantic colour for an order status.
    ///
    /// | Status      | Style     |
    /// |-------------|-----------|
    /// | delivered   | success   |
    /// | canceled    | error     |
    /// | shipped     | info      |
    /// | invoiced    | info      |
    /// | pending     | warning   |
    /// | other       | dim       |
    pub fn status_style(&self, status: &str) -> Style {
        match status {
            "delivered" => self.success,
            "canceled" | "unavailable" => self.error,
            "shipped" | "invoiced" => self.info,
            "pending" | "processing" | "approved" | "created" => self.warning,
            _ => self.dim,
        }
    }

    /// Alternate row styles so long tables stay readable.
    pub fn row_style(&self, index: usize) -> Style {
        if index % 2 == 0 {
            self.table_row
        } else {
            self.table_row_alt
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
