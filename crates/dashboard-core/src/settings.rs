use clap::Parser;
use std::path::PathBuf;

/// Dataset location used when neither `--data-path` nor
/// `ORDER_DASHBOARD_DATA` is given.
pub const DEFAULT_DATA_PATH: &str = "main_data.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal dashboard for e-commerce order analytics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "order-dashboard",
    about = "Terminal dashboard for e-commerce order analytics",
    version
)]
pub struct Settings {
    /// Path to the order dataset (CSV)
    #[arg(long, default_value = DEFAULT_DATA_PATH, env = "ORDER_DASHBOARD_DATA")]
    pub data_path: PathBuf,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "json"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Whether the interactive terminal view was requested.
    pub fn is_interactive(&self) -> bool {
        self.view == "dashboard"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
