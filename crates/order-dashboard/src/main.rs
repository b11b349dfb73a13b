mod bootstrap;

use std::path::PathBuf;

use anyhow::{Context, Result};
use dashboard_core::error::DashboardError;
use dashboard_core::settings::Settings;
use dashboard_data::analysis::{build_report, DashboardReport};
use dashboard_data::table::OrderTable;
use dashboard_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load();

    let log_file = resolve_log_file(&settings)?;
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Order Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Data: {}",
        settings.view,
        settings.theme,
        settings.data_path.display()
    );

    let table = OrderTable::load(&settings.data_path).with_context(|| {
        format!(
            "failed to load order data from {}",
            settings.data_path.display()
        )
    })?;

    match settings.view.as_str() {
        "json" => {
            let report = build_report(&table);
            println!("{}", render_json(&report)?);
        }
        _ => {
            App::new(&settings.theme)
                .run(&table)
                .map_err(|e| DashboardError::Terminal(e.to_string()))?;
        }
    }

    tracing::info!("Order Dashboard exiting");
    Ok(())
}

/// Log destination: `--log-file` when given, the default file for the
/// interactive view (stderr would corrupt the screen), otherwise stderr.
fn resolve_log_file(settings: &Settings) -> Result<Option<PathBuf>> {
    if let Some(path) = &settings.log_file {
        return Ok(Some(path.clone()));
    }
    if settings.is_interactive() {
        return Ok(Some(bootstrap::default_log_file()?));
    }
    Ok(None)
}

fn render_json(report: &DashboardReport) -> dashboard_core::error::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_log_file_prefers_flag() {
        let settings = Settings::load_from_args(["order-dashboard", "--log-file", "/tmp/x.log"]);
        assert_eq!(
            resolve_log_file(&settings).unwrap(),
            Some(PathBuf::from("/tmp/x.log"))
        );
    }

    #[test]
    fn test_resolve_log_file_json_view_uses_stderr() {
        let settings = Settings::load_from_args(["order-dashboard", "--view", "json"]);
        assert_eq!(resolve_log_file(&settings).unwrap(), None);
    }

    #[test]
    fn test_render_json_contains_sections() {
        let report = build_report(&OrderTable::from_records(vec![], "empty.csv"));
        let json = render_json(&report).unwrap();

        for key in [
            "metadata",
            "customers_by_state",
            "order_status",
            "mean_shipping_days",
            "monthly_revenue",
            "rfm",
            "payment_types",
        ] {
            assert!(json.contains(key), "missing {key}");
        }
        assert!(json.contains("empty.csv"));
    }
}
