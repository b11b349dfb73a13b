use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the order dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The dataset file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row could not be decoded.
    #[error("Malformed CSV at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// A column required by the aggregations is absent from the header.
    #[error("Missing required column '{column}' in {source_name}")]
    MissingColumn { column: String, source_name: String },

    /// A timestamp cell did not match any recognised format.
    #[error("Invalid timestamp in column '{column}' at line {line}: {value:?}")]
    TimestampParse {
        column: String,
        line: u64,
        value: String,
    },

    /// A numeric cell could not be parsed.
    #[error("Invalid number in column '{column}' at line {line}: {value:?}")]
    InvalidNumber {
        column: String,
        line: u64,
        value: String,
    },

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The report could not be serialised.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashboardError::FileRead {
            path: PathBuf::from("/some/main_data.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/main_data.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = DashboardError::MissingColumn {
            column: "price".to_string(),
            source_name: "main_data.csv".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required column 'price' in main_data.csv"
        );
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = DashboardError::TimestampParse {
            column: "order_purchase_timestamp".to_string(),
            line: 12,
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid timestamp in column 'order_purchase_timestamp' at line 12: \"yesterday\""
        );
    }

    #[test]
    fn test_error_display_invalid_number() {
        let err = DashboardError::InvalidNumber {
            column: "price".to_string(),
            line: 3,
            value: "ten".to_string(),
        };
        assert!(err.to_string().contains("'price' at line 3"));
    }

    #[test]
    fn test_error_display_terminal() {
        let err = DashboardError::Terminal("crossterm failure".to_string());
        assert_eq!(err.to_string(), "Terminal error: crossterm failure");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("bad theme".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad theme");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(err.to_string().contains("Failed to serialise JSON"));
    }
}
