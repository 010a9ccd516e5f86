//! Error types for the trade log.
//!
//! Database errors are carried through unchanged; the variant only records
//! which phase (connecting or executing) produced them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring, connecting to, or querying the trade log.
#[derive(Debug, Error)]
pub enum TradeLogError {
    /// Configuration document is malformed or has missing/mistyped fields.
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", .path.display())]
    Io {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration document is not valid UTF-8.
    #[error("configuration is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Configuration file extension is neither YAML nor JSON.
    #[error("unsupported configuration format: {0}")]
    UnsupportedConfigFormat(String),

    /// Connection pool could not be established.
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// DDL or DML statement failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored numeric column could not be parsed as an exact decimal.
    #[error("invalid decimal in column {column}: {value:?}: {source}")]
    Decimal {
        /// Column the value was read from.
        column: &'static str,
        /// Raw text returned by the database.
        value: String,
        /// Parse error.
        #[source]
        source: rust_decimal::Error,
    },

    /// Side string is not one of the four known sides.
    #[error("invalid trade side: {0:?}")]
    InvalidSide(String),
}

/// Result alias for trade log operations.
pub type Result<T> = std::result::Result<T, TradeLogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_invalid_side_display() {
        let err = TradeLogError::InvalidSide("Hold".to_string());
        assert_eq!(err.to_string(), "invalid trade side: \"Hold\"");
    }

    #[test]
    fn test_decimal_error_names_column() {
        let source = rust_decimal::Decimal::from_str("abc").unwrap_err();
        let err = TradeLogError::Decimal {
            column: "price",
            value: "abc".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("price"));
        assert!(msg.contains("\"abc\""));
    }

    #[test]
    fn test_sqlx_error_converts_to_database_variant() {
        let err: TradeLogError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, TradeLogError::Database(_)));
    }
}
