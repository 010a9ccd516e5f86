//! Trade log persistence over `PostgreSQL`.
//!
//! This crate provides:
//! - Connection parameters loaded from YAML or JSON
//! - A pooled connection to the trade log database
//! - Idempotent creation of the `TradeLog` table and its indexes
//! - Appending trades and reading back the most recent one

pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use config::ConnectionParams;
pub use connection::TradeLogConnection;
pub use error::{Result, TradeLogError};
pub use models::{Side, Trade};
pub use repositories::TradeLogRepository;
