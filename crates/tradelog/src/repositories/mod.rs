//! Database repositories for the trade log.

pub mod trade_log_repo;

pub use trade_log_repo::{TradeLogRepository, SCHEMA_STATEMENTS};
