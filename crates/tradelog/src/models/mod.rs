//! Data models for the trade log.
//!
//! All monetary fields use `rust_decimal::Decimal` for exact precision.

pub mod trade;

pub use trade::{Side, Trade};
