//! Executed trade data model.
//!
//! A trade is one row of the `TradeLog` table. Volume, price and fee are
//! exact decimals stored as `NUMERIC(18, 8)`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TradeLogError;

/// Direction of an executed trade.
///
/// The string forms are what the `side` column stores and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Opens a long position
    #[serde(rename = "Buy")]
    Buy,
    /// Closes a long position
    #[serde(rename = "Close Buy")]
    CloseBuy,
    /// Opens a short position
    #[serde(rename = "Sell")]
    Sell,
    /// Closes a short position
    #[serde(rename = "Close Sell")]
    CloseSell,
}

impl Side {
    /// All sides, in declaration order.
    pub const ALL: [Side; 4] = [Side::Buy, Side::CloseBuy, Side::Sell, Side::CloseSell];

    /// Returns the stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::CloseBuy => "Close Buy",
            Self::Sell => "Sell",
            Self::CloseSell => "Close Sell",
        }
    }

    /// Returns true for sides that close an existing position.
    #[must_use]
    pub const fn is_close(&self) -> bool {
        matches!(self, Self::CloseBuy | Self::CloseSell)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = TradeLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Side::ALL
            .into_iter()
            .find(|side| side.as_str() == s)
            .ok_or_else(|| TradeLogError::InvalidSide(s.to_string()))
    }
}

/// An executed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Execution time
    pub timestamp: DateTime<Utc>,
    /// Base asset symbol (e.g., "BTC")
    pub base: String,
    /// Quote asset symbol (e.g., "USD")
    pub quote: String,
    pub side: Side,
    /// Executed quantity in base units
    pub volume: Decimal,
    /// Price in quote units per base unit
    pub price: Decimal,
    /// Fee paid, in quote units
    pub fee: Decimal,
}

impl Trade {
    /// Creates a trade with zero fee.
    pub fn new(
        timestamp: DateTime<Utc>,
        base: impl Into<String>,
        quote: impl Into<String>,
        side: Side,
        volume: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            timestamp,
            base: base.into(),
            quote: quote.into(),
            side,
            volume,
            price,
            fee: Decimal::ZERO,
        }
    }

    /// Sets the fee paid.
    #[must_use]
    pub fn with_fee(mut self, fee: Decimal) -> Self {
        self.fee = fee;
        self
    }

    /// Returns the asset pair as "BASE/QUOTE".
    #[must_use]
    pub fn pair(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }

    /// Notional value in quote units (volume * price).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.volume * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_trade() -> Trade {
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 29, 12, 0, 0).unwrap();
        Trade::new(timestamp, "BTC", "USD", Side::Buy, dec!(0.5), dec!(42000.25))
            .with_fee(dec!(1.05))
    }

    #[test]
    fn test_side_string_mapping() {
        assert_eq!(Side::Buy.as_str(), "Buy");
        assert_eq!(Side::CloseBuy.as_str(), "Close Buy");
        assert_eq!(Side::Sell.as_str(), "Sell");
        assert_eq!(Side::CloseSell.as_str(), "Close Sell");
    }

    #[test]
    fn test_side_parse_round_trips_all_variants() {
        for side in Side::ALL {
            assert_eq!(side.as_str().parse::<Side>().unwrap(), side);
        }
    }

    #[test]
    fn test_side_parse_rejects_unknown() {
        assert!(matches!(
            "buy".parse::<Side>(),
            Err(TradeLogError::InvalidSide(s)) if s == "buy"
        ));
        assert!("CloseBuy".parse::<Side>().is_err());
        assert!("".parse::<Side>().is_err());
    }

    #[test]
    fn test_side_serde_uses_stored_strings() {
        let json = serde_json::to_string(&Side::CloseSell).unwrap();
        assert_eq!(json, "\"Close Sell\"");
        let side: Side = serde_json::from_str("\"Close Buy\"").unwrap();
        assert_eq!(side, Side::CloseBuy);
    }

    #[test]
    fn test_side_is_close() {
        assert!(!Side::Buy.is_close());
        assert!(Side::CloseBuy.is_close());
        assert!(!Side::Sell.is_close());
        assert!(Side::CloseSell.is_close());
    }

    #[test]
    fn test_trade_builder() {
        let trade = sample_trade();
        assert_eq!(trade.pair(), "BTC/USD");
        assert_eq!(trade.fee, dec!(1.05));
        assert_eq!(trade.notional(), dec!(21000.125));
    }

    #[test]
    fn test_trade_serde_keeps_decimals_exact() {
        let trade = sample_trade().with_fee(dec!(0.00000001));
        let json = serde_json::to_string(&trade).unwrap();
        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trade);
        assert_eq!(back.fee.to_string(), "0.00000001");
    }
}
