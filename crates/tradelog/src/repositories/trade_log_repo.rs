//! Trade log repository.
//!
//! Creates the `TradeLog` table, appends trades to it and reads back the
//! most recent one.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use crate::error::{Result, TradeLogError};
use crate::models::{Side, Trade};

/// DDL run by [`TradeLogRepository::ensure_log_table`], in order.
pub const SCHEMA_STATEMENTS: [&str; 4] = [
    r"
    CREATE TABLE IF NOT EXISTS TradeLog (
        id SERIAL PRIMARY KEY NOT NULL,
        timestamp TIMESTAMPTZ NOT NULL,
        base TEXT NOT NULL,
        quote TEXT NOT NULL,
        side TEXT NOT NULL,
        volume NUMERIC(18, 8) NOT NULL,
        price NUMERIC(18, 8) NOT NULL,
        fee NUMERIC(18, 8) NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_tradelog_timestamp ON TradeLog (timestamp)",
    "CREATE INDEX IF NOT EXISTS idx_tradelog_asset ON TradeLog (base, quote)",
    "CREATE INDEX IF NOT EXISTS idx_tradelog_side ON TradeLog (side)",
];

type TradeRow = (DateTime<Utc>, String, String, String, String, String, String);

/// Repository for the `TradeLog` table.
#[derive(Debug, Clone)]
pub struct TradeLogRepository {
    pool: PgPool,
}

impl TradeLogRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the table and its indexes if they do not exist.
    ///
    /// Statements run one at a time without a transaction; on failure the
    /// remaining ones are skipped and calling again completes the schema.
    ///
    /// # Errors
    /// Returns the first statement's database error.
    pub async fn ensure_log_table(&self) -> Result<()> {
        for (step, sql) in SCHEMA_STATEMENTS.into_iter().enumerate() {
            sqlx::query(sql).execute(&self.pool).await?;
            debug!(step, "trade log schema statement applied");
        }
        Ok(())
    }

    /// Appends a trade.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn log_trade(&self, trade: &Trade) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO TradeLog (timestamp, base, quote, side, volume, price, fee)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(trade.timestamp)
        .bind(&trade.base)
        .bind(&trade.quote)
        .bind(trade.side.as_str())
        .bind(trade.volume)
        .bind(trade.price)
        .bind(trade.fee)
        .execute(&self.pool)
        .await?;

        debug!(
            pair = %trade.pair(),
            side = %trade.side,
            volume = %trade.volume,
            price = %trade.price,
            "trade logged"
        );
        Ok(())
    }

    /// Gets the trade with the latest timestamp, or `None` if the log is empty.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored value cannot be parsed.
    pub async fn last_trade(&self) -> Result<Option<Trade>> {
        let row: Option<TradeRow> = sqlx::query_as(
            r"
            SELECT timestamp, base, quote, side,
                   volume::TEXT, price::TEXT, fee::TEXT
            FROM TradeLog
            ORDER BY timestamp DESC
            LIMIT 1
            ",
        )
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => trade_from_row(row).map(Some),
            None => {
                debug!("trade log is empty");
                Ok(None)
            }
        }
    }
}

fn trade_from_row(row: TradeRow) -> Result<Trade> {
    let (timestamp, base, quote, side, volume, price, fee) = row;
    Ok(Trade {
        timestamp,
        base,
        quote,
        side: Side::from_str(&side)?,
        volume: parse_decimal("volume", volume)?,
        price: parse_decimal("price", price)?,
        fee: parse_decimal("fee", fee)?,
    })
}

fn parse_decimal(column: &'static str, value: String) -> Result<Decimal> {
    Decimal::from_str(&value).map_err(|source| TradeLogError::Decimal {
        column,
        value,
        source,
    })
}
