use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::ConnectionParams;
use crate::error::{Result, TradeLogError};
use crate::repositories::TradeLogRepository;

const MAX_CONNECTIONS: u32 = 10;

/// An open connection to the trade log database.
///
/// Only obtainable through [`TradeLogConnection::open`] or
/// [`TradeLogConnection::open_lazy`], and consumed by
/// [`TradeLogConnection::close`].
#[derive(Debug)]
pub struct TradeLogConnection {
    params: ConnectionParams,
    pool: PgPool,
}

impl TradeLogConnection {
    /// Opens a pool and establishes its first connection.
    ///
    /// # Errors
    /// Returns an error if the database connection cannot be established.
    pub async fn open(params: ConnectionParams) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(params.connect_options())
            .await
            .map_err(TradeLogError::Connection)?;

        info!(
            host = %params.host,
            port = params.port,
            db_name = %params.db_name,
            "trade log connection opened"
        );
        Ok(Self { params, pool })
    }

    /// Creates a pool without connecting; the first query connects.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn open_lazy(params: ConnectionParams) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_lazy_with(params.connect_options());

        info!(
            host = %params.host,
            port = params.port,
            db_name = %params.db_name,
            "trade log connection opened lazily"
        );
        Self { params, pool }
    }

    /// Closes every connection in the pool.
    pub async fn close(self) {
        self.pool.close().await;
        info!(host = %self.params.host, db_name = %self.params.db_name, "trade log connection closed");
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    #[must_use]
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// Repository over the `TradeLog` table sharing this pool.
    #[must_use]
    pub fn trade_log(&self) -> TradeLogRepository {
        TradeLogRepository::new(self.pool.clone())
    }
}
