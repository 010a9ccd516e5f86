//! Connection parameters for the trade log database.
//!
//! Parameters are extracted from a YAML or JSON document through `figment`.
//! Every field is required; nothing is defaulted.

use std::fmt;
use std::path::Path;

use figment::{
    providers::{Format, Json, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::error::{Result, TradeLogError};

/// Parameters needed to reach the trade log database.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub db_name: String,
}

impl ConnectionParams {
    /// Parses connection parameters from a YAML document.
    ///
    /// # Errors
    /// Returns an error if the document is not UTF-8, is malformed, or any
    /// field is missing or has the wrong type.
    pub fn from_yaml(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        let params = Figment::from(Yaml::string(text)).extract()?;
        Ok(params)
    }

    /// Parses connection parameters from a JSON document.
    ///
    /// # Errors
    /// Returns an error if the document is not UTF-8, is malformed, or any
    /// field is missing or has the wrong type.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        let params = Figment::from(Json::string(text)).extract()?;
        Ok(params)
    }

    /// Loads connection parameters from a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, its extension is not
    /// recognized, or its contents fail to parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| TradeLogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml(&bytes),
            Some("json") => Self::from_json(&bytes),
            _ => Err(TradeLogError::UnsupportedConfigFormat(
                path.display().to_string(),
            )),
        }
    }

    /// libpq-style key/value connection string. TLS is disabled.
    #[must_use]
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode=disable",
            self.host, self.port, self.user, self.password, self.db_name
        )
    }

    /// Driver connect options equivalent to [`Self::connection_string`].
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new_without_pgpass()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.db_name)
            .ssl_mode(PgSslMode::Disable)
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("db_name", &self.db_name)
            .finish()
    }
}
