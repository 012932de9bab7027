use std::time::Duration;

use csp_scout_core::config::{parse_or, string_or, ConfigError};

/// Document store settings loaded from environment variables.
///
/// | Env Var                        | Default                     |
/// |--------------------------------|-----------------------------|
/// | `MONGODB_URI`                  | `mongodb://localhost:27017` |
/// | `MONGODB_DATABASE`             | `csp_scout`                 |
/// | `MONGODB_COLLECTION`           | `reports`                   |
/// | `MONGODB_CONNECT_TIMEOUT_SECS` | `10`                        |
/// | `MONGODB_ENSURE_INDEXES`       | `false`                     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// Bounds connect and the boot-time ping.
    pub connect_timeout: Duration,
    /// Create the operator indexes at boot.
    pub ensure_indexes: bool,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let connect_timeout_secs: u64 = parse_or(&lookup, "MONGODB_CONNECT_TIMEOUT_SECS", 10)?;

        Ok(Self {
            uri: string_or(&lookup, "MONGODB_URI", "mongodb://localhost:27017"),
            database: string_or(&lookup, "MONGODB_DATABASE", "csp_scout"),
            collection: string_or(&lookup, "MONGODB_COLLECTION", "reports"),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            ensure_indexes: parse_or(&lookup, "MONGODB_ENSURE_INDEXES", false)?,
        })
    }
}
