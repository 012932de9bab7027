//! MongoDB persistence for CSP violation reports.
//!
//! Exposes the [`ReportRepository`] capability trait with two
//! implementations: [`MongoReportRepo`] for production and
//! [`InMemoryReportRepo`] for tests and local development.

pub mod config;
pub mod models;
pub mod pipelines;
pub mod repositories;

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;

pub use config::DbConfig;
pub use repositories::{InMemoryReportRepo, MongoReportRepo, ReportRepository};

/// Application name reported to the server in the connection handshake.
const APP_NAME: &str = "csp-scout";

/// Create a pooled client from the configured connection string.
///
/// The driver connects lazily; use [`health_check`] to confirm the server is
/// reachable. `connect_timeout` bounds both the socket connect and server
/// selection, so a dead server fails the first operation within that time.
pub async fn create_client(uri: &str, connect_timeout: Duration) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some(APP_NAME.to_string());
    options.connect_timeout = Some(connect_timeout);
    options.server_selection_timeout = Some(connect_timeout);
    Client::with_options(options)
}

/// Verify the server answers a `ping` on the given database.
pub async fn health_check(client: &Client, database: &str) -> Result<(), mongodb::error::Error> {
    client
        .database(database)
        .run_command(doc! { "ping": 1 })
        .await?;
    Ok(())
}
