use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::services::Service;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc` or is a token handle.
#[derive(Clone)]
pub struct AppState {
    /// Reports and statistics facets over the repository.
    pub service: Service,
    pub config: Arc<ServerConfig>,
    /// Canceled on shutdown; parent of every request's context.
    pub shutdown: CancellationToken,
}
