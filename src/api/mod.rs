mod error;
mod handlers;
mod state;
mod types;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use log::info;
use tower_http::trace::TraceLayer;

use crate::conf::StatusCatalog;
use crate::core::LoadboardError;
use crate::source::LoadSource;

pub use error::ApiError;
pub use state::AppState;

pub struct LoadboardApi {
    state: AppState,
}

impl LoadboardApi {
    pub fn new(source: Arc<dyn LoadSource>, catalog: Arc<StatusCatalog>) -> Self {
        Self {
            state: AppState { source, catalog },
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/v1/statuses", get(handlers::statuses))
            .route("/api/v1/loads/query", post(handlers::query_loads))
            .route("/api/v1/loads/{id}", delete(handlers::delete_load))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    pub async fn serve(self, addr: &str) -> Result<(), LoadboardError> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| LoadboardError::IoError(format!("binding to {addr}: {e}")))?;
        info!("listening on {addr}");
        axum::serve(listener, self.router())
            .await
            .map_err(|e| LoadboardError::IoError(format!("serving: {e}")))?;
        Ok(())
    }
}
