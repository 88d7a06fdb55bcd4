use std::sync::Arc;

use crate::conf::StatusCatalog;
use crate::source::LoadSource;

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn LoadSource>,
    pub catalog: Arc<StatusCatalog>,
}
