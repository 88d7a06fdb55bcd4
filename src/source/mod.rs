mod memory;

pub use memory::MemoryLoadSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::LoadboardError;
use crate::model::{Load, LoadId};
use crate::table::TableQuery;

/// One page of loads plus the number of loads matching the filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoadPage {
    pub items: Vec<Load>,
    pub total: u64,
}

/// Server-side paginated load listing.
#[async_trait]
pub trait LoadSource: Send + Sync {
    async fn list(&self, query: &TableQuery) -> Result<LoadPage, LoadboardError>;
    async fn delete(&self, id: &LoadId) -> Result<(), LoadboardError>;
}
