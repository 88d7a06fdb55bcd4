use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use tokio::sync::RwLock;

use crate::conf::{Config, StatusCatalog};
use crate::core::LoadboardError;
use crate::model::{Load, LoadId};
use crate::table::{SortDirection, SortField, TableQuery};

use super::{LoadPage, LoadSource};

/// Load source backed by a vector in memory, optionally seeded from a JSON
/// file. Applies filters, sorting and pagination the way the remote listing
/// API does.
pub struct MemoryLoadSource {
    loads: RwLock<Vec<Load>>,
    catalog: Arc<StatusCatalog>,
}

impl MemoryLoadSource {
    pub fn new(loads: Vec<Load>, catalog: Arc<StatusCatalog>) -> Self {
        Self {
            loads: RwLock::new(loads),
            catalog,
        }
    }

    pub async fn from_file(path: &Path, catalog: Arc<StatusCatalog>) -> Result<Self, LoadboardError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            LoadboardError::IoError(format!("reading {}: {}", path.display(), e))
        })?;
        let loads: Vec<Load> = serde_json::from_slice(&bytes)?;
        info!("seeded {} loads from {}", loads.len(), path.display());
        Ok(Self::new(loads, catalog))
    }

    pub async fn from_config(config: &Config) -> Result<Self, LoadboardError> {
        let catalog = Arc::new(config.statuses.clone());
        match &config.data.loads_path {
            Some(path) => Self::from_file(path, catalog).await,
            None => {
                info!("no loads file configured, starting empty");
                Ok(Self::new(Vec::new(), catalog))
            }
        }
    }

    pub async fn insert(&self, load: Load) {
        let mut loads = self.loads.write().await;
        match loads.iter_mut().find(|l| l.id == load.id) {
            Some(existing) => *existing = load,
            None => loads.push(load),
        }
    }

    pub async fn len(&self) -> usize {
        self.loads.read().await.len()
    }

    fn matches(&self, load: &Load, query: &TableQuery) -> bool {
        if let Some(needle) = &query.ref_number {
            let needle = needle.to_lowercase();
            if !load
                .r#ref
                .iter()
                .any(|r| r.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        if let Some(statuses) = &query.status {
            if !statuses.contains(&load.status) {
                return false;
            }
        }
        if query.load_number.is_some_and(|n| n != load.load_number) {
            return false;
        }
        if let Some(truck) = query.truck_number {
            if load.truck_number() != Some(truck) {
                return false;
            }
        }
        true
    }

    fn compare(&self, a: &Load, b: &Load, field: SortField) -> Ordering {
        // Missing values sort after present ones.
        fn optional<T, F: Fn(&T, &T) -> Ordering>(a: Option<T>, b: Option<T>, cmp: F) -> Ordering {
            match (a, b) {
                (Some(a), Some(b)) => cmp(&a, &b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }

        match field {
            SortField::LoadNumber => a.load_number.cmp(&b.load_number),
            SortField::Status => optional(
                self.catalog.load_stage(a.status),
                self.catalog.load_stage(b.status),
                Ord::cmp,
            ),
            SortField::MilesByRoads => optional(a.miles_by_roads, b.miles_by_roads, f64::total_cmp),
            SortField::MilesHaversine => {
                optional(a.miles_haversine, b.miles_haversine, f64::total_cmp)
            }
            SortField::TruckNumber => optional(a.truck_number(), b.truck_number(), Ord::cmp),
        }
    }
}

#[async_trait]
impl LoadSource for MemoryLoadSource {
    async fn list(&self, query: &TableQuery) -> Result<LoadPage, LoadboardError> {
        if query.page_size == 0 {
            return Err(LoadboardError::InvalidInput(
                "page size must be positive".to_string(),
            ));
        }

        let loads = self.loads.read().await;
        let mut matching: Vec<&Load> = loads.iter().filter(|l| self.matches(l, query)).collect();

        if let Some(sort) = query.sort() {
            matching.sort_by(|a, b| {
                let ordering = self.compare(a, b, sort.field);
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(query.page.saturating_mul(query.page_size))
            .take(query.page_size)
            .cloned()
            .collect();
        Ok(LoadPage { items, total })
    }

    async fn delete(&self, id: &LoadId) -> Result<(), LoadboardError> {
        let mut loads = self.loads.write().await;
        let index = loads
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| LoadboardError::LoadNotFound(id.to_string()))?;
        loads.remove(index);
        info!("deleted load {id}");
        Ok(())
    }
}
