use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{LoadStatus, StopStatus, StopType};

/// Read-only status enumerations shared by filtering, sorting and display.
///
/// Built once from configuration and handed around behind an `Arc`, so tests
/// can substitute a reduced catalog without touching global state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StatusCatalog {
    /// Load statuses in progression order.
    #[serde(default = "StatusCatalog::default_load")]
    pub load: Vec<LoadStatus>,
    /// Pickup stop labels, one per [`StopStatus`] in progression order.
    #[serde(default = "StatusCatalog::default_pickup_labels")]
    pub pickup_labels: Vec<String>,
    /// Delivery stop labels, one per [`StopStatus`] in progression order.
    #[serde(default = "StatusCatalog::default_delivery_labels")]
    pub delivery_labels: Vec<String>,
}

impl StatusCatalog {
    fn default_load() -> Vec<LoadStatus> {
        LoadStatus::ALL.to_vec()
    }

    fn default_pickup_labels() -> Vec<String> {
        [
            "New",
            "On route to PU",
            "On site PU",
            "Loaded, Waiting GTG",
            "GTG",
            "Completed",
        ]
        .map(String::from)
        .to_vec()
    }

    fn default_delivery_labels() -> Vec<String> {
        [
            "New",
            "On route to DEL",
            "On site DEL",
            "Unloaded, Waiting GTG",
            "GTG",
            "Completed",
        ]
        .map(String::from)
        .to_vec()
    }

    pub fn load_stage(&self, status: LoadStatus) -> Option<usize> {
        self.load.iter().position(|s| *s == status)
    }

    pub fn stop_stage(&self, status: StopStatus) -> usize {
        StopStatus::ALL
            .iter()
            .position(|s| *s == status)
            .unwrap_or_default()
    }

    pub fn stop_label(&self, stop_type: StopType, status: StopStatus) -> Option<&str> {
        let labels = match stop_type {
            StopType::PickUp => &self.pickup_labels,
            StopType::Delivery => &self.delivery_labels,
        };
        labels.get(self.stop_stage(status)).map(String::as_str)
    }

    /// `true` when `selected` names every configured load status. Selecting
    /// everything filters nothing.
    pub fn is_full_status_set(&self, selected: &BTreeSet<LoadStatus>) -> bool {
        self.load.iter().all(|s| selected.contains(s))
            && selected.iter().all(|s| self.load.contains(s))
    }

    /// Configured statuses restricted to `selected`, in catalog order.
    pub fn ordered(&self, selected: &BTreeSet<LoadStatus>) -> Vec<LoadStatus> {
        self.load
            .iter()
            .copied()
            .filter(|s| selected.contains(s))
            .collect()
    }
}

impl Default for StatusCatalog {
    fn default() -> Self {
        Self {
            load: Self::default_load(),
            pickup_labels: Self::default_pickup_labels(),
            delivery_labels: Self::default_delivery_labels(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_status_set() {
        let catalog = StatusCatalog::default();
        let all: BTreeSet<_> = LoadStatus::ALL.into_iter().collect();
        assert!(catalog.is_full_status_set(&all));

        let mut partial = all.clone();
        partial.remove(&LoadStatus::Tonu);
        assert!(!catalog.is_full_status_set(&partial));
        assert!(!catalog.is_full_status_set(&BTreeSet::new()));
    }

    #[test]
    fn test_reduced_catalog() {
        let catalog = StatusCatalog {
            load: vec![LoadStatus::Available, LoadStatus::Completed],
            ..StatusCatalog::default()
        };
        let selected = BTreeSet::from([LoadStatus::Completed, LoadStatus::Available]);
        assert!(catalog.is_full_status_set(&selected));
        assert_eq!(catalog.load_stage(LoadStatus::Completed), Some(1));
        assert_eq!(catalog.load_stage(LoadStatus::Planned), None);
    }

    #[test]
    fn test_stop_labels() {
        let catalog = StatusCatalog::default();
        assert_eq!(
            catalog.stop_label(StopType::PickUp, StopStatus::OnRoute),
            Some("On route to PU")
        );
        assert_eq!(
            catalog.stop_label(StopType::Delivery, StopStatus::OnSite),
            Some("On site DEL")
        );
        assert_eq!(catalog.stop_stage(StopStatus::Completed), 5);
    }

    #[test]
    fn test_ordered_follows_catalog() {
        let catalog = StatusCatalog::default();
        let selected = BTreeSet::from([LoadStatus::Completed, LoadStatus::Planned]);
        assert_eq!(
            catalog.ordered(&selected),
            vec![LoadStatus::Planned, LoadStatus::Completed]
        );
    }
}
