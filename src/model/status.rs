use serde::{Deserialize, Serialize};

/// Lifecycle of a load. Variants are declared in progression order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoadStatus {
    Available,
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "TONU")]
    Tonu,
    Cancelled,
    Completed,
}

impl LoadStatus {
    pub const ALL: [LoadStatus; 6] = [
        LoadStatus::Available,
        LoadStatus::Planned,
        LoadStatus::InProgress,
        LoadStatus::Tonu,
        LoadStatus::Cancelled,
        LoadStatus::Completed,
    ];

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LoadStatus::Tonu | LoadStatus::Cancelled | LoadStatus::Completed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Available => "Available",
            LoadStatus::Planned => "Planned",
            LoadStatus::InProgress => "In Progress",
            LoadStatus::Tonu => "TONU",
            LoadStatus::Cancelled => "Cancelled",
            LoadStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StopType {
    PickUp,
    Delivery,
}

/// Progress of a single stop. The wording differs between pickup and delivery
/// stops, see [`crate::conf::StatusCatalog::stop_label`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum StopStatus {
    New,
    OnRoute,
    OnSite,
    WaitingGtg,
    Gtg,
    Completed,
}

impl StopStatus {
    pub const ALL: [StopStatus; 6] = [
        StopStatus::New,
        StopStatus::OnRoute,
        StopStatus::OnSite,
        StopStatus::WaitingGtg,
        StopStatus::Gtg,
        StopStatus::Completed,
    ];

    pub fn is_terminal(&self) -> bool {
        matches!(self, StopStatus::Completed)
    }
}
