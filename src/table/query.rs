use std::collections::BTreeSet;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::conf::StatusCatalog;
use crate::core::LoadboardError;
use crate::model::LoadStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    LoadNumber,
    Status,
    MilesByRoads,
    MilesHaversine,
    TruckNumber,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Canonical page/sort/filter request handed to a load source.
///
/// Built fresh by the controller after every change and never edited in
/// place. Unset filters are left out of the serialized form entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableQuery {
    #[serde(default)]
    pub page: usize,
    pub page_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<SortField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<LoadStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_number: Option<u64>,
}

impl TableQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size,
            sort_field: None,
            sort_direction: None,
            ref_number: None,
            status: None,
            load_number: None,
            truck_number: None,
        }
    }

    pub fn sort(&self) -> Option<Sort> {
        match (self.sort_field, self.sort_direction) {
            (Some(field), Some(direction)) => Some(Sort { field, direction }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    RefNumber,
    Status,
    LoadNumber,
    TruckNumber,
}

/// A validated value for one filter field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterInput {
    RefNumber(Option<String>),
    Status(BTreeSet<LoadStatus>),
    LoadNumber(Option<NonZeroU64>),
    TruckNumber(Option<NonZeroU64>),
}

fn parse_number(field: &str, raw: &str) -> Result<Option<NonZeroU64>, LoadboardError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<NonZeroU64>().map(Some).map_err(|_| {
        LoadboardError::InvalidInput(format!("{field} must be a positive integer, got '{raw}'"))
    })
}

fn parse_status(name: &str) -> Result<LoadStatus, LoadboardError> {
    LoadStatus::ALL
        .into_iter()
        .find(|s| s.as_str().eq_ignore_ascii_case(name))
        .ok_or_else(|| LoadboardError::InvalidInput(format!("unknown status '{name}'")))
}

impl FilterInput {
    /// Validate raw text typed into a filter field. Statuses are given as a
    /// comma-separated list of their display names.
    pub fn parse(field: FilterField, raw: &str) -> Result<FilterInput, LoadboardError> {
        match field {
            FilterField::RefNumber => {
                let text = raw.trim();
                Ok(FilterInput::RefNumber(
                    (!text.is_empty()).then(|| text.to_string()),
                ))
            }
            FilterField::LoadNumber => {
                parse_number("load number", raw).map(FilterInput::LoadNumber)
            }
            FilterField::TruckNumber => {
                parse_number("truck number", raw).map(FilterInput::TruckNumber)
            }
            FilterField::Status => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(parse_status)
                .collect::<Result<BTreeSet<_>, _>>()
                .map(FilterInput::Status),
        }
    }
}

/// Filter values, either as drafted by the user or as committed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub ref_number: Option<String>,
    pub status: BTreeSet<LoadStatus>,
    pub load_number: Option<NonZeroU64>,
    pub truck_number: Option<NonZeroU64>,
}

impl Filters {
    pub fn apply(&mut self, input: FilterInput) {
        match input {
            FilterInput::RefNumber(value) => self.ref_number = value,
            FilterInput::Status(value) => self.status = value,
            FilterInput::LoadNumber(value) => self.load_number = value,
            FilterInput::TruckNumber(value) => self.truck_number = value,
        }
    }

    /// Status filter to emit. Statuses missing from the catalog are ignored;
    /// both "nothing selected" and "everything selected" mean unfiltered.
    pub fn status_filter(&self, catalog: &StatusCatalog) -> Option<Vec<LoadStatus>> {
        let selected = catalog.ordered(&self.status);
        let known: BTreeSet<LoadStatus> = selected.iter().copied().collect();
        if known.is_empty() || catalog.is_full_status_set(&known) {
            return None;
        }
        Some(selected)
    }

    pub fn is_empty(&self, catalog: &StatusCatalog) -> bool {
        self.ref_number.is_none()
            && self.load_number.is_none()
            && self.truck_number.is_none()
            && self.status_filter(catalog).is_none()
    }
}
