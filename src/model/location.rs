use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Address shown for a stop once its coordinate has been resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedLocation {
    pub place_id: String,
    pub address: String,
}

impl ResolvedLocation {
    /// Stand-in used when the geocoder knows nothing about a coordinate.
    pub fn from_coordinate(coordinate: &Coordinate) -> Self {
        Self {
            place_id: coordinate.key(),
            address: coordinate.to_string(),
        }
    }
}
