use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::LoadboardError;
use crate::model::Coordinate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Geometry {
    pub location: Coordinate,
}

/// One reverse-geocoding hit, shaped like the provider response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodeCandidate {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub formatted_address: String,
    pub geometry: Geometry,
    pub place_id: String,
}

/// Remote reverse-geocoding service.
///
/// Implementations may fail or return no candidates at all; callers treat
/// both as "nothing known about this coordinate".
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse(&self, coordinate: Coordinate)
    -> Result<Vec<GeocodeCandidate>, LoadboardError>;
}
