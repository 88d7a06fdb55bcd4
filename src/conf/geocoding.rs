use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeocodingConfig {
    /// Quiet period a coordinate must hold before it is looked up.
    #[serde(with = "humantime_serde", default = "GeocodingConfig::default_debounce")]
    pub debounce: Duration,
}

impl GeocodingConfig {
    fn default_debounce() -> Duration {
        Duration::from_millis(400)
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            debounce: Self::default_debounce(),
        }
    }
}
