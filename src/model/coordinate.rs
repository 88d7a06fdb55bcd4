use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair as delivered by the load listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Textual identity of the pair. Two coordinates name the same lookup iff
    /// their keys are equal, which keeps float noise in non-printed digits from
    /// triggering a new request.
    pub fn key(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_joined_text() {
        let c = Coordinate::new(41.8781, -87.6298);
        assert_eq!(c.key(), "41.8781,-87.6298");
    }

    #[test]
    fn test_display_keeps_input_formatting() {
        assert_eq!(Coordinate::new(41.8781, -87.6298).to_string(), "[41.8781, -87.6298]");
        assert_eq!(Coordinate::new(40.0, -75.5).to_string(), "[40, -75.5]");
    }

    #[test]
    fn test_same_text_same_key() {
        let a = Coordinate::new(0.1 + 0.2, 1.0);
        let b = Coordinate::new(0.1 + 0.2, 1.0);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), Coordinate::new(0.3, 1.0).key());
    }
}
