//! Test and benchmark utilities.
//!
//! This module is only available when the `testutil` feature is enabled.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::LoadboardError;
use crate::location::{GeocodeCandidate, Geocoder, Geometry};
use crate::model::{
    Coordinate, Facility, Load, LoadId, LoadStatus, Stop, StopStatus, StopType, TimeFrame,
    TimeFrameKind, Truck,
};

#[derive(Clone)]
struct Scripted {
    delay: Duration,
    result: Result<Vec<GeocodeCandidate>, String>,
}

/// Geocoder answering from a script keyed by coordinate.
///
/// Unscripted coordinates resolve to an empty candidate list. Every call is
/// recorded so tests can count remote lookups.
#[derive(Default)]
pub struct ScriptedGeocoder {
    script: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<Coordinate>>,
}

impl ScriptedGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, coordinate: Coordinate, candidates: Vec<GeocodeCandidate>) {
        self.respond_after(coordinate, Duration::ZERO, candidates);
    }

    pub fn respond_after(
        &self,
        coordinate: Coordinate,
        delay: Duration,
        candidates: Vec<GeocodeCandidate>,
    ) {
        self.script.lock().unwrap().insert(
            coordinate.key(),
            Scripted {
                delay,
                result: Ok(candidates),
            },
        );
    }

    pub fn fail(&self, coordinate: Coordinate, message: &str) {
        self.script.lock().unwrap().insert(
            coordinate.key(),
            Scripted {
                delay: Duration::ZERO,
                result: Err(message.to_string()),
            },
        );
    }

    pub fn calls(&self) -> Vec<Coordinate> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn reverse(
        &self,
        coordinate: Coordinate,
    ) -> Result<Vec<GeocodeCandidate>, LoadboardError> {
        let scripted = {
            self.calls.lock().unwrap().push(coordinate);
            self.script.lock().unwrap().get(&coordinate.key()).cloned()
        };
        let Some(scripted) = scripted else {
            return Ok(Vec::new());
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result.map_err(LoadboardError::GeocodingError)
    }
}

pub fn candidate(place_id: &str, address: &str, coordinate: Coordinate) -> GeocodeCandidate {
    GeocodeCandidate {
        address_components: Vec::new(),
        formatted_address: address.to_string(),
        geometry: Geometry {
            location: coordinate,
        },
        place_id: place_id.to_string(),
    }
}

fn stop(stop_type: StopType, coordinate: Coordinate, status: StopStatus) -> Stop {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    Stop {
        stop_type,
        facility: Facility {
            facility_location: coordinate,
        },
        time_frame: TimeFrame {
            kind: TimeFrameKind::Appt,
            from: None,
            to: None,
            at: Some(at),
        },
        status,
    }
}

/// A two-stop load with predictable coordinates derived from `load_number`.
pub fn sample_load(id: &str, load_number: u64, status: LoadStatus) -> Load {
    let n = load_number as f64;
    Load {
        id: LoadId::from(id),
        load_number,
        r#ref: vec![format!("PO-{load_number}")],
        stops: vec![
            stop(
                StopType::PickUp,
                Coordinate::new(40.0 + n / 1000.0, -80.0),
                StopStatus::New,
            ),
            stop(
                StopType::Delivery,
                Coordinate::new(35.0, -90.0 - n / 1000.0),
                StopStatus::New,
            ),
        ],
        miles_by_roads: Some(100.0 + n),
        miles_haversine: Some(90.0 + n),
        status,
        truck: None,
    }
}

/// Deterministic pseudo-random loads for tests and benchmarks.
pub fn generate_loads(count: usize, seed: u64) -> Vec<Load> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let status = LoadStatus::ALL[rng.gen_range(0..LoadStatus::ALL.len())];
            let mut load = sample_load(&format!("load-{i}"), 1000 + i as u64, status);
            load.miles_by_roads = Some(rng.gen_range(10.0..3000.0));
            load.r#ref.push(format!("BOL-{}", rng.gen_range(0..500)));
            if rng.gen_bool(0.6) {
                load.truck = Some(Truck {
                    id: format!("truck-{i}"),
                    truck_number: rng.gen_range(1..50),
                });
            }
            load
        })
        .collect()
}

/// Write `loads` as a JSON array into `dir` and return the file path.
pub fn write_loads_file(dir: &Path, loads: &[Load]) -> PathBuf {
    let path = dir.join("loads.json");
    std::fs::write(&path, serde_json::to_vec_pretty(loads).unwrap()).unwrap();
    path
}

