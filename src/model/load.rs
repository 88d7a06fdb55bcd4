use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Coordinate, LoadStatus, StopStatus, StopType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct LoadId(pub String);

impl From<&str> for LoadId {
    fn from(id: &str) -> Self {
        LoadId(id.to_string())
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeFrameKind {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "APPT")]
    Appt,
    #[serde(rename = "ASAP")]
    Asap,
    Direct,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeFrame {
    #[serde(rename = "type")]
    pub kind: TimeFrameKind,
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

impl TimeFrame {
    /// Start and end of the window to display. First-come-first-served stops
    /// show their `from..to` range, every other kind is a single instant.
    pub fn window(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        match self.kind {
            TimeFrameKind::Fcfs => (self.from, self.to),
            TimeFrameKind::Appt | TimeFrameKind::Asap | TimeFrameKind::Direct => {
                (self.at, self.at)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub facility_location: Coordinate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    #[serde(rename = "type")]
    pub stop_type: StopType,
    pub facility: Facility,
    pub time_frame: TimeFrame,
    pub status: StopStatus,
}

impl Stop {
    pub fn coordinate(&self) -> Coordinate {
        self.facility.facility_location
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: String,
    pub truck_number: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Load {
    pub id: LoadId,
    pub load_number: u64,
    #[serde(default)]
    pub r#ref: Vec<String>,
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub miles_by_roads: Option<f64>,
    #[serde(default)]
    pub miles_haversine: Option<f64>,
    pub status: LoadStatus,
    #[serde(default)]
    pub truck: Option<Truck>,
}

impl Load {
    pub fn pickup(&self) -> Option<&Stop> {
        self.stops.first()
    }

    pub fn delivery(&self) -> Option<&Stop> {
        if self.stops.len() < 2 {
            return None;
        }
        self.stops.last()
    }

    /// First of pickup and delivery that has not completed yet. Intermediate
    /// stops do not take part.
    pub fn current_stop(&self) -> Option<&Stop> {
        [self.pickup(), self.delivery()]
            .into_iter()
            .flatten()
            .find(|stop| !stop.status.is_terminal())
    }

    pub fn truck_number(&self) -> Option<u64> {
        self.truck.as_ref().map(|t| t.truck_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn load_json() -> serde_json::Value {
        json!({
            "id": "L-1",
            "loadNumber": 1001,
            "ref": ["PO-77", "BOL-12"],
            "stops": [
                {
                    "type": "PickUp",
                    "facility": {"facilityLocation": {"lat": 41.8781, "lng": -87.6298}},
                    "timeFrame": {"type": "FCFS", "from": "2024-03-01T08:00:00Z", "to": "2024-03-01T12:00:00Z"},
                    "status": "completed"
                },
                {
                    "type": "PickUp",
                    "facility": {"facilityLocation": {"lat": 40.0, "lng": -80.0}},
                    "timeFrame": {"type": "ASAP", "at": "2024-03-01T15:00:00Z"},
                    "status": "new"
                },
                {
                    "type": "Delivery",
                    "facility": {"facilityLocation": {"lat": 39.7392, "lng": -104.9903}},
                    "timeFrame": {"type": "APPT", "at": "2024-03-02T09:30:00Z"},
                    "status": "onRoute"
                }
            ],
            "milesByRoads": 1003.5,
            "milesHaversine": 920.1,
            "status": "In Progress",
            "truck": {"id": "T-9", "truckNumber": 42}
        })
    }

    #[test]
    fn test_deserialize_load() {
        let load: Load = serde_json::from_value(load_json()).unwrap();
        assert_eq!(load.id, LoadId::from("L-1"));
        assert_eq!(load.r#ref, vec!["PO-77", "BOL-12"]);
        assert_eq!(load.status, LoadStatus::InProgress);
        assert_eq!(load.truck_number(), Some(42));
        assert_eq!(load.stops[2].time_frame.kind, TimeFrameKind::Appt);
    }

    #[test]
    fn test_current_stop_skips_intermediate() {
        let load: Load = serde_json::from_value(load_json()).unwrap();
        // Pickup is completed, the intermediate stop is new but ignored.
        let current = load.current_stop().unwrap();
        assert_eq!(current.stop_type, StopType::Delivery);
        assert_eq!(current.status, StopStatus::OnRoute);
    }

    #[test]
    fn test_single_stop_has_no_delivery() {
        let mut load: Load = serde_json::from_value(load_json()).unwrap();
        load.stops.truncate(1);
        assert!(load.pickup().is_some());
        assert!(load.delivery().is_none());
        assert!(load.current_stop().is_none());
    }

    #[test]
    fn test_time_frame_window() {
        let from = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let fcfs = TimeFrame {
            kind: TimeFrameKind::Fcfs,
            from: Some(from),
            to: Some(to),
            at: None,
        };
        assert_eq!(fcfs.window(), (Some(from), Some(to)));

        let appt = TimeFrame {
            kind: TimeFrameKind::Appt,
            from: Some(from),
            to: None,
            at: Some(to),
        };
        assert_eq!(appt.window(), (Some(to), Some(to)));
    }
}
