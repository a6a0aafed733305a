//! Trip and RunningBoard models
//!
//! A running board is an ordered daily schedule of trips, possibly across
//! several routes, assignable to one bus. Trips reference routes by name
//! and the reference is allowed to dangle (the route may have been deleted
//! since the board was written); dangling trips are skipped at simulation
//! time, never treated as fatal.
//!
//! Unlike static routes, nothing stops the same bus being assigned to
//! several boards at once; the data model permits it.

use crate::models::bus::BusId;
use crate::models::route::Route;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building boards and trips
#[derive(Debug, Error, PartialEq)]
pub enum BoardError {
    #[error("departure time must look like HH:MM, got '{0}'")]
    MalformedTime(String),

    #[error("departure time out of range: hours 0-23, minutes 0-59, got {hours}:{minutes}")]
    TimeOutOfRange { hours: u32, minutes: u32 },
}

/// Wall-clock departure time, validated to 00:00-23:59.
///
/// Stored as minutes since midnight; serialized as the "HH:MM" string the
/// board files use.
///
/// # Example
/// ```
/// use bus_manager_core::DepartureTime;
///
/// let t: DepartureTime = "09:38".parse().unwrap();
/// assert_eq!(t.to_string(), "09:38");
/// assert!("24:00".parse::<DepartureTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DepartureTime(u16);

impl DepartureTime {
    pub fn new(hours: u32, minutes: u32) -> Result<Self, BoardError> {
        if hours > 23 || minutes > 59 {
            return Err(BoardError::TimeOutOfRange { hours, minutes });
        }
        Ok(Self((hours * 60 + minutes) as u16))
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        self.0
    }

    pub fn hours(&self) -> u32 {
        u32::from(self.0) / 60
    }

    pub fn minutes(&self) -> u32 {
        u32::from(self.0) % 60
    }
}

impl FromStr for DepartureTime {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || BoardError::MalformedTime(s.to_string());
        let (hh, mm) = s.split_once(':').ok_or_else(malformed)?;
        let hours: u32 = hh.trim().parse().map_err(|_| malformed())?;
        let minutes: u32 = mm.trim().parse().map_err(|_| malformed())?;
        DepartureTime::new(hours, minutes)
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

impl Serialize for DepartureTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DepartureTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// One scheduled departure on a running board.
///
/// `route_name` is a foreign key by name and may dangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub route_name: String,
    pub destination: String,
    pub departure: DepartureTime,
}

impl Trip {
    pub fn new(
        route_name: impl Into<String>,
        destination: impl Into<String>,
        departure: DepartureTime,
    ) -> Self {
        Self {
            route_name: route_name.into(),
            destination: destination.into(),
            departure,
        }
    }
}

/// An ordered daily schedule of trips for one bus.
///
/// Trips keep insertion order; boards are not sorted by departure time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningBoard {
    pub name: String,
    pub trips: Vec<Trip>,
    pub assigned_bus_id: Option<BusId>,
}

impl RunningBoard {
    pub fn new(name: impl Into<String>, trips: Vec<Trip>) -> Self {
        Self {
            name: name.into(),
            trips,
            assigned_bus_id: None,
        }
    }

    /// Summed workload across the trips whose route still resolves.
    pub fn total_workload(&self, routes: &[Route]) -> f64 {
        self.trips
            .iter()
            .filter_map(|trip| routes.iter().find(|r| r.name == trip.route_name))
            .map(|route| route.workload())
            .sum()
    }

    /// Route names referenced by this board that no longer exist.
    pub fn missing_routes<'a>(&'a self, routes: &[Route]) -> Vec<&'a str> {
        self.trips
            .iter()
            .map(|trip| trip.route_name.as_str())
            .filter(|name| !routes.iter().any(|r| r.name == *name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::Stop;

    #[test]
    fn test_departure_time_bounds() {
        assert!(DepartureTime::new(0, 0).is_ok());
        assert!(DepartureTime::new(23, 59).is_ok());
        assert_eq!(
            DepartureTime::new(24, 0),
            Err(BoardError::TimeOutOfRange {
                hours: 24,
                minutes: 0
            })
        );
        assert!(DepartureTime::new(12, 60).is_err());
    }

    #[test]
    fn test_departure_time_parse() {
        let t: DepartureTime = "06:05".parse().unwrap();
        assert_eq!(t.hours(), 6);
        assert_eq!(t.minutes(), 5);

        assert!("0605".parse::<DepartureTime>().is_err());
        assert!("six:five".parse::<DepartureTime>().is_err());
        assert!("".parse::<DepartureTime>().is_err());
    }

    #[test]
    fn test_departure_time_display_pads() {
        let t = DepartureTime::new(7, 3).unwrap();
        assert_eq!(t.to_string(), "07:03");
    }

    #[test]
    fn test_departure_time_json_round_trip() {
        let t = DepartureTime::new(18, 45).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"18:45\"");
        let back: DepartureTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_trips_keep_insertion_order() {
        let board = RunningBoard::new(
            "Board 1",
            vec![
                Trip::new("Route A", "Town", DepartureTime::new(14, 0).unwrap()),
                Trip::new("Route B", "Pier", DepartureTime::new(9, 0).unwrap()),
            ],
        );
        // later departure first: boards are not sorted by time
        assert_eq!(board.trips[0].route_name, "Route A");
        assert_eq!(board.trips[1].route_name, "Route B");
    }

    #[test]
    fn test_missing_routes() {
        let routes = vec![Route::new(
            "Route A",
            vec![Stop::new("x", 0.0), Stop::new("y", 10.0)],
        )
        .unwrap()];

        let board = RunningBoard::new(
            "Board 1",
            vec![
                Trip::new("Route A", "Town", DepartureTime::new(8, 0).unwrap()),
                Trip::new("Route Gone", "Nowhere", DepartureTime::new(10, 0).unwrap()),
            ],
        );

        assert_eq!(board.missing_routes(&routes), vec!["Route Gone"]);
        assert_eq!(board.total_workload(&routes), 10.0);
    }
}
