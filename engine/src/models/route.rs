//! Stop and Route models
//!
//! A route is an ordered sequence of stops with a schedule. The base
//! schedule is fixed at creation time; the current schedule is player-set
//! and may never drop below half the base (tight schedules are allowed,
//! reckless ones are not).
//!
//! # Workload
//!
//! The per-stop travel cost is a distance in kilometres or a duration in
//! minutes depending on the engine variant, never both. The first stop's
//! value is a placeholder and excluded from every total.

use crate::models::bus::BusId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Multiplier applied to the summed journey time to derive the base
/// schedule at creation (layover/turnaround slack).
pub const SCHEDULE_BUFFER: f64 = 1.2;

/// Errors that can occur when building or editing a route
#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("schedule of {requested} min is below the floor of {minimum} min")]
    ScheduleTooShort { requested: u32, minimum: u32 },

    #[error("a route needs at least two stops, got {0}")]
    TooFewStops(usize),
}

/// A single stop on a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,

    /// Travel cost from the previous stop (km or minutes depending on the
    /// engine variant). Zero/ignored for the first stop of a route.
    pub travel_from_prev: f64,
}

impl Stop {
    pub fn new(name: impl Into<String>, travel_from_prev: f64) -> Self {
        Self {
            name: name.into(),
            travel_from_prev,
        }
    }
}

/// A bus route
///
/// Schedule fields are private: the base schedule is immutable after
/// creation and the current schedule can only move through
/// [`Route::set_schedule`], which enforces the half-base floor.
///
/// # Example
/// ```
/// use bus_manager_core::{Route, Stop};
///
/// let route = Route::new(
///     "Route 7: Harbour Loop",
///     vec![Stop::new("Harbour", 0.0), Stop::new("Old Town", 12.0), Stop::new("Harbour", 8.0)],
/// )
/// .unwrap();
///
/// assert_eq!(route.workload(), 20.0);
/// assert_eq!(route.base_schedule_minutes(), 24); // 20 minutes + 20% buffer
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    stops: Vec<Stop>,
    base_schedule_minutes: u32,
    current_schedule_minutes: u32,
    assigned_bus_id: Option<BusId>,
}

impl Route {
    /// Create a route, deriving the base schedule from the summed journey
    /// time plus the turnaround buffer.
    pub fn new(name: impl Into<String>, stops: Vec<Stop>) -> Result<Self, RouteError> {
        if stops.len() < 2 {
            return Err(RouteError::TooFewStops(stops.len()));
        }

        let journey: f64 = stops.iter().skip(1).map(|s| s.travel_from_prev).sum();
        let base = (journey * SCHEDULE_BUFFER) as u32;

        Ok(Self {
            name: name.into(),
            stops,
            base_schedule_minutes: base,
            current_schedule_minutes: base,
            assigned_bus_id: None,
        })
    }

    /// Reconstruct a route from raw parts (persistence, legacy imports).
    ///
    /// Does not re-derive the base schedule: distance-based routes carry
    /// schedules that were authored, not computed.
    pub fn from_parts(
        name: impl Into<String>,
        stops: Vec<Stop>,
        base_schedule_minutes: u32,
        current_schedule_minutes: u32,
        assigned_bus_id: Option<BusId>,
    ) -> Self {
        Self {
            name: name.into(),
            stops,
            base_schedule_minutes,
            current_schedule_minutes,
            assigned_bus_id,
        }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Total workload: summed travel cost of every stop after the first.
    pub fn workload(&self) -> f64 {
        self.stops.iter().skip(1).map(|s| s.travel_from_prev).sum()
    }

    pub fn base_schedule_minutes(&self) -> u32 {
        self.base_schedule_minutes
    }

    pub fn current_schedule_minutes(&self) -> u32 {
        self.current_schedule_minutes
    }

    /// Update the current schedule.
    ///
    /// Rejects anything below half the base schedule (integer floor);
    /// exactly half is accepted.
    ///
    /// # Example
    /// ```
    /// use bus_manager_core::{Route, Stop};
    ///
    /// let mut route = Route::new(
    ///     "Route 3",
    ///     vec![Stop::new("A", 0.0), Stop::new("B", 50.0)],
    /// )
    /// .unwrap();
    /// assert_eq!(route.base_schedule_minutes(), 60);
    ///
    /// assert!(route.set_schedule(30).is_ok()); // exactly half
    /// assert!(route.set_schedule(29).is_err());
    /// ```
    pub fn set_schedule(&mut self, minutes: u32) -> Result<(), RouteError> {
        let minimum = self.base_schedule_minutes / 2;
        if minutes < minimum {
            return Err(RouteError::ScheduleTooShort {
                requested: minutes,
                minimum,
            });
        }
        self.current_schedule_minutes = minutes;
        Ok(())
    }

    /// Whether the current schedule is strictly tighter than the base one.
    pub fn is_tight(&self) -> bool {
        self.current_schedule_minutes < self.base_schedule_minutes
    }

    pub fn assigned_bus(&self) -> Option<BusId> {
        self.assigned_bus_id
    }

    pub(crate) fn set_assigned_bus(&mut self, bus_id: Option<BusId>) {
        self.assigned_bus_id = bus_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route() -> Route {
        Route::new(
            "Route 12: Newport - Ryde",
            vec![
                Stop::new("Newport Bus Station", 0.0),
                Stop::new("Carisbrooke", 30.0),
                Stop::new("Ryde Bus Station", 20.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_workload_excludes_first_stop() {
        let route = sample_route();
        assert_eq!(route.workload(), 50.0);
    }

    #[test]
    fn test_base_schedule_has_buffer() {
        let route = sample_route();
        assert_eq!(route.base_schedule_minutes(), 60);
        assert_eq!(route.current_schedule_minutes(), 60);
    }

    #[test]
    fn test_schedule_floor_boundary() {
        let mut route = sample_route();
        // base is 60, floor is 30: exactly half must be accepted
        assert!(route.set_schedule(30).is_ok());
        assert_eq!(route.current_schedule_minutes(), 30);

        assert_eq!(
            route.set_schedule(29),
            Err(RouteError::ScheduleTooShort {
                requested: 29,
                minimum: 30,
            })
        );
        // rejected update leaves the schedule untouched
        assert_eq!(route.current_schedule_minutes(), 30);
    }

    #[test]
    fn test_schedule_floor_uses_integer_half() {
        let mut route = Route::from_parts(
            "odd base",
            vec![Stop::new("A", 0.0), Stop::new("B", 1.0)],
            75,
            75,
            None,
        );
        // 75 / 2 == 37 (floor), so 37 is accepted
        assert!(route.set_schedule(37).is_ok());
        assert!(route.set_schedule(36).is_err());
    }

    #[test]
    fn test_tightness() {
        let mut route = sample_route();
        assert!(!route.is_tight());
        route.set_schedule(55).unwrap();
        assert!(route.is_tight());
        route.set_schedule(90).unwrap();
        assert!(!route.is_tight());
    }

    #[test]
    fn test_too_few_stops_rejected() {
        let err = Route::new("stub", vec![Stop::new("only", 0.0)]).unwrap_err();
        assert_eq!(err, RouteError::TooFewStops(1));
    }
}
