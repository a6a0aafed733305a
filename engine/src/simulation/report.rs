//! Day report
//!
//! The engine returns what happened rather than printing it: one
//! [`DayReport`] per simulated day, with a per-route (static mode) or
//! per-board/per-trip (running-board mode) breakdown. The CLI renders it;
//! tests assert on it.

use crate::models::board::DepartureTime;
use crate::models::bus::BusId;

/// Aggregate result of one simulated day
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    /// The day that was simulated (the company counter is already on the
    /// next one by the time this report is returned)
    pub day: u32,

    /// Fare income across all services
    pub total_earnings: f64,

    /// Fuel bill across all services, at the pre-advance price
    pub total_fuel_cost: f64,

    /// Flat incident repair bills taken straight off company money
    /// (static mode only; board incidents cost reputation, not money)
    pub total_repair_costs: f64,

    /// Summed reputation delta before clamping
    pub reputation_delta: f64,

    /// Per-route breakdown (static mode; empty in board mode)
    pub routes: Vec<RouteOutcome>,

    /// Per-board breakdown (board mode; empty in static mode)
    pub boards: Vec<BoardOutcome>,
}

impl DayReport {
    /// Earnings minus fuel. Repair bills are charged separately and are
    /// not part of the route settlement.
    pub fn net_profit(&self) -> f64 {
        self.total_earnings - self.total_fuel_cost
    }
}

/// What happened on one static route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub route_name: String,
    pub service: ServiceOutcome,
}

/// Service result for a static route
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceOutcome {
    /// No bus assigned (or the assigned id no longer resolves):
    /// no service today, reputation penalty
    NoBusAssigned,

    /// The route ran
    Operated {
        bus_id: BusId,
        passengers: u32,
        earnings: f64,
        fuel_used: f64,
        fuel_cost: f64,
        /// Incident label if one fired
        incident: Option<&'static str>,
        /// Whether a tight schedule actually caused delays
        delayed: bool,
    },
}

/// What happened on one running board
#[derive(Debug, Clone, PartialEq)]
pub struct BoardOutcome {
    pub board_name: String,
    pub service: BoardService,
}

/// Service result for a running board
#[derive(Debug, Clone, PartialEq)]
pub enum BoardService {
    /// The board's bus id no longer resolves; the whole board is skipped
    /// (tolerated, no penalty)
    UnknownBus { bus_id: BusId },

    /// The board ran its trips
    Operated {
        bus_id: BusId,
        earnings: f64,
        fuel_cost: f64,
        trips: Vec<TripOutcome>,
    },
}

impl BoardOutcome {
    /// Completed trips out of scheduled trips.
    pub fn trips_completed(&self) -> (usize, usize) {
        match &self.service {
            BoardService::UnknownBus { .. } => (0, 0),
            BoardService::Operated { trips, .. } => {
                let done = trips
                    .iter()
                    .filter(|t| matches!(t, TripOutcome::Completed { .. }))
                    .count();
                (done, trips.len())
            }
        }
    }
}

/// Result of a single trip on a running board
#[derive(Debug, Clone, PartialEq)]
pub enum TripOutcome {
    /// The trip's route has been deleted; trip skipped with a penalty
    RouteMissing {
        route_name: String,
        departure: DepartureTime,
    },

    /// Not enough fuel in the tank for the estimate; trip cancelled
    /// without burning anything
    Cancelled {
        route_name: String,
        departure: DepartureTime,
        fuel_required: f64,
        fuel_available: f64,
    },

    /// The trip ran
    Completed {
        route_name: String,
        destination: String,
        departure: DepartureTime,
        passengers: u32,
        earnings: f64,
        fuel_used: f64,
        fuel_cost: f64,
        incident: Option<&'static str>,
    },
}
