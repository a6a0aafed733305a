//! Bus Manager Core - Simulation Engine
//!
//! Turn-based bus company simulator with deterministic execution.
//!
//! # Architecture
//!
//! - **models**: Domain types (Stop, Route, Bus, Trip, RunningBoard, CompanyState)
//! - **market**: Daily fuel price drift
//! - **assignment**: Bus-to-route and bus-to-board resolvers
//! - **simulation**: Day simulation engine (static routes and running boards)
//! - **catalog**: Vehicle shop and external catalog loading
//! - **persist**: Company snapshots and running-board files
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG, fixed draw order)
//! 2. Reputation is clamped to [0, 100] after every simulated day
//! 3. Fuel levels never go negative; money may
//! 4. A day simulation mutates company state in one logical operation

// Module declarations
pub mod assignment;
pub mod catalog;
pub mod market;
pub mod models;
pub mod persist;
pub mod rng;
pub mod simulation;

// Re-exports for convenience
pub use assignment::{
    assign_bus_to_board, assign_bus_to_route, boards_of, route_of, unassign_board,
    unassign_route, AssignmentError,
};
pub use catalog::{base_shop, load_dir as load_catalog_dir, CatalogError, CatalogSummary, VehicleSpec};
pub use models::{
    board::{BoardError, DepartureTime, RunningBoard, Trip},
    bus::{Bus, BusId, Livery},
    company::{AssignmentMode, CompanyError, CompanyState},
    route::{Route, RouteError, Stop},
};
pub use persist::{PersistError, SaveSummary};
pub use rng::GameRng;
pub use simulation::{
    BoardOutcome, BoardService, DayReport, DaySimulator, EngineVariant, RouteOutcome,
    ServiceOutcome, TripOutcome,
};
