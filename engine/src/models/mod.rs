//! Domain models for the bus company

pub mod board;
pub mod bus;
pub mod company;
pub mod route;

pub use board::{BoardError, DepartureTime, RunningBoard, Trip};
pub use bus::{Bus, BusId, Livery};
pub use company::{AssignmentMode, CompanyError, CompanyState};
pub use route::{Route, RouteError, Stop};
