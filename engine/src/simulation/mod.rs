//! Day Simulation Engine
//!
//! Resolves one simulated day for the whole company: passenger demand,
//! fuel burn, money flow, incidents, and reputation, over either the
//! static route list or the active running boards.
//!
//! # Day loop
//!
//! ```text
//! For each route (or board → trip), in list order:
//! 1. Resolve the assigned bus (penalty and skip when it can't be)
//! 2. Draw passenger demand, cap at bus capacity, bill fares
//! 3. Burn fuel at the pre-advance price
//! 4. Independent incident draw
//! 5. Independent schedule-risk draw (static mode only)
//! Then settle: money += earnings - fuel, clamp reputation to [0, 100],
//! advance the fuel market, increment the day counter.
//! ```

mod engine;
mod report;
mod variant;

pub use engine::DaySimulator;
pub use report::{
    BoardOutcome, BoardService, DayReport, RouteOutcome, ServiceOutcome, TripOutcome,
};
pub use variant::{
    EngineVariant, AVERAGE_SPEED_KMH, DEMAND_SPREAD, REFERENCE_SPEED_KMH, TICKET_PRICE,
};
