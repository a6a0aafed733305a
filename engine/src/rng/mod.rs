//! Deterministic random number generation
//!
//! Every random draw in the engine (passenger demand, incidents, schedule
//! risk, fuel price drift) goes through one seeded generator so a whole
//! simulated day can be replayed bit-for-bit.

mod xorshift;

pub use xorshift::GameRng;
