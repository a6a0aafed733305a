//! Fuel market
//!
//! A single scalar price per litre that drifts once per simulated day.
//! The drift is a uniform perturbation in ±[`MAX_DAILY_DRIFT`], and the
//! result is clamped into the [`MIN_PRICE`], [`MAX_PRICE`] band. All fuel
//! bought during a day is billed at the pre-advance price; the engine
//! advances the market only after settlement.

use crate::rng::GameRng;

/// Lower bound of the price band
pub const MIN_PRICE: f64 = 1.25;
/// Upper bound of the price band
pub const MAX_PRICE: f64 = 2.00;
/// Price a new company starts at
pub const DEFAULT_PRICE: f64 = 1.60;
/// Largest single-day move, either direction
pub const MAX_DAILY_DRIFT: f64 = 0.05;

/// Advance the fuel price by one day.
///
/// # Example
/// ```
/// use bus_manager_core::{market, GameRng};
///
/// let mut rng = GameRng::new(42);
/// let next = market::advance(market::DEFAULT_PRICE, &mut rng);
/// assert!((market::MIN_PRICE..=market::MAX_PRICE).contains(&next));
/// ```
pub fn advance(current: f64, rng: &mut GameRng) -> f64 {
    let drift = -MAX_DAILY_DRIFT + rng.next_f64() * (2.0 * MAX_DAILY_DRIFT);
    (current + drift).clamp(MIN_PRICE, MAX_PRICE)
}
