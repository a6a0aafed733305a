//! Engine variants
//!
//! The simulator ships two rule sets that differ only in how a route's
//! workload is read and priced:
//!
//! - **DistanceBased** (legacy): stops carry kilometres. Demand scales
//!   ×10 per km, incidents are rarer and cheap to fix.
//! - **DurationBased** (current): stops carry minutes. Demand scales
//!   ×1.5 per minute, incidents are more frequent and cost real money.
//!
//! A variant never mixes units: whichever one the engine runs under, every
//! route's stops are read in that unit.

use crate::rng::GameRng;

/// Speed the fuel-efficiency rating is quoted at (km/h)
pub const REFERENCE_SPEED_KMH: f64 = 50.0;
/// Assumed in-service average speed for duration-based routes (km/h)
pub const AVERAGE_SPEED_KMH: f64 = 30.0;
/// Flat fare per passenger
pub const TICKET_PRICE: f64 = 2.50;
/// Half-width of the uniform demand band around the expected value
pub const DEMAND_SPREAD: i64 = 5;

/// Which rule set the day engine runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineVariant {
    /// Legacy rules: stop costs are kilometres
    DistanceBased,
    /// Current rules: stop costs are minutes
    #[default]
    DurationBased,
}

impl EngineVariant {
    /// Expected passengers per unit of workload
    pub fn demand_factor(self) -> f64 {
        match self {
            EngineVariant::DistanceBased => 10.0,
            EngineVariant::DurationBased => 1.5,
        }
    }

    /// Chance of an adverse incident on a static route, per day
    pub fn incident_probability(self) -> f64 {
        match self {
            EngineVariant::DistanceBased => 0.15,
            EngineVariant::DurationBased => 0.20,
        }
    }

    /// Flat repair bill when an incident fires, taken straight off
    /// company money
    pub fn incident_repair_cost(self) -> f64 {
        match self {
            EngineVariant::DistanceBased => 20.0,
            EngineVariant::DurationBased => 200.0,
        }
    }

    /// Litres actually burned driving a route of the given workload.
    ///
    /// Distance-based routes are driven at the reference speed, so the
    /// rating applies as-is. Duration-based routes are converted to
    /// kilometres at the in-service average speed and corrected for
    /// running below the reference speed.
    pub fn fuel_used(self, workload: f64, efficiency: f64) -> f64 {
        match self {
            EngineVariant::DistanceBased => workload * efficiency,
            EngineVariant::DurationBased => {
                let km = workload / 60.0 * AVERAGE_SPEED_KMH;
                km * efficiency * (AVERAGE_SPEED_KMH / REFERENCE_SPEED_KMH)
            }
        }
    }

    /// Litres a trip is expected to need, used for the running-board
    /// pre-departure check. Uncorrected for duration-based routes, so it
    /// overshoots the actual burn: a trip departs only with headroom.
    pub fn fuel_estimate(self, workload: f64, efficiency: f64) -> f64 {
        match self {
            EngineVariant::DistanceBased => workload * efficiency,
            EngineVariant::DurationBased => workload / 60.0 * AVERAGE_SPEED_KMH * efficiency,
        }
    }

    /// Draw passenger demand for a route: uniform over the ±[`DEMAND_SPREAD`]
    /// band around workload × factor, floored at zero, capped at capacity.
    pub fn sample_demand(self, workload: f64, capacity: u32, rng: &mut GameRng) -> u32 {
        let expected = (workload * self.demand_factor()) as i64;
        let drawn = rng.range_inclusive((expected - DEMAND_SPREAD).max(0), expected + DEMAND_SPREAD);
        drawn.min(i64::from(capacity)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demand_band_distance_variant() {
        // workload 10 km × factor 10 → expected 100, band [95, 105],
        // which a 50-seater always caps
        let mut rng = GameRng::new(5);
        for _ in 0..200 {
            let passengers = EngineVariant::DistanceBased.sample_demand(10.0, 50, &mut rng);
            assert_eq!(passengers, 50);
        }
    }

    #[test]
    fn test_demand_band_uncapped() {
        let mut rng = GameRng::new(5);
        for _ in 0..200 {
            let passengers = EngineVariant::DistanceBased.sample_demand(10.0, 500, &mut rng);
            assert!((95..=105).contains(&passengers), "got {}", passengers);
        }
    }

    #[test]
    fn test_demand_floors_at_zero() {
        // workload 1 min × 1.5 → expected 1, band [max(0,-4), 6] = [0, 6]
        let mut rng = GameRng::new(11);
        for _ in 0..200 {
            let passengers = EngineVariant::DurationBased.sample_demand(1.0, 80, &mut rng);
            assert!(passengers <= 6);
        }
    }

    #[test]
    fn test_fuel_used_distance() {
        // 10 km at 0.3 L/km, reference speed: 3 litres flat
        let used = EngineVariant::DistanceBased.fuel_used(10.0, 0.3);
        assert!((used - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_fuel_used_duration() {
        // 60 min → 30 km at average speed, corrected by 30/50
        let used = EngineVariant::DurationBased.fuel_used(60.0, 0.3);
        assert!((used - 30.0 * 0.3 * 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_fuel_estimate_is_pessimistic_for_duration() {
        let est = EngineVariant::DurationBased.fuel_estimate(60.0, 0.3);
        let used = EngineVariant::DurationBased.fuel_used(60.0, 0.3);
        assert!(est > used, "estimate {} should exceed actual {}", est, used);
    }
}
