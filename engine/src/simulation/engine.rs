//! Day simulator
//!
//! Walks the company's routes (static mode) or running boards (board
//! mode) once, in list order, and settles the day into company state.
//! The whole day is one logical operation: once invoked it always
//! completes, even over an empty route list (the day counter still
//! advances and the fuel market still drifts). "Is there anything worth
//! running?" is the caller's question to ask beforehand.
//!
//! # Determinism
//!
//! All draws go through the caller's [`GameRng`] in a fixed order per
//! unit: demand, incident check, incident label (only when one fired),
//! schedule risk (static mode, only when the schedule is tight). Same
//! seed + same state ⇒ identical report.

use crate::market;
use crate::models::board::RunningBoard;
use crate::models::company::CompanyState;
use crate::rng::GameRng;
use crate::simulation::report::{
    BoardOutcome, BoardService, DayReport, RouteOutcome, ServiceOutcome, TripOutcome,
};
use crate::simulation::variant::{EngineVariant, TICKET_PRICE};

/// Reputation lost when a route has no serviceable bus for the day
const NO_BUS_PENALTY: f64 = 5.0;
/// Reputation lost when a static-route incident fires
const INCIDENT_PENALTY: f64 = 3.0;
/// Reputation gained for an incident-free static route
const SMOOTH_RUN_REWARD: f64 = 1.0;
/// Chance that a tight schedule actually causes delays
const TIGHT_SCHEDULE_DELAY_PROBABILITY: f64 = 0.3;
/// Reputation lost when a tight schedule causes delays
const TIGHT_SCHEDULE_PENALTY: f64 = 2.0;
/// Reputation gained for running to time
const ON_TIME_REWARD: f64 = 1.0;
/// Reputation lost per trip whose route no longer exists
const MISSING_ROUTE_PENALTY: f64 = 2.0;
/// Reputation lost per trip cancelled for lack of fuel
const CANCELLED_TRIP_PENALTY: f64 = 5.0;
/// Chance of a minor incident on a board trip
const TRIP_INCIDENT_PROBABILITY: f64 = 0.10;
/// Reputation lost when a board-trip incident fires
const TRIP_INCIDENT_PENALTY: f64 = 1.0;
/// Reputation gained per clean board trip
const TRIP_SMOOTH_REWARD: f64 = 0.5;

/// Incident labels for static routes
const ROUTE_INCIDENTS: &[&str] = &["flat tyre", "engine trouble", "heavy traffic"];
/// Incident labels for board trips
const TRIP_INCIDENTS: &[&str] = &["minor delay", "passenger incident", "route deviation"];

/// Running totals while a day is being walked
#[derive(Debug, Default)]
struct DayTotals {
    earnings: f64,
    fuel_cost: f64,
    repair_costs: f64,
    reputation_delta: f64,
}

/// The day simulation engine
///
/// Holds only the rule-set variant; all state lives in the
/// [`CompanyState`] passed into [`DaySimulator::simulate_day`].
///
/// # Example
/// ```
/// use bus_manager_core::{CompanyState, DaySimulator, EngineVariant, GameRng};
///
/// let mut company = CompanyState::new("Vectis Omnibus");
/// let mut rng = GameRng::new(12345);
///
/// let report = DaySimulator::new(EngineVariant::DurationBased)
///     .simulate_day(&mut company, &[], &mut rng);
///
/// // zero routes: nothing earned, but the day still turned over
/// assert_eq!(report.day, 1);
/// assert_eq!(company.day, 2);
/// assert_eq!(company.money, 2_500_000.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DaySimulator {
    variant: EngineVariant,
}

impl DaySimulator {
    pub fn new(variant: EngineVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> EngineVariant {
        self.variant
    }

    /// Simulate one day and settle it into `state`.
    ///
    /// `boards` is only read in running-board mode; static mode ignores
    /// it. Buses burn fuel in place; boards themselves are never mutated.
    pub fn simulate_day(
        &self,
        state: &mut CompanyState,
        boards: &[RunningBoard],
        rng: &mut GameRng,
    ) -> DayReport {
        use crate::models::company::AssignmentMode;

        let day = state.day;

        let (totals, routes, board_outcomes) = match state.mode {
            AssignmentMode::StaticRoutes => {
                let (totals, routes) = self.run_static(state, rng);
                (totals, routes, Vec::new())
            }
            AssignmentMode::RunningBoards => {
                let (totals, outcomes) = self.run_boards(state, boards, rng);
                (totals, Vec::new(), outcomes)
            }
        };

        // Settlement: one batch mutation for the whole day
        state.money += totals.earnings - totals.fuel_cost;
        state.reputation = (state.reputation + totals.reputation_delta).clamp(0.0, 100.0);
        state.fuel_price = market::advance(state.fuel_price, rng);
        state.day += 1;

        DayReport {
            day,
            total_earnings: totals.earnings,
            total_fuel_cost: totals.fuel_cost,
            total_repair_costs: totals.repair_costs,
            reputation_delta: totals.reputation_delta,
            routes,
            boards: board_outcomes,
        }
    }

    /// Static mode: every route in list order, one service per day.
    fn run_static(
        &self,
        state: &mut CompanyState,
        rng: &mut GameRng,
    ) -> (DayTotals, Vec<RouteOutcome>) {
        let mut totals = DayTotals::default();
        let mut outcomes = Vec::with_capacity(state.routes.len());

        let fuel_price = state.fuel_price;
        let CompanyState {
            routes,
            fleet,
            money,
            ..
        } = state;

        for route in routes.iter() {
            // A dangling bus id gets the same treatment as no bus at all
            let bus = match route.assigned_bus() {
                Some(id) => fleet.iter_mut().find(|b| b.id() == id),
                None => None,
            };

            let Some(bus) = bus else {
                totals.reputation_delta -= NO_BUS_PENALTY;
                outcomes.push(RouteOutcome {
                    route_name: route.name.clone(),
                    service: ServiceOutcome::NoBusAssigned,
                });
                continue;
            };

            let workload = route.workload();

            // STEP 1: demand and fares
            let passengers = self.variant.sample_demand(workload, bus.capacity(), rng);
            let earnings = f64::from(passengers) * TICKET_PRICE;

            // STEP 2: fuel, billed at today's price
            let fuel_used = bus.consume(self.variant.fuel_used(workload, bus.fuel_efficiency()));
            let fuel_cost = fuel_used * fuel_price;

            // STEP 3: incident draw (independent of everything else)
            let incident = if rng.chance(self.variant.incident_probability()) {
                let label = *rng.choose(ROUTE_INCIDENTS);
                let repair = self.variant.incident_repair_cost();
                totals.reputation_delta -= INCIDENT_PENALTY;
                totals.repair_costs += repair;
                *money -= repair;
                Some(label)
            } else {
                totals.reputation_delta += SMOOTH_RUN_REWARD;
                None
            };

            // STEP 4: schedule risk; only a tight schedule rolls the dice
            let delayed = if route.is_tight() {
                if rng.chance(TIGHT_SCHEDULE_DELAY_PROBABILITY) {
                    totals.reputation_delta -= TIGHT_SCHEDULE_PENALTY;
                    true
                } else {
                    totals.reputation_delta += ON_TIME_REWARD;
                    false
                }
            } else {
                totals.reputation_delta += ON_TIME_REWARD;
                false
            };

            totals.earnings += earnings;
            totals.fuel_cost += fuel_cost;

            outcomes.push(RouteOutcome {
                route_name: route.name.clone(),
                service: ServiceOutcome::Operated {
                    bus_id: bus.id(),
                    passengers,
                    earnings,
                    fuel_used,
                    fuel_cost,
                    incident,
                    delayed,
                },
            });
        }

        (totals, outcomes)
    }

    /// Board mode: every board that has a bus, trip by trip in board
    /// order. Boards without a bus are skipped outright, no penalty.
    fn run_boards(
        &self,
        state: &mut CompanyState,
        boards: &[RunningBoard],
        rng: &mut GameRng,
    ) -> (DayTotals, Vec<BoardOutcome>) {
        let mut totals = DayTotals::default();
        let mut outcomes = Vec::new();

        let fuel_price = state.fuel_price;
        let CompanyState { routes, fleet, .. } = state;

        for board in boards {
            let Some(bus_id) = board.assigned_bus_id else {
                continue;
            };

            let Some(bus) = fleet.iter_mut().find(|b| b.id() == bus_id) else {
                // Referential gap: tolerated, reported, costs nothing
                outcomes.push(BoardOutcome {
                    board_name: board.name.clone(),
                    service: BoardService::UnknownBus { bus_id },
                });
                continue;
            };

            let mut board_earnings = 0.0;
            let mut board_fuel_cost = 0.0;
            let mut trips = Vec::with_capacity(board.trips.len());

            for trip in &board.trips {
                let Some(route) = routes.iter().find(|r| r.name == trip.route_name) else {
                    totals.reputation_delta -= MISSING_ROUTE_PENALTY;
                    trips.push(TripOutcome::RouteMissing {
                        route_name: trip.route_name.clone(),
                        departure: trip.departure,
                    });
                    continue;
                };

                let workload = route.workload();

                // Pre-departure fuel check; a cancelled trip burns nothing
                // and does not block the rest of the board
                let estimate = self.variant.fuel_estimate(workload, bus.fuel_efficiency());
                if !bus.has_fuel_for(estimate) {
                    totals.reputation_delta -= CANCELLED_TRIP_PENALTY;
                    trips.push(TripOutcome::Cancelled {
                        route_name: trip.route_name.clone(),
                        departure: trip.departure,
                        fuel_required: estimate,
                        fuel_available: bus.fuel_level(),
                    });
                    continue;
                }

                let passengers = self.variant.sample_demand(workload, bus.capacity(), rng);
                let earnings = f64::from(passengers) * TICKET_PRICE;

                let fuel_used =
                    bus.consume(self.variant.fuel_used(workload, bus.fuel_efficiency()));
                let fuel_cost = fuel_used * fuel_price;

                // Minor incidents only: reputation moves, money does not
                let incident = if rng.chance(TRIP_INCIDENT_PROBABILITY) {
                    totals.reputation_delta -= TRIP_INCIDENT_PENALTY;
                    Some(*rng.choose(TRIP_INCIDENTS))
                } else {
                    totals.reputation_delta += TRIP_SMOOTH_REWARD;
                    None
                };

                board_earnings += earnings;
                board_fuel_cost += fuel_cost;

                trips.push(TripOutcome::Completed {
                    route_name: trip.route_name.clone(),
                    destination: trip.destination.clone(),
                    departure: trip.departure,
                    passengers,
                    earnings,
                    fuel_used,
                    fuel_cost,
                    incident,
                });
            }

            totals.earnings += board_earnings;
            totals.fuel_cost += board_fuel_cost;

            outcomes.push(BoardOutcome {
                board_name: board.name.clone(),
                service: BoardService::Operated {
                    bus_id,
                    earnings: board_earnings,
                    fuel_cost: board_fuel_cost,
                    trips,
                },
            });
        }

        (totals, outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VehicleSpec;
    use crate::models::company::AssignmentMode;
    use crate::models::route::Stop;

    fn solo_spec() -> VehicleSpec {
        VehicleSpec {
            model: "Optare Solo SR".to_string(),
            capacity: 30,
            fuel_capacity: 120.0,
            fuel_efficiency: 0.22,
            price: 0.0,
            source: None,
        }
    }

    #[test]
    fn test_unassigned_route_costs_five_reputation() {
        let mut company = CompanyState::new("Penalty Test");
        company
            .add_route("Route 1", vec![Stop::new("a", 0.0), Stop::new("b", 20.0)])
            .unwrap();
        let money_before = company.money;
        let mut rng = GameRng::new(1);

        let report = DaySimulator::default().simulate_day(&mut company, &[], &mut rng);

        assert_eq!(report.reputation_delta, -5.0);
        assert_eq!(report.routes.len(), 1);
        assert_eq!(report.routes[0].service, ServiceOutcome::NoBusAssigned);
        assert_eq!(report.total_earnings, 0.0);
        assert_eq!(company.money, money_before, "no service, no money moved");
        assert_eq!(company.reputation, 45.0);
    }

    #[test]
    fn test_dangling_assignment_treated_as_no_bus() {
        let mut company = CompanyState::new("Dangle Test");
        company
            .add_route("Route 1", vec![Stop::new("a", 0.0), Stop::new("b", 20.0)])
            .unwrap();
        company
            .route_mut("Route 1")
            .unwrap()
            .set_assigned_bus(Some(42));
        let mut rng = GameRng::new(1);

        let report = DaySimulator::default().simulate_day(&mut company, &[], &mut rng);
        assert_eq!(report.routes[0].service, ServiceOutcome::NoBusAssigned);
        assert_eq!(report.reputation_delta, -5.0);
    }

    #[test]
    fn test_day_always_completes_on_empty_company() {
        let mut company = CompanyState::new("Empty Test");
        let mut rng = GameRng::new(9);

        let report = DaySimulator::default().simulate_day(&mut company, &[], &mut rng);

        assert_eq!(report.day, 1);
        assert!(report.routes.is_empty());
        assert!(report.boards.is_empty());
        assert_eq!(company.day, 2);
        assert_eq!(company.money, 2_500_000.0);
        assert_eq!(company.reputation, 50.0);
    }

    #[test]
    fn test_boards_without_bus_are_skipped_silently() {
        let mut company = CompanyState::new("Board Test");
        company.mode = AssignmentMode::RunningBoards;
        let board = RunningBoard::new("Idle Board", vec![]);
        let mut rng = GameRng::new(3);

        let report = DaySimulator::default().simulate_day(&mut company, &[board], &mut rng);

        assert!(report.boards.is_empty(), "unassigned board never appears");
        assert_eq!(report.reputation_delta, 0.0);
        assert_eq!(company.day, 2);
    }

    #[test]
    fn test_board_with_dangling_bus_reported_not_penalized() {
        let mut company = CompanyState::new("Board Test");
        company.mode = AssignmentMode::RunningBoards;
        let mut board = RunningBoard::new("Ghost Turn", vec![]);
        board.assigned_bus_id = Some(9);
        let mut rng = GameRng::new(3);

        let report = DaySimulator::default().simulate_day(&mut company, &[board], &mut rng);

        assert_eq!(report.boards.len(), 1);
        assert_eq!(
            report.boards[0].service,
            BoardService::UnknownBus { bus_id: 9 }
        );
        assert_eq!(report.reputation_delta, 0.0);
    }

    #[test]
    fn test_settlement_accounting_holds_for_any_seed() {
        for seed in 0..50 {
            let mut company = CompanyState::new("Accounting Test");
            company.buy_bus(&solo_spec(), None).unwrap();
            company
                .add_route("Route 1", vec![Stop::new("a", 0.0), Stop::new("b", 40.0)])
                .unwrap();
            crate::assignment::assign_bus_to_route(&mut company, 1, "Route 1").unwrap();

            let money_before = company.money;
            let mut rng = GameRng::new(seed);
            let report =
                DaySimulator::new(EngineVariant::DurationBased).simulate_day(&mut company, &[], &mut rng);

            let expected =
                money_before + report.total_earnings - report.total_fuel_cost - report.total_repair_costs;
            assert!(
                (company.money - expected).abs() < 1e-9,
                "seed {}: money {} != expected {}",
                seed,
                company.money,
                expected
            );
            assert!((0.0..=100.0).contains(&company.reputation));
        }
    }

    #[test]
    fn test_same_seed_same_report() {
        let build = || {
            let mut company = CompanyState::new("Replay Test");
            company.buy_bus(&solo_spec(), None).unwrap();
            company
                .add_route("Route 1", vec![Stop::new("a", 0.0), Stop::new("b", 40.0)])
                .unwrap();
            crate::assignment::assign_bus_to_route(&mut company, 1, "Route 1").unwrap();
            company
        };

        let mut company_a = build();
        let mut company_b = build();
        let mut rng_a = GameRng::new(777);
        let mut rng_b = GameRng::new(777);

        let report_a = DaySimulator::default().simulate_day(&mut company_a, &[], &mut rng_a);
        let report_b = DaySimulator::default().simulate_day(&mut company_b, &[], &mut rng_b);

        assert_eq!(report_a, report_b);
        assert_eq!(company_a, company_b);
    }
}
