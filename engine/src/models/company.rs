//! Company state and player operations
//!
//! `CompanyState` is the single explicit state object: every operation,
//! menu actions and the day simulation alike, receives it by reference.
//! There is no module-level singleton.
//!
//! Operations validate first and mutate second, so a rejected command
//! leaves no partial change behind.

use crate::catalog::VehicleSpec;
use crate::market;
use crate::models::bus::{Bus, BusId, Livery};
use crate::models::route::{Route, RouteError, Stop};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opening balance of a new company
pub const STARTING_BALANCE: f64 = 2_500_000.0;
/// Opening reputation of a new company
pub const STARTING_REPUTATION: f64 = 50.0;
/// Cost of laying on a new route, per stop
pub const ROUTE_COST_PER_STOP: f64 = 500.0;
/// Flat fee for repainting a bus
pub const REPAINT_FEE: f64 = 500.0;

/// Errors raised by player operations on the company
#[derive(Debug, Error, PartialEq)]
pub enum CompanyError {
    #[error("not enough money: need {required:.2}, have {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("no bus with id {0}")]
    BusNotFound(BusId),

    #[error("no route named '{0}'")]
    RouteNotFound(String),

    #[error("a route named '{0}' already exists")]
    DuplicateRouteName(String),

    #[error("fleet number '{0}' is already in use")]
    DuplicateFleetNumber(String),

    #[error("route '{0}' still has a bus assigned; unassign it first")]
    RouteStillAssigned(String),

    #[error("bus {0} already wears that livery")]
    LiveryUnchanged(BusId),

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Which assignment model the company runs under.
///
/// The two modes are mutually exclusive per simulated day: static mode
/// walks the route list, running-board mode walks the boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentMode {
    #[default]
    StaticRoutes,
    RunningBoards,
}

/// Complete company state
///
/// Fields are public: this is a plain record passed by `&mut` into the
/// resolvers and the day engine. The invariants that need guarding
/// (schedule floor, tank clamp) live on `Route` and `Bus` themselves.
///
/// # Example
/// ```
/// use bus_manager_core::CompanyState;
///
/// let company = CompanyState::new("Vectis Omnibus");
/// assert_eq!(company.money, 2_500_000.0);
/// assert_eq!(company.reputation, 50.0);
/// assert_eq!(company.day, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyState {
    pub company_name: String,
    /// Signed; may go negative, no floor is enforced
    pub money: f64,
    /// Clamped to [0, 100] after every simulated day
    pub reputation: f64,
    /// Day counter, starts at 1
    pub day: u32,
    /// Next bus id to hand out (monotonic, starts at 1)
    pub next_bus_id: BusId,
    pub fleet: Vec<Bus>,
    pub routes: Vec<Route>,
    pub mode: AssignmentMode,
    /// Current fuel price per litre, kept inside the market band
    pub fuel_price: f64,
}

impl CompanyState {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            money: STARTING_BALANCE,
            reputation: STARTING_REPUTATION,
            day: 1,
            next_bus_id: 1,
            fleet: Vec::new(),
            routes: Vec::new(),
            mode: AssignmentMode::default(),
            fuel_price: market::DEFAULT_PRICE,
        }
    }

    pub fn bus(&self, id: BusId) -> Option<&Bus> {
        self.fleet.iter().find(|b| b.id() == id)
    }

    pub fn bus_mut(&mut self, id: BusId) -> Option<&mut Bus> {
        self.fleet.iter_mut().find(|b| b.id() == id)
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn route_mut(&mut self, name: &str) -> Option<&mut Route> {
        self.routes.iter_mut().find(|r| r.name == name)
    }

    /// Buy a bus from a shop or catalog spec.
    ///
    /// With `fleet_number: None` the lowest free numeric fleet number is
    /// assigned automatically. Returns the new bus id.
    pub fn buy_bus(
        &mut self,
        spec: &VehicleSpec,
        fleet_number: Option<&str>,
    ) -> Result<BusId, CompanyError> {
        if self.money < spec.price {
            return Err(CompanyError::InsufficientFunds {
                required: spec.price,
                available: self.money,
            });
        }

        let number = match fleet_number {
            Some(number) => {
                if self.fleet_number_taken(number, None) {
                    return Err(CompanyError::DuplicateFleetNumber(number.to_string()));
                }
                number.to_string()
            }
            None => self.auto_fleet_number(),
        };

        let id = self.next_bus_id;
        self.next_bus_id += 1;
        self.fleet.push(Bus::from_spec(id, spec, Some(number)));
        self.money -= spec.price;
        Ok(id)
    }

    /// Lowest numeric fleet number not yet in use, as a string.
    pub fn auto_fleet_number(&self) -> String {
        let mut n: u32 = 1;
        while self.fleet_number_taken(&n.to_string(), None) {
            n += 1;
        }
        n.to_string()
    }

    fn fleet_number_taken(&self, number: &str, ignore: Option<BusId>) -> bool {
        self.fleet
            .iter()
            .filter(|b| Some(b.id()) != ignore)
            .any(|b| b.fleet_number() == Some(number))
    }

    /// Re-number a bus. The new number must be unique across the fleet.
    pub fn set_fleet_number(&mut self, id: BusId, number: &str) -> Result<(), CompanyError> {
        if self.bus(id).is_none() {
            return Err(CompanyError::BusNotFound(id));
        }
        if self.fleet_number_taken(number, Some(id)) {
            return Err(CompanyError::DuplicateFleetNumber(number.to_string()));
        }
        if let Some(bus) = self.bus_mut(id) {
            bus.set_fleet_number(number.to_string());
        }
        Ok(())
    }

    /// Repaint a bus for the flat fee. Repainting to the current livery is
    /// rejected (and not billed).
    pub fn repaint_bus(&mut self, id: BusId, livery: Livery) -> Result<(), CompanyError> {
        let current = self.bus(id).ok_or(CompanyError::BusNotFound(id))?.livery();
        if current == livery {
            return Err(CompanyError::LiveryUnchanged(id));
        }
        if self.money < REPAINT_FEE {
            return Err(CompanyError::InsufficientFunds {
                required: REPAINT_FEE,
                available: self.money,
            });
        }
        if let Some(bus) = self.bus_mut(id) {
            bus.set_livery(livery);
        }
        self.money -= REPAINT_FEE;
        Ok(())
    }

    /// Lay on a new route. Costs [`ROUTE_COST_PER_STOP`] per stop; the
    /// name must be unique and there must be at least two stops.
    pub fn add_route(&mut self, name: &str, stops: Vec<Stop>) -> Result<(), CompanyError> {
        if self.route(name).is_some() {
            return Err(CompanyError::DuplicateRouteName(name.to_string()));
        }

        let cost = ROUTE_COST_PER_STOP * stops.len() as f64;
        let route = Route::new(name, stops)?;
        if self.money < cost {
            return Err(CompanyError::InsufficientFunds {
                required: cost,
                available: self.money,
            });
        }

        self.routes.push(route);
        self.money -= cost;
        Ok(())
    }

    /// Delete a route. Rejected while a bus is still assigned to it.
    pub fn delete_route(&mut self, name: &str) -> Result<(), CompanyError> {
        let route = self
            .route(name)
            .ok_or_else(|| CompanyError::RouteNotFound(name.to_string()))?;
        if route.assigned_bus().is_some() {
            return Err(CompanyError::RouteStillAssigned(name.to_string()));
        }
        self.routes.retain(|r| r.name != name);
        Ok(())
    }

    /// Update a route's current schedule (half-base floor enforced by the
    /// route itself).
    pub fn set_schedule(&mut self, name: &str, minutes: u32) -> Result<(), CompanyError> {
        let route = self
            .route_mut(name)
            .ok_or_else(|| CompanyError::RouteNotFound(name.to_string()))?;
        route.set_schedule(minutes)?;
        Ok(())
    }
}
