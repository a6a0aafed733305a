//! Assignment resolvers
//!
//! Two mutually exclusive models:
//!
//! - **Static**: one bus serves exactly one route. Assigning a bus first
//!   clears it off whatever route it held, then installs it on the target;
//!   a bus already on the target route is displaced silently (it simply
//!   becomes unassigned, not an error).
//! - **Running boards**: a board points at one bus, but nothing stops the
//!   same bus being pointed at by several boards. The data model treats
//!   the double booking as allowed.
//!
//! Identifiers that fail to resolve are rejected here, at assignment
//! time. The day engine is the opposite: it tolerates dangling references
//! and charges reputation instead.
//!
//! Back-references are never stored; `route_of`/`boards_of` discover
//! membership by linear scan, which is fine at fleet sizes of tens. A
//! much larger fleet would want a bus-id → owner index maintained next to
//! these operations instead.

use crate::models::board::RunningBoard;
use crate::models::bus::{Bus, BusId};
use crate::models::company::CompanyState;
use crate::models::route::Route;
use thiserror::Error;

/// Errors raised when an assignment cannot be resolved
#[derive(Debug, Error, PartialEq)]
pub enum AssignmentError {
    #[error("no bus with id {0}")]
    BusNotFound(BusId),

    #[error("no route named '{0}'")]
    RouteNotFound(String),
}

/// Put a bus on a route (static mode).
///
/// The bus leaves any route it currently serves; the target route's
/// previous occupant, if any, becomes unassigned without an error.
pub fn assign_bus_to_route(
    state: &mut CompanyState,
    bus_id: BusId,
    route_name: &str,
) -> Result<(), AssignmentError> {
    if state.bus(bus_id).is_none() {
        return Err(AssignmentError::BusNotFound(bus_id));
    }
    if state.route(route_name).is_none() {
        return Err(AssignmentError::RouteNotFound(route_name.to_string()));
    }

    for route in &mut state.routes {
        if route.assigned_bus() == Some(bus_id) {
            route.set_assigned_bus(None);
        }
    }
    for route in &mut state.routes {
        if route.name == route_name {
            route.set_assigned_bus(Some(bus_id));
        }
    }
    Ok(())
}

/// Clear a route's assignment, returning the bus that was on it.
pub fn unassign_route(
    state: &mut CompanyState,
    route_name: &str,
) -> Result<Option<BusId>, AssignmentError> {
    let route = state
        .route_mut(route_name)
        .ok_or_else(|| AssignmentError::RouteNotFound(route_name.to_string()))?;
    let previous = route.assigned_bus();
    route.set_assigned_bus(None);
    Ok(previous)
}

/// Point a running board at a bus.
///
/// No exclusivity check: the same bus may serve several boards.
pub fn assign_bus_to_board(
    board: &mut RunningBoard,
    fleet: &[Bus],
    bus_id: BusId,
) -> Result<(), AssignmentError> {
    if !fleet.iter().any(|b| b.id() == bus_id) {
        return Err(AssignmentError::BusNotFound(bus_id));
    }
    board.assigned_bus_id = Some(bus_id);
    Ok(())
}

/// Clear a board's bus reference, returning the bus that was on it.
pub fn unassign_board(board: &mut RunningBoard) -> Option<BusId> {
    board.assigned_bus_id.take()
}

/// The static route a bus currently serves, if any.
pub fn route_of(state: &CompanyState, bus_id: BusId) -> Option<&Route> {
    state
        .routes
        .iter()
        .find(|r| r.assigned_bus() == Some(bus_id))
}

/// Every running board a bus currently serves.
pub fn boards_of(boards: &[RunningBoard], bus_id: BusId) -> Vec<&RunningBoard> {
    boards
        .iter()
        .filter(|b| b.assigned_bus_id == Some(bus_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VehicleSpec;
    use crate::models::route::Stop;

    fn company_with(buses: u32, routes: &[&str]) -> CompanyState {
        let mut company = CompanyState::new("Scan Test");
        let spec = VehicleSpec {
            model: "Solo".to_string(),
            capacity: 30,
            fuel_capacity: 120.0,
            fuel_efficiency: 0.22,
            price: 0.0,
            source: None,
        };
        for _ in 0..buses {
            company.buy_bus(&spec, None).unwrap();
        }
        for name in routes {
            company
                .add_route(name, vec![Stop::new("a", 0.0), Stop::new("b", 10.0)])
                .unwrap();
        }
        company
    }

    #[test]
    fn test_assign_moves_bus_between_routes() {
        let mut company = company_with(1, &["A", "B"]);

        assign_bus_to_route(&mut company, 1, "A").unwrap();
        assert_eq!(company.route("A").unwrap().assigned_bus(), Some(1));

        assign_bus_to_route(&mut company, 1, "B").unwrap();
        assert_eq!(company.route("A").unwrap().assigned_bus(), None);
        assert_eq!(company.route("B").unwrap().assigned_bus(), Some(1));
    }

    #[test]
    fn test_assign_displaces_previous_occupant_silently() {
        let mut company = company_with(2, &["A"]);
        assign_bus_to_route(&mut company, 1, "A").unwrap();
        assign_bus_to_route(&mut company, 2, "A").unwrap();

        assert_eq!(company.route("A").unwrap().assigned_bus(), Some(2));
        assert!(route_of(&company, 1).is_none(), "bus 1 is simply unassigned");
    }

    #[test]
    fn test_assign_unknown_ids_rejected() {
        let mut company = company_with(1, &["A"]);
        assert_eq!(
            assign_bus_to_route(&mut company, 99, "A"),
            Err(AssignmentError::BusNotFound(99))
        );
        assert_eq!(
            assign_bus_to_route(&mut company, 1, "Zed"),
            Err(AssignmentError::RouteNotFound("Zed".to_string()))
        );
        // failed assignment mutates nothing
        assert_eq!(company.route("A").unwrap().assigned_bus(), None);
    }

    #[test]
    fn test_board_double_booking_allowed() {
        let company = company_with(1, &[]);
        let mut early = RunningBoard::new("Early Turn", vec![]);
        let mut late = RunningBoard::new("Late Turn", vec![]);

        assign_bus_to_board(&mut early, &company.fleet, 1).unwrap();
        assign_bus_to_board(&mut late, &company.fleet, 1).unwrap();

        assert_eq!(early.assigned_bus_id, Some(1));
        assert_eq!(late.assigned_bus_id, Some(1));

        let boards = [early, late];
        assert_eq!(boards_of(&boards, 1).len(), 2);
    }

    #[test]
    fn test_board_unknown_bus_rejected() {
        let company = company_with(0, &[]);
        let mut board = RunningBoard::new("Early Turn", vec![]);
        assert_eq!(
            assign_bus_to_board(&mut board, &company.fleet, 7),
            Err(AssignmentError::BusNotFound(7))
        );
        assert_eq!(board.assigned_bus_id, None);
    }

    #[test]
    fn test_unassign_round_trip() {
        let mut company = company_with(1, &["A"]);
        assign_bus_to_route(&mut company, 1, "A").unwrap();
        assert_eq!(unassign_route(&mut company, "A").unwrap(), Some(1));
        assert_eq!(unassign_route(&mut company, "A").unwrap(), None);

        let mut board = RunningBoard::new("Turn", vec![]);
        assign_bus_to_board(&mut board, &company.fleet, 1).unwrap();
        assert_eq!(unassign_board(&mut board), Some(1));
        assert_eq!(unassign_board(&mut board), None);
    }
}
