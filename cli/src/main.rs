//! City Bus Manager - numbered-menu REPL
//!
//! Thin interactive surface over `bus-manager-core`: reads line-oriented
//! commands, validates selections, calls the engine, and renders its
//! reports. No game rules live here.
//!
//! Set `BUS_MANAGER_SEED` for a deterministic session.

use bus_manager_core::persist;
use bus_manager_core::{
    assign_bus_to_board, assign_bus_to_route, base_shop, boards_of, load_catalog_dir, market,
    route_of, unassign_board, AssignmentMode, BoardService, CompanyState, DayReport,
    DaySimulator, DepartureTime, EngineVariant, GameRng, Livery, RunningBoard, ServiceOutcome,
    Stop, Trip, TripOutcome, VehicleSpec,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const SAVES_DIR: &str = "saves";
const BOARDS_DIR: &str = "running_boards";
const CATALOG_DIR: &str = "catalogs";

fn main() {
    let seed = std::env::var("BUS_MANAGER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(clock_seed);
    let mut rng = GameRng::new(seed);
    let simulator = DaySimulator::new(EngineVariant::DurationBased);

    println!("Welcome to City Bus Manager!");
    let mut company = match start_company() {
        Some(company) => company,
        None => return,
    };

    loop {
        print_main_menu(&company);
        let Some(choice) = prompt("> ") else { break };
        match choice.as_str() {
            "1" => view_routes(&company),
            "2" => view_fleet(&mut company),
            "3" => assign_menu(&mut company),
            "4" => schedule_menu(&mut company),
            "5" => run_day(&mut company, &simulator, &mut rng),
            "6" => shop_menu(&mut company),
            "7" => add_route_menu(&mut company),
            "8" => delete_route_menu(&mut company),
            "9" => view_status(&company),
            "10" => view_fuel_price(&company),
            "11" => save_menu(&company),
            "12" => {
                if let Some(loaded) = load_menu() {
                    company = loaded;
                }
            }
            "13" => boards_menu(&mut company),
            "14" => toggle_mode(&mut company),
            "15" => {
                println!("Exiting City Bus Manager. Thanks for playing, {}!", company.company_name);
                break;
            }
            _ => println!("Invalid option, try again."),
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

// ============================================================================
// Input helpers
// ============================================================================

/// Print a prompt and read one trimmed line; `None` on EOF.
fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

fn prompt_number(label: &str) -> Option<i64> {
    let raw = prompt(label)?;
    match raw.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            println!("Invalid input.");
            None
        }
    }
}

/// Pick a 1-based index out of `len` items; `None` on bad input.
fn prompt_index(label: &str, len: usize) -> Option<usize> {
    let n = prompt_number(label)?;
    if n >= 1 && (n as usize) <= len {
        Some(n as usize - 1)
    } else {
        println!("Invalid selection.");
        None
    }
}

fn confirm(label: &str) -> bool {
    prompt(label).is_some_and(|answer| answer.eq_ignore_ascii_case("y"))
}

// ============================================================================
// Session setup
// ============================================================================

fn start_company() -> Option<CompanyState> {
    let name = prompt("Please enter your company name (or leave blank to load a game): ")?;
    if !name.is_empty() {
        let company = CompanyState::new(name);
        println!(
            "\nWelcome, {}! You start with £{:.2}.",
            company.company_name, company.money
        );
        println!("Build your fleet and routes from scratch and become a transport legend!");
        return Some(company);
    }

    match load_menu() {
        Some(company) => Some(company),
        None => {
            println!("Starting new company as no valid save loaded.");
            Some(CompanyState::new("My Bus Company"))
        }
    }
}

fn print_main_menu(company: &CompanyState) {
    let mode = match company.mode {
        AssignmentMode::StaticRoutes => "Static Routes",
        AssignmentMode::RunningBoards => "Running Boards",
    };
    println!(
        "\n===== City Bus Manager - {} [Mode: {}] =====",
        company.company_name, mode
    );
    println!("Fuel Price: £{:.2}/L", company.fuel_price);
    println!("1) View Routes");
    println!("2) View Fleet");
    println!("3) Assign Bus to Route");
    println!("4) Change Route Schedule");
    println!("5) Run Day Simulation");
    println!("6) Buy New Bus");
    println!("7) Add New Route (costs £500 per stop)");
    println!("8) Delete Route");
    println!("9) View Company Status");
    println!("10) View Fuel Price Details");
    println!("11) Save Game");
    println!("12) Load Game");
    println!("13) Running Board Management");
    println!("14) Toggle Assignment Mode");
    println!("15) Quit");
}

// ============================================================================
// Views
// ============================================================================

fn view_routes(company: &CompanyState) {
    if company.routes.is_empty() {
        println!("\nNo routes available yet.");
        return;
    }
    println!("\n--- Routes ---");
    for (i, route) in company.routes.iter().enumerate() {
        let bus = route
            .assigned_bus()
            .and_then(|id| company.bus(id))
            .map(|b| b.model().to_string())
            .unwrap_or_else(|| "None".to_string());
        println!(
            "[{}] {} | Journey: {:.0} mins | Schedule: {} mins | Bus: {}",
            i + 1,
            route.name,
            route.workload(),
            route.current_schedule_minutes(),
            bus
        );
    }
}

fn view_fleet(company: &mut CompanyState) {
    if company.fleet.is_empty() {
        println!("\nNo buses in fleet yet.");
        return;
    }
    let boards = persist::load_active_boards(Path::new(BOARDS_DIR)).unwrap_or_default();

    println!("\n--- Fleet ---");
    for bus in &company.fleet {
        let assignment = match company.mode {
            AssignmentMode::StaticRoutes => {
                let route = route_of(company, bus.id())
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|| "None".to_string());
                format!("Route: {}", route)
            }
            AssignmentMode::RunningBoards => {
                let names: Vec<_> = boards_of(&boards, bus.id())
                    .iter()
                    .map(|b| b.name.clone())
                    .collect();
                if names.is_empty() {
                    "Running Boards: None".to_string()
                } else {
                    format!("Running Boards: {}", names.join(", "))
                }
            }
        };
        let tag = bus
            .catalog_source()
            .map(|s| format!(" [{}]", s))
            .unwrap_or_default();
        println!(
            "[{}] {}{} (Fleet No: {}) | Livery: {} | Capacity: {} | Fuel: {:.1}L | Health: {} | {}",
            bus.id(),
            bus.model(),
            tag,
            bus.fleet_number().unwrap_or("N/A"),
            bus.livery(),
            bus.capacity(),
            bus.fuel_level(),
            bus.health(),
            assignment
        );
    }

    println!("\nOptions: [E] Edit Fleet Number, [L] Change Livery, [Q] Return");
    match prompt("> ").as_deref() {
        Some("e") | Some("E") => edit_fleet_number(company),
        Some("l") | Some("L") => change_livery(company),
        _ => {}
    }
}

fn view_status(company: &CompanyState) {
    println!("\n--- {} Status ---", company.company_name);
    println!("Day: {}", company.day);
    println!("Money: £{:.2}", company.money);
    println!("Reputation: {:.1}/100", company.reputation);
    println!("Fleet size: {} buses", company.fleet.len());
    println!("Routes managed: {}", company.routes.len());
    let mode = match company.mode {
        AssignmentMode::StaticRoutes => "Static Routes",
        AssignmentMode::RunningBoards => "Running Boards (Dynamic)",
    };
    println!("Assignment mode: {}", mode);
    if company.mode == AssignmentMode::RunningBoards {
        let count = persist::list_boards(Path::new(BOARDS_DIR))
            .map(|b| b.len())
            .unwrap_or(0);
        println!("Running boards available: {}", count);
    }
}

fn view_fuel_price(company: &CompanyState) {
    println!("\n--- Current Fuel Price ---");
    println!("Price per litre: £{:.2}", company.fuel_price);
    let status = if company.fuel_price <= 1.40 {
        "LOW (good day to run long routes)"
    } else if company.fuel_price <= 1.70 {
        "MEDIUM (average)"
    } else {
        "HIGH (expensive day)"
    };
    println!("Status: {}", status);
    println!(
        "Band: £{:.2} - £{:.2}, moves up to £{:.2} per day",
        market::MIN_PRICE,
        market::MAX_PRICE,
        market::MAX_DAILY_DRIFT
    );
}

// ============================================================================
// Fleet editing
// ============================================================================

fn edit_fleet_number(company: &mut CompanyState) {
    let Some(id) = prompt_number("Enter bus ID to edit fleet number (or 0 to cancel): ") else {
        return;
    };
    if id == 0 {
        return;
    }
    let Some(number) = prompt("Enter new fleet number: ") else { return };
    if number.is_empty() {
        println!("Edit cancelled.");
        return;
    }
    match company.set_fleet_number(id as u32, &number) {
        Ok(()) => println!("Fleet number updated to '{}' for bus {}.", number, id),
        Err(err) => println!("{}", err),
    }
}

fn change_livery(company: &mut CompanyState) {
    let Some(id) = prompt_number("Enter bus ID to repaint (or 0 to cancel): ") else {
        return;
    };
    if id == 0 {
        return;
    }
    let Some(bus) = company.bus(id as u32) else {
        println!("Bus ID not found.");
        return;
    };
    println!("Current livery: {}", bus.livery());
    for (i, livery) in Livery::PALETTE.iter().enumerate() {
        println!("[{}] {}", i + 1, livery);
    }
    let Some(idx) = prompt_index("Enter livery number: ", Livery::PALETTE.len()) else {
        return;
    };
    println!("Repainting costs £500.00.");
    if !confirm("Proceed? (y/n): ") {
        return;
    }
    match company.repaint_bus(id as u32, Livery::PALETTE[idx]) {
        Ok(()) => println!("Livery changed to {}.", Livery::PALETTE[idx]),
        Err(err) => println!("{}", err),
    }
}

// ============================================================================
// Assignment and schedules
// ============================================================================

fn assign_menu(company: &mut CompanyState) {
    if company.mode == AssignmentMode::RunningBoards {
        println!("\nYou are in Running Board mode. Use Running Board Management (option 13).");
        return;
    }
    if company.fleet.is_empty() {
        println!("\nNo buses available. Buy some first.");
        return;
    }
    if company.routes.is_empty() {
        println!("\nNo routes available. Add some first.");
        return;
    }

    println!("\nSelect Bus to assign:");
    for bus in &company.fleet {
        println!(
            "[{}] {} (Fleet No: {}, Capacity: {})",
            bus.id(),
            bus.model(),
            bus.fleet_number().unwrap_or("N/A"),
            bus.capacity()
        );
    }
    let Some(bus_id) = prompt_number("> ") else { return };

    println!("\nSelect Route:");
    for (i, route) in company.routes.iter().enumerate() {
        println!("[{}] {}", i + 1, route.name);
    }
    let Some(idx) = prompt_index("> ", company.routes.len()) else {
        return;
    };
    let route_name = company.routes[idx].name.clone();

    match assign_bus_to_route(company, bus_id as u32, &route_name) {
        Ok(()) => println!("Assigned bus {} to {}.", bus_id, route_name),
        Err(err) => println!("{}", err),
    }
}

fn schedule_menu(company: &mut CompanyState) {
    if company.routes.is_empty() {
        println!("\nNo routes available to edit.");
        return;
    }
    println!("\nSelect Route to edit schedule:");
    for (i, route) in company.routes.iter().enumerate() {
        println!(
            "[{}] {} | Current Schedule: {} mins",
            i + 1,
            route.name,
            route.current_schedule_minutes()
        );
    }
    let Some(idx) = prompt_index("> ", company.routes.len()) else {
        return;
    };
    let route_name = company.routes[idx].name.clone();
    let base = company.routes[idx].base_schedule_minutes();

    println!(
        "Enter new schedule time in minutes for {} (base is {}):",
        route_name, base
    );
    let Some(minutes) = prompt_number("> ") else { return };
    if minutes < 0 {
        println!("Time cannot be negative.");
        return;
    }
    match company.set_schedule(&route_name, minutes as u32) {
        Ok(()) => println!("Schedule updated: {} now runs in {} minutes.", route_name, minutes),
        Err(err) => println!("{}", err),
    }
}

// ============================================================================
// Day simulation
// ============================================================================

fn run_day(company: &mut CompanyState, simulator: &DaySimulator, rng: &mut GameRng) {
    // Upfront precondition: don't start a day with nothing to run
    let boards = match company.mode {
        AssignmentMode::StaticRoutes => {
            if company.routes.is_empty() {
                println!("\nNo routes available to run.");
                return;
            }
            if company.fleet.is_empty() {
                println!("\nNo buses available to run routes.");
                return;
            }
            Vec::new()
        }
        AssignmentMode::RunningBoards => {
            let boards = persist::load_active_boards(Path::new(BOARDS_DIR)).unwrap_or_default();
            if boards.is_empty() {
                println!("\nNo running boards with assigned buses available.");
                println!("Use Running Board Management (option 13) to create and assign them.");
                return;
            }
            boards
        }
    };

    println!("\n--- Running Day Simulation: Day {} ---", company.day);
    let report = simulator.simulate_day(company, &boards, rng);
    render_report(&report, company);
}

fn render_report(report: &DayReport, company: &CompanyState) {
    for outcome in &report.routes {
        match &outcome.service {
            ServiceOutcome::NoBusAssigned => {
                println!(
                    "Route '{}' has no bus assigned! No service today.",
                    outcome.route_name
                );
            }
            ServiceOutcome::Operated {
                passengers,
                earnings,
                fuel_used,
                fuel_cost,
                incident,
                delayed,
                ..
            } => {
                println!("\nRoute: {}", outcome.route_name);
                println!("Passengers carried: {}", passengers);
                println!("Fare income: £{:.2}", earnings);
                println!("Fuel used: {:.2}L costing £{:.2}", fuel_used, fuel_cost);
                if let Some(label) = incident {
                    println!("** Event: {}! Delays the route and costs money to fix. **", label);
                }
                if *delayed {
                    println!("Tight schedule caused delays and made passengers unhappy!");
                }
            }
        }
    }

    for outcome in &report.boards {
        match &outcome.service {
            BoardService::UnknownBus { bus_id } => {
                println!(
                    "Running board '{}' has invalid bus assignment ({})! Skipping.",
                    outcome.board_name, bus_id
                );
            }
            BoardService::Operated {
                earnings,
                fuel_cost,
                trips,
                ..
            } => {
                println!("\n--- Running Board: {} ---", outcome.board_name);
                for trip in trips {
                    match trip {
                        TripOutcome::RouteMissing { route_name, departure } => {
                            println!("  {} - {}: Route not found! Skipping.", departure, route_name);
                        }
                        TripOutcome::Cancelled { route_name, departure, .. } => {
                            println!("  {} - {}: Insufficient fuel! Trip cancelled.", departure, route_name);
                        }
                        TripOutcome::Completed {
                            route_name,
                            destination,
                            departure,
                            passengers,
                            earnings,
                            ..
                        } => {
                            println!(
                                "  {} - {} to {}: {} pax, £{:.2}",
                                departure, route_name, destination, passengers, earnings
                            );
                        }
                    }
                }
                let (done, total) = outcome.trips_completed();
                println!(
                    "  Board summary: {}/{} trips, £{:.2} income, £{:.2} fuel",
                    done, total, earnings, fuel_cost
                );
            }
        }
    }

    println!("\n--- Day {} Summary ---", report.day);
    println!("Total fare income: £{:.2}", report.total_earnings);
    println!("Total fuel cost: £{:.2}", report.total_fuel_cost);
    if report.total_repair_costs > 0.0 {
        println!("Incident repairs: £{:.2}", report.total_repair_costs);
    }
    println!("Net profit: £{:.2}", report.net_profit());
    println!("Reputation change: {:+.1}", report.reputation_delta);
    println!("New reputation: {:.1}/100", company.reputation);
    println!("Fuel price for Day {}: £{:.2}/L", company.day, company.fuel_price);
    println!("Money available: £{:.2}", company.money);
}

// ============================================================================
// Shop and routes
// ============================================================================

fn shop_menu(company: &mut CompanyState) {
    let mut shop = base_shop();
    match load_catalog_dir(Path::new(CATALOG_DIR)) {
        Ok(summary) => {
            for (file, reason) in &summary.skipped_files {
                println!("Warning: catalog file {} skipped ({}).", file, reason);
            }
            if summary.skipped_entries > 0 {
                println!(
                    "Warning: {} catalog entr{} missing required fields, skipped.",
                    summary.skipped_entries,
                    if summary.skipped_entries == 1 { "y" } else { "ies" }
                );
            }
            shop.extend(summary.vehicles);
        }
        Err(err) => println!("Warning: could not read catalogs: {}", err),
    }

    println!("\n--- Bus Shop ---");
    for (i, spec) in shop.iter().enumerate() {
        let tag = spec
            .source
            .as_deref()
            .map(|s| format!(" [{}]", s))
            .unwrap_or_else(|| " [Base Game]".to_string());
        println!(
            "[{}] {}{} | Capacity: {} | Price: £{:.0}",
            i + 1,
            spec.model,
            tag,
            spec.capacity,
            spec.price
        );
    }
    println!("Current money: £{:.2}", company.money);
    println!("Select bus to buy or 0 to cancel:");

    let Some(choice) = prompt_number("> ") else { return };
    if choice == 0 {
        println!("Cancelled purchase.");
        return;
    }
    if choice < 1 || choice as usize > shop.len() {
        println!("Invalid choice.");
        return;
    }
    let spec: &VehicleSpec = &shop[choice as usize - 1];

    let Some(entered) = prompt("Enter fleet number (or leave blank for auto-assignment): ") else {
        return;
    };
    let fleet_number = if entered.is_empty() { None } else { Some(entered.as_str()) };

    match company.buy_bus(spec, fleet_number) {
        Ok(id) => {
            if let Some(bus) = company.bus(id) {
                println!(
                    "Congratulations! You bought a new {} with fleet number {} for £{:.0}.",
                    bus.model(),
                    bus.fleet_number().unwrap_or("N/A"),
                    spec.price
                );
            }
        }
        Err(err) => println!("{}", err),
    }
}

fn add_route_menu(company: &mut CompanyState) {
    println!("\n--- Add New Route ---");
    let Some(name) = prompt("Enter route name: ") else { return };
    if name.is_empty() {
        println!("Route name cannot be empty.");
        return;
    }

    println!("Enter stops for the route. Type 'done' when finished.");
    let mut stops = Vec::new();
    loop {
        let Some(stop_name) = prompt("Stop name (or 'done'): ") else { return };
        if stop_name.eq_ignore_ascii_case("done") {
            break;
        }
        if stop_name.is_empty() {
            println!("Stop name cannot be empty.");
            continue;
        }
        let minutes = if stops.is_empty() {
            0
        } else {
            match prompt_number(&format!(
                "Travel time from previous stop to {} in minutes: ",
                stop_name
            )) {
                Some(m) if m >= 0 => m,
                Some(_) => {
                    println!("Time cannot be negative.");
                    continue;
                }
                None => continue,
            }
        };
        stops.push(Stop::new(stop_name, minutes as f64));
    }

    let cost = 500.0 * stops.len() as f64;
    println!("Creating this route will cost £{:.0}. Confirm? (y/n)", cost);
    if !confirm("> ") {
        println!("Route creation cancelled.");
        return;
    }

    match company.add_route(&name, stops) {
        Ok(()) => println!("Route '{}' created.", name),
        Err(err) => println!("{}", err),
    }
}

fn delete_route_menu(company: &mut CompanyState) {
    if company.routes.is_empty() {
        println!("\nNo routes to delete.");
        return;
    }
    println!("\nSelect route to delete:");
    for (i, route) in company.routes.iter().enumerate() {
        let tag = if route.assigned_bus().is_some() {
            " (Assigned to bus)"
        } else {
            ""
        };
        println!("[{}] {}{}", i + 1, route.name, tag);
    }
    let Some(idx) = prompt_index("> ", company.routes.len()) else {
        return;
    };
    let name = company.routes[idx].name.clone();

    if !confirm(&format!("Are you sure you want to delete route '{}'? (y/n): ", name)) {
        println!("Deletion cancelled.");
        return;
    }
    match company.delete_route(&name) {
        Ok(()) => println!("Route '{}' deleted.", name),
        Err(err) => println!("{}", err),
    }
}

// ============================================================================
// Save / load
// ============================================================================

fn save_menu(company: &CompanyState) {
    let Some(mut filename) = prompt("Enter filename to save to (e.g. my_company.json): ") else {
        return;
    };
    if filename.is_empty() {
        println!("Invalid filename. Save cancelled.");
        return;
    }
    if !filename.ends_with(".json") {
        filename.push_str(".json");
    }
    let path = PathBuf::from(SAVES_DIR).join(filename);
    match persist::save_company(company, &path) {
        Ok(()) => println!("Game saved successfully to '{}'.", path.display()),
        Err(err) => println!("Error saving game: {}", err),
    }
}

fn load_menu() -> Option<CompanyState> {
    let dir = Path::new(SAVES_DIR);
    let summaries = match persist::list_saves(dir) {
        Ok(s) => s,
        Err(err) => {
            println!("Error reading saves: {}", err);
            return None;
        }
    };
    if summaries.is_empty() {
        println!("No saved games found.");
        return None;
    }

    println!("\n--- Available Saved Games ---");
    for (i, save) in summaries.iter().enumerate() {
        println!(
            "[{}] {} - {} (Day {}, £{:.2})",
            i + 1,
            save.file_name,
            save.company_name,
            save.day,
            save.money
        );
    }
    println!("\nEnter save number to load (or 0 to cancel):");
    let choice = prompt_number("> ")?;
    if choice == 0 {
        println!("Load cancelled.");
        return None;
    }
    if choice < 1 || choice as usize > summaries.len() {
        println!("Invalid selection.");
        return None;
    }

    let path = dir.join(&summaries[choice as usize - 1].file_name);
    match persist::load_company(&path) {
        Ok(company) => {
            println!("Game loaded successfully from '{}'.", path.display());
            Some(company)
        }
        Err(err) => {
            println!("Error loading game: {}", err);
            None
        }
    }
}

// ============================================================================
// Running boards
// ============================================================================

fn boards_menu(company: &mut CompanyState) {
    loop {
        println!("\n--- Running Board Management ---");
        println!("1) Create New Running Board");
        println!("2) View Running Boards");
        println!("3) Assign Bus to Running Board");
        println!("4) View Running Board Details");
        println!("5) Delete Running Board");
        println!("6) Return to Main Menu");

        match prompt("> ").as_deref() {
            Some("1") => create_board(company),
            Some("2") => list_boards_view(company),
            Some("3") => assign_board_menu(company),
            Some("4") => board_details(company),
            Some("5") => delete_board_menu(),
            Some("6") | None => break,
            _ => println!("Invalid option, try again."),
        }
    }
}

fn create_board(company: &CompanyState) {
    let Some(name) = prompt("Enter running board name: ") else { return };
    if name.is_empty() {
        println!("Running board name cannot be empty.");
        return;
    }
    let dir = Path::new(BOARDS_DIR);
    if persist::board_exists(dir, &name)
        && !confirm(&format!("Running board '{}' already exists. Overwrite? (y/n): ", name))
    {
        println!("Creation cancelled.");
        return;
    }

    if !company.routes.is_empty() {
        println!("Available routes:");
        for route in &company.routes {
            println!("  - {}", route.name);
        }
    }

    let mut trips = Vec::new();
    loop {
        println!("Trip {} (or 'done' to finish):", trips.len() + 1);
        let Some(route_name) = prompt("  Route name: ") else { return };
        if route_name.eq_ignore_ascii_case("done") {
            break;
        }
        if route_name.is_empty() {
            println!("  Route name cannot be empty.");
            continue;
        }
        if company.route(&route_name).is_none() {
            println!("  Warning: Route '{}' not found in your routes.", route_name);
            if !confirm("  Add anyway? (y/n): ") {
                continue;
            }
        }
        let Some(destination) = prompt("  Destination: ") else { return };
        if destination.is_empty() {
            println!("  Destination cannot be empty.");
            continue;
        }
        let Some(time_raw) = prompt("  Time (HH:MM): ") else { return };
        let departure: DepartureTime = match time_raw.parse() {
            Ok(t) => t,
            Err(err) => {
                println!("  {}", err);
                continue;
            }
        };
        println!("  Added: {} to {} at {}", route_name, destination, departure);
        trips.push(Trip::new(route_name, destination, departure));
    }

    if trips.is_empty() {
        println!("No trips added. Running board not created.");
        return;
    }

    let board = RunningBoard::new(name, trips);
    match persist::save_board(dir, &board) {
        Ok(()) => println!("Running board '{}' saved successfully.", board.name),
        Err(err) => println!("Error saving running board: {}", err),
    }
}

fn list_boards_view(company: &CompanyState) {
    let dir = Path::new(BOARDS_DIR);
    let names = persist::list_boards(dir).unwrap_or_default();
    if names.is_empty() {
        println!("\nNo running boards created yet.");
        return;
    }
    println!("\n--- Running Boards ---");
    for (i, name) in names.iter().enumerate() {
        let Ok(board) = persist::load_board(dir, name) else {
            continue;
        };
        let bus_info = board
            .assigned_bus_id
            .map(|id| match company.bus(id) {
                Some(bus) => format!("Bus {} ({})", id, bus.model()),
                None => format!("Bus {} (not found)", id),
            })
            .unwrap_or_else(|| "Not assigned".to_string());
        println!("[{}] {} - {} trips - {}", i + 1, board.name, board.trips.len(), bus_info);
    }
}

fn assign_board_menu(company: &mut CompanyState) {
    if company.fleet.is_empty() {
        println!("\nNo buses available. Buy some first.");
        return;
    }
    let Some(name) = prompt("\nEnter running board name: ") else { return };
    let dir = Path::new(BOARDS_DIR);
    let mut board = match persist::load_board(dir, &name) {
        Ok(board) => board,
        Err(err) => {
            println!("{}", err);
            return;
        }
    };

    println!("\nAvailable buses:");
    let all_boards = persist::load_active_boards(dir).unwrap_or_default();
    for bus in &company.fleet {
        let elsewhere: Vec<_> = boards_of(&all_boards, bus.id())
            .iter()
            .filter(|b| b.name != board.name)
            .map(|b| b.name.clone())
            .collect();
        let note = if elsewhere.is_empty() {
            String::new()
        } else {
            format!(" (Assigned to: {})", elsewhere.join(", "))
        };
        println!(
            "[{}] {} (Fleet No: {}){}",
            bus.id(),
            bus.model(),
            bus.fleet_number().unwrap_or("N/A"),
            note
        );
    }

    let Some(bus_id) = prompt_number("\nSelect bus ID (or 0 to unassign): ") else {
        return;
    };
    if bus_id == 0 {
        unassign_board(&mut board);
        match persist::save_board(dir, &board) {
            Ok(()) => println!("Bus unassigned from running board '{}'.", board.name),
            Err(err) => println!("Error saving running board: {}", err),
        }
        return;
    }

    match assign_bus_to_board(&mut board, &company.fleet, bus_id as u32) {
        Ok(()) => match persist::save_board(dir, &board) {
            Ok(()) => println!("Assigned bus {} to running board '{}'.", bus_id, board.name),
            Err(err) => println!("Error saving running board: {}", err),
        },
        Err(err) => println!("{}", err),
    }
}

fn board_details(company: &CompanyState) {
    let Some(name) = prompt("\nEnter running board name to view: ") else { return };
    let board = match persist::load_board(Path::new(BOARDS_DIR), &name) {
        Ok(board) => board,
        Err(err) => {
            println!("{}", err);
            return;
        }
    };

    println!("\n--- Running Board: {} ---", board.name);
    println!("Total trips: {}", board.trips.len());
    match board.assigned_bus_id {
        Some(id) => match company.bus(id) {
            Some(bus) => println!("Assigned to: Bus {} ({})", id, bus.model()),
            None => println!("Assigned to: Bus {} (not found)", id),
        },
        None => println!("Assigned to: None"),
    }

    println!("\nTrips:");
    for (i, trip) in board.trips.iter().enumerate() {
        let mark = if company.route(&trip.route_name).is_some() {
            "ok"
        } else {
            "route not found"
        };
        println!(
            "  {}. {} - {} to {} [{}]",
            i + 1,
            trip.departure,
            trip.route_name,
            trip.destination,
            mark
        );
    }

    println!(
        "\nEstimated total workload: {:.1} mins",
        board.total_workload(&company.routes)
    );
    let missing = board.missing_routes(&company.routes);
    if !missing.is_empty() {
        println!("Warning: missing routes: {}", missing.join(", "));
    }
}

fn delete_board_menu() {
    let Some(name) = prompt("\nEnter running board name to delete: ") else { return };
    let dir = Path::new(BOARDS_DIR);
    match persist::load_board(dir, &name) {
        Ok(board) => {
            if let Some(id) = board.assigned_bus_id {
                println!("Warning: this running board is assigned to Bus {}.", id);
            }
        }
        Err(err) => {
            println!("{}", err);
            return;
        }
    }
    if !confirm(&format!("Are you sure you want to delete '{}'? (y/n): ", name)) {
        println!("Deletion cancelled.");
        return;
    }
    match persist::delete_board(dir, &name) {
        Ok(()) => println!("Running board '{}' deleted.", name),
        Err(err) => println!("Error deleting running board: {}", err),
    }
}

fn toggle_mode(company: &mut CompanyState) {
    let (current, next) = match company.mode {
        AssignmentMode::StaticRoutes => ("Static Routes", "Running Boards"),
        AssignmentMode::RunningBoards => ("Running Boards", "Static Routes"),
    };
    println!("\n--- Toggle Assignment Mode ---");
    println!("Current mode: {}", current);
    println!("Switch to: {}", next);
    if confirm(&format!("\nSwitch to {} mode? (y/n): ", next)) {
        company.mode = match company.mode {
            AssignmentMode::StaticRoutes => AssignmentMode::RunningBoards,
            AssignmentMode::RunningBoards => AssignmentMode::StaticRoutes,
        };
        println!("Switched to {} mode.", next);
    } else {
        println!("Mode change cancelled.");
    }
}
