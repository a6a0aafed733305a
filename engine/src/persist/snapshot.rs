//! Company snapshots
//!
//! A snapshot file holds the serialized [`CompanyState`] plus a SHA-256
//! checksum of its canonical JSON (all object keys sorted, recursively),
//! so bit-rot and hand-editing are caught on load rather than surfacing
//! later as inexplicable game state.
//!
//! # Critical Invariants
//!
//! - Save-then-load reproduces a state equal in every field
//! - A failed load yields no new state
//! - Loaded snapshots are validated: assigned buses resolve, fleet
//!   numbers and ids are unique, tanks fit their capacity, reputation and
//!   fuel price are inside their bands

use crate::market;
use crate::models::company::CompanyState;
use crate::persist::PersistError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// On-disk wrapper: checksum + payload
#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    checksum: String,
    company: CompanyState,
}

/// One line of the load menu: which company lives in which file
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSummary {
    pub file_name: String,
    pub company_name: String,
    pub day: u32,
    pub money: f64,
}

/// Compute the SHA-256 hex digest of a value's canonical JSON.
///
/// Canonical means every object's keys sorted, recursively, so the digest
/// does not depend on field order.
fn checksum<T: Serialize>(value: &T) -> Result<String, PersistError> {
    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let canonical = canonicalize(serde_json::to_value(value)?);
    let json = serde_json::to_string(&canonical)?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Write a company snapshot to `path`, creating parent directories.
pub fn save_company(state: &CompanyState, path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = SaveFile {
        checksum: checksum(state)?,
        company: state.clone(),
    };
    fs::write(path, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}

/// Read a company snapshot back.
///
/// Fails, yielding no state, on unreadable files, malformed JSON, a
/// checksum that does not match the payload, or a payload that breaks
/// referential integrity.
pub fn load_company(path: &Path) -> Result<CompanyState, PersistError> {
    let text = fs::read_to_string(path)?;
    let file: SaveFile = serde_json::from_str(&text)?;

    if checksum(&file.company)? != file.checksum {
        return Err(PersistError::ChecksumMismatch);
    }
    validate_company(&file.company)?;
    Ok(file.company)
}

/// Referential-integrity checks on a loaded snapshot.
pub fn validate_company(state: &CompanyState) -> Result<(), PersistError> {
    let invalid = |msg: String| Err(PersistError::Invalid(msg));

    let mut ids = HashSet::new();
    let mut fleet_numbers = HashSet::new();
    for bus in &state.fleet {
        if !ids.insert(bus.id()) {
            return invalid(format!("duplicate bus id {}", bus.id()));
        }
        if bus.id() >= state.next_bus_id {
            return invalid(format!(
                "bus id {} is not below the next-id counter {}",
                bus.id(),
                state.next_bus_id
            ));
        }
        if let Some(number) = bus.fleet_number() {
            if !fleet_numbers.insert(number.to_string()) {
                return invalid(format!("duplicate fleet number '{}'", number));
            }
        }
        if bus.fuel_level() < 0.0 || bus.fuel_level() > bus.fuel_capacity() {
            return invalid(format!(
                "bus {} fuel level {} outside tank capacity {}",
                bus.id(),
                bus.fuel_level(),
                bus.fuel_capacity()
            ));
        }
    }

    let mut route_names = HashSet::new();
    for route in &state.routes {
        if !route_names.insert(route.name.as_str()) {
            return invalid(format!("duplicate route name '{}'", route.name));
        }
        if let Some(bus_id) = route.assigned_bus() {
            if !ids.contains(&bus_id) {
                return invalid(format!(
                    "route '{}' is assigned to unknown bus {}",
                    route.name, bus_id
                ));
            }
        }
    }

    if !(0.0..=100.0).contains(&state.reputation) {
        return invalid(format!("reputation {} outside [0, 100]", state.reputation));
    }
    if !(market::MIN_PRICE..=market::MAX_PRICE).contains(&state.fuel_price) {
        return invalid(format!("fuel price {} outside the market band", state.fuel_price));
    }
    if state.day == 0 {
        return invalid("day counter must start at 1".to_string());
    }

    Ok(())
}

/// Summaries of every readable save in a directory, sorted by file name.
///
/// Unreadable or malformed files are skipped; a broken save must not
/// take the whole load menu down with it.
pub fn list_saves(dir: &Path) -> Result<Vec<SaveSummary>, PersistError> {
    let mut summaries = Vec::new();

    if !dir.is_dir() {
        return Ok(summaries);
    }

    let mut files: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    for path in files {
        let Ok(text) = fs::read_to_string(&path) else {
            continue;
        };
        let Ok(file) = serde_json::from_str::<SaveFile>(&text) else {
            continue;
        };
        summaries.push(SaveSummary {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            company_name: file.company.company_name,
            day: file.company.day,
            money: file.company.money,
        });
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VehicleSpec;
    use crate::models::route::Stop;

    fn sample_company() -> CompanyState {
        let mut company = CompanyState::new("Snapshot Test");
        let spec = VehicleSpec {
            model: "Optare Solo".to_string(),
            capacity: 30,
            fuel_capacity: 120.0,
            fuel_efficiency: 0.22,
            price: 60_000.0,
            source: Some("Island Pack".to_string()),
        };
        company.buy_bus(&spec, Some("12")).unwrap();
        company
            .add_route("Route 1", vec![Stop::new("a", 0.0), Stop::new("b", 25.0)])
            .unwrap();
        crate::assignment::assign_bus_to_route(&mut company, 1, "Route 1").unwrap();
        company
    }

    #[test]
    fn test_checksum_ignores_key_order() {
        #[derive(Serialize)]
        struct Ab {
            a: u32,
            b: u32,
        }
        #[derive(Serialize)]
        struct Ba {
            b: u32,
            a: u32,
        }

        let h1 = checksum(&Ab { a: 1, b: 2 }).unwrap();
        let h2 = checksum(&Ba { b: 2, a: 1 }).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company.json");
        let company = sample_company();

        save_company(&company, &path).unwrap();
        let restored = load_company(&path).unwrap();
        assert_eq!(restored, company);
    }

    #[test]
    fn test_tampered_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company.json");
        let company = sample_company();
        save_company(&company, &path).unwrap();

        let tampered = fs::read_to_string(&path)
            .unwrap()
            .replace("Snapshot Test", "Someone Else");
        fs::write(&path, tampered).unwrap();

        assert!(matches!(
            load_company(&path),
            Err(PersistError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_garbage_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company.json");
        fs::write(&path, "{]").unwrap();
        assert!(matches!(load_company(&path), Err(PersistError::Malformed(_))));
    }

    #[test]
    fn test_validate_catches_dangling_assignment() {
        let mut company = sample_company();
        company.fleet.clear();
        let err = validate_company(&company).unwrap_err();
        assert!(matches!(err, PersistError::Invalid(_)));
    }

    #[test]
    fn test_list_saves_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        save_company(&sample_company(), &dir.path().join("good.json")).unwrap();
        fs::write(dir.path().join("bad.json"), "not a save").unwrap();

        let summaries = list_saves(dir.path()).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].company_name, "Snapshot Test");
        assert_eq!(summaries[0].day, 1);
    }
}
