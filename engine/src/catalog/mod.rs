//! Vehicle shop and external catalogs
//!
//! The base-game shop is compiled in. Extra vehicles arrive as JSON
//! catalog files dropped into a directory, each carrying a pack name and
//! a list of vehicle entries.
//!
//! Loading is tolerant, entry by entry: a file that is not
//! valid JSON or lacks the top-level fields is skipped whole; an entry
//! missing a required field (model, capacity, fuel_capacity,
//! fuel_efficiency, price) is skipped alone and the rest of the file
//! still loads. Everything skipped is reported in the summary, so a
//! partial catalog never loads silently.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that abort a catalog load outright
///
/// Only the directory scan itself can fail hard; individual files and
/// entries degrade into the summary's skip lists.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog directory: {0}")]
    Io(#[from] std::io::Error),
}

/// A purchasable vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub model: String,
    pub capacity: u32,
    pub fuel_capacity: f64,
    /// Litres per kilometre at the 50 km/h reference speed
    pub fuel_efficiency: f64,
    pub price: f64,
    /// Catalog pack this vehicle came from; `None` for base-game stock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result of scanning a catalog directory
#[derive(Debug, Clone, Default)]
pub struct CatalogSummary {
    /// Vehicles that loaded, in file order
    pub vehicles: Vec<VehicleSpec>,
    /// Files skipped whole, with the reason
    pub skipped_files: Vec<(String, String)>,
    /// Entries dropped from otherwise-loaded files
    pub skipped_entries: usize,
}

/// Top-level shape of a catalog file
#[derive(Debug, Deserialize)]
struct RawCatalog {
    pack_name: Option<String>,
    vehicles: Option<Vec<Value>>,
}

/// One catalog entry before validation
#[derive(Debug, Deserialize)]
struct RawVehicle {
    model: Option<String>,
    capacity: Option<u32>,
    fuel_capacity: Option<f64>,
    fuel_efficiency: Option<f64>,
    price: Option<f64>,
}

impl RawVehicle {
    fn validate(self, source: &str) -> Option<VehicleSpec> {
        let spec = VehicleSpec {
            model: self.model?,
            capacity: self.capacity?,
            fuel_capacity: self.fuel_capacity?,
            fuel_efficiency: self.fuel_efficiency?,
            price: self.price?,
            source: Some(source.to_string()),
        };
        let sane = spec.capacity > 0
            && spec.fuel_capacity > 0.0
            && spec.fuel_efficiency > 0.0
            && spec.price >= 0.0;
        sane.then_some(spec)
    }
}

/// Load every catalog file from a directory.
///
/// A missing directory is not an error: no extra packs are
/// installed. Files are visited in name order so the resulting shop
/// listing is stable.
pub fn load_dir(dir: &Path) -> Result<CatalogSummary, CatalogError> {
    let mut summary = CatalogSummary::default();

    if !dir.is_dir() {
        return Ok(summary);
    }

    let mut files: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                summary.skipped_files.push((file_name, format!("unreadable: {}", err)));
                continue;
            }
        };

        let raw: RawCatalog = match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(_) => {
                summary
                    .skipped_files
                    .push((file_name, "not valid JSON".to_string()));
                continue;
            }
        };

        let (Some(pack_name), Some(vehicles)) = (raw.pack_name, raw.vehicles) else {
            summary.skipped_files.push((
                file_name,
                "missing required fields (pack_name, vehicles)".to_string(),
            ));
            continue;
        };

        for value in vehicles {
            let spec = serde_json::from_value::<RawVehicle>(value)
                .ok()
                .and_then(|raw| raw.validate(&pack_name));
            match spec {
                Some(spec) => summary.vehicles.push(spec),
                None => summary.skipped_entries += 1,
            }
        }
    }

    Ok(summary)
}

/// The base-game vehicle shop.
pub fn base_shop() -> Vec<VehicleSpec> {
    fn stock(model: &str, capacity: u32, fuel_capacity: f64, fuel_efficiency: f64, price: f64) -> VehicleSpec {
        VehicleSpec {
            model: model.to_string(),
            capacity,
            fuel_capacity,
            fuel_efficiency,
            price,
            source: None,
        }
    }

    vec![
        stock("ADL Enviro200", 40, 160.0, 0.26, 90_000.0),
        stock("ADL Enviro200 MMC", 40, 160.0, 0.25, 95_000.0),
        stock("ADL Enviro400", 80, 240.0, 0.38, 135_000.0),
        stock("ADL Enviro400 MMC", 80, 240.0, 0.38, 140_000.0),
        stock("ADL Enviro400 City", 80, 240.0, 0.37, 145_000.0),
        stock("Wright Streetlite DF", 40, 150.0, 0.25, 72_000.0),
        stock("Wright Streetlite WF", 40, 150.0, 0.24, 73_000.0),
        stock("Wright Streetdeck Ultroliner", 75, 220.0, 0.35, 130_000.0),
        stock("Wright Eclipse Urban", 40, 150.0, 0.26, 70_000.0),
        stock("Wright Eclipse Urban 2", 40, 150.0, 0.25, 72_000.0),
        stock("Wright Eclipse Gemini", 80, 230.0, 0.37, 130_000.0),
        stock("Wright Eclipse Gemini 2", 80, 230.0, 0.36, 132_000.0),
        stock("Wright Eclipse Gemini 3", 80, 230.0, 0.35, 135_000.0),
        stock("Scania N94UD Omnidekka", 80, 240.0, 0.40, 138_000.0),
        stock("Scania N270UD Omnicity", 80, 230.0, 0.38, 140_000.0),
        stock("Scania N230UD Enviro400", 80, 240.0, 0.37, 137_000.0),
        stock("Scania N250UD Enviro400 MMC", 80, 240.0, 0.36, 142_000.0),
        stock("Scania L94UB Wright Solar", 40, 150.0, 0.26, 72_000.0),
        stock("Optare Solo", 30, 120.0, 0.22, 60_000.0),
        stock("Optare Solo SR", 30, 120.0, 0.22, 62_000.0),
        stock("Dennis Trident Optare Olympus", 75, 230.0, 0.38, 125_000.0),
        stock("Volvo B7TL Plaxton President", 80, 230.0, 0.39, 130_000.0),
        stock("Dennis Dart MPD", 35, 140.0, 0.24, 65_000.0),
    ]
}
