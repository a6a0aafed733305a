//! Bus model
//!
//! A bus is identified by a monotonically assigned numeric id (starting at
//! 1). It never stores which route or board it serves; membership is
//! discovered by scanning routes and boards for a matching id, so there is
//! no back-reference to fall out of sync.
//!
//! All fuel quantities are litres; efficiency is litres per kilometre at
//! the 50 km/h reference speed.

use crate::catalog::VehicleSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric bus identifier, unique across the fleet
pub type BusId = u32;

/// Paint scheme of a bus.
///
/// `Standard` is the factory finish every bus is delivered in; the rest is
/// the palette a player can repaint to (for a flat fee).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Livery {
    #[default]
    Standard,
    RedAndWhite,
    BlueAndYellow,
    GreenAndCream,
    SilverAndBlack,
    OrangeAndWhite,
    PurpleAndGold,
    AllOverWhite,
    AllOverRed,
    AllOverBlue,
    AllOverGreen,
    CorporateFleet,
    HeritageClassic,
    ModernMetro,
    ExpressService,
    NightService,
    AirportSpecial,
    CityCentre,
    SuburbanRoute,
    PremiumService,
    EcoFriendlyGreen,
}

impl Livery {
    /// Every repaint option, in shop order.
    pub const PALETTE: [Livery; 20] = [
        Livery::RedAndWhite,
        Livery::BlueAndYellow,
        Livery::GreenAndCream,
        Livery::SilverAndBlack,
        Livery::OrangeAndWhite,
        Livery::PurpleAndGold,
        Livery::AllOverWhite,
        Livery::AllOverRed,
        Livery::AllOverBlue,
        Livery::AllOverGreen,
        Livery::CorporateFleet,
        Livery::HeritageClassic,
        Livery::ModernMetro,
        Livery::ExpressService,
        Livery::NightService,
        Livery::AirportSpecial,
        Livery::CityCentre,
        Livery::SuburbanRoute,
        Livery::PremiumService,
        Livery::EcoFriendlyGreen,
    ];
}

impl fmt::Display for Livery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Livery::Standard => "Standard",
            Livery::RedAndWhite => "Red & White",
            Livery::BlueAndYellow => "Blue & Yellow",
            Livery::GreenAndCream => "Green & Cream",
            Livery::SilverAndBlack => "Silver & Black",
            Livery::OrangeAndWhite => "Orange & White",
            Livery::PurpleAndGold => "Purple & Gold",
            Livery::AllOverWhite => "All-over White",
            Livery::AllOverRed => "All-over Red",
            Livery::AllOverBlue => "All-over Blue",
            Livery::AllOverGreen => "All-over Green",
            Livery::CorporateFleet => "Corporate Fleet",
            Livery::HeritageClassic => "Heritage Classic",
            Livery::ModernMetro => "Modern Metro",
            Livery::ExpressService => "Express Service",
            Livery::NightService => "Night Service",
            Livery::AirportSpecial => "Airport Special",
            Livery::CityCentre => "City Centre",
            Livery::SuburbanRoute => "Suburban Route",
            Livery::PremiumService => "Premium Service",
            Livery::EcoFriendlyGreen => "Eco-Friendly Green",
        };
        f.write_str(label)
    }
}

/// A bus in the company fleet
///
/// # Example
/// ```
/// use bus_manager_core::Bus;
///
/// let mut bus = Bus::new(1, "Optare Solo SR", 30, 120.0, 0.22);
/// assert_eq!(bus.fuel_level(), 120.0); // delivered with a full tank
///
/// let burned = bus.consume(20.0);
/// assert_eq!(burned, 20.0);
/// assert_eq!(bus.fuel_level(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    id: BusId,
    model: String,
    capacity: u32,
    fuel_capacity: f64,
    fuel_level: f64,
    /// Litres per kilometre at the 50 km/h reference speed
    fuel_efficiency: f64,
    /// Mechanical condition, 0-100. Reserved: no simulation path moves it.
    health: u8,
    purchase_price: f64,
    fleet_number: Option<String>,
    livery: Livery,
    /// External catalog the bus was purchased from, if not a base vehicle
    catalog_source: Option<String>,
}

impl Bus {
    /// Create a bus with a full tank, standard livery, and full health.
    ///
    /// # Panics
    /// Panics if capacity is zero (the shop and catalog loaders reject
    /// such specs before they reach here).
    pub fn new(
        id: BusId,
        model: impl Into<String>,
        capacity: u32,
        fuel_capacity: f64,
        fuel_efficiency: f64,
    ) -> Self {
        assert!(capacity > 0, "bus capacity must be positive");
        Self {
            id,
            model: model.into(),
            capacity,
            fuel_capacity,
            fuel_level: fuel_capacity,
            fuel_efficiency,
            health: 100,
            purchase_price: 0.0,
            fleet_number: None,
            livery: Livery::default(),
            catalog_source: None,
        }
    }

    /// Create a bus from a shop/catalog spec.
    pub fn from_spec(id: BusId, spec: &VehicleSpec, fleet_number: Option<String>) -> Self {
        let mut bus = Bus::new(id, spec.model.clone(), spec.capacity, spec.fuel_capacity, spec.fuel_efficiency);
        bus.purchase_price = spec.price;
        bus.fleet_number = fleet_number;
        bus.catalog_source = spec.source.clone();
        bus
    }

    pub fn id(&self) -> BusId {
        self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn fuel_capacity(&self) -> f64 {
        self.fuel_capacity
    }

    pub fn fuel_level(&self) -> f64 {
        self.fuel_level
    }

    pub fn fuel_efficiency(&self) -> f64 {
        self.fuel_efficiency
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn purchase_price(&self) -> f64 {
        self.purchase_price
    }

    pub fn fleet_number(&self) -> Option<&str> {
        self.fleet_number.as_deref()
    }

    pub fn livery(&self) -> Livery {
        self.livery
    }

    pub fn catalog_source(&self) -> Option<&str> {
        self.catalog_source.as_deref()
    }

    /// Burn `litres` of fuel, flooring the tank at zero.
    ///
    /// Returns the full burn even when the tank runs dry mid-trip: the
    /// trip is still driven and the fuel bill still comes due.
    pub fn consume(&mut self, litres: f64) -> f64 {
        self.fuel_level = (self.fuel_level - litres).max(0.0);
        litres
    }

    /// Whether the tank holds at least `litres`.
    pub fn has_fuel_for(&self, litres: f64) -> bool {
        self.fuel_level >= litres
    }

    pub(crate) fn set_fleet_number(&mut self, number: String) {
        self.fleet_number = Some(number);
    }

    pub(crate) fn set_livery(&mut self, livery: Livery) {
        self.livery = livery;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bus_full_tank() {
        let bus = Bus::new(1, "ADL Enviro200", 45, 180.0, 0.28);
        assert_eq!(bus.fuel_level(), 180.0);
        assert_eq!(bus.health(), 100);
        assert_eq!(bus.livery(), Livery::Standard);
        assert!(bus.fleet_number().is_none());
    }

    #[test]
    #[should_panic(expected = "bus capacity must be positive")]
    fn test_zero_capacity_panics() {
        Bus::new(1, "ghost bus", 0, 100.0, 0.3);
    }

    #[test]
    fn test_consume_floors_at_zero() {
        let mut bus = Bus::new(2, "Wright StreetLite", 40, 150.0, 0.25);
        let burned = bus.consume(200.0);
        assert_eq!(burned, 200.0, "the full burn is still billed");
        assert_eq!(bus.fuel_level(), 0.0, "tank never goes negative");

        // a dry tank stays dry
        bus.consume(10.0);
        assert_eq!(bus.fuel_level(), 0.0);
    }

    #[test]
    fn test_has_fuel_for_boundary() {
        let mut bus = Bus::new(3, "Optare Solo", 30, 120.0, 0.22);
        bus.consume(100.0);
        assert!(bus.has_fuel_for(20.0), "an exact match is enough");
        assert!(!bus.has_fuel_for(20.1));
    }

    #[test]
    fn test_palette_excludes_standard() {
        assert!(!Livery::PALETTE.contains(&Livery::Standard));
        assert_eq!(Livery::PALETTE.len(), 20);
    }
}
