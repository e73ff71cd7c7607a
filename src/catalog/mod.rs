//! Reference catalogs
//!
//! Immutable tables consumed by the pricing engine:
//! - Material options (cost per square foot)
//! - Flat-price matrix for standard van sizes, keyed by size and coverage
//! - PPF kits, priced as fixed economics
//! - Standard install rates (informational, never read by the pricing math)
//! - Vehicle size tables used to resolve coverage areas from a vehicle tier
//!
//! Lookups that miss return `None` or a zero contribution. They never fail.

pub(crate) mod seeds;

use crate::core::{CatalogConfig, Coverage, CoverageTable, Error, PpfTotal, Result, VehicleData};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Size used when a vehicle tier isn't in the tier map
const FALLBACK_SIZE: &str = "medium";

/// A wrap material and its cost per square foot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialOption {
    pub id: String,
    pub name: String,
    /// Cost per square foot
    pub rate: f64,
}

/// A paint protection film kit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpfKit {
    pub id: String,
    pub name: String,
    pub sale_price: f64,
    pub material_cost: f64,
    pub yards: f64,
}

/// Standard installer pay for a common job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallRate {
    pub name: String,
    pub pay: f64,
    pub hours: f64,
}

/// Coverage areas and roof area for a vehicle size class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSize {
    #[serde(default)]
    pub roof: f64,
    pub areas: CoverageTable,
}

/// Loaded, validated reference data
#[derive(Debug, Clone)]
pub struct Catalog {
    materials: Vec<MaterialOption>,
    van_pricing: BTreeMap<String, CoverageTable>,
    ppf_kits: Vec<PpfKit>,
    install_rates: Vec<InstallRate>,
    vehicle_sizes: BTreeMap<String, VehicleSize>,
    tier_sizes: BTreeMap<String, String>,
}

impl Catalog {
    /// Catalog built from the built-in tables
    pub fn builtin() -> Self {
        Self {
            materials: seeds::default_materials(),
            van_pricing: seeds::default_van_pricing(),
            ppf_kits: seeds::default_ppf_kits(),
            install_rates: seeds::default_install_rates(),
            vehicle_sizes: seeds::default_vehicle_sizes(),
            tier_sizes: seeds::default_tier_sizes(),
        }
    }

    /// Build a catalog from configuration, rejecting malformed tables
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let catalog = Self {
            materials: config.materials.clone(),
            van_pricing: config.van_pricing.clone(),
            ppf_kits: config.ppf_kits.clone(),
            install_rates: config.install_rates.clone(),
            vehicle_sizes: config.vehicle_sizes.clone(),
            tier_sizes: config.tier_sizes.clone(),
        };
        catalog.validate()?;

        log::info!(
            "Catalog loaded: {} materials, {} van sizes, {} PPF kits, {} install rates",
            catalog.materials.len(),
            catalog.van_pricing.len(),
            catalog.ppf_kits.len(),
            catalog.install_rates.len()
        );

        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for material in &self.materials {
            if !seen.insert(material.id.as_str()) {
                return Err(Error::Catalog(format!("duplicate material id '{}'", material.id)));
            }
            if material.rate < 0.0 {
                return Err(Error::Catalog(format!("material '{}' has a negative rate", material.id)));
            }
        }

        seen.clear();
        for kit in &self.ppf_kits {
            if !seen.insert(kit.id.as_str()) {
                return Err(Error::Catalog(format!("duplicate PPF kit id '{}'", kit.id)));
            }
            if kit.sale_price < 0.0 || kit.material_cost < 0.0 || kit.yards < 0.0 {
                return Err(Error::Catalog(format!("PPF kit '{}' has a negative value", kit.id)));
            }
        }

        for (size, prices) in &self.van_pricing {
            if prices.full < 0.0 || prices.three_quarter < 0.0 || prices.half < 0.0 {
                return Err(Error::Catalog(format!("van price for '{}' is negative", size)));
            }
        }

        for (tier, size) in &self.tier_sizes {
            if !self.vehicle_sizes.contains_key(size) {
                return Err(Error::Catalog(format!(
                    "tier '{}' maps to unknown size '{}'",
                    tier, size
                )));
            }
        }

        Ok(())
    }

    pub fn materials(&self) -> &[MaterialOption] {
        &self.materials
    }

    pub fn material(&self, id: &str) -> Option<&MaterialOption> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Rate for a material id, 0 when the id is unknown
    pub fn material_rate(&self, id: &str) -> f64 {
        match self.material(id) {
            Some(m) => m.rate,
            None => {
                log::debug!("Unknown material '{}', rate 0", id);
                0.0
            }
        }
    }

    pub fn van_pricing(&self) -> &BTreeMap<String, CoverageTable> {
        &self.van_pricing
    }

    /// Flat price for a van size and coverage
    ///
    /// A zero entry counts as no entry.
    pub fn van_price(&self, size: &str, coverage: Coverage) -> Option<f64> {
        let price = self.van_pricing.get(size)?.get(coverage);
        (price.is_finite() && price > 0.0).then_some(price)
    }

    pub fn ppf_kits(&self) -> &[PpfKit] {
        &self.ppf_kits
    }

    pub fn ppf_kit(&self, id: &str) -> Option<&PpfKit> {
        self.ppf_kits.iter().find(|k| k.id == id)
    }

    /// Sum the economics of the selected kits
    ///
    /// Unknown ids are skipped.
    pub fn ppf_total<S: AsRef<str>>(&self, selected: &[S]) -> PpfTotal {
        let mut total = PpfTotal::default();
        for id in selected {
            let id = id.as_ref();
            match self.ppf_kit(id) {
                Some(kit) => {
                    total.sale_price += kit.sale_price;
                    total.material_cost += kit.material_cost;
                    total.yards += kit.yards;
                }
                None => log::debug!("Unknown PPF kit '{}' skipped", id),
            }
        }
        total
    }

    pub fn install_rates(&self) -> &[InstallRate] {
        &self.install_rates
    }

    pub fn install_rate(&self, name: &str) -> Option<&InstallRate> {
        self.install_rates
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Size class for a vehicle tier
    pub fn size_for_tier(&self, tier: &str) -> &str {
        self.tier_sizes
            .get(tier)
            .map(String::as_str)
            .unwrap_or(FALLBACK_SIZE)
    }

    pub fn vehicle_data_for_size(&self, size: &str) -> Option<VehicleData> {
        self.vehicle_sizes.get(size).map(|s| VehicleData {
            size: size.to_string(),
            areas: s.areas,
            roof: s.roof,
        })
    }

    pub fn vehicle_data_for_tier(&self, tier: &str) -> Option<VehicleData> {
        self.vehicle_data_for_size(self.size_for_tier(tier))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
