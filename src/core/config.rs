//! Configuration management

use crate::catalog::{seeds, InstallRate, MaterialOption, PpfKit, VehicleSize};
use crate::core::{CoverageTable, Error, LaborMode, MarginBand, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub defaults: LineItemDefaults,
    #[serde(default)]
    pub margin: MarginConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        let app_config_dir = config_dir.join("wrap-estimator");

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir.join("config.toml"))
    }

    /// Load configuration from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
            log::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Currency code (USD, CAD, EUR, etc.)
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Currency symbol
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_currency() -> String { "USD".to_string() }
fn default_currency_symbol() -> String { "$".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            currency_symbol: default_currency_symbol(),
            log_level: default_log_level(),
        }
    }
}

/// Values applied to new line items and to items that leave a field unset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemDefaults {
    #[serde(default = "default_material_id")]
    pub material_id: String,
    /// Cost per square foot
    #[serde(default = "default_material_rate")]
    pub material_rate: f64,
    /// Design fee for formula-priced items without one
    #[serde(default = "default_design_fee")]
    pub design_fee: f64,
    #[serde(default)]
    pub labor_mode: LaborMode,
    #[serde(default = "default_labor_pct")]
    pub labor_pct: f64,
    #[serde(default)]
    pub labor_flat: f64,
    /// Target gross profit margin in percent
    #[serde(default = "default_target_gpm")]
    pub target_gpm: f64,
    /// Revenue added when a box truck includes the cab
    #[serde(default = "default_cab_addon")]
    pub box_truck_cab_addon: f64,
}

fn default_material_id() -> String { "avery1105".to_string() }
fn default_material_rate() -> f64 { 2.10 }
fn default_design_fee() -> f64 { 150.0 }
fn default_labor_pct() -> f64 { 10.0 }
fn default_target_gpm() -> f64 { 75.0 }
fn default_cab_addon() -> f64 { 1950.0 }

impl Default for LineItemDefaults {
    fn default() -> Self {
        Self {
            material_id: default_material_id(),
            material_rate: default_material_rate(),
            design_fee: default_design_fee(),
            labor_mode: LaborMode::Percentage,
            labor_pct: default_labor_pct(),
            labor_flat: 0.0,
            target_gpm: default_target_gpm(),
            box_truck_cab_addon: default_cab_addon(),
        }
    }
}

/// Margin health thresholds, in percent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    #[serde(default = "default_healthy_gpm")]
    pub healthy: f64,
    #[serde(default = "default_watch_gpm")]
    pub watch: f64,
}

fn default_healthy_gpm() -> f64 { 73.0 }
fn default_watch_gpm() -> f64 { 65.0 }

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            healthy: default_healthy_gpm(),
            watch: default_watch_gpm(),
        }
    }
}

impl MarginConfig {
    /// Classify a margin against the thresholds
    pub fn band(&self, gpm: f64) -> MarginBand {
        if gpm >= self.healthy {
            MarginBand::Healthy
        } else if gpm >= self.watch {
            MarginBand::Watch
        } else {
            MarginBand::Low
        }
    }
}

/// Reference tables. Any table left out of the file uses the built-in one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "seeds::default_materials")]
    pub materials: Vec<MaterialOption>,
    /// Flat van prices keyed by size class
    #[serde(default = "seeds::default_van_pricing")]
    pub van_pricing: BTreeMap<String, CoverageTable>,
    #[serde(default = "seeds::default_ppf_kits")]
    pub ppf_kits: Vec<PpfKit>,
    #[serde(default = "seeds::default_install_rates")]
    pub install_rates: Vec<InstallRate>,
    #[serde(default = "seeds::default_vehicle_sizes")]
    pub vehicle_sizes: BTreeMap<String, VehicleSize>,
    /// Vehicle tier to size class
    #[serde(default = "seeds::default_tier_sizes")]
    pub tier_sizes: BTreeMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            materials: seeds::default_materials(),
            van_pricing: seeds::default_van_pricing(),
            ppf_kits: seeds::default_ppf_kits(),
            install_rates: seeds::default_install_rates(),
            vehicle_sizes: seeds::default_vehicle_sizes(),
            tier_sizes: seeds::default_tier_sizes(),
        }
    }
}
