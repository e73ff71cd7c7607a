//! Core module - Configuration, errors, and the line item data model

mod config;
mod error;
mod types;

pub use config::{CatalogConfig, Config, GeneralConfig, LineItemDefaults, MarginConfig};
pub use error::{Error, Result};
pub use types::{
    BoxTruckSides, BoxTruckSpec, Coverage, CoverageTable, FrontCoverage, LaborMode, LineItem,
    LineItemCalc, MarginBand, MarineArea, MarineSpec, PpfTotal, PriceSource, ProductType,
    QuoteTotals, TrailerSides, TrailerSpec, VNose, VehicleData,
};
