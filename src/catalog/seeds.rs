//! Built-in reference tables used when the config file doesn't override them

use super::{InstallRate, MaterialOption, PpfKit, VehicleSize};
use crate::core::CoverageTable;
use std::collections::BTreeMap;

struct MaterialSeed {
    id: &'static str,
    name: &'static str,
    rate: f64,
}

const MATERIAL_SEEDS: &[MaterialSeed] = &[
    MaterialSeed { id: "avery1105", name: "Avery MPI 1105", rate: 2.10 },
    MaterialSeed { id: "avery1005", name: "Avery MPI 1005", rate: 1.85 },
    MaterialSeed { id: "3m2080", name: "3M 2080", rate: 2.50 },
    MaterialSeed { id: "3mij180", name: "3M IJ180", rate: 2.30 },
    MaterialSeed { id: "avery_supreme", name: "Avery Supreme", rate: 2.75 },
    MaterialSeed { id: "arlon_slx", name: "Arlon SLX", rate: 2.20 },
    MaterialSeed { id: "hexis", name: "Hexis", rate: 2.00 },
];

struct VanPriceSeed {
    size: &'static str,
    full: f64,
    three_quarter: f64,
    half: f64,
}

const VAN_PRICE_SEEDS: &[VanPriceSeed] = &[
    VanPriceSeed { size: "van_medium", full: 3200.0, three_quarter: 2600.0, half: 1900.0 },
    VanPriceSeed { size: "van_large", full: 3800.0, three_quarter: 3100.0, half: 2300.0 },
    VanPriceSeed { size: "van_xl", full: 4400.0, three_quarter: 3600.0, half: 2700.0 },
];

struct PpfSeed {
    id: &'static str,
    name: &'static str,
    sale: f64,
    material_cost: f64,
    yards: f64,
}

// Material cost is stored per kit (~$45/yd), not derived at runtime.
const PPF_SEEDS: &[PpfSeed] = &[
    PpfSeed { id: "full_hood", name: "Full Hood", sale: 899.0, material_cost: 189.0, yards: 4.2 },
    PpfSeed { id: "partial_hood", name: "Partial Hood", sale: 549.0, material_cost: 94.5, yards: 2.1 },
    PpfSeed { id: "front_fenders", name: "Front Fenders", sale: 749.0, material_cost: 157.5, yards: 3.5 },
    PpfSeed { id: "mirrors", name: "Mirrors", sale: 249.0, material_cost: 36.0, yards: 0.8 },
    PpfSeed { id: "front_bumper", name: "Front Bumper", sale: 649.0, material_cost: 126.0, yards: 2.8 },
    PpfSeed { id: "rocker_panels", name: "Rocker Panels", sale: 449.0, material_cost: 108.0, yards: 2.4 },
    PpfSeed { id: "a_pillars", name: "A-Pillars", sale: 199.0, material_cost: 27.0, yards: 0.6 },
    PpfSeed { id: "full_front", name: "Full Front", sale: 1799.0, material_cost: 405.0, yards: 9.0 },
];

struct InstallRateSeed {
    name: &'static str,
    pay: f64,
    hours: f64,
}

const INSTALL_RATE_SEEDS: &[InstallRateSeed] = &[
    InstallRateSeed { name: "Full Car", pay: 450.0, hours: 8.0 },
    InstallRateSeed { name: "Partial Car", pay: 250.0, hours: 4.0 },
    InstallRateSeed { name: "Full Truck", pay: 500.0, hours: 9.0 },
    InstallRateSeed { name: "Full Van", pay: 600.0, hours: 10.0 },
    InstallRateSeed { name: "High Roof Van", pay: 750.0, hours: 12.0 },
    InstallRateSeed { name: "Box Truck Sides", pay: 500.0, hours: 8.0 },
    InstallRateSeed { name: "53ft Trailer", pay: 900.0, hours: 14.0 },
    InstallRateSeed { name: "Boat Hull", pay: 650.0, hours: 10.0 },
    InstallRateSeed { name: "Full Front PPF", pay: 300.0, hours: 5.0 },
];

struct SizeSeed {
    size: &'static str,
    full: f64,
    three_quarter: f64,
    half: f64,
    roof: f64,
}

const SIZE_SEEDS: &[SizeSeed] = &[
    SizeSeed { size: "small", full: 180.0, three_quarter: 135.0, half: 90.0, roof: 18.0 },
    SizeSeed { size: "medium", full: 230.0, three_quarter: 170.0, half: 115.0, roof: 24.0 },
    SizeSeed { size: "large", full: 280.0, three_quarter: 210.0, half: 140.0, roof: 30.0 },
    SizeSeed { size: "xl", full: 330.0, three_quarter: 250.0, half: 165.0, roof: 36.0 },
    SizeSeed { size: "van_medium", full: 350.0, three_quarter: 265.0, half: 175.0, roof: 55.0 },
    SizeSeed { size: "van_large", full: 420.0, three_quarter: 315.0, half: 210.0, roof: 70.0 },
    SizeSeed { size: "van_xl", full: 500.0, three_quarter: 375.0, half: 250.0, roof: 85.0 },
];

const TIER_SEEDS: &[(&str, &str)] = &[
    ("small_car", "small"),
    ("med_car", "medium"),
    ("full_car", "large"),
    ("sm_truck", "medium"),
    ("med_truck", "large"),
    ("full_truck", "xl"),
    ("med_van", "van_medium"),
    ("large_van", "van_large"),
    ("xl_van", "van_xl"),
    ("box_truck", "xl"),
];

pub(crate) fn default_materials() -> Vec<MaterialOption> {
    MATERIAL_SEEDS
        .iter()
        .map(|s| MaterialOption {
            id: s.id.to_string(),
            name: s.name.to_string(),
            rate: s.rate,
        })
        .collect()
}

pub(crate) fn default_van_pricing() -> BTreeMap<String, CoverageTable> {
    VAN_PRICE_SEEDS
        .iter()
        .map(|s| {
            (
                s.size.to_string(),
                CoverageTable { full: s.full, three_quarter: s.three_quarter, half: s.half },
            )
        })
        .collect()
}

pub(crate) fn default_ppf_kits() -> Vec<PpfKit> {
    PPF_SEEDS
        .iter()
        .map(|s| PpfKit {
            id: s.id.to_string(),
            name: s.name.to_string(),
            sale_price: s.sale,
            material_cost: s.material_cost,
            yards: s.yards,
        })
        .collect()
}

pub(crate) fn default_install_rates() -> Vec<InstallRate> {
    INSTALL_RATE_SEEDS
        .iter()
        .map(|s| InstallRate {
            name: s.name.to_string(),
            pay: s.pay,
            hours: s.hours,
        })
        .collect()
}

pub(crate) fn default_vehicle_sizes() -> BTreeMap<String, VehicleSize> {
    SIZE_SEEDS
        .iter()
        .map(|s| {
            (
                s.size.to_string(),
                VehicleSize {
                    areas: CoverageTable { full: s.full, three_quarter: s.three_quarter, half: s.half },
                    roof: s.roof,
                },
            )
        })
        .collect()
}

pub(crate) fn default_tier_sizes() -> BTreeMap<String, String> {
    TIER_SEEDS
        .iter()
        .map(|(tier, size)| (tier.to_string(), size.to_string()))
        .collect()
}
