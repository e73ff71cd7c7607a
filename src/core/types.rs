//! Line item data model and computed results

use serde::{Deserialize, Serialize};

/// Product type tag selecting the geometry or catalog path for a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    Vehicle,
    #[serde(alias = "boxtruck", alias = "box-truck")]
    BoxTruck,
    Trailer,
    Marine,
    Ppf,
    #[serde(alias = "generic")]
    Custom,
    Decking,
    #[serde(alias = "wallwrap")]
    WallWrap,
    Signage,
    Apparel,
    Print,
}

impl ProductType {
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Vehicle => "Vehicle",
            ProductType::BoxTruck => "Box Truck",
            ProductType::Trailer => "Trailer",
            ProductType::Marine => "Marine",
            ProductType::Ppf => "PPF",
            ProductType::Custom => "Custom",
            ProductType::Decking => "Decking",
            ProductType::WallWrap => "Wall Wrap",
            ProductType::Signage => "Signage",
            ProductType::Apparel => "Apparel",
            ProductType::Print => "Print",
        }
    }
}

/// How much of a vehicle surface is wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    #[default]
    Full,
    #[serde(alias = "threequarter")]
    ThreeQuarter,
    Half,
}

impl Coverage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Coverage::Full => "full",
            Coverage::ThreeQuarter => "three_quarter",
            Coverage::Half => "half",
        }
    }
}

/// One value per coverage tier (areas or flat prices)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoverageTable {
    #[serde(default)]
    pub full: f64,
    #[serde(default, alias = "threequarter")]
    pub three_quarter: f64,
    #[serde(default)]
    pub half: f64,
}

impl CoverageTable {
    pub fn get(&self, coverage: Coverage) -> f64 {
        match coverage {
            Coverage::Full => self.full,
            Coverage::ThreeQuarter => self.three_quarter,
            Coverage::Half => self.half,
        }
    }
}

/// Precomputed vehicle dimensions resolved from the vehicle database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleData {
    /// Size class, also the key into the van flat-price matrix
    pub size: String,
    /// Wrap area per coverage tier
    pub areas: CoverageTable,
    /// Roof panel area, never part of a coverage tier
    #[serde(default)]
    pub roof: f64,
}

/// How installer labor is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaborMode {
    /// Labor is a percentage of the sale price
    #[default]
    #[serde(rename = "pct", alias = "percentage")]
    Percentage,
    /// Labor is a fixed amount
    #[serde(rename = "flat")]
    Flat,
}

/// Box truck sides to wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxTruckSides {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub rear: bool,
}

impl Default for BoxTruckSides {
    fn default() -> Self {
        Self { left: true, right: true, rear: false }
    }
}

/// Box truck geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxTruckSpec {
    /// Box length in feet
    #[serde(default)]
    pub length_ft: f64,
    /// Box height in inches
    #[serde(default = "default_box_height_in")]
    pub height_in: f64,
    #[serde(default)]
    pub sides: BoxTruckSides,
    /// Add the cab wrap add-on (fixed revenue)
    #[serde(default)]
    pub cab: bool,
}

fn default_box_height_in() -> f64 { 96.0 }

impl Default for BoxTruckSpec {
    fn default() -> Self {
        Self {
            length_ft: 0.0,
            height_in: default_box_height_in(),
            sides: BoxTruckSides::default(),
            cab: false,
        }
    }
}

impl BoxTruckSpec {
    /// Box height in inches; a cleared (non-positive) height means the standard box
    pub fn effective_height_in(&self) -> f64 {
        if self.height_in.is_finite() && self.height_in > 0.0 {
            self.height_in
        } else {
            default_box_height_in()
        }
    }
}

/// Trailer sides to wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerSides {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub front: bool,
    #[serde(default)]
    pub rear: bool,
}

impl Default for TrailerSides {
    fn default() -> Self {
        Self { left: true, right: true, front: false, rear: false }
    }
}

/// Portion of the trailer front that is covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontCoverage {
    #[default]
    Full,
    #[serde(alias = "threequarter")]
    ThreeQuarter,
    Half,
}

impl FrontCoverage {
    pub fn multiplier(&self) -> f64 {
        match self {
            FrontCoverage::Full => 1.0,
            FrontCoverage::ThreeQuarter => 0.75,
            FrontCoverage::Half => 0.5,
        }
    }
}

/// Trailer V-nose option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VNose {
    #[default]
    None,
    HalfStandard,
    Custom,
}

/// Trailer geometry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrailerSpec {
    #[serde(default)]
    pub length_ft: f64,
    #[serde(default)]
    pub height_ft: f64,
    #[serde(default)]
    pub sides: TrailerSides,
    #[serde(default)]
    pub front_coverage: FrontCoverage,
    #[serde(default)]
    pub vnose: VNose,
    /// Custom V-nose height, only used with `VNose::Custom`
    #[serde(default)]
    pub vnose_height_ft: f64,
    /// Custom V-nose length, only used with `VNose::Custom`
    #[serde(default)]
    pub vnose_length_ft: f64,
}

/// Marine hull geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarineSpec {
    #[serde(default)]
    pub hull_length_ft: f64,
    #[serde(default)]
    pub hull_height_ft: f64,
    /// Number of material passes along the hull
    #[serde(default = "default_passes")]
    pub passes: u32,
    #[serde(default)]
    pub transom: bool,
}

fn default_passes() -> u32 { 2 }

impl Default for MarineSpec {
    fn default() -> Self {
        Self {
            hull_length_ft: 0.0,
            hull_height_ft: 0.0,
            passes: default_passes(),
            transom: false,
        }
    }
}

impl MarineSpec {
    /// Pass count, with 0 treated as unset
    pub fn effective_passes(&self) -> u32 {
        if self.passes == 0 {
            default_passes()
        } else {
            self.passes
        }
    }
}

/// Marine area breakdown
///
/// Only `net_area + transom_area` feeds pricing. `with_waste` and the linear
/// footage figures are for material ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarineArea {
    pub net_area: f64,
    pub with_waste: f64,
    pub linear_ft_per_side: f64,
    pub total_linear_ft: f64,
    pub transom_area: f64,
}

impl MarineArea {
    /// Area used by the cost model
    pub fn pricing_area(&self) -> f64 {
        self.net_area + self.transom_area
    }
}

/// Summed economics of a PPF kit selection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PpfTotal {
    pub sale_price: f64,
    pub material_cost: f64,
    pub yards: f64,
}

/// Which precedence rule produced the sale price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Manual,
    Catalog,
    Solved,
    Kits,
    /// Solver denominator was <= 0, price forced to 0
    Infeasible,
}

/// A single product on a quote
///
/// One record for every product type; fields that don't apply to the
/// item's type are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Shown on the quote but excluded from totals
    pub optional: bool,

    // Vehicle
    pub coverage: Coverage,
    pub vehicle: Option<VehicleData>,
    /// Manually entered area, used when no vehicle data is available and by generic types
    pub area: f64,
    pub roof_area: f64,
    pub include_roof: bool,

    // Type-specific geometry
    pub box_truck: Option<BoxTruckSpec>,
    pub trailer: Option<TrailerSpec>,
    pub marine: Option<MarineSpec>,
    pub ppf_selected: Vec<String>,

    // Pricing
    pub material_id: Option<String>,
    /// Material cost per square foot
    pub material_rate: f64,
    /// None falls back to the configured default (0 for PPF)
    pub design_fee: Option<f64>,
    pub labor_mode: LaborMode,
    pub labor_pct: f64,
    pub labor_flat: f64,
    /// Target gross profit margin in percent
    pub target_gpm: f64,
    pub manual_sale: bool,
    pub sale_price: f64,

    /// Last computed result. Advisory only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calc: Option<LineItemCalc>,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            product_type: ProductType::Vehicle,
            optional: false,
            coverage: Coverage::Full,
            vehicle: None,
            area: 0.0,
            roof_area: 0.0,
            include_roof: false,
            box_truck: None,
            trailer: None,
            marine: None,
            ppf_selected: Vec::new(),
            material_id: Some("avery1105".to_string()),
            material_rate: 2.10,
            design_fee: None,
            labor_mode: LaborMode::Percentage,
            labor_pct: 10.0,
            labor_flat: 0.0,
            target_gpm: 75.0,
            manual_sale: false,
            sale_price: 0.0,
            calc: None,
        }
    }
}

impl LineItem {
    pub fn new(product_type: ProductType, name: &str) -> Self {
        Self {
            product_type,
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Manual price, if the override is active
    pub fn manual_price(&self) -> Option<f64> {
        (self.manual_sale && self.sale_price.is_finite() && self.sale_price > 0.0)
            .then_some(self.sale_price)
    }

    /// Set a manual sale price and activate the override
    pub fn set_manual_price(&mut self, price: f64) {
        self.manual_sale = true;
        self.sale_price = price;
    }

    pub fn clear_manual_price(&mut self) {
        self.manual_sale = false;
        self.sale_price = 0.0;
    }

    /// Switch to flat labor with the given pay
    pub fn set_flat_labor(&mut self, pay: f64) {
        self.labor_mode = LaborMode::Flat;
        self.labor_flat = pay;
    }
}

/// Computed price and cost breakdown for one line item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineItemCalc {
    /// Area fed into the cost model (0 for PPF)
    pub area: f64,
    pub sale_price: f64,
    pub material_cost: f64,
    pub labor: f64,
    pub design: f64,
    pub cogs: f64,
    pub profit: f64,
    /// Gross profit margin in percent
    pub gpm: f64,
    pub effective_labor_pct: f64,
    /// Film yardage of the selected kits (0 for non-PPF items)
    #[serde(default)]
    pub yards: f64,
    pub source: PriceSource,
}

/// Blended totals across the non-optional items of a quote
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub revenue: f64,
    pub material: f64,
    pub labor: f64,
    pub design: f64,
    pub cogs: f64,
    pub profit: f64,
    pub blended_gpm: f64,
    /// Items included in the sums
    pub counted_items: usize,
    /// Items skipped because they are optional
    pub optional_items: usize,
}

/// Health classification of a margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginBand {
    Healthy,
    Watch,
    Low,
}

impl MarginBand {
    pub fn label(&self) -> &'static str {
        match self {
            MarginBand::Healthy => "healthy",
            MarginBand::Watch => "watch",
            MarginBand::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_price_requires_flag_and_positive_amount() {
        let mut item = LineItem::new(ProductType::Custom, "Sign");
        item.sale_price = 900.0;
        assert_eq!(item.manual_price(), None);

        item.manual_sale = true;
        assert_eq!(item.manual_price(), Some(900.0));

        item.sale_price = 0.0;
        assert_eq!(item.manual_price(), None);

        item.sale_price = f64::INFINITY;
        assert_eq!(item.manual_price(), None);
        item.sale_price = f64::NAN;
        assert_eq!(item.manual_price(), None);
    }

    #[test]
    fn test_line_item_deserializes_with_defaults() {
        let item: LineItem = serde_json::from_str(
            r#"{ "type": "boxtruck", "box_truck": { "length_ft": 16 } }"#,
        )
        .unwrap();

        assert_eq!(item.product_type, ProductType::BoxTruck);
        assert_eq!(item.material_rate, 2.10);
        assert_eq!(item.labor_mode, LaborMode::Percentage);

        let bt = item.box_truck.unwrap();
        assert_eq!(bt.height_in, 96.0);
        assert!(bt.sides.left && bt.sides.right && !bt.sides.rear);
    }

    #[test]
    fn test_cleared_geometry_fields_use_defaults() {
        let bt = BoxTruckSpec { length_ft: 20.0, height_in: 0.0, ..Default::default() };
        assert_eq!(bt.effective_height_in(), 96.0);
        let bt = BoxTruckSpec { height_in: 84.0, ..bt };
        assert_eq!(bt.effective_height_in(), 84.0);

        let hull = MarineSpec { passes: 0, ..Default::default() };
        assert_eq!(hull.effective_passes(), 2);
        let hull = MarineSpec { passes: 3, ..hull };
        assert_eq!(hull.effective_passes(), 3);
    }

    #[test]
    fn test_coverage_aliases() {
        let c: Coverage = serde_json::from_str(r#""threequarter""#).unwrap();
        assert_eq!(c, Coverage::ThreeQuarter);
        let t: ProductType = serde_json::from_str(r#""generic""#).unwrap();
        assert_eq!(t, ProductType::Custom);
        let m: LaborMode = serde_json::from_str(r#""flat""#).unwrap();
        assert_eq!(m, LaborMode::Flat);
    }
}
