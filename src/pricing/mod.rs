//! Pricing engine for quote line items
//!
//! Resolves each line item's sale price in a fixed order:
//! 1. Manual override, when set
//! 2. Van flat-price matrix (vehicles only)
//! 3. Margin solver
//!
//! PPF items are priced from their kits instead of the solver. The engine
//! holds no state between calls; every result can be recomputed at will.

mod solver;
mod totals;

pub use solver::{is_feasible, material_cost, solve_sale_price, solver_denominator, WASTE_BUFFER};

use solver::amount;

use crate::catalog::Catalog;
use crate::core::{
    Config, LaborMode, LineItem, LineItemCalc, LineItemDefaults, MarginBand, MarginConfig,
    PriceSource, ProductType, QuoteTotals, Result,
};
use crate::geometry;

/// Pricing engine that computes line item and quote economics
pub struct PricingEngine {
    catalog: Catalog,
    defaults: LineItemDefaults,
    margin: MarginConfig,
}

impl PricingEngine {
    /// Create a new pricing engine over a catalog
    pub fn new(catalog: Catalog, defaults: LineItemDefaults, margin: MarginConfig) -> Self {
        Self {
            catalog,
            defaults,
            margin,
        }
    }

    /// Build the engine from configuration, validating the catalog tables
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = Catalog::from_config(&config.catalog)?;
        Ok(Self::new(catalog, config.defaults.clone(), config.margin.clone()))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn defaults(&self) -> &LineItemDefaults {
        &self.defaults
    }

    /// A new line item carrying the configured defaults
    pub fn new_line_item(&self, product_type: ProductType, name: &str) -> LineItem {
        let d = &self.defaults;
        LineItem {
            material_id: Some(d.material_id.clone()),
            material_rate: d.material_rate,
            design_fee: (product_type != ProductType::Ppf).then_some(d.design_fee),
            labor_mode: d.labor_mode,
            labor_pct: d.labor_pct,
            labor_flat: d.labor_flat,
            target_gpm: d.target_gpm,
            ..LineItem::new(product_type, name)
        }
    }

    /// Switch an item to the flat pay of a standard install rate
    ///
    /// Returns false when the rate name is unknown; the item is left untouched.
    pub fn apply_install_rate(&self, item: &mut LineItem, rate_name: &str) -> bool {
        match self.catalog.install_rate(rate_name) {
            Some(rate) => {
                item.set_flat_labor(rate.pay);
                true
            }
            None => false,
        }
    }

    /// Attach vehicle data resolved from a vehicle tier
    pub fn assign_vehicle_tier(&self, item: &mut LineItem, tier: &str) {
        item.vehicle = self.catalog.vehicle_data_for_tier(tier);
        if let Some(data) = &item.vehicle {
            item.roof_area = data.roof;
        }
    }

    pub fn margin_band(&self, gpm: f64) -> MarginBand {
        self.margin.band(gpm)
    }

    /// Area fed into the cost model for this item (0 for PPF)
    pub fn area(&self, item: &LineItem) -> f64 {
        match item.product_type {
            ProductType::Vehicle => geometry::vehicle_area(item),
            ProductType::BoxTruck => {
                let spec = item.box_truck.clone().unwrap_or_default();
                geometry::box_truck_area(spec.length_ft, spec.effective_height_in(), spec.sides)
            }
            ProductType::Trailer => {
                let spec = item.trailer.clone().unwrap_or_default();
                geometry::trailer_area(
                    spec.length_ft,
                    spec.height_ft,
                    spec.sides,
                    spec.front_coverage,
                    spec.vnose,
                    spec.vnose_height_ft,
                    spec.vnose_length_ft,
                )
            }
            // Net area only: the waste buffer in the cost model is the sole waste factor
            ProductType::Marine => {
                let spec = item.marine.clone().unwrap_or_default();
                geometry::marine_area(
                    spec.hull_length_ft,
                    spec.hull_height_ft,
                    spec.effective_passes(),
                    spec.transom,
                )
                .pricing_area()
            }
            ProductType::Ppf => 0.0,
            _ => amount(item.area),
        }
    }

    /// Material rate used for costing
    ///
    /// The item's own rate wins; without one the catalog rate for its material is used.
    fn material_rate(&self, item: &LineItem) -> f64 {
        let own = amount(item.material_rate);
        if own > 0.0 {
            return own;
        }
        item.material_id
            .as_deref()
            .map(|id| self.catalog.material_rate(id))
            .unwrap_or(0.0)
    }

    /// Flat matrix price for a vehicle item, if its size has one
    fn van_matrix_price(&self, item: &LineItem) -> Option<f64> {
        if item.product_type != ProductType::Vehicle {
            return None;
        }
        let data = item.vehicle.as_ref()?;
        self.catalog.van_price(&data.size, item.coverage)
    }

    /// Revenue added on top of the priced base, with no cost attached
    fn addon_revenue(&self, item: &LineItem) -> f64 {
        match (&item.product_type, &item.box_truck) {
            (ProductType::BoxTruck, Some(spec)) if spec.cab => self.defaults.box_truck_cab_addon,
            _ => 0.0,
        }
    }

    /// Compute the price and cost breakdown of one line item
    pub fn calc_line_item(&self, item: &LineItem) -> LineItemCalc {
        if item.product_type == ProductType::Ppf {
            return self.calc_ppf(item);
        }

        let area = self.area(item);
        let material = material_cost(area, self.material_rate(item));
        let design = amount(item.design_fee.unwrap_or(self.defaults.design_fee));
        let labor_pct = amount(item.labor_pct);

        let (base_price, source) = if let Some(price) = item.manual_price() {
            (price, PriceSource::Manual)
        } else if let Some(price) = self.van_matrix_price(item) {
            (price, PriceSource::Catalog)
        } else if is_feasible(item.labor_mode, item.target_gpm, labor_pct) {
            let price = solve_sale_price(
                material,
                design,
                item.labor_mode,
                labor_pct,
                amount(item.labor_flat),
                item.target_gpm,
            );
            (price, PriceSource::Solved)
        } else {
            log::warn!("Line item '{}' cannot reach {}% margin", item.name, item.target_gpm);
            (0.0, PriceSource::Infeasible)
        };

        // Labor is charged on the base price; add-on revenue carries no labor
        let labor = self.labor(item, base_price);
        let sale_price = base_price + self.addon_revenue(item);

        finish(area, sale_price, material, labor, design, 0.0, source)
    }

    /// PPF: kits carry their own sale price and material cost
    fn calc_ppf(&self, item: &LineItem) -> LineItemCalc {
        let kits = self.catalog.ppf_total(&item.ppf_selected);
        let design = amount(item.design_fee.unwrap_or(0.0));

        let (sale_price, source) = match item.manual_price() {
            Some(price) => (price, PriceSource::Manual),
            None => (kits.sale_price, PriceSource::Kits),
        };
        let labor = self.labor(item, sale_price);

        finish(0.0, sale_price, kits.material_cost, labor, design, kits.yards, source)
    }

    fn labor(&self, item: &LineItem, base_price: f64) -> f64 {
        match item.labor_mode {
            LaborMode::Percentage => (base_price * amount(item.labor_pct) / 100.0).round(),
            LaborMode::Flat => amount(item.labor_flat),
        }
    }

    /// Compute and store the result on the item
    pub fn refresh(&self, item: &mut LineItem) -> LineItemCalc {
        let calc = self.calc_line_item(item);
        item.calc = Some(calc);
        calc
    }

    /// Quote totals, recomputing every item
    pub fn calc_totals(&self, items: &[LineItem]) -> QuoteTotals {
        totals::blend(items, |item| self.calc_line_item(item))
    }

    /// Quote totals trusting each item's cached result when present
    ///
    /// Only correct if the caller keeps the caches in sync with their inputs.
    pub fn calc_totals_cached(&self, items: &[LineItem]) -> QuoteTotals {
        totals::blend(items, |item| match item.calc {
            Some(calc) => calc,
            None => self.calc_line_item(item),
        })
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(Catalog::builtin(), LineItemDefaults::default(), MarginConfig::default())
    }
}

fn finish(
    area: f64,
    sale_price: f64,
    material_cost: f64,
    labor: f64,
    design: f64,
    yards: f64,
    source: PriceSource,
) -> LineItemCalc {
    let cogs = material_cost + labor + design;
    let profit = sale_price - cogs;
    let (gpm, effective_labor_pct) = if sale_price > 0.0 {
        (profit / sale_price * 100.0, labor / sale_price * 100.0)
    } else {
        (0.0, 0.0)
    };

    LineItemCalc {
        area,
        sale_price,
        material_cost,
        labor,
        design,
        cogs,
        profit,
        gpm,
        effective_labor_pct,
        yards,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoxTruckSpec, Coverage, MarineSpec, TrailerSpec, VNose};

    fn engine() -> PricingEngine {
        PricingEngine::default()
    }

    fn box_truck(length_ft: f64) -> LineItem {
        let engine = engine();
        let mut item = engine.new_line_item(ProductType::BoxTruck, "Box truck");
        item.box_truck = Some(BoxTruckSpec {
            length_ft,
            ..Default::default()
        });
        item
    }

    #[test]
    fn test_box_truck_solved_price() {
        let engine = engine();
        let calc = engine.calc_line_item(&box_truck(20.0));

        // 320 sqft -> material 753 -> (753 + 150) / 0.15
        assert_eq!(calc.area, 320.0);
        assert_eq!(calc.material_cost, 753.0);
        assert_eq!(calc.sale_price, 6020.0);
        assert_eq!(calc.labor, 602.0);
        assert_eq!(calc.design, 150.0);
        assert_eq!(calc.cogs, 1505.0);
        assert_eq!(calc.profit, 4515.0);
        assert_eq!(calc.gpm, 75.0);
        assert_eq!(calc.source, PriceSource::Solved);
    }

    #[test]
    fn test_cab_addon_is_revenue_only() {
        let engine = engine();
        let plain = engine.calc_line_item(&box_truck(20.0));

        let mut with_cab = box_truck(20.0);
        with_cab.box_truck.as_mut().unwrap().cab = true;
        let calc = engine.calc_line_item(&with_cab);

        assert_eq!(calc.sale_price, plain.sale_price + 1950.0);
        assert_eq!(calc.labor, plain.labor);
        assert_eq!(calc.cogs, plain.cogs);
        assert_eq!(calc.profit, plain.profit + 1950.0);
        assert!(calc.gpm > plain.gpm);
        assert!(calc.effective_labor_pct < 10.0);
    }

    #[test]
    fn test_manual_override_wins() {
        let engine = engine();
        let mut item = box_truck(20.0);
        item.set_manual_price(4000.0);

        let calc = engine.calc_line_item(&item);
        assert_eq!(calc.sale_price, 4000.0);
        assert_eq!(calc.labor, 400.0);
        assert_eq!(calc.source, PriceSource::Manual);
        assert_eq!(calc.profit, 4000.0 - (753.0 + 400.0 + 150.0));
    }

    #[test]
    fn test_van_matrix_beats_solver() {
        let engine = engine();
        let mut item = engine.new_line_item(ProductType::Vehicle, "Sprinter");
        engine.assign_vehicle_tier(&mut item, "large_van");

        for (rate, gpm) in [(2.10, 75.0), (9.99, 20.0), (0.0, 99.0)] {
            item.material_rate = rate;
            item.target_gpm = gpm;
            let calc = engine.calc_line_item(&item);
            assert_eq!(calc.sale_price, 3800.0);
            assert_eq!(calc.source, PriceSource::Catalog);
        }

        item.coverage = Coverage::Half;
        assert_eq!(engine.calc_line_item(&item).sale_price, 2300.0);
    }

    #[test]
    fn test_manual_override_beats_van_matrix() {
        let engine = engine();
        let mut item = engine.new_line_item(ProductType::Vehicle, "Sprinter");
        engine.assign_vehicle_tier(&mut item, "large_van");
        item.set_manual_price(4100.0);

        let calc = engine.calc_line_item(&item);
        assert_eq!(calc.sale_price, 4100.0);
        assert_eq!(calc.source, PriceSource::Manual);
    }

    #[test]
    fn test_vehicle_without_matrix_entry_is_solved() {
        let engine = engine();
        let mut item = engine.new_line_item(ProductType::Vehicle, "Civic");
        engine.assign_vehicle_tier(&mut item, "med_car");

        let calc = engine.calc_line_item(&item);
        assert_eq!(calc.area, 230.0);
        assert_eq!(calc.source, PriceSource::Solved);
        // 230 * 2.10 * 1.12 = 540.96
        assert_eq!(calc.material_cost, 541.0);
    }

    #[test]
    fn test_vehicle_roof_adds_area() {
        let engine = engine();
        let mut item = engine.new_line_item(ProductType::Vehicle, "Civic");
        engine.assign_vehicle_tier(&mut item, "med_car");
        item.include_roof = true;

        assert_eq!(engine.calc_line_item(&item).area, 254.0);
    }

    #[test]
    fn test_marine_prices_net_area_only() {
        let engine = engine();
        let mut item = engine.new_line_item(ProductType::Marine, "Bayliner");
        item.marine = Some(MarineSpec {
            hull_length_ft: 30.0,
            hull_height_ft: 4.0,
            passes: 2,
            transom: true,
        });

        let calc = engine.calc_line_item(&item);
        assert_eq!(calc.area, 258.0);
        assert_eq!(calc.material_cost, material_cost(258.0, 2.10));
    }

    #[test]
    fn test_trailer_vnose_feeds_pricing() {
        let engine = engine();
        let mut item = engine.new_line_item(ProductType::Trailer, "Cargo trailer");
        item.trailer = Some(TrailerSpec {
            length_ft: 24.0,
            height_ft: 7.0,
            vnose: VNose::HalfStandard,
            ..Default::default()
        });

        assert_eq!(engine.calc_line_item(&item).area, 360.0);
    }

    #[test]
    fn test_ppf_uses_kit_economics() {
        let engine = engine();
        let mut item = engine.new_line_item(ProductType::Ppf, "Front end");
        item.ppf_selected = vec!["full_hood".to_string(), "front_bumper".to_string()];
        item.target_gpm = 99.0;

        let calc = engine.calc_line_item(&item);
        assert_eq!(calc.sale_price, 899.0 + 649.0);
        assert_eq!(calc.material_cost, 189.0 + 126.0);
        assert_eq!(calc.design, 0.0);
        assert_eq!(calc.labor, (1548.0_f64 * 0.10).round());
        assert_eq!(calc.source, PriceSource::Kits);
        assert_eq!(calc.area, 0.0);
        assert_eq!(calc.yards, 4.2 + 2.8);

        assert_eq!(engine.calc_line_item(&box_truck(20.0)).yards, 0.0);
    }

    #[test]
    fn test_ppf_manual_price_keeps_kit_costs() {
        let engine = engine();
        let mut item = engine.new_line_item(ProductType::Ppf, "Front end");
        item.ppf_selected = vec!["full_front".to_string()];
        item.set_manual_price(1500.0);

        let calc = engine.calc_line_item(&item);
        assert_eq!(calc.sale_price, 1500.0);
        assert_eq!(calc.material_cost, 405.0);
        assert_eq!(calc.labor, 150.0);
        assert_eq!(calc.source, PriceSource::Manual);
    }

    #[test]
    fn test_ppf_unknown_kit_contributes_nothing() {
        let engine = engine();
        let mut item = engine.new_line_item(ProductType::Ppf, "PPF");
        item.ppf_selected = vec!["mirrors".to_string(), "nope".to_string()];

        assert_eq!(engine.calc_line_item(&item).sale_price, 249.0);
    }

    #[test]
    fn test_infeasible_target_prices_zero() {
        let engine = engine();
        let mut item = box_truck(20.0);
        item.target_gpm = 85.0;
        item.labor_pct = 15.0;

        let calc = engine.calc_line_item(&item);
        assert_eq!(calc.sale_price, 0.0);
        assert_eq!(calc.gpm, 0.0);
        assert_eq!(calc.effective_labor_pct, 0.0);
        assert_eq!(calc.source, PriceSource::Infeasible);
    }

    #[test]
    fn test_flat_labor_mode() {
        let engine = engine();
        let mut item = box_truck(20.0);
        assert!(engine.apply_install_rate(&mut item, "Box Truck Sides"));
        item.target_gpm = 50.0;

        let calc = engine.calc_line_item(&item);
        // (753 + 150 + 500) / 0.5
        assert_eq!(calc.sale_price, 2806.0);
        assert_eq!(calc.labor, 500.0);

        assert!(!engine.apply_install_rate(&mut item, "Unknown"));
        assert_eq!(item.labor_flat, 500.0);
    }

    #[test]
    fn test_generic_item_without_area() {
        let engine = engine();
        let item = engine.new_line_item(ProductType::Signage, "Yard signs");
        let calc = engine.calc_line_item(&item);

        assert_eq!(calc.area, 0.0);
        assert_eq!(calc.material_cost, 0.0);
        // design fee alone: 150 / 0.15
        assert_eq!(calc.sale_price, 1000.0);
    }

    #[test]
    fn test_missing_geometry_defaults() {
        let engine = engine();
        let item = engine.new_line_item(ProductType::BoxTruck, "Empty");
        assert_eq!(engine.area(&item), 0.0);

        let marine = engine.new_line_item(ProductType::Marine, "Empty");
        assert_eq!(engine.calc_line_item(&marine).material_cost, 0.0);
    }

    #[test]
    fn test_cleared_geometry_fields_fall_back_to_defaults() {
        let engine = engine();
        let mut item = box_truck(20.0);
        item.box_truck.as_mut().unwrap().height_in = 0.0;
        assert_eq!(engine.area(&item), 320.0);
        assert_eq!(engine.calc_line_item(&item).sale_price, 6020.0);

        item.box_truck.as_mut().unwrap().height_in = -12.0;
        assert_eq!(engine.area(&item), 320.0);

        let mut hull = engine.new_line_item(ProductType::Marine, "Hull");
        hull.marine = Some(MarineSpec {
            hull_length_ft: 30.0,
            hull_height_ft: 4.0,
            passes: 0,
            transom: true,
        });
        assert_eq!(engine.area(&hull), 258.0);

        let spec = hull.marine.as_ref().unwrap();
        let ordered = geometry::marine_area(30.0, 4.0, spec.effective_passes(), true);
        assert_eq!(ordered.linear_ft_per_side, 60.0);
        assert_eq!(ordered.total_linear_ft, 120.0);
    }

    #[test]
    fn test_non_finite_inputs_still_price() {
        let engine = engine();

        let mut manual = box_truck(20.0);
        manual.set_manual_price(f64::INFINITY);
        let calc = engine.calc_line_item(&manual);
        assert_eq!(calc.sale_price, 6020.0);
        assert_eq!(calc.source, PriceSource::Solved);

        let mut flat = box_truck(20.0);
        flat.set_flat_labor(f64::INFINITY);
        flat.target_gpm = 50.0;
        let calc = engine.calc_line_item(&flat);
        // (753 + 150 + 0) / 0.5
        assert_eq!(calc.sale_price, 1806.0);
        assert_eq!(calc.labor, 0.0);

        let mut odd = box_truck(20.0);
        odd.design_fee = Some(f64::NAN);
        odd.labor_pct = f64::NAN;
        odd.material_rate = f64::INFINITY;
        let calc = engine.calc_line_item(&odd);
        // catalog rate for avery1105, no design, no labor: 753 / 0.25
        assert_eq!(calc.design, 0.0);
        assert_eq!(calc.labor, 0.0);
        assert_eq!(calc.sale_price, 3012.0);

        let mut nan_target = box_truck(20.0);
        nan_target.target_gpm = f64::NAN;
        assert_eq!(engine.calc_line_item(&nan_target).source, PriceSource::Infeasible);

        for item in [&manual, &flat, &odd, &nan_target] {
            let calc = engine.calc_line_item(item);
            assert!(calc.sale_price.is_finite());
            assert!(calc.cogs.is_finite());
            assert!(calc.gpm.is_finite());
        }

        let totals = engine.calc_totals(&[manual, flat, odd, nan_target]);
        assert!(totals.revenue.is_finite());
        assert!(totals.blended_gpm.is_finite());
    }

    #[test]
    fn test_negative_labor_pct_keeps_target_margin() {
        let engine = engine();
        let mut item = box_truck(20.0);
        item.labor_pct = -10.0;

        let calc = engine.calc_line_item(&item);
        // treated as 0% labor: (753 + 150) / 0.25
        assert_eq!(calc.sale_price, 3612.0);
        assert_eq!(calc.labor, 0.0);
        assert!((calc.gpm - 75.0).abs() <= 1.0);
    }

    #[test]
    fn test_unknown_material_with_no_rate_costs_nothing() {
        let engine = engine();
        let mut item = box_truck(20.0);
        item.material_rate = 0.0;
        item.material_id = Some("3m2080".to_string());
        assert_eq!(engine.calc_line_item(&item).material_cost, material_cost(320.0, 2.50));

        item.material_id = Some("mystery".to_string());
        assert_eq!(engine.calc_line_item(&item).material_cost, 0.0);
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let engine = engine();
        let mut item = box_truck(18.5);
        item.box_truck.as_mut().unwrap().sides.rear = true;

        assert_eq!(engine.calc_line_item(&item), engine.calc_line_item(&item));
    }

    #[test]
    fn test_sale_price_never_negative() {
        let engine = engine();
        let mut item = box_truck(20.0);
        item.design_fee = Some(-500.0);
        item.material_rate = -3.0;
        item.labor_flat = -100.0;
        item.labor_mode = LaborMode::Flat;

        assert!(engine.calc_line_item(&item).sale_price >= 0.0);
    }

    #[test]
    fn test_totals_recompute_and_cached() {
        let engine = engine();
        let mut a = box_truck(20.0);
        let mut b = box_truck(20.0);
        b.optional = true;

        engine.refresh(&mut a);
        engine.refresh(&mut b);

        let fresh = engine.calc_totals(&[a.clone(), b.clone()]);
        assert_eq!(fresh.revenue, 6020.0);
        assert_eq!(fresh.optional_items, 1);
        assert_eq!(fresh.blended_gpm, 75.0);

        // a stale cache is only trusted by the cached variant
        let mut stale = a.clone();
        stale.box_truck.as_mut().unwrap().length_ft = 10.0;
        assert_eq!(engine.calc_totals_cached(&[stale.clone()]).revenue, 6020.0);
        assert!(engine.calc_totals(&[stale]).revenue < 6020.0);
    }

    #[test]
    fn test_from_config_rejects_bad_catalog() {
        let mut config = Config::default();
        config.catalog.materials[0].rate = -1.0;
        assert!(PricingEngine::from_config(&config).is_err());
        assert!(PricingEngine::from_config(&Config::default()).is_ok());
    }
}
