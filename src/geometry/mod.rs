//! Area calculators
//!
//! Pure functions turning physical dimensions and side selections into the
//! square footage to cover. Each calculator can be called on its own to
//! show a live estimate before a line item is priced.
//!
//! Missing or negative dimensions contribute no area.

use crate::core::{
    BoxTruckSides, Coverage, CoverageTable, FrontCoverage, LineItem, MarineArea, TrailerSides,
    VNose,
};

/// Assumed width of a box truck rear door, in feet
const BOX_TRUCK_REAR_WIDTH_FT: f64 = 8.0;
/// Assumed width of a trailer front or rear, in feet
const TRAILER_END_WIDTH_FT: f64 = 8.0;
/// Extra length factor of a standard V-nose, per side
const HALF_STANDARD_VNOSE_FACTOR: f64 = 0.5;
/// 54" marine material roll
const MARINE_MATERIAL_WIDTH_FT: f64 = 4.5;
/// Waste allowance on the marine ordering figure only
const MARINE_ORDER_WASTE: f64 = 1.2;

fn dim(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Box truck area from box length (ft) and height (in)
pub fn box_truck_area(length_ft: f64, height_in: f64, sides: BoxTruckSides) -> f64 {
    let height_ft = dim(height_in) / 12.0;
    let side = dim(length_ft) * height_ft;

    let mut total = 0.0;
    if sides.left {
        total += side;
    }
    if sides.right {
        total += side;
    }
    if sides.rear {
        total += height_ft * BOX_TRUCK_REAR_WIDTH_FT;
    }
    total.round()
}

/// Trailer area from length and height in feet
pub fn trailer_area(
    length_ft: f64,
    height_ft: f64,
    sides: TrailerSides,
    front_coverage: FrontCoverage,
    vnose: VNose,
    vnose_height_ft: f64,
    vnose_length_ft: f64,
) -> f64 {
    let length_ft = dim(length_ft);
    let height_ft = dim(height_ft);
    let side = length_ft * height_ft;

    let mut total = 0.0;
    if sides.left {
        total += side;
    }
    if sides.right {
        total += side;
    }
    if sides.front {
        total += TRAILER_END_WIDTH_FT * height_ft * front_coverage.multiplier();
    }
    if sides.rear {
        total += TRAILER_END_WIDTH_FT * height_ft;
    }

    match vnose {
        VNose::None => {}
        VNose::HalfStandard => total += length_ft * HALF_STANDARD_VNOSE_FACTOR * 2.0,
        VNose::Custom => {
            let (h, l) = (dim(vnose_height_ft), dim(vnose_length_ft));
            if h > 0.0 && l > 0.0 {
                total += h * l * 2.0;
            }
        }
    }

    total.round()
}

/// Marine hull area and material ordering figures
pub fn marine_area(hull_length_ft: f64, hull_height_ft: f64, passes: u32, transom: bool) -> MarineArea {
    let length = dim(hull_length_ft);
    let height = dim(hull_height_ft);

    let net = length * height * 2.0;
    let linear_ft_per_side = (length * passes as f64).ceil();

    MarineArea {
        net_area: net.round(),
        with_waste: (net * MARINE_ORDER_WASTE).round(),
        linear_ft_per_side,
        total_linear_ft: linear_ft_per_side * 2.0,
        transom_area: if transom {
            (height * MARINE_MATERIAL_WIDTH_FT).round()
        } else {
            0.0
        },
    }
}

/// Vehicle area for the item's coverage
///
/// Uses the vehicle's coverage table when present, otherwise the manually
/// entered area. Roof area is added on top when requested.
pub fn vehicle_area(item: &LineItem) -> f64 {
    let base = match &item.vehicle {
        Some(data) => coverage_area(&data.areas, item.coverage),
        None => dim(item.area),
    };

    let roof = dim(item.roof_area);
    if item.include_roof && roof > 0.0 {
        base + roof
    } else {
        base
    }
}

/// Area of one coverage tier
pub fn coverage_area(areas: &CoverageTable, coverage: Coverage) -> f64 {
    dim(areas.get(coverage))
}
