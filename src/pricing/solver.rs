//! Cost model and margin solver

use crate::core::LaborMode;

/// Waste buffer applied to every material cost
pub const WASTE_BUFFER: f64 = 1.12;

/// A money or rate input as a usable amount: non-finite or negative is 0
pub(crate) fn amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Material cost for an area at a given rate, including the waste buffer
pub fn material_cost(area: f64, rate: f64) -> f64 {
    (amount(area) * amount(rate) * WASTE_BUFFER).round()
}

/// Share of the sale price left to cover material and design (and flat labor)
///
/// Percentage mode: `1 - gpm - labor%`. Flat mode: `1 - gpm`.
pub fn solver_denominator(labor_mode: LaborMode, target_gpm: f64, labor_pct: f64) -> f64 {
    match labor_mode {
        LaborMode::Percentage => 1.0 - (target_gpm + labor_pct) / 100.0,
        LaborMode::Flat => 1.0 - target_gpm / 100.0,
    }
}

/// Whether a margin target can be met under the given labor terms
pub fn is_feasible(labor_mode: LaborMode, target_gpm: f64, labor_pct: f64) -> bool {
    solver_denominator(labor_mode, target_gpm, labor_pct) > 0.0
}

/// Sale price that yields `target_gpm` after material, design and labor
///
/// Returns 0 when the target is unreachable (denominator <= 0).
pub fn solve_sale_price(
    material_cost: f64,
    design_fee: f64,
    labor_mode: LaborMode,
    labor_pct: f64,
    labor_flat: f64,
    target_gpm: f64,
) -> f64 {
    let denom = solver_denominator(labor_mode, target_gpm, labor_pct);
    // also catches NaN
    if !(denom > 0.0) {
        log::warn!(
            "Target margin {}% is unreachable with labor {:?} {}%, sale price forced to 0",
            target_gpm,
            labor_mode,
            labor_pct
        );
        return 0.0;
    }

    let numerator = match labor_mode {
        LaborMode::Percentage => material_cost + design_fee,
        LaborMode::Flat => material_cost + design_fee + labor_flat,
    };

    (numerator / denom).round().max(0.0)
}
