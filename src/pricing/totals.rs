//! Quote aggregation

use crate::core::{LineItem, LineItemCalc, QuoteTotals};

/// Sum the non-optional items into blended totals
///
/// `price` supplies each item's result; optional items are counted but never priced.
pub(crate) fn blend<F>(items: &[LineItem], mut price: F) -> QuoteTotals
where
    F: FnMut(&LineItem) -> LineItemCalc,
{
    let mut totals = QuoteTotals::default();

    for item in items {
        if item.optional {
            totals.optional_items += 1;
            continue;
        }

        let calc = price(item);
        totals.revenue += calc.sale_price;
        totals.material += calc.material_cost;
        totals.labor += calc.labor;
        totals.design += calc.design;
        totals.counted_items += 1;
    }

    totals.cogs = totals.material + totals.labor + totals.design;
    totals.profit = totals.revenue - totals.cogs;
    totals.blended_gpm = if totals.revenue > 0.0 {
        totals.profit / totals.revenue * 100.0
    } else {
        0.0
    };

    totals
}
