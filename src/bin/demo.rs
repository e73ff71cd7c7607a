//! Wrap Estimator - Demo CLI
//!
//! Builds a sample fleet quote with one item of each kind and prints the
//! priced breakdown, then walks through a few edits.

use wrap_estimator_lib::core::{
    BoxTruckSpec, Coverage, LineItemDefaults, MarginConfig, MarineSpec, ProductType, TrailerSpec,
    VNose,
};
use wrap_estimator_lib::catalog::Catalog;
use wrap_estimator_lib::pricing::PricingEngine;
use wrap_estimator_lib::quote::Quote;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("==============================================");
    println!("   Wrap Estimator - Demo CLI");
    println!("==============================================\n");

    // 1. Engine over the built-in catalog
    println!("[1/3] Initializing Pricing Engine...");
    let engine = PricingEngine::new(
        Catalog::builtin(),
        LineItemDefaults::default(),
        MarginConfig::default(),
    );
    let d = engine.defaults();
    println!("      Material:  {} @ ${:.2}/sq ft", d.material_id, d.material_rate);
    println!("      Target:    {:.0}% GPM, labor {:.0}%\n", d.target_gpm, d.labor_pct);

    // 2. Build the quote
    println!("[2/3] Building sample quote...\n");
    let mut quote = Quote::new("Acme Plumbing fleet");

    let mut van = engine.new_line_item(ProductType::Vehicle, "Ford Transit 250");
    engine.assign_vehicle_tier(&mut van, "large_van");
    van.coverage = Coverage::ThreeQuarter;
    quote.add_item(&engine, van);

    let mut car = engine.new_line_item(ProductType::Vehicle, "Honda Civic");
    engine.assign_vehicle_tier(&mut car, "med_car");
    car.include_roof = true;
    quote.add_item(&engine, car);

    let mut truck = engine.new_line_item(ProductType::BoxTruck, "Isuzu NPR 20ft");
    truck.box_truck = Some(BoxTruckSpec {
        length_ft: 20.0,
        cab: true,
        ..Default::default()
    });
    let truck_id = quote.add_item(&engine, truck);

    let mut trailer = engine.new_line_item(ProductType::Trailer, "Enclosed cargo trailer");
    trailer.trailer = Some(TrailerSpec {
        length_ft: 24.0,
        height_ft: 7.0,
        vnose: VNose::HalfStandard,
        ..Default::default()
    });
    quote.add_item(&engine, trailer);

    let mut boat = engine.new_line_item(ProductType::Marine, "Center console 30ft");
    boat.marine = Some(MarineSpec {
        hull_length_ft: 30.0,
        hull_height_ft: 4.0,
        transom: true,
        ..Default::default()
    });
    engine.apply_install_rate(&mut boat, "Boat Hull");
    quote.add_item(&engine, boat);

    let mut ppf = engine.new_line_item(ProductType::Ppf, "Owner's truck front end");
    ppf.ppf_selected = vec!["full_hood".to_string(), "front_fenders".to_string(), "mirrors".to_string()];
    let ppf_id = quote.add_item(&engine, ppf);
    quote.set_optional(&engine, &ppf_id, true);

    let mut decals = engine.new_line_item(ProductType::Signage, "Door decals");
    decals.area = 12.0;
    quote.add_item(&engine, decals);

    print_quote(&quote, &engine);

    // 3. Edits reprice immediately
    println!("[3/3] Editing the quote...\n");

    if let Some(calc) = quote.update_item(&engine, &truck_id, |item| item.set_manual_price(5500.0)) {
        println!("      Box truck manual price: ${:.0} ({:.1}% GPM)", calc.sale_price, calc.gpm);
    }
    if let Some(copy) = quote.duplicate_item(&truck_id) {
        println!("      Duplicated box truck as {}", copy);
    }
    quote.set_optional(&engine, &ppf_id, false);
    println!("      PPF package now included\n");

    print_quote(&quote, &engine);

    println!("==============================================");
    println!("   Demo complete");
    println!("==============================================\n");
}

fn print_quote(quote: &Quote, engine: &PricingEngine) {
    println!("  {}", quote.name);
    println!("----------------------------------------------------------------------");
    println!("  Item                        |  Price  |  COGS   |  GPM   | Source");
    println!("----------------------------------------------------------------------");

    for item in quote.items() {
        let Some(calc) = item.calc else { continue };
        let marker = if item.optional { "*" } else { " " };
        println!(
            " {}{:<28} | {:>7.0} | {:>7.0} | {:>5.1}% | {:?}",
            marker, item.name, calc.sale_price, calc.cogs, calc.gpm, calc.source
        );
    }

    let totals = quote.totals(engine);
    println!("----------------------------------------------------------------------");
    println!("  * optional, not included in totals\n");
    println!("  Revenue:  ${:.2}", totals.revenue);
    println!("  COGS:     ${:.2}", totals.cogs);
    println!("  Profit:   ${:.2}", totals.profit);
    println!(
        "  Margin:   {:.1}% ({})\n",
        totals.blended_gpm,
        engine.margin_band(totals.blended_gpm).label()
    );
}
