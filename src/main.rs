//! Wrap Estimator - Main entry point
//!
//! Command line front-end for pricing quote files, estimating areas and
//! inspecting the catalog and configuration.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use wrap_estimator_lib::core::{
    BoxTruckSides, BoxTruckSpec, Config, FrontCoverage, LineItem, MarineSpec, TrailerSides, VNose,
};
use wrap_estimator_lib::geometry;
use wrap_estimator_lib::pricing::PricingEngine;
use wrap_estimator_lib::quote::Quote;

#[derive(Parser)]
#[command(name = "wrap-estimator")]
#[command(author, version, about = "Price wrap, graphics and PPF quotes")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: <config dir>/wrap-estimator/config.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Price every line item of a quote file (JSON or TOML)
    Quote(QuoteArgs),

    /// Estimate the area of a surface without pricing it
    #[command(subcommand)]
    Area(AreaCommands),

    /// List the reference catalog
    Catalog,

    /// Configuration file management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args)]
struct QuoteArgs {
    /// Quote file; `.toml` is read as TOML, anything else as JSON
    file: PathBuf,

    /// Print the priced quote and totals as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum AreaCommands {
    /// Box truck sides and rear door
    BoxTruck {
        /// Box length in feet
        #[arg(long)]
        length: f64,
        /// Box height in inches
        #[arg(long, default_value_t = 96.0)]
        height: f64,
        #[arg(long, value_enum, value_delimiter = ',', default_values = ["left", "right"])]
        sides: Vec<BoxSide>,
    },

    /// Trailer sides, ends and V-nose
    Trailer {
        /// Length in feet
        #[arg(long)]
        length: f64,
        /// Height in feet
        #[arg(long)]
        height: f64,
        #[arg(long, value_enum, value_delimiter = ',', default_values = ["left", "right"])]
        sides: Vec<TrailerSide>,
        #[arg(long, value_enum, default_value = "full")]
        front_coverage: FrontArg,
        #[arg(long, value_enum, default_value = "none")]
        vnose: VNoseArg,
        /// Custom V-nose height in feet
        #[arg(long, default_value_t = 0.0)]
        vnose_height: f64,
        /// Custom V-nose length in feet
        #[arg(long, default_value_t = 0.0)]
        vnose_length: f64,
    },

    /// Marine hull with material ordering figures
    Marine {
        /// Hull length in feet
        #[arg(long)]
        length: f64,
        /// Hull height in feet
        #[arg(long)]
        height: f64,
        /// Material passes per side
        #[arg(long, default_value_t = 2)]
        passes: u32,
        /// Include the transom
        #[arg(long)]
        transom: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a configuration file with the built-in defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BoxSide {
    Left,
    Right,
    Rear,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TrailerSide {
    Left,
    Right,
    Front,
    Rear,
}

#[derive(Clone, Copy, ValueEnum)]
enum FrontArg {
    Full,
    ThreeQuarter,
    Half,
}

impl From<FrontArg> for FrontCoverage {
    fn from(arg: FrontArg) -> Self {
        match arg {
            FrontArg::Full => FrontCoverage::Full,
            FrontArg::ThreeQuarter => FrontCoverage::ThreeQuarter,
            FrontArg::Half => FrontCoverage::Half,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum VNoseArg {
    None,
    HalfStandard,
    Custom,
}

impl From<VNoseArg> for VNose {
    fn from(arg: VNoseArg) -> Self {
        match arg {
            VNoseArg::None => VNose::None,
            VNoseArg::HalfStandard => VNose::HalfStandard,
            VNoseArg::Custom => VNose::Custom,
        }
    }
}

fn init_logging(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path().context("Could not resolve the configuration path"),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands must work even when the file is broken
    if let Commands::Config(cmd) = &cli.command {
        init_logging("info");
        return run_config(cmd, cli.config.as_deref());
    }

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.general.log_level);
    log::debug!("Starting Wrap Estimator v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Quote(args) => {
            let engine = PricingEngine::from_config(&config).context("Invalid catalog in configuration")?;
            run_quote(args, &engine, &config)
        }
        Commands::Area(cmd) => {
            run_area(cmd);
            Ok(())
        }
        Commands::Catalog => {
            let engine = PricingEngine::from_config(&config).context("Invalid catalog in configuration")?;
            print_catalog(&engine, &config.general.currency_symbol);
            Ok(())
        }
        Commands::Config(_) => Ok(()),
    }
}

fn run_config(cmd: &ConfigCommands, explicit: Option<&Path>) -> Result<()> {
    let path = config_path(explicit)?;

    match cmd {
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Show => {
            let config = load_config(explicit)?;
            let content = toml::to_string_pretty(&config).context("Failed to serialise config")?;
            print!("{}", content);
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            Config::default()
                .save_to(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

fn run_quote(args: &QuoteArgs, engine: &PricingEngine, config: &Config) -> Result<()> {
    let quote = Quote::load(&args.file, engine)
        .with_context(|| format!("Failed to load quote {}", args.file.display()))?;
    let totals = quote.totals(engine);

    if args.json {
        let output = serde_json::json!({
            "quote": quote,
            "totals": totals,
            "margin_band": engine.margin_band(totals.blended_gpm),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let sym = &config.general.currency_symbol;
    let title = if quote.name.is_empty() { "Quote" } else { quote.name.as_str() };
    println!("{}\n", title);
    println!(
        "  {:<24} {:<10} {:>7} {:>10} {:>9} {:>8} {:>7} {:>10} {:>6}  {}",
        "Item", "Type", "Sq ft", "Price", "Material", "Labor", "Design", "Profit", "GPM", "Source"
    );
    println!("  {}", "-".repeat(112));

    for item in quote.items() {
        print_item(item, sym);
    }

    println!("  {}", "-".repeat(112));
    println!(
        "  {} counted, {} optional",
        totals.counted_items, totals.optional_items
    );
    println!("  Revenue:  {}{:.2}", sym, totals.revenue);
    println!("  COGS:     {}{:.2}  (material {:.2}, labor {:.2}, design {:.2})",
        sym, totals.cogs, totals.material, totals.labor, totals.design);
    println!("  Profit:   {}{:.2}", sym, totals.profit);
    println!(
        "  Margin:   {:.1}% ({})",
        totals.blended_gpm,
        engine.margin_band(totals.blended_gpm).label()
    );

    Ok(())
}

fn print_item(item: &LineItem, sym: &str) {
    let Some(calc) = item.calc else {
        return;
    };
    let mut name = if item.name.is_empty() {
        item.product_type.label().to_string()
    } else {
        item.name.clone()
    };
    if item.optional {
        name = format!("({})", name);
    }
    if name.chars().count() > 24 {
        name = name.chars().take(23).collect::<String>() + "~";
    }

    println!(
        "  {:<24} {:<10} {:>7.0} {:>10} {:>9.0} {:>8.0} {:>7.0} {:>10} {:>5.1}%  {:?}",
        name,
        item.product_type.label(),
        calc.area,
        format!("{}{:.0}", sym, calc.sale_price),
        calc.material_cost,
        calc.labor,
        calc.design,
        format!("{}{:.0}", sym, calc.profit),
        calc.gpm,
        calc.source,
    );
}

fn run_area(cmd: &AreaCommands) {
    match cmd {
        AreaCommands::BoxTruck { length, height, sides } => {
            let spec = BoxTruckSpec {
                length_ft: *length,
                height_in: *height,
                sides: BoxTruckSides {
                    left: sides.contains(&BoxSide::Left),
                    right: sides.contains(&BoxSide::Right),
                    rear: sides.contains(&BoxSide::Rear),
                },
                cab: false,
            };
            let area = geometry::box_truck_area(spec.length_ft, spec.effective_height_in(), spec.sides);
            println!("{:.0} sq ft", area);
        }
        AreaCommands::Trailer {
            length,
            height,
            sides,
            front_coverage,
            vnose,
            vnose_height,
            vnose_length,
        } => {
            let sides = TrailerSides {
                left: sides.contains(&TrailerSide::Left),
                right: sides.contains(&TrailerSide::Right),
                front: sides.contains(&TrailerSide::Front),
                rear: sides.contains(&TrailerSide::Rear),
            };
            let area = geometry::trailer_area(
                *length,
                *height,
                sides,
                (*front_coverage).into(),
                (*vnose).into(),
                *vnose_height,
                *vnose_length,
            );
            println!("{:.0} sq ft", area);
        }
        AreaCommands::Marine { length, height, passes, transom } => {
            let spec = MarineSpec {
                hull_length_ft: *length,
                hull_height_ft: *height,
                passes: *passes,
                transom: *transom,
            };
            let area = geometry::marine_area(
                spec.hull_length_ft,
                spec.hull_height_ft,
                spec.effective_passes(),
                spec.transom,
            );
            println!("Net area:          {:.0} sq ft", area.net_area);
            println!("With waste:        {:.0} sq ft", area.with_waste);
            println!("Linear ft / side:  {:.0}", area.linear_ft_per_side);
            println!("Total linear ft:   {:.0}", area.total_linear_ft);
            if *transom {
                println!("Transom:           {:.0} sq ft", area.transom_area);
            }
            println!("Priced area:       {:.0} sq ft", area.pricing_area());
        }
    }
}

fn print_catalog(engine: &PricingEngine, sym: &str) {
    let catalog = engine.catalog();

    println!("Materials");
    for m in catalog.materials() {
        println!("  {:<16} {:<28} {}{:.2}/sq ft", m.id, m.name, sym, m.rate);
    }

    println!("\nVan pricing (full / 3/4 / half)");
    for (size, prices) in catalog.van_pricing() {
        println!(
            "  {:<16} {}{:.0} / {}{:.0} / {}{:.0}",
            size, sym, prices.full, sym, prices.three_quarter, sym, prices.half
        );
    }

    println!("\nPPF kits");
    for k in catalog.ppf_kits() {
        println!(
            "  {:<16} {:<24} {}{:.0}  (material {}{:.2}, {:.1} yd)",
            k.id, k.name, sym, k.sale_price, sym, k.material_cost, k.yards
        );
    }

    println!("\nInstall rates");
    for r in catalog.install_rates() {
        println!("  {:<20} {}{:.0}  ({:.0} h)", r.name, sym, r.pay, r.hours);
    }
}
