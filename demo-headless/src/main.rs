use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use weight_balance_core::{
    calculate_landing, calculate_scenario, Aircraft, AircraftCatalog, CalculationResult, FuelBurn,
    LoadingScenario, WarningLevel,
};

/// Weight and balance demo over the built-in aircraft
#[derive(Parser, Debug)]
#[command(name = "wb-demo")]
#[command(about = "Weight and balance calculator demo", long_about = None)]
struct Args {
    /// Aircraft id (see --list)
    #[arg(short, long, default_value = "c172n")]
    aircraft: String,

    /// Station load in pounds, as ID=LB (repeatable)
    #[arg(short, long, value_parser = parse_assignment)]
    station: Vec<(String, f64)>,

    /// Fuel load in US gallons, as ID=GAL (repeatable)
    #[arg(short, long, value_parser = parse_assignment)]
    fuel: Vec<(String, f64)>,

    /// Fuel expected to burn before landing, as ID=GAL (repeatable)
    #[arg(short, long, value_parser = parse_assignment)]
    burn: Vec<(String, f64)>,

    /// Start from each station's default weight
    #[arg(short, long)]
    defaults: bool,

    /// List the built-in aircraft and exit
    #[arg(short, long)]
    list: bool,
}

fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{s}'"))?;
    if id.is_empty() {
        return Err(format!("missing id in '{s}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid number in '{s}': {e}"))?;
    Ok((id.trim().to_owned(), value))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();
    let catalog = AircraftCatalog::builtin();

    if args.list {
        for id in catalog.ids() {
            if let Some(aircraft) = catalog.get(id) {
                println!("{id:<10} {}", aircraft.name);
            }
        }
        return ExitCode::SUCCESS;
    }

    let Some(aircraft) = catalog.get(&args.aircraft) else {
        eprintln!(
            "Unknown aircraft '{}'; available: {}",
            args.aircraft,
            catalog.ids().join(", ")
        );
        return ExitCode::from(1);
    };

    let mut scenario = if args.defaults {
        LoadingScenario::from_defaults(&aircraft)
    } else {
        LoadingScenario::default()
    };
    for (id, weight) in &args.station {
        scenario.set_station(id, *weight);
    }
    for (id, gallons) in &args.fuel {
        scenario.set_fuel(id, *gallons);
    }
    debug!(?scenario, "Loading assembled");

    println!("=== Weight & Balance: {} ===\n", aircraft.name);

    let result = match calculate_scenario(&aircraft, &scenario) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };
    print_report(&aircraft, &result);
    let mut danger = !result.is_safe();

    if !args.burn.is_empty() {
        let burns: Vec<FuelBurn> = args
            .burn
            .iter()
            .map(|(id, gallons)| FuelBurn::new(id.as_str(), *gallons))
            .collect();

        match calculate_landing(
            &aircraft,
            &scenario.station_loads,
            &scenario.fuel_loads,
            &burns,
        ) {
            Ok(landing) => {
                println!("\n--- Landing projection ---");
                for load in &landing.fuel_loads {
                    println!("  {:<24} {:>9.1} gal", load.tank_id, *load.gallons);
                }
                println!(
                    "  Landing weight {} (limit {}, margin {})",
                    landing.result.total_weight,
                    landing.landing_weight_limit,
                    landing.landing_weight_margin
                );
                println!("  Landing CG     {}", landing.result.cg);
                print_warnings(&landing.result);
                danger |= !landing.result.is_safe();
            }
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(1);
            }
        }
    }

    if danger {
        println!("\nNOT SAFE FOR FLIGHT");
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

fn print_report(aircraft: &Aircraft, result: &CalculationResult) {
    println!(
        "  {:<24} {:>9} {:>8} {:>11}",
        "Item", "Weight", "Arm", "Moment"
    );
    println!(
        "  {:<24} {:>9.1} {:>8.2} {:>11.1}",
        "Basic empty weight",
        *aircraft.empty_weight,
        *aircraft.empty_weight_arm,
        *aircraft.empty_moment()
    );
    for detail in &result.station_details {
        println!(
            "  {:<24} {:>9.1} {:>8.2} {:>11.1}",
            detail.name, *detail.weight, *detail.arm, *detail.moment
        );
    }
    for detail in &result.fuel_details {
        let label = format!("{} ({} gal)", detail.name, *detail.gallons);
        println!(
            "  {:<24} {:>9.1} {:>8.2} {:>11.1}",
            label, *detail.weight, *detail.arm, *detail.moment
        );
    }
    println!(
        "  {:<24} {:>9.1} {:>8.2} {:>11.1}",
        "Total", *result.total_weight, *result.cg, *result.total_moment
    );

    println!();
    println!(
        "Max gross {} (margin {})",
        aircraft.max_gross_weight, result.weight_margin
    );
    match result.limits_at_weight {
        Some(limits) => println!(
            "CG limits at this weight: {} to {}",
            limits.forward, limits.aft
        ),
        None => println!(
            "CG limits at this weight: outside envelope (range {} to {})",
            aircraft.cg_range.forward, aircraft.cg_range.aft
        ),
    }
    println!(
        "Within gross: {}  Within envelope: {}  Stations within limits: {}",
        yes_no(result.is_within_weight_limit),
        yes_no(result.is_within_cg_envelope),
        yes_no(result.is_within_all_station_limits)
    );

    print_warnings(result);
}

fn print_warnings(result: &CalculationResult) {
    if result.warnings.is_empty() {
        println!("\nNo warnings");
        return;
    }

    println!("\nWarnings:");
    for warning in result.warnings_by_severity() {
        let marker = match warning.level {
            WarningLevel::Danger => "!!",
            WarningLevel::Warning => " !",
            WarningLevel::Caution => "  ",
        };
        println!("{marker} {warning}");
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "NO"
    }
}
