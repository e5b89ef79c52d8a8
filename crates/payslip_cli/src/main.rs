//! CLI entry point for inspecting period rules and plant configuration.
//!
//! # Responsibility
//! - Verify `payslip_core` linkage and registry files from a terminal.
//! - Keep output deterministic for a given `--date`.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use payslip_core::{
    core_version, default_previous_period, init_logging, list_available_months,
    list_financial_years, FinancialYear, MonthName, PeriodSelection, PlantRegistry,
    DEFAULT_START_YEAR,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "payslip", version, about = "Payroll period and plant inspector")]
struct Cli {
    /// Absolute directory for rolling log files; logging stays off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List selectable financial years and months for a reference date
    Periods(PeriodsArgs),
    /// List configured plants and their financial years
    Plants(RegistryArgs),
    /// Resolve one month to its document source
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
struct PeriodsArgs {
    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// First financial year offered
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    start_year: i32,
}

#[derive(Args, Debug)]
struct RegistryArgs {
    /// JSON plant registry; the built-in plants are used when omitted
    #[arg(long)]
    registry: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    #[command(flatten)]
    registry: RegistryArgs,

    #[arg(long)]
    plant: String,

    /// Financial year label, e.g. 2024-25
    #[arg(long)]
    financial_year: FinancialYear,

    /// Month name, e.g. June
    #[arg(long)]
    month: MonthName,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(payslip_core::default_log_level(), log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Periods(args) => print_periods(&args),
        Command::Plants(args) => {
            let registry = load_registry(&args)?;
            for name in registry.plant_names() {
                let years = registry
                    .get(name)
                    .map(|plant| plant.configured_years())
                    .unwrap_or_default();
                let labels: Vec<String> = years.iter().map(|year| year.label()).collect();
                println!("{name}: {}", display_list(&labels));
            }
            Ok(())
        }
        Command::Resolve(args) => {
            let registry = load_registry(&args.registry)?;
            let selection = PeriodSelection::new(args.month, args.financial_year);
            let resolved = registry.resolve(&args.plant, &selection)?;
            println!(
                "{} {} ({}) -> source={} drive={}",
                resolved.month(),
                resolved.calendar_year(),
                resolved.financial_year(),
                resolved.document_source_id(),
                resolved.drive_id()
            );
            Ok(())
        }
    }
}

fn print_periods(args: &PeriodsArgs) -> Result<(), Box<dyn Error>> {
    let reference_date = args.date.unwrap_or_else(|| Local::now().date_naive());
    println!("payslip_core version={}", core_version());
    println!("reference date: {reference_date}");

    let default = default_previous_period(reference_date);
    println!(
        "default period: {} {}",
        default.month, default.financial_year
    );

    for year in list_financial_years(reference_date, args.start_year) {
        let months: Vec<String> = list_available_months(year, reference_date)
            .iter()
            .map(|month| month.to_string())
            .collect();
        println!("{year}: {}", display_list(&months));
    }
    Ok(())
}

fn load_registry(args: &RegistryArgs) -> Result<PlantRegistry, Box<dyn Error>> {
    match &args.registry {
        Some(path) => Ok(PlantRegistry::from_json_file(path)?),
        None => Ok(PlantRegistry::builtin()),
    }
}

fn display_list(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}
