use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use salary_cli::app::{self, OutputFormat};
use salary_cli::logging;
use salary_cli::utils::{
    parse_decimal, parse_federal_state, parse_health_insurance_type, parse_pension_region,
    parse_period, parse_tax_class,
};
use salary_core::{
    DEFAULT_TAX_YEAR, FederalState, HealthInsuranceType, PensionRegion, SalaryInput, SalaryPeriod,
    TaxClass,
};

/// Exit status for a request rejected by validation.
const EXIT_INVALID_INPUT: u8 = 2;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// German net-salary estimator.
///
/// Computes income tax, solidarity surcharge, church tax and employee
/// social-insurance contributions for a gross salary.
#[derive(Debug, Parser)]
#[command(name = "salary-calc", version)]
struct Cli {
    /// CSV file with additional or replacement tax years.
    #[arg(long, global = true)]
    tax_years: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Append log output to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute one salary from command-line flags.
    Compute(ComputeArgs),

    /// Answer a JSON request read from a file or stdin.
    Request {
        /// Request file; stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Compute every row of a CSV file.
    Batch {
        #[arg(long)]
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the configured tax years.
    Years,
}

#[derive(Debug, Args)]
struct ComputeArgs {
    /// Gross salary for the chosen period.
    #[arg(long, value_parser = parse_decimal)]
    gross: Decimal,

    #[arg(long, default_value_t = DEFAULT_TAX_YEAR)]
    year: i32,

    /// `monthly` or `yearly`.
    #[arg(long, default_value = "monthly", value_parser = parse_period)]
    period: SalaryPeriod,

    /// Tax class 1 to 6.
    #[arg(long, default_value = "1", value_parser = parse_tax_class)]
    tax_class: TaxClass,

    /// Two-letter federal state code, e.g. `BE`.
    #[arg(long, value_parser = parse_federal_state)]
    state: FederalState,

    #[arg(long)]
    church: bool,

    #[arg(long, default_value_t = 0)]
    children: u32,

    /// Additional annual tax-free allowance.
    #[arg(long, value_parser = parse_decimal)]
    allowance: Option<Decimal>,

    /// `statutory` or `private`.
    #[arg(long, default_value = "statutory", value_parser = parse_health_insurance_type)]
    health_insurance: HealthInsuranceType,

    /// Employee health rate in percent; required for private insurance.
    #[arg(long, value_parser = parse_decimal)]
    health_rate: Option<Decimal>,

    /// `West`, `East` or `None`; defaults to the state's region.
    #[arg(long, value_parser = parse_pension_region)]
    pension_region: Option<PensionRegion>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ComputeArgs {
    fn to_input(&self) -> SalaryInput {
        SalaryInput {
            year: self.year,
            gross_amount: self.gross,
            period: self.period,
            tax_class: self.tax_class,
            federal_state: self.state,
            church_member: self.church,
            children_count: self.children,
            annual_allowance: self.allowance,
            health_insurance_type: self.health_insurance,
            health_insurance_rate: self.health_rate,
            pension_region: self
                .pension_region
                .unwrap_or_else(|| self.state.pension_region()),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let table = app::build_table(cli.tax_years.as_deref())?;

    match cli.command {
        Command::Compute(args) => {
            let input = args.to_input();
            debug!(?input, "computing from flags");
            println!("{}", app::compute(&table, &input, args.format)?);
        }
        Command::Request { file } => {
            let body = match &file {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read: {}", path.display()))?,
                None => {
                    let mut body = String::new();
                    io::stdin()
                        .read_to_string(&mut body)
                        .context("Failed to read request from stdin")?;
                    body
                }
            };

            let (response, rejected) = app::request(&table, &body)?;
            println!("{response}");
            if rejected {
                return Ok(ExitCode::from(EXIT_INVALID_INPUT));
            }
        }
        Command::Batch { file, format } => {
            print!("{}", app::batch(&table, &file, format)?);
        }
        Command::Years => {
            print!("{}", salary_cli::report::render_years(&table));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_file.as_deref())?;

    run(cli)
}
