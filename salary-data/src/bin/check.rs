use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use salary_core::TaxYearTable;
use salary_data::TaxYearConfigLoader;

/// Validate a tax-year CSV file and list the resulting year table.
///
/// The CSV file has one row per tax year with the columns tax_year,
/// basic_allowance, bracket_end_1..3, zone1_factor, zone1_offset,
/// zone2_factor, zone2_offset, zone2_base_tax, zone3_factor, zone3_offset,
/// solidarity_free_limit, contribution_cap_health,
/// contribution_cap_pension_west and contribution_cap_pension_east (may be
/// empty).
#[derive(Parser, Debug)]
#[command(name = "salary-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing tax-year data
    #[arg(short, long)]
    file: PathBuf,

    /// Build a table from the file alone, falling back to this year.
    /// Without it the file extends the bundled years.
    #[arg(short, long)]
    default_year: Option<i32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = TaxYearConfigLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let table = match args.default_year {
        Some(default_year) => TaxYearConfigLoader::build_table(&records, default_year)
            .context("Failed to build tax-year table")?,
        None => {
            let mut table = TaxYearTable::builtin();
            TaxYearConfigLoader::load(&mut table, &records)
                .context("Failed to load tax years into the bundled table")?;
            table
        }
    };

    println!(
        "{:>6}  {:>12}  {:>12}  {:>12}  {:>12}",
        "year", "allowance", "soli limit", "health cap", "pension cap"
    );
    for year in table.years() {
        let Some(config) = table.get(year) else {
            continue;
        };
        let marker = if year == table.default_year() { " (default)" } else { "" };
        println!(
            "{:>6}  {:>12}  {:>12}  {:>12}  {:>12}{}",
            year,
            config.basic_allowance,
            config.solidarity_free_limit,
            config.contribution_cap_health,
            config.contribution_cap_pension_west,
            marker
        );
    }

    Ok(())
}
