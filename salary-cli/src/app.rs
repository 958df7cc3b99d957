//! Command implementations shared by the `salary-calc` binary and its tests.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use salary_core::{NetSalaryCalculator, SalaryInput, TaxYearTable, validate};
use salary_data::TaxYearConfigLoader;
use tracing::{debug, info};

use crate::csv_loader;
use crate::report;
use crate::request::{self, RequestOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// The bundled years, extended by `tax_years` when given.
pub fn build_table(tax_years: Option<&Path>) -> Result<TaxYearTable> {
    let mut table = TaxYearTable::builtin();

    if let Some(path) = tax_years {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = TaxYearConfigLoader::parse(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let loaded = TaxYearConfigLoader::load(&mut table, &records)
            .with_context(|| format!("Failed to load tax years from: {}", path.display()))?;
        info!(loaded, path = %path.display(), "loaded tax years");
    }

    debug!(years = ?table.years(), default = table.default_year(), "tax-year table ready");
    Ok(table)
}

/// Validates and computes a single input.
///
/// # Errors
///
/// Fails with every validation issue if `input` is rejected; the calculator
/// is not run in that case.
pub fn compute(
    table: &TaxYearTable,
    input: &SalaryInput,
    format: OutputFormat,
) -> Result<String> {
    if let Err(issues) = validate(input) {
        let listed: Vec<String> = issues.iter().map(ToString::to_string).collect();
        bail!("invalid input: {}", listed.join("; "));
    }

    let result = NetSalaryCalculator::new(table).compute(input);

    match format {
        OutputFormat::Table => Ok(report::render_result(input, &result)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&result).context("Failed to serialize result")
        }
    }
}

/// Handles one JSON request body. Returns the response body and whether the
/// request was rejected.
pub fn request(
    table: &TaxYearTable,
    body: &str,
) -> Result<(String, bool)> {
    let calculator = NetSalaryCalculator::new(table);
    let outcome: RequestOutcome = request::handle_request(&calculator, body);
    let json = outcome.to_json().context("Failed to serialize response")?;

    Ok((json, outcome.is_rejected()))
}

/// Computes every row of a batch CSV file.
pub fn batch(
    table: &TaxYearTable,
    path: &Path,
    format: OutputFormat,
) -> Result<String> {
    let inputs = csv_loader::load_from_file(path)
        .with_context(|| format!("Failed to load batch file: {}", path.display()))?;
    info!(rows = inputs.len(), "computing batch");

    let calculator = NetSalaryCalculator::new(table);
    let rows: Vec<_> = inputs
        .into_iter()
        .map(|input| {
            let result = calculator.compute(&input);
            (input, result)
        })
        .collect();

    match format {
        OutputFormat::Table => Ok(report::render_batch(&rows)),
        OutputFormat::Json => {
            let results: Vec<_> = rows.iter().map(|(_, result)| result).collect();
            serde_json::to_string_pretty(&results).context("Failed to serialize results")
        }
    }
}
