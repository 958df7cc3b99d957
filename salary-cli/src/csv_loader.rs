//! CSV loader for batch salary inputs.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive; values are trimmed, and enum values are matched
//! without regard to case.
//!
//! | Column                  | Required | Type    | Notes                                          |
//! |-------------------------|----------|---------|------------------------------------------------|
//! | `year`                  | yes      | integer | e.g. `2025`                                    |
//! | `gross_amount`          | yes      | decimal | e.g. `5000.00`                                 |
//! | `period`                | yes      | string  | `monthly` or `yearly`                          |
//! | `tax_class`             | yes      | integer | `1` to `6`                                     |
//! | `federal_state`         | yes      | string  | Two-letter code, e.g. `BE`                     |
//! | `church_member`         | yes      | bool    | `true` or `false`                              |
//! | `children_count`        | yes      | integer | `0` or more                                    |
//! | `annual_allowance`      | no       | decimal | Leave cell empty for none                      |
//! | `health_insurance_type` | yes      | string  | `statutory` or `private`                       |
//! | `health_insurance_rate` | no       | decimal | Required for `private`                         |
//! | `pension_region`        | no       | string  | `West`, `East` or `None`; empty uses the state's region |
//!
//! ### Minimal example
//!
//! ```csv
//! year,gross_amount,period,tax_class,federal_state,church_member,children_count,health_insurance_type
//! 2025,5000.00,monthly,1,BE,false,0,statutory
//! ```
use std::fmt::Write as _;
use std::path::Path;

use rust_decimal::Decimal;
use salary_core::{SalaryInput, ValidationError, validate};
use serde::Deserialize;

use crate::utils::{
    parse_federal_state, parse_health_insurance_type, parse_pension_region, parse_period,
    parse_tax_class,
};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    year: i32,
    gross_amount: Decimal,
    period: String,
    tax_class: String,
    federal_state: String,
    church_member: bool,
    children_count: u32,
    #[serde(default)]
    annual_allowance: Option<Decimal>,
    health_insurance_type: String,
    #[serde(default)]
    health_insurance_rate: Option<Decimal>,
    #[serde(default)]
    pension_region: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
///
/// Row numbers are 1-based; the header is row 0.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read CSV file: {0}")]
    Io(#[from] std::io::Error),

    /// A text cell held a value that is not one of the recognised literals.
    #[error("invalid {column} on row {row}: {reason}")]
    InvalidValue {
        column: &'static str,
        row: usize,
        reason: String,
    },

    /// The row converted cleanly but failed request validation.
    #[error("row {row} failed validation: {}", join_issues(.issues))]
    Invalid {
        row: usize,
        issues: Vec<ValidationError>,
    },
}

fn join_issues(issues: &[ValidationError]) -> String {
    let mut out = String::new();
    for (i, issue) in issues.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "{issue}");
    }
    out
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn cell<T>(
    column: &'static str,
    row: usize,
    parsed: Result<T, String>,
) -> Result<T, CsvLoadError> {
    parsed.map_err(|reason| CsvLoadError::InvalidValue {
        column,
        row,
        reason,
    })
}

/// Convert a single CSV row into a validated SalaryInput.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<SalaryInput, CsvLoadError> {
    let federal_state = cell(
        "federal_state",
        row_number,
        parse_federal_state(&row.federal_state),
    )?;
    let pension_region = match row.pension_region.as_deref().map(str::trim) {
        None | Some("") => federal_state.pension_region(),
        Some(region) => cell("pension_region", row_number, parse_pension_region(region))?,
    };

    let input = SalaryInput {
        year: row.year,
        gross_amount: row.gross_amount,
        period: cell("period", row_number, parse_period(&row.period))?,
        tax_class: cell("tax_class", row_number, parse_tax_class(&row.tax_class))?,
        federal_state,
        church_member: row.church_member,
        children_count: row.children_count,
        annual_allowance: row.annual_allowance,
        health_insurance_type: cell(
            "health_insurance_type",
            row_number,
            parse_health_insurance_type(&row.health_insurance_type),
        )?,
        health_insurance_rate: row.health_insurance_rate,
        pension_region,
    };

    validate(&input).map_err(|issues| CsvLoadError::Invalid {
        row: row_number,
        issues,
    })?;

    Ok(input)
}

/// Parse CSV text (the full file contents as a &str) and return one
/// validated [`SalaryInput`] per row, in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [`CsvLoadError::InvalidValue`] if a row holds an unknown period, tax
///   class, state, insurance type or pension region.
/// * [`CsvLoadError::Invalid`] if a row fails validation.
pub fn load_from_str(input: &str) -> Result<Vec<SalaryInput>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            let row_number = idx + 1; // 1-based for user-facing messages
            convert_row(row, row_number)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<SalaryInput>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
