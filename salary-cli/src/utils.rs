use rust_decimal::Decimal;
use salary_core::{FederalState, HealthInsuranceType, PensionRegion, SalaryPeriod, TaxClass};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    normalize_decimal_input(s)
        .parse()
        .map_err(|e| ParseDecimalError {
            input: s.to_string(),
            source: e,
        })
}

/// Parses a string into an optional [`Decimal`].
///
/// Returns `None` for empty or whitespace-only input.
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    if s.trim().is_empty() {
        Ok(None)
    } else {
        parse_decimal(s).map(Some)
    }
}

/// Formats an amount with exactly two decimal places.
pub fn format_amount(d: Decimal) -> String {
    format!("{:.2}", d)
}

// ─── argument parsers ────────────────────────────────────────────────────────

pub fn parse_federal_state(s: &str) -> Result<FederalState, String> {
    FederalState::parse(&s.trim().to_ascii_uppercase()).ok_or_else(|| {
        let codes: Vec<_> = FederalState::ALL.iter().map(|state| state.code()).collect();
        format!("unknown federal state '{s}', expected one of {}", codes.join(", "))
    })
}

pub fn parse_tax_class(s: &str) -> Result<TaxClass, String> {
    s.trim()
        .parse::<u8>()
        .ok()
        .and_then(TaxClass::from_number)
        .ok_or_else(|| format!("tax class must be a number from 1 to 6, got '{s}'"))
}

pub fn parse_period(s: &str) -> Result<SalaryPeriod, String> {
    SalaryPeriod::parse(&s.trim().to_ascii_lowercase())
        .ok_or_else(|| format!("period must be 'monthly' or 'yearly', got '{s}'"))
}

pub fn parse_health_insurance_type(s: &str) -> Result<HealthInsuranceType, String> {
    HealthInsuranceType::parse(&s.trim().to_ascii_lowercase())
        .ok_or_else(|| format!("health insurance type must be 'statutory' or 'private', got '{s}'"))
}

/// Accepts `West`, `East` or `None` in any letter case.
pub fn parse_pension_region(s: &str) -> Result<PensionRegion, String> {
    let normalized = match s.trim().to_ascii_lowercase().as_str() {
        "west" => "West",
        "east" => "East",
        "none" => "None",
        _ => "",
    };
    PensionRegion::parse(normalized)
        .ok_or_else(|| format!("pension region must be 'West', 'East' or 'None', got '{s}'"))
}
