//! Request validation.
//!
//! Range and cross-field checks that the type system cannot express. Enum
//! literals (period, tax class, state, insurance type, region) are already
//! enforced by deserialization. [`validate`] reports every problem it
//! finds, not just the first.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{HealthInsuranceType, SalaryInput};

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;
pub const MAX_HEALTH_INSURANCE_RATE: Decimal = dec!(20);
/// Largest accepted gross amount for either period, and largest annual
/// allowance. Keeps the annual figure and every intermediate product inside
/// `Decimal` range.
pub const MAX_GROSS_AMOUNT: Decimal = dec!(1000000000000000);

/// A single rejected field, named by its wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Checks `input` before it is handed to the calculator.
///
/// # Errors
///
/// Returns every [`ValidationError`] found:
/// - `year` outside [2000, 2100]
/// - `grossAmount` zero, negative or above [`MAX_GROSS_AMOUNT`]
/// - `annualAllowance` negative or above [`MAX_GROSS_AMOUNT`]
/// - `healthInsuranceRate` outside [0, 20]
/// - `healthInsuranceRate` missing or zero for private insurance
pub fn validate(input: &SalaryInput) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = [
        check_year(input.year),
        check_gross_amount(input.gross_amount),
        check_annual_allowance(input.annual_allowance),
        check_health_insurance_rate(Some(input.health_insurance_type), input.health_insurance_rate),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn check_year(year: i32) -> Option<ValidationError> {
    (!(MIN_YEAR..=MAX_YEAR).contains(&year)).then(|| {
        ValidationError::new(
            "year",
            format!("year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"),
        )
    })
}

pub fn check_gross_amount(gross_amount: Decimal) -> Option<ValidationError> {
    if gross_amount <= Decimal::ZERO {
        Some(ValidationError::new(
            "grossAmount",
            format!("gross amount must be positive, got {gross_amount}"),
        ))
    } else if gross_amount > MAX_GROSS_AMOUNT {
        Some(ValidationError::new(
            "grossAmount",
            format!("gross amount must not exceed {MAX_GROSS_AMOUNT}, got {gross_amount}"),
        ))
    } else {
        None
    }
}

pub fn check_annual_allowance(allowance: Option<Decimal>) -> Option<ValidationError> {
    match allowance {
        Some(allowance) if allowance < Decimal::ZERO => Some(ValidationError::new(
            "annualAllowance",
            format!("annual allowance must not be negative, got {allowance}"),
        )),
        Some(allowance) if allowance > MAX_GROSS_AMOUNT => Some(ValidationError::new(
            "annualAllowance",
            format!("annual allowance must not exceed {MAX_GROSS_AMOUNT}, got {allowance}"),
        )),
        _ => None,
    }
}

/// Range check on the rate, plus the private-insurance requirement when the
/// insurance type is known. Pass `None` for a type that failed to parse.
pub fn check_health_insurance_rate(
    insurance_type: Option<HealthInsuranceType>,
    rate: Option<Decimal>,
) -> Option<ValidationError> {
    match rate {
        Some(rate) if rate < Decimal::ZERO || rate > MAX_HEALTH_INSURANCE_RATE => {
            Some(ValidationError::new(
                "healthInsuranceRate",
                format!(
                    "health insurance rate must be between 0 and {MAX_HEALTH_INSURANCE_RATE}, got {rate}"
                ),
            ))
        }
        Some(rate) if rate > Decimal::ZERO => None,
        _ if insurance_type == Some(HealthInsuranceType::Private) => Some(ValidationError::new(
            "healthInsuranceRate",
            "Private health insurance requires a rate percentage.",
        )),
        _ => None,
    }
}
