//! JSON request handling.
//!
//! A request body is checked field by field before it is turned into a
//! [`SalaryInput`], so a rejected payload lists every offending field by its
//! wire name. Range checks run on each field that parsed, even when other
//! fields are missing, so a single response reports every problem. Only
//! payloads that pass all checks reach the calculator.

use rust_decimal::Decimal;
use salary_core::validation::{
    check_annual_allowance, check_gross_amount, check_health_insurance_rate, check_year,
};
use salary_core::{
    FederalState, HealthInsuranceType, NetSalaryCalculator, PensionRegion, SalaryInput,
    SalaryPeriod, SalaryResult, TaxClass, ValidationError,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input data";

/// Body returned for a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidRequest {
    pub message: String,
    pub issues: Vec<ValidationError>,
}

impl InvalidRequest {
    pub fn new(issues: Vec<ValidationError>) -> Self {
        Self {
            message: INVALID_INPUT_MESSAGE.to_string(),
            issues,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Computed(SalaryResult),
    Rejected(InvalidRequest),
}

impl RequestOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The response body as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Self::Computed(result) => serde_json::to_string_pretty(result),
            Self::Rejected(body) => serde_json::to_string_pretty(body),
        }
    }
}

/// Turns a raw JSON body into a validated input.
///
/// # Errors
///
/// Returns every issue found: malformed JSON, missing or mistyped fields,
/// unknown enum literals and failed range checks.
pub fn parse_request(body: &str) -> Result<SalaryInput, Vec<ValidationError>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| vec![ValidationError::new("body", format!("malformed JSON: {e}"))])?;
    let Value::Object(object) = value else {
        return Err(vec![ValidationError::new("body", "expected a JSON object")]);
    };

    let mut issues = Vec::new();
    let mut fields = FieldReader {
        object: &object,
        issues: &mut issues,
    };

    let year = fields.required::<i32>("year");
    fields.check(year.and_then(check_year));
    let gross_amount = fields.required_number("grossAmount");
    fields.check(gross_amount.and_then(check_gross_amount));
    let period = fields.required::<SalaryPeriod>("period");
    let tax_class = fields.required::<TaxClass>("taxClass");
    let federal_state = fields.required::<FederalState>("federalState");
    let church_member = fields.required::<bool>("churchMember");
    let children_count = fields.required::<u32>("childrenCount");
    let annual_allowance = fields.optional_number("annualAllowance");
    fields.check(annual_allowance.and_then(check_annual_allowance));
    let health_insurance_type = fields.required::<HealthInsuranceType>("healthInsuranceType");
    let health_insurance_rate = fields.optional_number("healthInsuranceRate");
    if let Some(rate) = health_insurance_rate {
        fields.check(check_health_insurance_rate(health_insurance_type, rate));
    }
    let pension_region = fields.required::<PensionRegion>("pensionRegion");

    let (
        Some(year),
        Some(gross_amount),
        Some(period),
        Some(tax_class),
        Some(federal_state),
        Some(church_member),
        Some(children_count),
        Some(annual_allowance),
        Some(health_insurance_type),
        Some(health_insurance_rate),
        Some(pension_region),
    ) = (
        year,
        gross_amount,
        period,
        tax_class,
        federal_state,
        church_member,
        children_count,
        annual_allowance,
        health_insurance_type,
        health_insurance_rate,
        pension_region,
    )
    else {
        return Err(issues);
    };
    if !issues.is_empty() {
        return Err(issues);
    }

    Ok(SalaryInput {
        year,
        gross_amount,
        period,
        tax_class,
        federal_state,
        church_member,
        children_count,
        annual_allowance,
        health_insurance_type,
        health_insurance_rate,
        pension_region,
    })
}

/// Validates `body` and, only if it is accepted, computes the result.
pub fn handle_request(
    calculator: &NetSalaryCalculator<'_>,
    body: &str,
) -> RequestOutcome {
    match parse_request(body) {
        Ok(input) => {
            debug!(year = input.year, "request accepted");
            RequestOutcome::Computed(calculator.compute(&input))
        }
        Err(issues) => {
            info!(issues = issues.len(), "request rejected");
            RequestOutcome::Rejected(InvalidRequest::new(issues))
        }
    }
}

/// Reads typed fields from a JSON object, recording one issue per bad field.
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    issues: &'a mut Vec<ValidationError>,
}

impl FieldReader<'_> {
    fn check(
        &mut self,
        issue: Option<ValidationError>,
    ) {
        self.issues.extend(issue);
    }

    fn required<T: DeserializeOwned>(
        &mut self,
        name: &str,
    ) -> Option<T> {
        match self.object.get(name) {
            None | Some(Value::Null) => {
                self.issues.push(ValidationError::new(name, "Required"));
                None
            }
            Some(value) => self.convert(name, value),
        }
    }

    fn required_number(
        &mut self,
        name: &str,
    ) -> Option<Decimal> {
        match self.object.get(name) {
            None | Some(Value::Null) => {
                self.issues.push(ValidationError::new(name, "Required"));
                None
            }
            Some(value) => self.number(name, value),
        }
    }

    /// `Some(None)` when absent, `None` when present but invalid.
    fn optional_number(
        &mut self,
        name: &str,
    ) -> Option<Option<Decimal>> {
        match self.object.get(name) {
            None | Some(Value::Null) => Some(None),
            Some(value) => self.number(name, value).map(Some),
        }
    }

    fn number(
        &mut self,
        name: &str,
        value: &Value,
    ) -> Option<Decimal> {
        if !value.is_number() {
            self.issues
                .push(ValidationError::new(name, format!("expected a number, got {value}")));
            return None;
        }
        self.convert(name, value)
    }

    fn convert<T: DeserializeOwned>(
        &mut self,
        name: &str,
        value: &Value,
    ) -> Option<T> {
        match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                self.issues.push(ValidationError::new(name, e.to_string()));
                None
            }
        }
    }
}
