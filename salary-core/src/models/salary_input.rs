use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FederalState, PensionRegion, TaxClass};

/// Whether an amount is a monthly or a yearly figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryPeriod {
    Monthly,
    Yearly,
}

impl SalaryPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Number of periods in a year; annual figures are divided by this.
    pub fn divisor(&self) -> Decimal {
        match self {
            Self::Monthly => Decimal::from(12),
            Self::Yearly => Decimal::ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthInsuranceType {
    Statutory,
    Private,
}

impl HealthInsuranceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Statutory => "statutory",
            Self::Private => "private",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "statutory" => Some(Self::Statutory),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// A single net-salary request.
///
/// The calculator assumes the value already passed
/// [`validate`](crate::validation::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryInput {
    pub year: i32,
    pub gross_amount: Decimal,
    pub period: SalaryPeriod,
    pub tax_class: TaxClass,
    pub federal_state: FederalState,
    pub church_member: bool,
    pub children_count: u32,
    /// Additional pre-tax annual deduction.
    #[serde(default)]
    pub annual_allowance: Option<Decimal>,
    pub health_insurance_type: HealthInsuranceType,
    /// Employee rate in percent. Only read for private insurance.
    #[serde(default)]
    pub health_insurance_rate: Option<Decimal>,
    pub pension_region: PensionRegion,
}

impl SalaryInput {
    /// Gross income normalized to a full year.
    pub fn annual_gross(&self) -> Decimal {
        match self.period {
            SalaryPeriod::Monthly => self.gross_amount * Decimal::from(12),
            SalaryPeriod::Yearly => self.gross_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const REQUEST_JSON: &str = r#"{
        "year": 2025,
        "grossAmount": 5000,
        "period": "monthly",
        "taxClass": 1,
        "federalState": "BE",
        "churchMember": false,
        "childrenCount": 0,
        "annualAllowance": 0,
        "healthInsuranceType": "statutory",
        "healthInsuranceRate": 8.7,
        "pensionRegion": "West"
    }"#;

    #[test]
    fn deserializes_camel_case_request() {
        let input: SalaryInput = serde_json::from_str(REQUEST_JSON).unwrap();

        assert_eq!(
            input,
            SalaryInput {
                year: 2025,
                gross_amount: dec!(5000),
                period: SalaryPeriod::Monthly,
                tax_class: TaxClass::I,
                federal_state: FederalState::Berlin,
                church_member: false,
                children_count: 0,
                annual_allowance: Some(dec!(0)),
                health_insurance_type: HealthInsuranceType::Statutory,
                health_insurance_rate: Some(dec!(8.7)),
                pension_region: PensionRegion::West,
            }
        );
    }

    #[test]
    fn optional_fields_may_be_omitted() {
        let json = r#"{
            "year": 2024,
            "grossAmount": 48000,
            "period": "yearly",
            "taxClass": 4,
            "federalState": "HH",
            "churchMember": true,
            "childrenCount": 2,
            "healthInsuranceType": "statutory",
            "pensionRegion": "None"
        }"#;

        let input: SalaryInput = serde_json::from_str(json).unwrap();

        assert_eq!(input.annual_allowance, None);
        assert_eq!(input.health_insurance_rate, None);
        assert_eq!(input.pension_region, PensionRegion::Exempt);
    }

    #[test]
    fn rejects_unknown_enum_literals() {
        let json = REQUEST_JSON.replace("\"monthly\"", "\"weekly\"");
        assert!(serde_json::from_str::<SalaryInput>(&json).is_err());

        let json = REQUEST_JSON.replace("\"BE\"", "\"XX\"");
        assert!(serde_json::from_str::<SalaryInput>(&json).is_err());
    }

    #[test]
    fn rejects_negative_children_count() {
        let json = REQUEST_JSON.replace("\"childrenCount\": 0", "\"childrenCount\": -1");
        assert!(serde_json::from_str::<SalaryInput>(&json).is_err());
    }

    #[test]
    fn annual_gross_multiplies_monthly_amounts() {
        let mut input: SalaryInput = serde_json::from_str(REQUEST_JSON).unwrap();
        assert_eq!(input.annual_gross(), dec!(60000));

        input.period = SalaryPeriod::Yearly;
        assert_eq!(input.annual_gross(), dec!(5000));
    }
}
