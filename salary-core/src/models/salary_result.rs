use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Itemized deductions, in the same period as the request.
///
/// Amounts travel as JSON numbers; they are already rounded to cents, so
/// the float representation is exact enough for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub income_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub church_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub solidarity_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub health_insurance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub pension_insurance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unemployment_insurance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub nursing_care_insurance: Decimal,
}

impl SalaryBreakdown {
    /// Sum of every deduction.
    pub fn total(&self) -> Decimal {
        self.taxes() + self.social_insurance()
    }

    /// Income tax plus solidarity surcharge and church tax.
    pub fn taxes(&self) -> Decimal {
        self.income_tax + self.solidarity_tax + self.church_tax
    }

    /// Health, pension, unemployment and nursing-care contributions.
    pub fn social_insurance(&self) -> Decimal {
        self.health_insurance
            + self.pension_insurance
            + self.unemployment_insurance
            + self.nursing_care_insurance
    }

    /// Fields paired with their wire names, in display order.
    pub fn items(&self) -> [(&'static str, Decimal); 7] {
        [
            ("incomeTax", self.income_tax),
            ("churchTax", self.church_tax),
            ("solidarityTax", self.solidarity_tax),
            ("healthInsurance", self.health_insurance),
            ("pensionInsurance", self.pension_insurance),
            ("unemploymentInsurance", self.unemployment_insurance),
            ("nursingCareInsurance", self.nursing_care_insurance),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
    pub breakdown: SalaryBreakdown,
}
