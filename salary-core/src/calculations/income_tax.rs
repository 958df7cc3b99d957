//! Progressive income tax tariff.
//!
//! | Zone | Taxable income `x`                         | Tax                                  |
//! |------|--------------------------------------------|--------------------------------------|
//! | 0    | `x <= basic_allowance`                     | 0                                    |
//! | 1    | up to `bracket_end_1`                      | `(zone1_factor * y + zone1_offset) * y`, `y = (x - basic_allowance) / 10000` |
//! | 2    | up to `bracket_end_2`                      | `(zone2_factor * z + zone2_offset) * z + zone2_base_tax`, `z = (x - bracket_end_1) / 10000` |
//! | 3    | up to `bracket_end_3`                      | `zone3_factor * x - zone3_offset`    |
//! | top  | above `bracket_end_3`                      | `0.45 * x - 18936.88`                |
//!
//! The formulas are evaluated on the exact taxable income; rounding to cents
//! happens only when amounts are converted to the output period.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::max;
use crate::models::{TaxClassRules, TaxYearConfig};

/// Marginal rate above `bracket_end_3`.
pub const TOP_ZONE_RATE: Decimal = dec!(0.45);

/// Linear offset of the top zone, shared by all years.
pub const TOP_ZONE_OFFSET: Decimal = dec!(18936.88);

const ZONE_STEP: Decimal = dec!(10000);

/// Income tax tariff for one tax year.
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxTariff<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> IncomeTaxTariff<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Annual tax on `taxable_income` for a single assessment.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use salary_core::TaxYearConfig;
    /// use salary_core::calculations::IncomeTaxTariff;
    ///
    /// let config = TaxYearConfig::for_2025();
    /// let tariff = IncomeTaxTariff::new(&config);
    ///
    /// assert_eq!(tariff.tax(dec!(11604)), dec!(0));
    /// assert_eq!(tariff.tax(dec!(100000)), dec!(31397.87));
    /// ```
    pub fn tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let c = self.config;
        let x = taxable_income;

        let tax = if x <= c.basic_allowance {
            Decimal::ZERO
        } else if x <= c.bracket_end_1 {
            let y = (x - c.basic_allowance) / ZONE_STEP;
            (c.zone1_factor * y + c.zone1_offset) * y
        } else if x <= c.bracket_end_2 {
            let z = (x - c.bracket_end_1) / ZONE_STEP;
            (c.zone2_factor * z + c.zone2_offset) * z + c.zone2_base_tax
        } else if x <= c.bracket_end_3 {
            c.zone3_factor * x - c.zone3_offset
        } else {
            TOP_ZONE_RATE * x - TOP_ZONE_OFFSET
        };

        max(tax, Decimal::ZERO)
    }

    /// Annual tax on `taxable_income` after the tax class rules have been
    /// applied to the tariff: splitting halves the income and doubles the
    /// tax, and the multiplier scales the result.
    ///
    /// The class allowance adjustment is not applied here; callers subtract
    /// it when building `taxable_income`.
    pub fn tax_for_class(
        &self,
        taxable_income: Decimal,
        rules: &TaxClassRules,
    ) -> Decimal {
        let tariff_tax = if rules.use_splitting {
            self.tax(taxable_income / dec!(2)) * dec!(2)
        } else {
            self.tax(taxable_income)
        };

        tariff_tax * rules.multiplier
    }
}
