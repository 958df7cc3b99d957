use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`TaxYearConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxYearConfigError {
    /// Bracket boundaries must satisfy
    /// `basic_allowance < bracket_end_1 < bracket_end_2 < bracket_end_3`.
    #[error(
        "bracket boundaries must be strictly increasing, got {basic_allowance} / {bracket_end_1} / {bracket_end_2} / {bracket_end_3}"
    )]
    UnorderedBrackets {
        basic_allowance: Decimal,
        bracket_end_1: Decimal,
        bracket_end_2: Decimal,
        bracket_end_3: Decimal,
    },

    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: Decimal },

    #[error("{field} must be positive, got {value}")]
    NonPositiveCap { field: &'static str, value: Decimal },
}

/// Tariff and contribution parameters for one calendar year.
///
/// The income tax tariff has five zones: tax-free up to
/// `basic_allowance`, two progressive zones with quadratic formulas up to
/// `bracket_end_1` and `bracket_end_2`, a linear zone up to
/// `bracket_end_3`, and a linear 45% top zone above it. The top zone's
/// offset is the same for every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub basic_allowance: Decimal,
    pub bracket_end_1: Decimal,
    pub bracket_end_2: Decimal,
    pub bracket_end_3: Decimal,
    pub zone1_factor: Decimal,
    pub zone1_offset: Decimal,
    pub zone2_factor: Decimal,
    pub zone2_offset: Decimal,
    /// Tax already owed at `bracket_end_1`.
    pub zone2_base_tax: Decimal,
    pub zone3_factor: Decimal,
    pub zone3_offset: Decimal,
    /// Income tax up to which no solidarity surcharge is levied.
    pub solidarity_free_limit: Decimal,
    pub contribution_cap_health: Decimal,
    pub contribution_cap_pension_west: Decimal,
    pub contribution_cap_pension_east: Decimal,
}

impl TaxYearConfig {
    pub fn for_2024() -> Self {
        Self {
            tax_year: 2024,
            basic_allowance: dec!(11604),
            bracket_end_1: dec!(17005),
            bracket_end_2: dec!(66760),
            bracket_end_3: dec!(277825),
            zone1_factor: dec!(922.98),
            zone1_offset: dec!(1400),
            zone2_factor: dec!(181.19),
            zone2_offset: dec!(2397),
            zone2_base_tax: dec!(1025.38),
            zone3_factor: dec!(0.42),
            zone3_offset: dec!(10602.13),
            solidarity_free_limit: dec!(18130),
            contribution_cap_health: dec!(62100),
            contribution_cap_pension_west: dec!(90600),
            contribution_cap_pension_east: dec!(89400),
        }
    }

    /// The default year. Zone 1 and 2 factors are higher than the 2024
    /// tariff's, so zone 1 does not end on `zone2_base_tax`.
    pub fn for_2025() -> Self {
        Self {
            tax_year: 2025,
            basic_allowance: dec!(11604),
            bracket_end_1: dec!(17005),
            bracket_end_2: dec!(66760),
            bracket_end_3: dec!(277825),
            zone1_factor: dec!(979.18),
            zone1_offset: dec!(1400),
            zone2_factor: dec!(192.59),
            zone2_offset: dec!(2397),
            zone2_base_tax: dec!(1025.38),
            zone3_factor: dec!(0.42),
            zone3_offset: dec!(10602.13),
            solidarity_free_limit: dec!(18130),
            contribution_cap_health: dec!(62100),
            contribution_cap_pension_west: dec!(90600),
            contribution_cap_pension_east: dec!(89400),
        }
    }

    /// Checks that the tariff is well formed and every cap is positive.
    ///
    /// # Errors
    ///
    /// Returns [`TaxYearConfigError`] if:
    /// - the bracket boundaries are not strictly increasing
    /// - a coefficient, offset or the solidarity free limit is negative
    /// - a contribution cap is zero or negative
    pub fn validate(&self) -> Result<(), TaxYearConfigError> {
        if !(self.basic_allowance < self.bracket_end_1
            && self.bracket_end_1 < self.bracket_end_2
            && self.bracket_end_2 < self.bracket_end_3)
        {
            return Err(TaxYearConfigError::UnorderedBrackets {
                basic_allowance: self.basic_allowance,
                bracket_end_1: self.bracket_end_1,
                bracket_end_2: self.bracket_end_2,
                bracket_end_3: self.bracket_end_3,
            });
        }

        let non_negative = [
            ("basic_allowance", self.basic_allowance),
            ("zone1_factor", self.zone1_factor),
            ("zone1_offset", self.zone1_offset),
            ("zone2_factor", self.zone2_factor),
            ("zone2_offset", self.zone2_offset),
            ("zone2_base_tax", self.zone2_base_tax),
            ("zone3_factor", self.zone3_factor),
            ("zone3_offset", self.zone3_offset),
            ("solidarity_free_limit", self.solidarity_free_limit),
        ];
        if let Some((field, value)) = non_negative.into_iter().find(|(_, v)| v.is_sign_negative()) {
            return Err(TaxYearConfigError::NegativeValue { field, value });
        }

        let caps = [
            ("contribution_cap_health", self.contribution_cap_health),
            ("contribution_cap_pension_west", self.contribution_cap_pension_west),
            ("contribution_cap_pension_east", self.contribution_cap_pension_east),
        ];
        if let Some((field, value)) = caps.into_iter().find(|(_, v)| *v <= Decimal::ZERO) {
            return Err(TaxYearConfigError::NonPositiveCap { field, value });
        }

        Ok(())
    }
}
