//! Employee social-insurance contributions.
//!
//! All four contributions are percentages of a capped base. Health and
//! nursing care share the health cap; pension and unemployment share the
//! pension cap of the employee's region. Amounts here are annual and
//! unrounded; the calculator rounds once, after dividing into the
//! requested period.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{HealthInsuranceType, PensionRegion, TaxYearConfig};

/// Employee share of statutory health insurance, in percent.
pub const STATUTORY_HEALTH_RATE: Decimal = dec!(8.7);

/// Employee share of unemployment insurance, in percent.
pub const UNEMPLOYMENT_RATE: Decimal = dec!(1.3);

/// Employee share of nursing-care insurance for parents, in percent.
pub const NURSING_CARE_BASE_RATE: Decimal = dec!(1.7);

/// Surcharge on the nursing-care rate for employees without children.
pub const NURSING_CARE_CHILDLESS_SURCHARGE: Decimal = dec!(0.35);

const HUNDRED: Decimal = dec!(100);

/// Income ceilings for one tax year and pension region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionCaps {
    /// Applies to health and nursing-care insurance.
    pub health: Decimal,
    /// Applies to pension and unemployment insurance.
    pub pension: Decimal,
}

impl ContributionCaps {
    pub fn for_region(
        config: &TaxYearConfig,
        region: PensionRegion,
    ) -> Self {
        Self {
            health: config.contribution_cap_health,
            pension: region.contribution_cap(config),
        }
    }
}

/// Annual employee contributions before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contributions {
    pub health: Decimal,
    pub pension: Decimal,
    pub unemployment: Decimal,
    pub nursing_care: Decimal,
}

impl Contributions {
    /// Computes the four contributions on `annual_gross`.
    ///
    /// `health_rate` is the employee health rate in percent, usually the
    /// result of [`health_insurance_rate`]. Pension-exempt employees pay no
    /// pension contribution but still pay unemployment insurance on the
    /// West pension base.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use salary_core::calculations::{ContributionCaps, Contributions};
    /// use salary_core::{PensionRegion, TaxYearConfig};
    ///
    /// let config = TaxYearConfig::for_2025();
    /// let caps = ContributionCaps::for_region(&config, PensionRegion::West);
    ///
    /// let contributions = Contributions::calculate(
    ///     dec!(60000),
    ///     &caps,
    ///     dec!(8.7),
    ///     PensionRegion::West,
    ///     0,
    /// );
    ///
    /// assert_eq!(contributions.health, dec!(5220));
    /// assert_eq!(contributions.nursing_care, dec!(1230));
    /// ```
    pub fn calculate(
        annual_gross: Decimal,
        caps: &ContributionCaps,
        health_rate: Decimal,
        region: PensionRegion,
        children_count: u32,
    ) -> Self {
        let health_base = annual_gross.min(caps.health);
        let pension_base = annual_gross.min(caps.pension);

        Self {
            health: health_base * health_rate / HUNDRED,
            pension: pension_base * region.pension_rate() / HUNDRED,
            unemployment: pension_base * UNEMPLOYMENT_RATE / HUNDRED,
            nursing_care: health_base * nursing_care_rate(children_count) / HUNDRED,
        }
    }

    pub fn total(&self) -> Decimal {
        self.health + self.pension + self.unemployment + self.nursing_care
    }
}

/// Employee health rate in percent.
///
/// Statutory members always pay [`STATUTORY_HEALTH_RATE`]; any supplied rate
/// is ignored. Private members pay the supplied rate, or nothing if none
/// was given.
pub fn health_insurance_rate(
    kind: HealthInsuranceType,
    supplied: Option<Decimal>,
) -> Decimal {
    match kind {
        HealthInsuranceType::Statutory => STATUTORY_HEALTH_RATE,
        HealthInsuranceType::Private => supplied.unwrap_or(Decimal::ZERO),
    }
}

pub fn nursing_care_rate(children_count: u32) -> Decimal {
    if children_count == 0 {
        NURSING_CARE_BASE_RATE + NURSING_CARE_CHILDLESS_SURCHARGE
    } else {
        NURSING_CARE_BASE_RATE
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn west_2025() -> ContributionCaps {
        ContributionCaps::for_region(&TaxYearConfig::for_2025(), PensionRegion::West)
    }

    // ── caps ─────────────────────────────────────────────────────────────
    #[test]
    fn caps_follow_pension_region() {
        let config = TaxYearConfig::for_2024();

        let west = ContributionCaps::for_region(&config, PensionRegion::West);
        let east = ContributionCaps::for_region(&config, PensionRegion::East);
        let exempt = ContributionCaps::for_region(&config, PensionRegion::Exempt);

        assert_eq!(west.pension, dec!(90600));
        assert_eq!(east.pension, dec!(89400));
        assert_eq!(exempt.pension, dec!(90600));
        assert_eq!(west.health, dec!(62100));
        assert_eq!(east.health, dec!(62100));
    }

    // ── rates ────────────────────────────────────────────────────────────
    #[test]
    fn statutory_rate_ignores_supplied_value() {
        assert_eq!(
            health_insurance_rate(HealthInsuranceType::Statutory, Some(dec!(14.6))),
            dec!(8.7)
        );
        assert_eq!(
            health_insurance_rate(HealthInsuranceType::Statutory, None),
            dec!(8.7)
        );
    }

    #[test]
    fn private_rate_uses_supplied_value_or_zero() {
        assert_eq!(
            health_insurance_rate(HealthInsuranceType::Private, Some(dec!(12.5))),
            dec!(12.5)
        );
        assert_eq!(
            health_insurance_rate(HealthInsuranceType::Private, None),
            Decimal::ZERO
        );
    }

    #[test]
    fn nursing_rate_depends_on_children() {
        assert_eq!(nursing_care_rate(0), dec!(2.05));
        assert_eq!(nursing_care_rate(1), dec!(1.7));
        assert_eq!(nursing_care_rate(4), dec!(1.7));
    }

    // ── contributions ────────────────────────────────────────────────────
    #[test]
    fn below_caps_uses_full_gross() {
        let result = Contributions::calculate(
            dec!(60000),
            &west_2025(),
            STATUTORY_HEALTH_RATE,
            PensionRegion::West,
            0,
        );

        assert_eq!(result.health, dec!(5220));
        assert_eq!(result.pension, dec!(5580));
        assert_eq!(result.unemployment, dec!(780));
        assert_eq!(result.nursing_care, dec!(1230));
        assert_eq!(result.total(), dec!(12810));
    }

    #[test]
    fn above_caps_uses_capped_bases() {
        let result = Contributions::calculate(
            dec!(120000),
            &west_2025(),
            STATUTORY_HEALTH_RATE,
            PensionRegion::West,
            0,
        );

        assert_eq!(result.health, dec!(5402.70));
        assert_eq!(result.pension, dec!(8425.80));
        assert_eq!(result.unemployment, dec!(1177.80));
        assert_eq!(result.nursing_care, dec!(1273.05));
    }

    #[test]
    fn east_region_uses_east_cap() {
        let config = TaxYearConfig::for_2024();
        let caps = ContributionCaps::for_region(&config, PensionRegion::East);

        let result = Contributions::calculate(
            dec!(120000),
            &caps,
            STATUTORY_HEALTH_RATE,
            PensionRegion::East,
            0,
        );

        assert_eq!(result.health, dec!(5402.70));
        assert_eq!(result.pension, dec!(8314.20));
        assert_eq!(result.unemployment, dec!(1162.20));
        assert_eq!(result.nursing_care, dec!(1273.05));
    }

    #[test]
    fn exempt_region_pays_no_pension_but_unemployment() {
        let result = Contributions::calculate(
            dec!(60000),
            &west_2025(),
            STATUTORY_HEALTH_RATE,
            PensionRegion::Exempt,
            0,
        );

        assert_eq!(result.pension, Decimal::ZERO);
        assert_eq!(result.unemployment, dec!(780));
    }

    #[test]
    fn parents_pay_base_nursing_rate() {
        let result = Contributions::calculate(
            dec!(60000),
            &west_2025(),
            STATUTORY_HEALTH_RATE,
            PensionRegion::West,
            1,
        );

        assert_eq!(result.nursing_care, dec!(1020));
    }

    #[test]
    fn private_rate_applies_to_health_base() {
        let result = Contributions::calculate(
            dec!(60000),
            &west_2025(),
            dec!(12.5),
            PensionRegion::West,
            0,
        );

        assert_eq!(result.health, dec!(7500));
        assert_eq!(result.nursing_care, dec!(1230));
    }
}
