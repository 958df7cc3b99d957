//! Gross-to-net salary calculator.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Normalize the gross amount to a full year |
//! | 2    | Resolve contribution caps for the year and pension region |
//! | 3    | Compute health, pension, unemployment and nursing-care contributions |
//! | 4    | Taxable income: gross minus allowances and contributions, minus the class adjustment |
//! | 5    | Income tax from the tariff, with splitting and class multiplier |
//! | 6    | Solidarity surcharge above the free limit |
//! | 7    | Church tax for members, at the state's rate |
//! | 8    | Net: gross minus all seven deductions |
//! | 9    | Divide each amount into the requested period and round it to cents |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::{
//!     FederalState, HealthInsuranceType, NetSalaryCalculator, PensionRegion, SalaryInput,
//!     SalaryPeriod, TaxClass, TaxYearTable,
//! };
//!
//! let table = TaxYearTable::builtin();
//! let calculator = NetSalaryCalculator::new(&table);
//!
//! let result = calculator.compute(&SalaryInput {
//!     year: 2025,
//!     gross_amount: dec!(5000),
//!     period: SalaryPeriod::Monthly,
//!     tax_class: TaxClass::I,
//!     federal_state: FederalState::Berlin,
//!     church_member: false,
//!     children_count: 0,
//!     annual_allowance: None,
//!     health_insurance_type: HealthInsuranceType::Statutory,
//!     health_insurance_rate: None,
//!     pension_region: PensionRegion::West,
//! });
//!
//! assert_eq!(result.net, dec!(3135.17));
//! assert_eq!(result.breakdown.income_tax, dec!(797.33));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::{max, round_half_up};
use crate::calculations::contributions::{ContributionCaps, Contributions, health_insurance_rate};
use crate::calculations::income_tax::IncomeTaxTariff;
use crate::models::{SalaryBreakdown, SalaryInput, SalaryResult, TaxYearConfig};
use crate::years::TaxYearLookup;

/// Flat employee allowance (Arbeitnehmer-Pauschbetrag).
pub const EMPLOYEE_ALLOWANCE: Decimal = dec!(1230);

/// Flat special-expense allowance (Sonderausgaben-Pauschbetrag).
pub const SPECIAL_EXPENSE_ALLOWANCE: Decimal = dec!(36);

/// Solidarity surcharge rate on income tax above the free limit.
pub const SOLIDARITY_RATE: Decimal = dec!(0.055);

/// Unrounded annual figures behind a [`SalaryResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnualDeductions {
    pub gross: Decimal,
    pub contributions: Contributions,
    /// Income the tariff was applied to, after the class adjustment.
    pub taxable_income: Decimal,
    pub income_tax: Decimal,
    pub solidarity_tax: Decimal,
    pub church_tax: Decimal,
}

impl AnnualDeductions {
    /// Taxes plus contributions.
    pub fn total(&self) -> Decimal {
        self.income_tax + self.solidarity_tax + self.church_tax + self.contributions.total()
    }

    pub fn net(&self) -> Decimal {
        self.gross - self.total()
    }
}

/// Computes net salary for validated input against a tax-year source.
///
/// The calculator holds only a shared reference to the year table and can
/// be used from any number of threads at once.
#[derive(Clone, Copy)]
pub struct NetSalaryCalculator<'a> {
    years: &'a dyn TaxYearLookup,
}

impl<'a> NetSalaryCalculator<'a> {
    pub fn new(years: &'a dyn TaxYearLookup) -> Self {
        Self { years }
    }

    /// Computes the net salary and itemized deductions in the input's
    /// period.
    ///
    /// The input must have passed [`validate`](crate::validation::validate);
    /// this method never fails. `net` and each deduction are converted to the
    /// period and rounded half-up to cents independently, so
    /// `net + breakdown.total()` can differ from the period gross by a few
    /// cents.
    pub fn compute(
        &self,
        input: &SalaryInput,
    ) -> SalaryResult {
        let annual = self.annual(input);
        let divisor = input.period.divisor();
        let per_period = |amount: Decimal| round_half_up(amount / divisor);

        let breakdown = SalaryBreakdown {
            income_tax: per_period(annual.income_tax),
            church_tax: per_period(annual.church_tax),
            solidarity_tax: per_period(annual.solidarity_tax),
            health_insurance: per_period(annual.contributions.health),
            pension_insurance: per_period(annual.contributions.pension),
            unemployment_insurance: per_period(annual.contributions.unemployment),
            nursing_care_insurance: per_period(annual.contributions.nursing_care),
        };
        let net = per_period(annual.net());

        debug!(
            year = input.year,
            period = input.period.as_str(),
            tax_class = input.tax_class.number(),
            taxable_income = %annual.taxable_income,
            net = %net,
            "computed net salary"
        );

        SalaryResult { net, breakdown }
    }

    /// Computes the annual, unrounded deductions for `input`.
    pub fn annual(
        &self,
        input: &SalaryInput,
    ) -> AnnualDeductions {
        let config = self.years.resolve(input.year);
        let gross = input.annual_gross();

        let caps = ContributionCaps::for_region(config, input.pension_region);
        let health_rate =
            health_insurance_rate(input.health_insurance_type, input.health_insurance_rate);
        let contributions = Contributions::calculate(
            gross,
            &caps,
            health_rate,
            input.pension_region,
            input.children_count,
        );

        let taxable_income = self.taxable_income(input, gross, &contributions);
        let income_tax = self.income_tax(config, input, taxable_income);
        let solidarity_tax = self.solidarity_tax(config, income_tax);
        let church_tax = self.church_tax(input, income_tax);

        AnnualDeductions {
            gross,
            contributions,
            taxable_income,
            income_tax,
            solidarity_tax,
            church_tax,
        }
    }

    fn taxable_income(
        &self,
        input: &SalaryInput,
        annual_gross: Decimal,
        contributions: &Contributions,
    ) -> Decimal {
        let base = annual_gross
            - input.annual_allowance.unwrap_or(Decimal::ZERO)
            - contributions.total()
            - EMPLOYEE_ALLOWANCE
            - SPECIAL_EXPENSE_ALLOWANCE;

        max(base - input.tax_class.rules().allowance_adjustment, Decimal::ZERO)
    }

    fn income_tax(
        &self,
        config: &TaxYearConfig,
        input: &SalaryInput,
        taxable_income: Decimal,
    ) -> Decimal {
        IncomeTaxTariff::new(config).tax_for_class(taxable_income, &input.tax_class.rules())
    }

    fn solidarity_tax(
        &self,
        config: &TaxYearConfig,
        income_tax: Decimal,
    ) -> Decimal {
        if income_tax <= config.solidarity_free_limit {
            Decimal::ZERO
        } else {
            income_tax * SOLIDARITY_RATE
        }
    }

    fn church_tax(
        &self,
        input: &SalaryInput,
        income_tax: Decimal,
    ) -> Decimal {
        if input.church_member {
            income_tax * input.federal_state.church_tax_rate()
        } else {
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{
        FederalState, HealthInsuranceType, PensionRegion, SalaryPeriod, TaxClass,
    };
    use crate::years::TaxYearTable;

    fn base_input() -> SalaryInput {
        SalaryInput {
            year: 2025,
            gross_amount: dec!(5000),
            period: SalaryPeriod::Monthly,
            tax_class: TaxClass::I,
            federal_state: FederalState::Berlin,
            church_member: false,
            children_count: 0,
            annual_allowance: Some(Decimal::ZERO),
            health_insurance_type: HealthInsuranceType::Statutory,
            health_insurance_rate: Some(dec!(8.7)),
            pension_region: PensionRegion::West,
        }
    }

    /// Half a cent for each of the eight independently rounded amounts.
    const ROUNDING_SLACK: Decimal = dec!(0.04);

    fn compute(input: &SalaryInput) -> SalaryResult {
        let table = TaxYearTable::builtin();
        NetSalaryCalculator::new(&table).compute(input)
    }

    fn assert_sums_to_gross(
        input: &SalaryInput,
        result: &SalaryResult,
    ) {
        let period_gross = round_half_up(input.annual_gross() / input.period.divisor());
        let drift = (result.net + result.breakdown.total() - period_gross).abs();
        assert!(drift <= ROUNDING_SLACK, "{input:?}: off by {drift}");
    }

    /// Year source that always answers with one configuration.
    struct FixedYear(TaxYearConfig);

    impl TaxYearLookup for FixedYear {
        fn resolve(
            &self,
            _year: i32,
        ) -> &TaxYearConfig {
            &self.0
        }
    }

    // ── reference scenario ───────────────────────────────────────────────
    #[test]
    fn reference_scenario_breakdown() {
        let result = compute(&base_input());

        assert_eq!(
            result,
            SalaryResult {
                net: dec!(3135.17),
                breakdown: SalaryBreakdown {
                    income_tax: dec!(797.33),
                    church_tax: dec!(0.00),
                    solidarity_tax: dec!(0.00),
                    health_insurance: dec!(435.00),
                    pension_insurance: dec!(465.00),
                    unemployment_insurance: dec!(65.00),
                    nursing_care_insurance: dec!(102.50),
                },
            }
        );
    }

    #[test]
    fn reference_scenario_annual_figures() {
        let table = TaxYearTable::builtin();
        let annual = NetSalaryCalculator::new(&table).annual(&base_input());

        assert_eq!(annual.gross, dec!(60000));
        assert_eq!(annual.taxable_income, dec!(45924));
        assert_eq!(annual.income_tax, dec!(9567.9109576299));
        assert_eq!(annual.contributions.total(), dec!(12810));
        assert_eq!(annual.net(), dec!(37622.0890423701));
    }

    #[test]
    fn yearly_period_returns_annual_amounts() {
        let input = SalaryInput {
            gross_amount: dec!(60000),
            period: SalaryPeriod::Yearly,
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.net, dec!(37622.09));
        assert_eq!(result.breakdown.income_tax, dec!(9567.91));
        assert_eq!(result.breakdown.health_insurance, dec!(5220.00));
        assert_eq!(result.breakdown.pension_insurance, dec!(5580.00));
        assert_eq!(result.breakdown.unemployment_insurance, dec!(780.00));
        assert_eq!(result.breakdown.nursing_care_insurance, dec!(1230.00));
    }

    // ── church tax ───────────────────────────────────────────────────────
    #[test]
    fn church_member_pays_nine_percent_in_berlin() {
        let input = SalaryInput {
            church_member: true,
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.breakdown.church_tax, dec!(71.76));
        assert_eq!(result.net, dec!(3063.41));
    }

    #[test]
    fn church_member_pays_eight_percent_in_bavaria() {
        let input = SalaryInput {
            church_member: true,
            federal_state: FederalState::Bavaria,
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.breakdown.church_tax, dec!(63.79));
        assert_eq!(result.net, dec!(3071.39));
    }

    // ── tax classes ──────────────────────────────────────────────────────
    #[test]
    fn class_three_splits_income() {
        let input = SalaryInput {
            tax_class: TaxClass::III,
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.breakdown.income_tax, dec!(420.27));
        assert_eq!(result.net, dec!(3512.23));
    }

    #[test]
    fn class_four_matches_class_one() {
        let input = SalaryInput {
            tax_class: TaxClass::IV,
            ..base_input()
        };

        assert_eq!(compute(&input), compute(&base_input()));
    }

    #[test]
    fn classes_five_and_six_apply_multiplier() {
        let class_five = compute(&SalaryInput {
            tax_class: TaxClass::V,
            ..base_input()
        });
        let class_six = compute(&SalaryInput {
            tax_class: TaxClass::VI,
            ..base_input()
        });

        assert_eq!(class_five.breakdown.income_tax, dec!(1036.52));
        assert_eq!(class_five.net, dec!(2895.98));
        assert_eq!(class_six.breakdown.income_tax, dec!(1076.39));
        assert_eq!(class_six.net, dec!(2856.11));
    }

    #[test]
    fn class_two_high_earner_pays_surcharge() {
        let input = SalaryInput {
            gross_amount: dec!(120000),
            period: SalaryPeriod::Yearly,
            tax_class: TaxClass::II,
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.net, dec!(71395.85));
        assert_eq!(result.breakdown.income_tax, dec!(30639.62));
        assert_eq!(result.breakdown.solidarity_tax, dec!(1685.18));
        assert_eq!(result.breakdown.health_insurance, dec!(5402.70));
        assert_eq!(result.breakdown.pension_insurance, dec!(8425.80));
        assert_eq!(result.breakdown.unemployment_insurance, dec!(1177.80));
        assert_eq!(result.breakdown.nursing_care_insurance, dec!(1273.05));
    }

    // ── insurance ────────────────────────────────────────────────────────
    #[test]
    fn pension_exempt_pays_no_pension() {
        let input = SalaryInput {
            pension_region: PensionRegion::Exempt,
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.breakdown.pension_insurance, Decimal::ZERO);
        assert_eq!(result.breakdown.unemployment_insurance, dec!(65.00));
        assert_eq!(result.breakdown.income_tax, dec!(965.58));
        assert_eq!(result.net, dec!(3431.92));
    }

    #[test]
    fn one_child_lowers_nursing_care() {
        let input = SalaryInput {
            children_count: 1,
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.breakdown.nursing_care_insurance, dec!(85.00));
        assert_eq!(result.breakdown.income_tax, dec!(803.48));
        assert_eq!(result.net, dec!(3146.52));
    }

    #[test]
    fn private_insurance_uses_supplied_rate() {
        let input = SalaryInput {
            health_insurance_type: HealthInsuranceType::Private,
            health_insurance_rate: Some(dec!(12.5)),
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.breakdown.health_insurance, dec!(625.00));
        assert_eq!(result.breakdown.income_tax, dec!(731.45));
        assert_eq!(result.net, dec!(3011.05));
    }

    #[test]
    fn statutory_insurance_ignores_supplied_rate() {
        let input = SalaryInput {
            health_insurance_rate: Some(dec!(15)),
            ..base_input()
        };

        assert_eq!(compute(&input), compute(&base_input()));
    }

    #[test]
    fn monthly_income_above_caps_is_capped() {
        let input = SalaryInput {
            gross_amount: dec!(10000),
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.net, dec!(5792.35));
        assert_eq!(result.breakdown.income_tax, dec!(2702.40));
        assert_eq!(result.breakdown.solidarity_tax, dec!(148.63));
        assert_eq!(result.breakdown.health_insurance, dec!(450.23));
        assert_eq!(result.breakdown.pension_insurance, dec!(702.15));
        assert_eq!(result.breakdown.unemployment_insurance, dec!(98.15));
        assert_eq!(result.breakdown.nursing_care_insurance, dec!(106.09));
    }

    #[test]
    fn east_region_2024_uses_east_cap() {
        let input = SalaryInput {
            year: 2024,
            gross_amount: dec!(10000),
            pension_region: PensionRegion::East,
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.net, dec!(5798.26));
        assert_eq!(result.breakdown.income_tax, dec!(2706.85));
        assert_eq!(result.breakdown.solidarity_tax, dec!(148.88));
        assert_eq!(result.breakdown.health_insurance, dec!(450.23));
        assert_eq!(result.breakdown.pension_insurance, dec!(692.85));
        assert_eq!(result.breakdown.unemployment_insurance, dec!(96.85));
        assert_eq!(result.breakdown.nursing_care_insurance, dec!(106.09));
    }

    // ── income edge cases ────────────────────────────────────────────────
    #[test]
    fn low_income_pays_no_income_tax() {
        let input = SalaryInput {
            gross_amount: dec!(1000),
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.breakdown.income_tax, Decimal::ZERO);
        assert_eq!(result.breakdown.health_insurance, dec!(87.00));
        assert_eq!(result.breakdown.pension_insurance, dec!(93.00));
        assert_eq!(result.breakdown.unemployment_insurance, dec!(13.00));
        assert_eq!(result.breakdown.nursing_care_insurance, dec!(20.50));
        assert_eq!(result.net, dec!(786.50));
    }

    #[test]
    fn annual_allowance_reduces_income_tax() {
        let input = SalaryInput {
            annual_allowance: Some(dec!(2400)),
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.breakdown.income_tax, dec!(728.03));
        assert_eq!(result.net, dec!(3204.47));
    }

    #[test]
    fn missing_allowance_counts_as_zero() {
        let input = SalaryInput {
            annual_allowance: None,
            ..base_input()
        };

        assert_eq!(compute(&input), compute(&base_input()));
    }

    #[test]
    fn allowance_larger_than_income_clamps_taxable_to_zero() {
        let input = SalaryInput {
            annual_allowance: Some(dec!(1000000)),
            ..base_input()
        };

        let table = TaxYearTable::builtin();
        let annual = NetSalaryCalculator::new(&table).annual(&input);

        assert_eq!(annual.taxable_income, Decimal::ZERO);
        assert_eq!(annual.income_tax, Decimal::ZERO);
    }

    // ── years ────────────────────────────────────────────────────────────
    #[test]
    fn year_2024_uses_2024_tariff() {
        let input = SalaryInput {
            year: 2024,
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.breakdown.income_tax, dec!(789.38));
        assert_eq!(result.net, dec!(3143.12));
    }

    #[test]
    fn unknown_year_falls_back_to_default() {
        let input = SalaryInput {
            year: 1999,
            ..base_input()
        };

        assert_eq!(compute(&input), compute(&base_input()));
    }

    #[test]
    fn any_lookup_can_drive_the_calculator() {
        let source = FixedYear(TaxYearConfig::for_2024());
        let calculator = NetSalaryCalculator::new(&source);

        let result = calculator.compute(&base_input());

        assert_eq!(result.breakdown.income_tax, dec!(789.38));
    }

    // ── rounding ─────────────────────────────────────────────────────────
    #[test]
    fn net_is_rounded_from_annual_net() {
        let input = SalaryInput {
            gross_amount: dec!(3000.03),
            church_member: true,
            ..base_input()
        };

        let result = compute(&input);

        // The rounded deductions add up to 969.95, one cent short of
        // 3000.03 - 2030.07.
        assert_eq!(result.breakdown.income_tax, dec!(302.25));
        assert_eq!(result.breakdown.church_tax, dec!(27.20));
        assert_eq!(result.net, dec!(2030.07));
        assert_eq!(result.net + result.breakdown.total(), dec!(3000.02));
    }

    #[test]
    fn breakdown_sums_to_period_gross() {
        for gross in [dec!(1000), dec!(3333.33), dec!(5000), dec!(7777.77), dec!(10000)] {
            for church_member in [false, true] {
                let input = SalaryInput {
                    gross_amount: gross,
                    church_member,
                    ..base_input()
                };

                assert_sums_to_gross(&input, &compute(&input));
            }
        }
    }

    #[test]
    fn rounding_drift_can_exceed_one_cent() {
        let input = SalaryInput {
            gross_amount: dec!(7777.77),
            church_member: true,
            ..base_input()
        };

        let result = compute(&input);

        assert_eq!(result.net + result.breakdown.total(), dec!(7777.79));
    }

    #[test]
    fn largest_accepted_gross_is_computed() {
        let input = SalaryInput {
            gross_amount: crate::validation::MAX_GROSS_AMOUNT,
            church_member: true,
            ..base_input()
        };
        assert_eq!(crate::validation::validate(&input), Ok(()));

        let result = compute(&input);

        assert!(result.net > Decimal::ZERO);
        assert_sums_to_gross(&input, &result);
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let input = base_input();

        assert_eq!(compute(&input), compute(&input));
    }
}
