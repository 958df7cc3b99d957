//! Gross-to-net calculation.
//!
//! The pipeline is split the way a payslip reads: social-insurance
//! contributions first, then income tax on what remains, then the
//! surcharges levied on the income tax.

pub mod common;
pub mod contributions;
pub mod income_tax;
pub mod net_salary;

pub use common::round_half_up;
pub use contributions::{ContributionCaps, Contributions};
pub use income_tax::IncomeTaxTariff;
pub use net_salary::{AnnualDeductions, NetSalaryCalculator};
