//! Year-keyed tax configuration.
//!
//! The calculator depends on [`TaxYearLookup`] only; [`TaxYearTable`] is the
//! in-memory implementation built once at start-up and shared by reference.

mod table;

pub use table::{DEFAULT_TAX_YEAR, TaxYearTable, TaxYearTableError};

use crate::models::TaxYearConfig;

/// Source of per-year tariff and contribution parameters.
///
/// Implementations must be total: a year without its own entry resolves to
/// a fallback configuration instead of failing.
pub trait TaxYearLookup: Send + Sync {
    fn resolve(
        &self,
        year: i32,
    ) -> &TaxYearConfig;
}
