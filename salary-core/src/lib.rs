pub mod calculations;
pub mod models;
pub mod validation;
pub mod years;

pub use calculations::{AnnualDeductions, NetSalaryCalculator, round_half_up};
pub use models::*;
pub use validation::{ValidationError, validate};
pub use years::{DEFAULT_TAX_YEAR, TaxYearLookup, TaxYearTable, TaxYearTableError};
