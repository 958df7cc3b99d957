mod federal_state;
mod pension_region;
mod salary_input;
mod salary_result;
mod tax_class;
mod tax_year_config;

pub use federal_state::FederalState;
pub use pension_region::PensionRegion;
pub use salary_input::{HealthInsuranceType, SalaryInput, SalaryPeriod};
pub use salary_result::{SalaryBreakdown, SalaryResult};
pub use tax_class::{TaxClass, TaxClassRules};
pub use tax_year_config::{TaxYearConfig, TaxYearConfigError};
