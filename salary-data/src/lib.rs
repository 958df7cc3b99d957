mod loader;

pub use loader::{TaxYearConfigLoader, TaxYearConfigRecord, TaxYearLoaderError};
