use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use super::TaxYearLookup;
use crate::models::{TaxYearConfig, TaxYearConfigError};

/// Year whose configuration answers lookups for unknown years.
pub const DEFAULT_TAX_YEAR: i32 = 2025;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxYearTableError {
    /// The fallback year has no entry. This is a deployment defect and is
    /// reported when the table is built, never during a lookup.
    #[error("no configuration for default tax year {0}")]
    MissingDefaultYear(i32),

    #[error("invalid configuration for tax year {year}: {source}")]
    InvalidConfig {
        year: i32,
        #[source]
        source: TaxYearConfigError,
    },
}

/// Immutable-after-start-up mapping from calendar year to configuration,
/// with a mandatory default year used as fallback.
#[derive(Debug, Clone)]
pub struct TaxYearTable {
    years: BTreeMap<i32, TaxYearConfig>,
    default: TaxYearConfig,
}

impl TaxYearTable {
    /// Builds a table from `configs`, falling back to `default_year`.
    ///
    /// Later entries for the same year replace earlier ones.
    ///
    /// # Errors
    ///
    /// * [`TaxYearTableError::InvalidConfig`] if any configuration fails
    ///   [`TaxYearConfig::validate`].
    /// * [`TaxYearTableError::MissingDefaultYear`] if no configuration for
    ///   `default_year` was supplied.
    pub fn new<I>(
        configs: I,
        default_year: i32,
    ) -> Result<Self, TaxYearTableError>
    where
        I: IntoIterator<Item = TaxYearConfig>,
    {
        let mut years = BTreeMap::new();
        for config in configs {
            validate(&config)?;
            years.insert(config.tax_year, config);
        }

        let default = years
            .get(&default_year)
            .cloned()
            .ok_or(TaxYearTableError::MissingDefaultYear(default_year))?;

        Ok(Self { years, default })
    }

    /// The bundled years (2024 and 2025), defaulting to
    /// [`DEFAULT_TAX_YEAR`].
    pub fn builtin() -> Self {
        let default = TaxYearConfig::for_2025();
        let years = BTreeMap::from([
            (2024, TaxYearConfig::for_2024()),
            (DEFAULT_TAX_YEAR, default.clone()),
        ]);

        Self { years, default }
    }

    /// Adds or replaces the configuration for `config.tax_year` and returns
    /// the entry it replaced. Replacing the default year also replaces the
    /// fallback.
    ///
    /// # Errors
    ///
    /// [`TaxYearTableError::InvalidConfig`] if the configuration fails
    /// validation; the table is left unchanged.
    pub fn insert(
        &mut self,
        config: TaxYearConfig,
    ) -> Result<Option<TaxYearConfig>, TaxYearTableError> {
        validate(&config)?;

        if config.tax_year == self.default.tax_year {
            self.default = config.clone();
        }
        Ok(self.years.insert(config.tax_year, config))
    }

    pub fn default_year(&self) -> i32 {
        self.default.tax_year
    }

    /// Exact lookup without fallback.
    pub fn get(
        &self,
        year: i32,
    ) -> Option<&TaxYearConfig> {
        self.years.get(&year)
    }

    /// Configured years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    pub fn contains(
        &self,
        year: i32,
    ) -> bool {
        self.years.contains_key(&year)
    }
}

impl Default for TaxYearTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TaxYearLookup for TaxYearTable {
    fn resolve(
        &self,
        year: i32,
    ) -> &TaxYearConfig {
        match self.years.get(&year) {
            Some(config) => config,
            None => {
                debug!(
                    year,
                    fallback = self.default.tax_year,
                    "no configuration for tax year, using default"
                );
                &self.default
            }
        }
    }
}

fn validate(config: &TaxYearConfig) -> Result<(), TaxYearTableError> {
    config
        .validate()
        .map_err(|source| TaxYearTableError::InvalidConfig {
            year: config.tax_year,
            source,
        })
}
