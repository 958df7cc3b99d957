use std::collections::HashSet;
use std::io::Read;

use rust_decimal::Decimal;
use salary_core::{TaxYearConfig, TaxYearTable, TaxYearTableError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when loading tax-year configurations.
#[derive(Debug, Error)]
pub enum TaxYearLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Tax year {0} appears more than once in the file")]
    DuplicateYear(i32),

    #[error(transparent)]
    Table(#[from] TaxYearTableError),
}

impl From<csv::Error> for TaxYearLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxYearLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of the tax-year CSV file.
///
/// Columns match the fields of [`TaxYearConfig`]. `contribution_cap_pension_east`
/// may be left empty, in which case the West cap applies to both regions.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxYearConfigRecord {
    pub tax_year: i32,
    pub basic_allowance: Decimal,
    pub bracket_end_1: Decimal,
    pub bracket_end_2: Decimal,
    pub bracket_end_3: Decimal,
    pub zone1_factor: Decimal,
    pub zone1_offset: Decimal,
    pub zone2_factor: Decimal,
    pub zone2_offset: Decimal,
    pub zone2_base_tax: Decimal,
    pub zone3_factor: Decimal,
    pub zone3_offset: Decimal,
    pub solidarity_free_limit: Decimal,
    pub contribution_cap_health: Decimal,
    pub contribution_cap_pension_west: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub contribution_cap_pension_east: Option<Decimal>,
}

impl TaxYearConfigRecord {
    pub fn to_config(&self) -> TaxYearConfig {
        let contribution_cap_pension_east = self.contribution_cap_pension_east.unwrap_or_else(|| {
            debug!(
                tax_year = self.tax_year,
                "no East pension cap given, using West cap"
            );
            self.contribution_cap_pension_west
        });

        TaxYearConfig {
            tax_year: self.tax_year,
            basic_allowance: self.basic_allowance,
            bracket_end_1: self.bracket_end_1,
            bracket_end_2: self.bracket_end_2,
            bracket_end_3: self.bracket_end_3,
            zone1_factor: self.zone1_factor,
            zone1_offset: self.zone1_offset,
            zone2_factor: self.zone2_factor,
            zone2_offset: self.zone2_offset,
            zone2_base_tax: self.zone2_base_tax,
            zone3_factor: self.zone3_factor,
            zone3_offset: self.zone3_offset,
            solidarity_free_limit: self.solidarity_free_limit,
            contribution_cap_health: self.contribution_cap_health,
            contribution_cap_pension_west: self.contribution_cap_pension_west,
            contribution_cap_pension_east,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for tax-year configurations from CSV files.
pub struct TaxYearConfigLoader;

impl TaxYearConfigLoader {
    /// Parse tax-year records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxYearConfigRecord>, TaxYearLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxYearConfigRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Add `records` to `table`, replacing years it already has.
    ///
    /// Every record is checked before the first insert, so on error the
    /// table is left unchanged. Returns the number of years inserted.
    pub fn load(
        table: &mut TaxYearTable,
        records: &[TaxYearConfigRecord],
    ) -> Result<usize, TaxYearLoaderError> {
        let configs = Self::checked_configs(records)?;

        for config in &configs {
            if table.contains(config.tax_year) {
                warn!(
                    tax_year = config.tax_year,
                    "replacing configured tax year with CSV data"
                );
            }
        }

        let inserted = configs.len();
        for config in configs {
            table.insert(config)?;
        }

        Ok(inserted)
    }

    /// Build a table holding only `records`, falling back to `default_year`.
    pub fn build_table(
        records: &[TaxYearConfigRecord],
        default_year: i32,
    ) -> Result<TaxYearTable, TaxYearLoaderError> {
        let configs = Self::checked_configs(records)?;

        Ok(TaxYearTable::new(configs, default_year)?)
    }

    fn checked_configs(
        records: &[TaxYearConfigRecord]
    ) -> Result<Vec<TaxYearConfig>, TaxYearLoaderError> {
        let mut seen = HashSet::new();
        let mut configs = Vec::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.tax_year) {
                return Err(TaxYearLoaderError::DuplicateYear(record.tax_year));
            }

            let config = record.to_config();
            config
                .validate()
                .map_err(|source| TaxYearTableError::InvalidConfig {
                    year: record.tax_year,
                    source,
                })?;
            configs.push(config);
        }

        Ok(configs)
    }
}
