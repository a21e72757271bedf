use std::io::Read;
use std::path::Path;

use budget_core::{TaxTableError, TaxYearTable};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur when loading a tax-year table.
#[derive(Debug, Error)]
pub enum TaxTableLoaderError {
    #[error("failed to read tax table: {0}")]
    Io(#[from] std::io::Error),

    #[error("tax table parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid tax table: {0}")]
    Invalid(#[from] TaxTableError),
}

/// Loader for tax-year tables stored as TOML.
///
/// The document mirrors [`TaxYearTable`] field for field:
///
/// ```toml
/// tax_year = 2026
/// jurisdiction = "ON"
///
/// [[federal.brackets]]
/// upper_bound = 58523
/// rate = "0.14"
///
/// [[federal.brackets]]
/// rate = "0.33"          # no upper_bound: open-ended top bracket
///
/// [federal.personal_amount]
/// maximum = 16452
/// # ...
/// ```
///
/// Rates may be written as quoted strings so they are read as exact
/// decimals. Every table is validated before it is returned.
pub struct TaxTableLoader;

impl TaxTableLoader {
    /// Parse and validate a table from TOML text.
    pub fn parse_str(input: &str) -> Result<TaxYearTable, TaxTableLoaderError> {
        let table: TaxYearTable = toml::from_str(input)?;
        table.validate().inspect_err(|e| {
            warn!(tax_year = table.tax_year, error = %e, "rejected tax table");
        })?;

        info!(
            tax_year = table.tax_year,
            jurisdiction = %table.jurisdiction,
            "loaded tax table"
        );
        Ok(table)
    }

    /// Parse and validate a table from any reader, such as an open file.
    pub fn parse<R: Read>(mut reader: R) -> Result<TaxYearTable, TaxTableLoaderError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse_str(&input)
    }

    /// Read a file from disk and delegate to [`TaxTableLoader::parse_str`].
    pub fn load_file(path: &Path) -> Result<TaxYearTable, TaxTableLoaderError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_str(&contents)
    }
}
