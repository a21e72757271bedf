use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::builtin_table;
use crate::models::{TaxTableError, TaxYearTable};

/// Registry of validated [`TaxYearTable`]s, keyed by tax year.
///
/// Typical lifetime:
/// 1. Create with `TaxTableRegistry::with_builtin()`.
/// 2. Call `register` once per table loaded from configuration.
/// 3. Call `get` (or `latest`) whenever a calculation needs a table.
///
/// Tables are shared behind [`Arc`] and never mutated after registration.
#[derive(Debug, Clone)]
pub struct TaxTableRegistry {
    tables: HashMap<i32, Arc<TaxYearTable>>,
}

impl TaxTableRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Create a registry holding the table compiled into the crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        let table = builtin_table();
        registry
            .tables
            .insert(table.tax_year, Arc::new(table.clone()));
        registry
    }

    /// Validate and register a table.
    ///
    /// A table for the same year is replaced.
    ///
    /// # Errors
    /// Any [`TaxTableError`] reported by [`TaxYearTable::validate`].
    pub fn register(
        &mut self,
        table: TaxYearTable,
    ) -> Result<(), TaxTableError> {
        table.validate()?;
        let year = table.tax_year;
        if self.tables.insert(year, Arc::new(table)).is_some() {
            warn!(tax_year = year, "replacing previously registered tax table");
        } else {
            debug!(tax_year = year, "registered tax table");
        }
        Ok(())
    }

    /// Years with a registered table, ascending.
    pub fn available_years(&self) -> Vec<i32> {
        let mut years: Vec<_> = self.tables.keys().copied().collect();
        years.sort_unstable();
        years
    }

    /// Look up the table for `year`.
    ///
    /// # Errors
    /// [`TaxTableError::UnknownYear`] naming the requested and available years.
    pub fn get(
        &self,
        year: i32,
    ) -> Result<Arc<TaxYearTable>, TaxTableError> {
        self.tables
            .get(&year)
            .cloned()
            .ok_or_else(|| TaxTableError::UnknownYear {
                year,
                available: self.available_years(),
            })
    }

    /// The table for the most recent registered year, if any.
    pub fn latest(&self) -> Option<Arc<TaxYearTable>> {
        self.tables
            .iter()
            .max_by_key(|(year, _)| **year)
            .map(|(_, table)| Arc::clone(table))
    }
}

impl Default for TaxTableRegistry {
    fn default() -> Self {
        Self::new()
    }
}
