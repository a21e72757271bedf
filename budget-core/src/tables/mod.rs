//! Tax-year constant tables.
//!
//! Tables are plain data. The built-in table is constructed once per process
//! and shared read-only; other years are registered at startup through
//! [`TaxTableRegistry`].

mod ontario_2026;
mod registry;

pub use ontario_2026::builtin_table;
pub use registry::TaxTableRegistry;
