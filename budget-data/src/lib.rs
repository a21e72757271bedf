pub mod amount;
pub mod entries;
mod plan_loader;
mod table_loader;

pub use amount::{ParseDecimalError, parse_decimal};
pub use entries::{EntryLoadError, LineItems};
pub use plan_loader::{MAX_PLAN_NAME_LEN, PlanLoader, PlanLoaderError};
pub use table_loader::{TaxTableLoader, TaxTableLoaderError};
