pub mod calculations;
pub mod models;
pub mod tables;

pub use calculations::{
    IncomeTaxCalculator, TaxAssessment, compute_income_breakdown,
    compute_income_breakdown_from_gross_amount, summarize_month, summarize_plan,
};
pub use models::*;
pub use tables::{TaxTableRegistry, builtin_table};
