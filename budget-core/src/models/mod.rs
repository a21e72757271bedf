mod breakdown;
mod income;
mod plan;
mod tax_bracket;
mod tax_year_table;

pub use breakdown::IncomeBreakdown;
pub use income::{BonusKind, IncomeDescription, IncomeLimits, IncomeValidationError};
pub use plan::{
    BudgetPlan, Frequency, InvestmentAccount, InvestmentContribution, MAX_PLANS_PER_USER,
    MonthlySummary, PlanSummary, RecurringExpense,
};
pub use tax_bracket::TaxBracket;
pub use tax_year_table::{
    CppSchedule, EiSchedule, FederalSchedule, HealthPremiumBand, PersonalAmountPhaseOut,
    ProvincialSchedule, Surtax, TaxTableError, TaxYearTable,
};
