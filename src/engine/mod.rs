//! Financial calculation engine for commercial paper issuances

mod calculator;
mod results;

pub use calculator::{calculate, IssuanceEngine};
pub use results::{BolivaresSummary, CalculationResults, CostComponent};

/// Day-count basis for interest accrual and annualization
pub const DAY_COUNT_BASIS: f64 = 360.0;
