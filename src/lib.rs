//! Commercial paper issuance simulator
//!
//! Given a nominal value, term and rate (plus issuer details for corporate
//! users), the engine derives every issuance fee, the total and relative
//! financing cost, the investor's return and, for bolivares issuances, the
//! headline figures at the maturity exchange rate.
//!
//! - [`simulation`]: submissions, validation and engine input
//! - [`fees`]: the regulatory and intermediary fee table
//! - [`engine`]: the pure calculation
//! - [`storage`] and [`api`]: in-memory record store and HTTP intake
//! - [`report`] and [`batch`]: presentation and CSV batch runs

pub mod api;
pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod fees;
pub mod report;
pub mod simulation;
pub mod storage;

pub use engine::{calculate, CalculationResults, IssuanceEngine};
pub use error::{Result, SimulatorError};
pub use fees::FeeSchedule;
pub use simulation::{SimulationData, SimulationRequest, SimulationSubmission};
