//! Simulation inputs: raw submissions, validated requests and engine data

mod data;
mod request;
pub mod submission;

pub use data::{
    AmortizationFrequency, CompanyProfile, CompanyType, CouponType, Currency, PaymentFrequency,
    Profile, SimulationData, UnknownVariant,
};
pub use request::{
    Denomination, ExchangeRates, InvestorInput, IssuerInput, SimulationRequest,
    INVESTOR_INTEREST_RATE, INVESTOR_TERM_DAYS,
};
pub use submission::{FieldIssue, SimulationSubmission, ValidationError};
