//! Validated simulation requests, one variant per profile

use super::{
    AmortizationFrequency, CompanyProfile, CompanyType, CouponType, Currency, PaymentFrequency,
    Profile, SimulationData,
};

// ============================================================================
// Investor defaults
// ============================================================================
// An investor only chooses how much to put in. The remaining terms are the
// standard paper offered to investors.

/// Term applied to investor simulations (days)
pub const INVESTOR_TERM_DAYS: u32 = 360;

/// Annual rate applied to investor simulations (percent)
pub const INVESTOR_INTEREST_RATE: f64 = 13.0;

/// Exchange rates for a bolivares issuance (Bs per USD)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRates {
    pub initial: f64,
    pub maturity: f64,
}

/// Issuance currency together with the data it requires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Denomination {
    Dollars,
    Bolivares(ExchangeRates),
}

impl Denomination {
    pub fn currency(&self) -> Currency {
        match self {
            Denomination::Dollars => Currency::Dollars,
            Denomination::Bolivares(_) => Currency::Bolivares,
        }
    }
}

/// Investor simulation: only the invested amount is chosen
#[derive(Debug, Clone, PartialEq)]
pub struct InvestorInput {
    pub nominal_value: f64,
}

/// Issuer simulation: full issuance terms
#[derive(Debug, Clone, PartialEq)]
pub struct IssuerInput {
    pub nominal_value: f64,
    pub term_days: u32,
    pub interest_rate: f64,
    pub payment_frequency: PaymentFrequency,
    pub amortization: AmortizationFrequency,
    pub company_type: CompanyType,
    pub denomination: Denomination,
    pub coupon: CouponType,
    pub company: CompanyProfile,
}

/// A simulation that has passed boundary validation
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationRequest {
    Investor(InvestorInput),
    Issuer(IssuerInput),
}

impl SimulationRequest {
    pub fn profile(&self) -> Profile {
        match self {
            SimulationRequest::Investor(_) => Profile::Investor,
            SimulationRequest::Issuer(_) => Profile::Issuer,
        }
    }

    pub fn nominal_value(&self) -> f64 {
        match self {
            SimulationRequest::Investor(input) => input.nominal_value,
            SimulationRequest::Issuer(input) => input.nominal_value,
        }
    }

    /// Resolve into the engine input, filling investor defaults
    pub fn to_simulation_data(&self) -> SimulationData {
        match self {
            SimulationRequest::Investor(input) => SimulationData {
                profile: Profile::Investor,
                nominal_value: input.nominal_value,
                term_days: INVESTOR_TERM_DAYS,
                interest_rate: INVESTOR_INTEREST_RATE,
                payment_frequency: PaymentFrequency::Annual,
                amortization: AmortizationFrequency::AtMaturity,
                company_type: CompanyType::NonPyme,
                currency: Currency::Dollars,
                coupon: CouponType::Periodic,
                initial_exchange_rate: None,
                maturity_exchange_rate: None,
                company: CompanyProfile::default(),
            },
            SimulationRequest::Issuer(input) => {
                let (initial, maturity) = match input.denomination {
                    Denomination::Dollars => (None, None),
                    Denomination::Bolivares(rates) => (Some(rates.initial), Some(rates.maturity)),
                };
                SimulationData {
                    profile: Profile::Issuer,
                    nominal_value: input.nominal_value,
                    term_days: input.term_days,
                    interest_rate: input.interest_rate,
                    payment_frequency: input.payment_frequency,
                    amortization: input.amortization,
                    company_type: input.company_type,
                    currency: input.denomination.currency(),
                    coupon: input.coupon,
                    initial_exchange_rate: initial,
                    maturity_exchange_rate: maturity,
                    company: input.company.clone(),
                }
            }
        }
    }
}

impl From<&SimulationRequest> for SimulationData {
    fn from(request: &SimulationRequest) -> Self {
        request.to_simulation_data()
    }
}
