//! Issuance fee schedule: regulatory, exchange and intermediary charges
//!
//! Rates are decimals (0.02 = 2%) applied to the nominal value unless noted.
//! The default schedule is the current fee table; a JSON file may override
//! any subset of fields.

use crate::simulation::{CompanyType, Currency};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// ISIN registration cost tiers by term
///
/// Each tier is `(max_term_days, cost)` with an inclusive upper bound. Terms
/// beyond the last bound pay the last tier's cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsinSchedule {
    tiers: Vec<(u32, f64)>,
}

impl Default for IsinSchedule {
    fn default() -> Self {
        Self {
            tiers: vec![
                (90, 38.0),
                (180, 80.0),
                (270, 118.0),
                (365, 160.0),
            ],
        }
    }
}

impl IsinSchedule {
    /// Create from explicit tiers, sorted by term
    pub fn from_tiers(tiers: &[(u32, f64)]) -> Self {
        let mut tiers = tiers.to_vec();
        tiers.sort_by_key(|(days, _)| *days);
        Self { tiers }
    }

    /// Flat ISIN cost for a term in days
    pub fn cost(&self, term_days: u32) -> f64 {
        self.tiers
            .iter()
            .find(|(max_days, _)| term_days <= *max_days)
            .or_else(|| self.tiers.last())
            .map(|(_, cost)| *cost)
            .unwrap_or(0.0)
    }
}

/// Complete fee table for an issuance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// National securities registry rate for SMEs
    pub registry_rate_pyme: f64,
    /// National securities registry rate for other issuers
    pub registry_rate_standard: f64,
    /// Annual regulator contribution
    pub annual_contribution_rate: f64,
    /// Risk rating agency fee (flat)
    pub risk_rating_fee: f64,
    /// Structuring fee
    pub structuring_rate: f64,
    /// Placement fee
    pub placement_rate: f64,
    /// Bondholder representative fee
    pub representation_rate: f64,
    /// Press notice publication (flat)
    pub notice_publication_fee: f64,
    /// CVV custody fee per complete 30-day month
    pub cvv_monthly_rate: f64,
    /// IVA, charged on the CVV fee only
    pub iva_rate: f64,
    /// Caracas stock exchange fee
    pub bvcc_rate: f64,
    /// Settlement fee for bolivares issuances
    pub settlement_rate_bolivares: f64,
    /// Settlement fee for dollar issuances
    pub settlement_rate_dollars: f64,
    /// ISIN code registration (flat, tiered by term)
    pub isin: IsinSchedule,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            registry_rate_pyme: 0.01,           // 1%
            registry_rate_standard: 0.02,       // 2%
            annual_contribution_rate: 0.005,    // 0.5%
            risk_rating_fee: 1_500.0,           // $1,500
            structuring_rate: 0.02,             // 2%
            placement_rate: 0.04,               // 4%
            representation_rate: 0.0025,        // 0.25%
            notice_publication_fee: 25.0,       // $25
            cvv_monthly_rate: 0.0003,           // 0.03% per month
            iva_rate: 0.16,                     // 16%
            bvcc_rate: 0.005,                   // 0.5%
            settlement_rate_bolivares: 0.0025,  // 0.25%
            settlement_rate_dollars: 0.0,
            isin: IsinSchedule::default(),
        }
    }
}

impl FeeSchedule {
    /// Load a schedule from JSON; absent fields keep their default
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, crate::SimulatorError> {
        let file = std::fs::File::open(path.as_ref())?;
        let schedule = serde_json::from_reader(std::io::BufReader::new(file))?;
        log::info!("loaded fee schedule from {}", path.as_ref().display());
        Ok(schedule)
    }

    /// Registry rate for the issuer's size class
    pub fn registry_rate(&self, company_type: CompanyType) -> f64 {
        match company_type {
            CompanyType::Pyme => self.registry_rate_pyme,
            CompanyType::NonPyme => self.registry_rate_standard,
        }
    }

    /// Settlement rate for the issuance currency
    pub fn settlement_rate(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Bolivares => self.settlement_rate_bolivares,
            Currency::Dollars => self.settlement_rate_dollars,
        }
    }

    /// Complete 30-day months in a term; the CVV fee accrues per month
    pub fn cvv_months(term_days: u32) -> u32 {
        term_days / 30
    }
}
