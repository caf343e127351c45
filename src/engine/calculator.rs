//! Issuance cost and return calculation

use super::{BolivaresSummary, CalculationResults, DAY_COUNT_BASIS};
use crate::fees::FeeSchedule;
use crate::simulation::SimulationData;

/// Calculator bound to a fee schedule
///
/// Holds no mutable state; one instance may be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct IssuanceEngine {
    fees: FeeSchedule,
}

impl IssuanceEngine {
    pub fn new(fees: FeeSchedule) -> Self {
        Self { fees }
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Derive issuance costs and investor returns
    ///
    /// Never fails. A zero term or zero nominal value yields non-finite
    /// figures, which are returned as-is; callers validate beforehand.
    pub fn calculate(&self, data: &SimulationData) -> CalculationResults {
        let fees = &self.fees;
        let nominal = data.nominal_value;
        let term = data.term_days as f64;

        // Simple interest on a 360-day year
        let total_interest = nominal * (data.interest_rate / 100.0) * term / DAY_COUNT_BASIS;

        let national_registry = nominal * fees.registry_rate(data.company_type);
        let annual_contribution = nominal * fees.annual_contribution_rate;
        let risk_rating = fees.risk_rating_fee;
        let structuring = nominal * fees.structuring_rate;
        let placement = nominal * fees.placement_rate;
        let representation = nominal * fees.representation_rate;
        let notice_publication = fees.notice_publication_fee;
        let isin_registration = fees.isin.cost(data.term_days);

        let cvv = nominal * fees.cvv_monthly_rate * FeeSchedule::cvv_months(data.term_days) as f64;
        let iva = cvv * fees.iva_rate;

        let bvcc = nominal * fees.bvcc_rate;
        let settlement = nominal * fees.settlement_rate(data.currency);

        let total_issuance_cost = total_interest
            + national_registry
            + annual_contribution
            + risk_rating
            + structuring
            + placement
            + representation
            + isin_registration
            + notice_publication
            + cvv
            + iva
            + bvcc
            + settlement;

        let financing_cost_pct = total_issuance_cost / nominal * 100.0;

        // The investor's gain is the coupon interest
        let net_gain = total_interest;
        let principal_plus_interest = nominal + net_gain;
        let total_roi_pct = net_gain / nominal * 100.0;
        let annualized_roi_pct =
            ((1.0 + total_roi_pct / 100.0).powf(DAY_COUNT_BASIS / term) - 1.0) * 100.0;

        let bolivares = data.bolivares_conversion_rate().map(|rate| BolivaresSummary {
            nominal_value: nominal * rate,
            total_interest: total_interest * rate,
            principal_plus_interest: principal_plus_interest * rate,
            total_issuance_cost: total_issuance_cost * rate,
        });

        CalculationResults {
            nominal_value: nominal,
            cash_value: nominal,
            term_days: data.term_days,
            interest_rate: data.interest_rate,
            total_interest,
            national_registry,
            annual_contribution,
            risk_rating,
            structuring,
            placement,
            representation,
            isin_registration,
            notice_publication,
            cvv,
            iva,
            bvcc,
            settlement,
            total_issuance_cost,
            financing_cost_pct,
            net_gain,
            principal_plus_interest,
            total_roi_pct,
            annualized_roi_pct,
            bolivares,
        }
    }
}

/// Calculate with the default fee schedule
pub fn calculate(data: &SimulationData) -> CalculationResults {
    IssuanceEngine::default().calculate(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CostComponent;
    use crate::simulation::{
        AmortizationFrequency, CompanyProfile, CompanyType, CouponType, Currency,
        PaymentFrequency, Profile,
    };
    use approx::assert_relative_eq;

    fn base_data() -> SimulationData {
        SimulationData {
            profile: Profile::Issuer,
            nominal_value: 100_000.0,
            term_days: 360,
            interest_rate: 13.0,
            payment_frequency: PaymentFrequency::Annual,
            amortization: AmortizationFrequency::AtMaturity,
            company_type: CompanyType::NonPyme,
            currency: Currency::Dollars,
            coupon: CouponType::Periodic,
            initial_exchange_rate: None,
            maturity_exchange_rate: None,
            company: CompanyProfile::default(),
        }
    }

    fn bolivares_data() -> SimulationData {
        SimulationData {
            currency: Currency::Bolivares,
            initial_exchange_rate: Some(36.50),
            maturity_exchange_rate: Some(38.00),
            ..base_data()
        }
    }

    #[test]
    fn test_dollar_scenario() {
        let r = calculate(&base_data());

        assert_relative_eq!(r.total_interest, 13_000.0, max_relative = 1e-12);
        assert_relative_eq!(r.national_registry, 2_000.0, max_relative = 1e-12);
        assert_relative_eq!(r.annual_contribution, 500.0, max_relative = 1e-12);
        assert_eq!(r.risk_rating, 1_500.0);
        assert_relative_eq!(r.structuring, 2_000.0, max_relative = 1e-12);
        assert_relative_eq!(r.placement, 4_000.0, max_relative = 1e-12);
        assert_relative_eq!(r.representation, 250.0, max_relative = 1e-12);
        assert_eq!(r.isin_registration, 160.0);
        assert_eq!(r.notice_publication, 25.0);
        assert_relative_eq!(r.cvv, 360.0, max_relative = 1e-12);
        assert_relative_eq!(r.iva, 57.6, max_relative = 1e-12);
        assert_relative_eq!(r.bvcc, 500.0, max_relative = 1e-12);
        assert_eq!(r.settlement, 0.0);
        assert_relative_eq!(r.total_issuance_cost, 24_352.6, max_relative = 1e-12);
        assert_relative_eq!(r.financing_cost_pct, 24.3526, max_relative = 1e-12);

        assert_eq!(r.cash_value, r.nominal_value);
        assert_eq!(r.term_days, 360);
        assert_eq!(r.interest_rate, 13.0);
        assert_eq!(r.net_gain, r.total_interest);
        assert_relative_eq!(r.principal_plus_interest, 113_000.0, max_relative = 1e-12);
        assert_relative_eq!(r.total_roi_pct, 13.0, max_relative = 1e-12);
        assert_relative_eq!(r.annualized_roi_pct, 13.0, max_relative = 1e-9);
        assert!(r.bolivares.is_none());
    }

    #[test]
    fn test_bolivares_scenario() {
        let usd = calculate(&base_data());
        let r = calculate(&bolivares_data());

        assert_relative_eq!(r.settlement, 250.0, max_relative = 1e-12);
        assert_relative_eq!(r.total_issuance_cost, usd.total_issuance_cost + 250.0, max_relative = 1e-12);

        let bs = r.bolivares.expect("bolivares summary");
        assert_relative_eq!(bs.nominal_value, 3_800_000.0, max_relative = 1e-12);
        assert_eq!(bs.nominal_value, r.nominal_value * 38.0);
        assert_eq!(bs.total_interest, r.total_interest * 38.0);
        assert_eq!(bs.principal_plus_interest, r.principal_plus_interest * 38.0);
        assert_eq!(bs.total_issuance_cost, r.total_issuance_cost * 38.0);
    }

    #[test]
    fn test_conversion_ignores_initial_rate_value() {
        let mut data = bolivares_data();
        data.initial_exchange_rate = Some(1.0);
        let r = calculate(&data);
        assert_eq!(r.bolivares.map(|b| b.nominal_value), Some(3_800_000.0));
    }

    #[test]
    fn test_no_summary_without_both_rates() {
        let mut data = bolivares_data();
        data.initial_exchange_rate = None;
        let r = calculate(&data);

        assert!(r.bolivares.is_none());
        // Settlement still follows the currency
        assert_relative_eq!(r.settlement, 250.0, max_relative = 1e-12);

        data.initial_exchange_rate = Some(36.5);
        data.maturity_exchange_rate = Some(0.0);
        assert!(calculate(&data).bolivares.is_none());
    }

    #[test]
    fn test_total_is_sum_of_components() {
        for &(nominal, term, rate) in &[
            (1_000.0, 30, 1.0),
            (250_000.0, 91, 18.5),
            (3_750_000.0, 200, 45.0),
            (12_345.67, 365, 9.99),
        ] {
            for company_type in [CompanyType::Pyme, CompanyType::NonPyme] {
                let data = SimulationData {
                    nominal_value: nominal,
                    term_days: term,
                    interest_rate: rate,
                    company_type,
                    ..bolivares_data()
                };
                let r = calculate(&data);
                let sum: f64 = r.cost_components().iter().map(|(_, v)| v).sum();
                assert_relative_eq!(r.total_issuance_cost, sum, max_relative = 1e-12);
                assert_eq!(r.cost_components().len(), 13);
            }
        }
    }

    #[test]
    fn test_iva_only_on_cvv() {
        for term in [30, 89, 180, 365] {
            let r = calculate(&SimulationData { term_days: term, ..base_data() });
            assert_eq!(r.iva, r.cvv * 0.16);
        }
        // Below one complete month there is no CVV and hence no IVA
        let r = calculate(&SimulationData { term_days: 29, ..base_data() });
        assert_eq!(r.cvv, 0.0);
        assert_eq!(r.iva, 0.0);
    }

    #[test]
    fn test_isin_follows_term() {
        let expected = [(90, 38.0), (91, 80.0), (180, 80.0), (181, 118.0), (270, 118.0), (271, 160.0), (400, 160.0)];
        for (term, cost) in expected {
            let r = calculate(&SimulationData { term_days: term, ..base_data() });
            assert_eq!(r.isin_registration, cost, "term {term}");
        }
    }

    #[test]
    fn test_registry_rate_by_company_type() {
        for nominal in [1_000.0, 75_000.0, 9_999_999.0] {
            let pyme = calculate(&SimulationData {
                nominal_value: nominal,
                company_type: CompanyType::Pyme,
                ..base_data()
            });
            let standard = calculate(&SimulationData { nominal_value: nominal, ..base_data() });
            assert_eq!(pyme.national_registry, nominal * 0.01);
            assert_eq!(standard.national_registry, nominal * 0.02);
        }
    }

    #[test]
    fn test_annualized_roi_compounds_short_terms() {
        let r = calculate(&SimulationData { term_days: 180, ..base_data() });

        assert_relative_eq!(r.total_roi_pct, 6.5, max_relative = 1e-12);
        // (1.065^2 - 1) * 100
        assert_relative_eq!(r.annualized_roi_pct, 13.4225, max_relative = 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let data = bolivares_data();
        assert_eq!(calculate(&data), calculate(&data));
    }

    #[test]
    fn test_zero_term_passes_through_non_finite() {
        let r = calculate(&SimulationData { term_days: 0, ..base_data() });

        assert_eq!(r.total_interest, 0.0);
        assert_eq!(r.total_roi_pct, 0.0);
        // 360/0 is +inf and 1^inf is 1
        assert_eq!(r.annualized_roi_pct, 0.0);
        assert_eq!(r.isin_registration, 38.0);

        let r = calculate(&SimulationData { nominal_value: 0.0, ..base_data() });
        assert!(r.financing_cost_pct.is_infinite());
        assert!(r.total_roi_pct.is_nan());
    }

    #[test]
    fn test_custom_schedule() {
        let fees = FeeSchedule { placement_rate: 0.03, ..FeeSchedule::default() };
        let engine = IssuanceEngine::new(fees);
        let r = engine.calculate(&base_data());

        assert_relative_eq!(r.placement, 3_000.0, max_relative = 1e-12);
        assert_relative_eq!(r.total_issuance_cost, 23_352.6, max_relative = 1e-12);
        assert_eq!(r.component(CostComponent::Placement), r.placement);
    }
}
