//! Raw simulation submissions and boundary validation
//!
//! A submission is the loosely typed record posted by the form (or read from
//! a batch file). Every field except the profile and nominal value may be
//! absent; [`SimulationSubmission::validate`] turns it into a
//! [`SimulationRequest`] or reports every offending field at once.

use super::{
    CompanyProfile, Currency, Denomination, ExchangeRates, InvestorInput, IssuerInput, Profile,
    SimulationRequest,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Smallest nominal value accepted
pub const MIN_NOMINAL_VALUE: f64 = 1_000.0;

/// Accepted term range in days (inclusive)
pub const TERM_DAYS_RANGE: (u32, u32) = (30, 365);

/// Accepted annual rate range in percent (inclusive)
pub const INTEREST_RATE_RANGE: (f64, f64) = (1.0, 50.0);

/// Fields an issuer must always supply
const ISSUER_REQUIRED: &[&str] = &[
    "plazo",
    "tasaInteres",
    "frecuenciaPago",
    "frecuenciaAmortizacion",
    "tipoEmpresa",
    "moneda",
    "tipoCupon",
    "nombreEmpresa",
];

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Submission rejected at the boundary
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid simulation: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues.iter().map(|i| i.to_string()).collect::<Vec<_>>().join("; ")
}

/// Submission as posted by the form or stored by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSubmission {
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(rename = "valorNominal", default)]
    pub nominal_value: Option<f64>,
    /// Kept as a number so negative or fractional terms reach validation
    #[serde(rename = "plazo", default)]
    pub term_days: Option<f64>,
    #[serde(rename = "tasaInteres", default)]
    pub interest_rate: Option<f64>,
    #[serde(rename = "frecuenciaPago", default)]
    pub payment_frequency: Option<String>,
    #[serde(rename = "frecuenciaAmortizacion", default)]
    pub amortization: Option<String>,
    #[serde(rename = "tipoEmpresa", default)]
    pub company_type: Option<String>,
    #[serde(rename = "moneda", default)]
    pub currency: Option<String>,
    #[serde(rename = "tipoCupon", default)]
    pub coupon: Option<String>,
    #[serde(rename = "tipoCambioInicial", default)]
    pub initial_exchange_rate: Option<f64>,
    #[serde(rename = "tipoCambioVencimiento", default)]
    pub maturity_exchange_rate: Option<f64>,
    #[serde(rename = "nombreEmpresa", default)]
    pub company_name: Option<String>,
    #[serde(rename = "descripcionEmpresa", default)]
    pub company_description: Option<String>,
    #[serde(rename = "usoFondos", default)]
    pub use_of_funds: Option<String>,
    #[serde(rename = "entorno", default)]
    pub environment: Option<String>,
}

impl SimulationSubmission {
    /// Drop blank text and zero numbers, which the form uses for "not set"
    pub fn normalized(self) -> Self {
        Self {
            profile: blank_to_none(self.profile),
            nominal_value: self.nominal_value,
            term_days: zero_to_none(self.term_days),
            interest_rate: zero_to_none(self.interest_rate),
            payment_frequency: blank_to_none(self.payment_frequency),
            amortization: blank_to_none(self.amortization),
            company_type: blank_to_none(self.company_type),
            currency: blank_to_none(self.currency),
            coupon: blank_to_none(self.coupon),
            initial_exchange_rate: zero_to_none(self.initial_exchange_rate),
            maturity_exchange_rate: zero_to_none(self.maturity_exchange_rate),
            company_name: blank_to_none(self.company_name),
            company_description: blank_to_none(self.company_description),
            use_of_funds: blank_to_none(self.use_of_funds),
            environment: blank_to_none(self.environment),
        }
    }

    /// Validate per profile and build the typed request
    pub fn validate(&self) -> Result<SimulationRequest, ValidationError> {
        let sub = self.clone().normalized();
        let mut issues = Vec::new();

        let profile = match sub.profile.as_deref() {
            None => {
                issues.push(FieldIssue::new("profile", "a profile must be selected"));
                None
            }
            Some(value) => parse_choice::<Profile>("profile", Some(value), &mut issues),
        };

        let nominal_value = match sub.nominal_value {
            None => {
                issues.push(FieldIssue::new("valorNominal", "is required"));
                None
            }
            Some(v) if !v.is_finite() || v < MIN_NOMINAL_VALUE => {
                issues.push(FieldIssue::new(
                    "valorNominal",
                    format!("must be at least {MIN_NOMINAL_VALUE}"),
                ));
                None
            }
            Some(v) => Some(v),
        };

        let term_days = sub.term_days.and_then(|days| {
            let (min, max) = TERM_DAYS_RANGE;
            let whole = days.is_finite() && days.fract() == 0.0;
            if whole && days >= f64::from(min) && days <= f64::from(max) {
                Some(days as u32)
            } else {
                issues.push(FieldIssue::new(
                    "plazo",
                    format!("must be a whole number of days between {min} and {max}"),
                ));
                None
            }
        });

        if let Some(rate) = sub.interest_rate {
            let (min, max) = INTEREST_RATE_RANGE;
            if !rate.is_finite() || rate < min || rate > max {
                issues.push(FieldIssue::new("tasaInteres", format!("must be between {min} and {max} percent")));
            }
        }

        // Zero means "not set" after normalization, so check the raw rates
        check_positive("tipoCambioInicial", self.initial_exchange_rate, &mut issues);
        check_positive("tipoCambioVencimiento", self.maturity_exchange_rate, &mut issues);

        let payment_frequency = parse_choice("frecuenciaPago", sub.payment_frequency.as_deref(), &mut issues);
        let amortization = parse_choice("frecuenciaAmortizacion", sub.amortization.as_deref(), &mut issues);
        let company_type = parse_choice("tipoEmpresa", sub.company_type.as_deref(), &mut issues);
        let currency = parse_choice::<Currency>("moneda", sub.currency.as_deref(), &mut issues);
        let coupon = parse_choice("tipoCupon", sub.coupon.as_deref(), &mut issues);

        if profile == Some(Profile::Issuer) {
            for field in ISSUER_REQUIRED {
                if sub.is_missing(field) {
                    issues.push(FieldIssue::new(*field, "is required for issuers"));
                }
            }
            if currency == Some(Currency::Bolivares) {
                if self.initial_exchange_rate.is_none() {
                    issues.push(FieldIssue::new("tipoCambioInicial", "is required for bolivares issuances"));
                }
                if self.maturity_exchange_rate.is_none() {
                    issues.push(FieldIssue::new("tipoCambioVencimiento", "is required for bolivares issuances"));
                }
            }
        }

        if !issues.is_empty() {
            log::debug!("rejected submission: {}", summarize(&issues));
            return Err(ValidationError { issues });
        }

        // Every Option below is Some once no issue was recorded.
        let invalid = || ValidationError {
            issues: vec![FieldIssue::new("profile", "incomplete submission")],
        };
        let nominal_value = nominal_value.ok_or_else(invalid)?;

        match profile.ok_or_else(invalid)? {
            Profile::Investor => Ok(SimulationRequest::Investor(InvestorInput { nominal_value })),
            Profile::Issuer => {
                let denomination = match currency.ok_or_else(invalid)? {
                    Currency::Dollars => Denomination::Dollars,
                    Currency::Bolivares => Denomination::Bolivares(ExchangeRates {
                        initial: sub.initial_exchange_rate.ok_or_else(invalid)?,
                        maturity: sub.maturity_exchange_rate.ok_or_else(invalid)?,
                    }),
                };
                Ok(SimulationRequest::Issuer(IssuerInput {
                    nominal_value,
                    term_days: term_days.ok_or_else(invalid)?,
                    interest_rate: sub.interest_rate.ok_or_else(invalid)?,
                    payment_frequency: payment_frequency.ok_or_else(invalid)?,
                    amortization: amortization.ok_or_else(invalid)?,
                    company_type: company_type.ok_or_else(invalid)?,
                    denomination,
                    coupon: coupon.ok_or_else(invalid)?,
                    company: CompanyProfile {
                        name: sub.company_name.clone().unwrap_or_default(),
                        description: sub.company_description.clone().unwrap_or_default(),
                        use_of_funds: sub.use_of_funds.clone().unwrap_or_default(),
                        environment: sub.environment.clone().unwrap_or_default(),
                    },
                }))
            }
        }
    }

    fn is_missing(&self, field: &str) -> bool {
        match field {
            "plazo" => self.term_days.is_none(),
            "tasaInteres" => self.interest_rate.is_none(),
            "frecuenciaPago" => self.payment_frequency.is_none(),
            "frecuenciaAmortizacion" => self.amortization.is_none(),
            "tipoEmpresa" => self.company_type.is_none(),
            "moneda" => self.currency.is_none(),
            "tipoCupon" => self.coupon.is_none(),
            "nombreEmpresa" => self.company_name.is_none(),
            _ => false,
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn zero_to_none(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn check_positive(field: &'static str, value: Option<f64>, issues: &mut Vec<FieldIssue>) {
    if let Some(v) = value {
        if !v.is_finite() || v <= 0.0 {
            issues.push(FieldIssue::new(field, "must be a positive exchange rate"));
        }
    }
}

fn parse_choice<T>(field: &'static str, value: Option<&str>, issues: &mut Vec<FieldIssue>) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = value?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            issues.push(FieldIssue::new(field, e.to_string()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{CompanyType, CouponType, PaymentFrequency};

    fn issuer_submission() -> SimulationSubmission {
        SimulationSubmission {
            profile: Some("empresa".into()),
            nominal_value: Some(100_000.0),
            term_days: Some(360.0),
            interest_rate: Some(13.0),
            payment_frequency: Some("anual".into()),
            amortization: Some("vencimiento".into()),
            company_type: Some("no_pyme".into()),
            currency: Some("dolares".into()),
            coupon: Some("con_cupon".into()),
            company_name: Some("Acme C.A.".into()),
            ..Default::default()
        }
    }

    fn fields(err: &ValidationError) -> Vec<&'static str> {
        err.issues.iter().map(|i| i.field).collect()
    }

    #[test]
    fn test_investor_needs_only_nominal() {
        let sub = SimulationSubmission {
            profile: Some("inversionista".into()),
            nominal_value: Some(2_500.0),
            ..Default::default()
        };
        let request = sub.validate().unwrap();
        assert_eq!(request, SimulationRequest::Investor(InvestorInput { nominal_value: 2_500.0 }));
    }

    #[test]
    fn test_missing_profile_and_nominal() {
        let err = SimulationSubmission::default().validate().unwrap_err();
        assert_eq!(fields(&err), vec!["profile", "valorNominal"]);
    }

    #[test]
    fn test_nominal_below_minimum() {
        let mut sub = issuer_submission();
        sub.nominal_value = Some(999.99);
        let err = sub.validate().unwrap_err();
        assert_eq!(fields(&err), vec!["valorNominal"]);
    }

    #[test]
    fn test_issuer_required_fields_reported_together() {
        let sub = SimulationSubmission {
            profile: Some("empresa".into()),
            nominal_value: Some(50_000.0),
            payment_frequency: Some("".into()),
            company_name: Some("   ".into()),
            ..Default::default()
        };
        let err = sub.validate().unwrap_err();
        assert_eq!(
            fields(&err),
            vec![
                "plazo",
                "tasaInteres",
                "frecuenciaPago",
                "frecuenciaAmortizacion",
                "tipoEmpresa",
                "moneda",
                "tipoCupon",
                "nombreEmpresa",
            ]
        );
    }

    #[test]
    fn test_bolivares_requires_exchange_rates() {
        let mut sub = issuer_submission();
        sub.currency = Some("bolivares".into());
        sub.initial_exchange_rate = Some(36.5);
        let err = sub.validate().unwrap_err();
        assert_eq!(fields(&err), vec!["tipoCambioVencimiento"]);

        sub.maturity_exchange_rate = Some(38.0);
        match sub.validate().unwrap() {
            SimulationRequest::Issuer(input) => {
                assert_eq!(
                    input.denomination,
                    Denomination::Bolivares(ExchangeRates { initial: 36.5, maturity: 38.0 })
                );
            }
            other => panic!("expected issuer request, got {other:?}"),
        }
    }

    #[test]
    fn test_range_checks() {
        let mut sub = issuer_submission();
        sub.term_days = Some(29.0);
        sub.interest_rate = Some(50.5);
        sub.initial_exchange_rate = Some(-1.0);
        let err = sub.validate().unwrap_err();
        assert_eq!(fields(&err), vec!["plazo", "tasaInteres", "tipoCambioInicial"]);

        sub.term_days = Some(365.0);
        sub.interest_rate = Some(1.0);
        sub.initial_exchange_rate = None;
        assert!(sub.validate().is_ok());
    }

    #[test]
    fn test_term_must_be_whole_days() {
        for days in [-30.0, 90.5, 366.0, f64::NAN] {
            let mut sub = issuer_submission();
            sub.term_days = Some(days);
            let err = sub.validate().unwrap_err();
            assert_eq!(fields(&err), vec!["plazo"], "plazo = {days}");
        }

        let mut sub = issuer_submission();
        sub.term_days = Some(30.0);
        match sub.validate().unwrap() {
            SimulationRequest::Issuer(input) => assert_eq!(input.term_days, 30),
            other => panic!("expected issuer request, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_exchange_rate_is_not_positive() {
        let mut sub = issuer_submission();
        sub.currency = Some("bolivares".into());
        sub.initial_exchange_rate = Some(0.0);
        sub.maturity_exchange_rate = Some(38.0);

        let err = sub.validate().unwrap_err();
        assert_eq!(fields(&err), vec!["tipoCambioInicial"]);
        assert_eq!(err.issues[0].message, "must be a positive exchange rate");
    }

    #[test]
    fn test_unknown_choice_is_rejected() {
        let mut sub = issuer_submission();
        sub.payment_frequency = Some("diaria".into());
        let err = sub.validate().unwrap_err();
        assert_eq!(fields(&err), vec!["frecuenciaPago"]);
        assert!(err.to_string().contains("diaria"));
    }

    #[test]
    fn test_issuer_request_is_fully_typed() {
        let mut sub = issuer_submission();
        sub.company_type = Some("pyme".into());
        sub.coupon = Some("cero_cupon".into());
        sub.payment_frequency = Some("semestral".into());
        sub.use_of_funds = Some("Capital de trabajo".into());

        match sub.validate().unwrap() {
            SimulationRequest::Issuer(input) => {
                assert_eq!(input.company_type, CompanyType::Pyme);
                assert_eq!(input.coupon, CouponType::ZeroCoupon);
                assert_eq!(input.payment_frequency, PaymentFrequency::Semiannual);
                assert_eq!(input.denomination, Denomination::Dollars);
                assert_eq!(input.company.name, "Acme C.A.");
                assert_eq!(input.company.use_of_funds, "Capital de trabajo");
            }
            other => panic!("expected issuer request, got {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_partial_payload() {
        let json = r#"{"profile":"inversionista","valorNominal":100000,"plazo":null}"#;
        let sub: SimulationSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(sub.profile.as_deref(), Some("inversionista"));
        assert_eq!(sub.term_days, None);
        assert!(sub.validate().is_ok());
    }
}
