//! Engine input record and its enumerations
//!
//! Wire names follow the simulator form (`valorNominal`, `plazo`, ...) so the
//! same JSON shape is accepted by the CLI, the API and the batch loader.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a wire value does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value '{value}', expected one of: {}", .expected.join(", "))]
pub struct UnknownVariant {
    pub value: String,
    pub expected: &'static [&'static str],
}

/// Who is running the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profile {
    #[serde(rename = "inversionista")]
    Investor,
    #[serde(rename = "empresa")]
    Issuer,
}

impl Profile {
    pub const VALUES: &'static [&'static str] = &["inversionista", "empresa"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Investor => "inversionista",
            Profile::Issuer => "empresa",
        }
    }
}

impl FromStr for Profile {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inversionista" => Ok(Profile::Investor),
            "empresa" => Ok(Profile::Issuer),
            _ => Err(UnknownVariant { value: s.to_string(), expected: Self::VALUES }),
        }
    }
}

/// Coupon payment frequency (informational, not used in arithmetic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentFrequency {
    #[serde(rename = "mensual")]
    Monthly,
    #[serde(rename = "trimestral")]
    Quarterly,
    #[serde(rename = "semestral")]
    Semiannual,
    #[serde(rename = "anual")]
    Annual,
}

impl PaymentFrequency {
    pub const VALUES: &'static [&'static str] = &["mensual", "trimestral", "semestral", "anual"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "mensual",
            PaymentFrequency::Quarterly => "trimestral",
            PaymentFrequency::Semiannual => "semestral",
            PaymentFrequency::Annual => "anual",
        }
    }
}

impl FromStr for PaymentFrequency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mensual" => Ok(PaymentFrequency::Monthly),
            "trimestral" => Ok(PaymentFrequency::Quarterly),
            "semestral" => Ok(PaymentFrequency::Semiannual),
            "anual" => Ok(PaymentFrequency::Annual),
            _ => Err(UnknownVariant { value: s.to_string(), expected: Self::VALUES }),
        }
    }
}

/// Principal amortization frequency (informational)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmortizationFrequency {
    #[serde(rename = "anual")]
    Annual,
    #[serde(rename = "vencimiento")]
    AtMaturity,
}

impl AmortizationFrequency {
    pub const VALUES: &'static [&'static str] = &["anual", "vencimiento"];

    pub fn as_str(&self) -> &'static str {
        match self {
            AmortizationFrequency::Annual => "anual",
            AmortizationFrequency::AtMaturity => "vencimiento",
        }
    }
}

impl FromStr for AmortizationFrequency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anual" => Ok(AmortizationFrequency::Annual),
            "vencimiento" => Ok(AmortizationFrequency::AtMaturity),
            _ => Err(UnknownVariant { value: s.to_string(), expected: Self::VALUES }),
        }
    }
}

/// Issuer size class; drives the national registry fee rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    #[serde(rename = "pyme")]
    Pyme,
    #[serde(rename = "no_pyme")]
    NonPyme,
}

impl CompanyType {
    pub const VALUES: &'static [&'static str] = &["pyme", "no_pyme"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Pyme => "pyme",
            CompanyType::NonPyme => "no_pyme",
        }
    }
}

impl FromStr for CompanyType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pyme" => Ok(CompanyType::Pyme),
            "no_pyme" => Ok(CompanyType::NonPyme),
            _ => Err(UnknownVariant { value: s.to_string(), expected: Self::VALUES }),
        }
    }
}

/// Issuance currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "dolares")]
    Dollars,
    #[serde(rename = "bolivares")]
    Bolivares,
}

impl Currency {
    pub const VALUES: &'static [&'static str] = &["dolares", "bolivares"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Dollars => "dolares",
            Currency::Bolivares => "bolivares",
        }
    }
}

impl FromStr for Currency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dolares" => Ok(Currency::Dollars),
            "bolivares" => Ok(Currency::Bolivares),
            _ => Err(UnknownVariant { value: s.to_string(), expected: Self::VALUES }),
        }
    }
}

/// Coupon structure (informational)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CouponType {
    #[serde(rename = "con_cupon")]
    Periodic,
    #[serde(rename = "cero_cupon")]
    ZeroCoupon,
}

impl CouponType {
    pub const VALUES: &'static [&'static str] = &["con_cupon", "cero_cupon"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CouponType::Periodic => "con_cupon",
            CouponType::ZeroCoupon => "cero_cupon",
        }
    }
}

impl FromStr for CouponType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "con_cupon" => Ok(CouponType::Periodic),
            "cero_cupon" => Ok(CouponType::ZeroCoupon),
            _ => Err(UnknownVariant { value: s.to_string(), expected: Self::VALUES }),
        }
    }
}

/// Free-text issuer metadata carried into reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(rename = "nombreEmpresa", default)]
    pub name: String,
    #[serde(rename = "descripcionEmpresa", default)]
    pub description: String,
    #[serde(rename = "usoFondos", default)]
    pub use_of_funds: String,
    #[serde(rename = "entorno", default)]
    pub environment: String,
}

/// Fully resolved engine input
///
/// Every arithmetic field is present; profile defaults have already been
/// applied (see [`super::SimulationRequest`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationData {
    pub profile: Profile,

    /// Face amount of the issuance
    #[serde(rename = "valorNominal")]
    pub nominal_value: f64,

    /// Term in days
    #[serde(rename = "plazo")]
    pub term_days: u32,

    /// Nominal annual rate as a percentage (13.0 = 13%)
    #[serde(rename = "tasaInteres")]
    pub interest_rate: f64,

    #[serde(rename = "frecuenciaPago")]
    pub payment_frequency: PaymentFrequency,

    #[serde(rename = "frecuenciaAmortizacion")]
    pub amortization: AmortizationFrequency,

    #[serde(rename = "tipoEmpresa")]
    pub company_type: CompanyType,

    #[serde(rename = "moneda")]
    pub currency: Currency,

    #[serde(rename = "tipoCupon")]
    pub coupon: CouponType,

    /// Bs per USD at issue. Collected but not used in any calculation.
    #[serde(rename = "tipoCambioInicial", default, skip_serializing_if = "Option::is_none")]
    pub initial_exchange_rate: Option<f64>,

    /// Bs per USD at maturity
    #[serde(rename = "tipoCambioVencimiento", default, skip_serializing_if = "Option::is_none")]
    pub maturity_exchange_rate: Option<f64>,

    #[serde(flatten)]
    pub company: CompanyProfile,
}

impl SimulationData {
    /// Rate used to re-express figures in bolivares, if conversion applies
    ///
    /// Conversion needs a bolivares issuance and both exchange rates set to a
    /// non-zero value. Only the maturity rate is returned.
    pub fn bolivares_conversion_rate(&self) -> Option<f64> {
        if self.currency != Currency::Bolivares {
            return None;
        }
        match (self.initial_exchange_rate, self.maturity_exchange_rate) {
            (Some(initial), Some(maturity)) if is_set(initial) && is_set(maturity) => Some(maturity),
            _ => None,
        }
    }
}

fn is_set(rate: f64) -> bool {
    rate != 0.0 && !rate.is_nan()
}
