//! Calculation output record

use serde::{Deserialize, Serialize};

/// Line items that make up the total issuance cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostComponent {
    Interest,
    NationalRegistry,
    AnnualContribution,
    RiskRating,
    Structuring,
    Placement,
    Representation,
    IsinRegistration,
    NoticePublication,
    Cvv,
    Iva,
    Bvcc,
    Settlement,
}

impl CostComponent {
    /// All components in report order
    pub const ALL: [CostComponent; 13] = [
        CostComponent::Interest,
        CostComponent::NationalRegistry,
        CostComponent::AnnualContribution,
        CostComponent::RiskRating,
        CostComponent::Structuring,
        CostComponent::Placement,
        CostComponent::Representation,
        CostComponent::IsinRegistration,
        CostComponent::NoticePublication,
        CostComponent::Cvv,
        CostComponent::Iva,
        CostComponent::Bvcc,
        CostComponent::Settlement,
    ];

    /// Display label used in tables and reports
    pub fn label(&self) -> &'static str {
        match self {
            CostComponent::Interest => "Intereses Totales",
            CostComponent::NationalRegistry => "Registro Nacional de Valores",
            CostComponent::AnnualContribution => "Contribución Anual",
            CostComponent::RiskRating => "Calificación de Riesgo",
            CostComponent::Structuring => "Estructuración",
            CostComponent::Placement => "Colocación",
            CostComponent::Representation => "Representación",
            CostComponent::IsinRegistration => "Inscripción Código ISIN",
            CostComponent::NoticePublication => "Publicación Aviso de Prensa",
            CostComponent::Cvv => "CVV",
            CostComponent::Iva => "IVA",
            CostComponent::Bvcc => "BVCC",
            CostComponent::Settlement => "Liquidación",
        }
    }
}

/// Headline figures re-expressed in bolivares at the maturity exchange rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BolivaresSummary {
    #[serde(rename = "valorNominal")]
    pub nominal_value: f64,
    #[serde(rename = "interesesTotales")]
    pub total_interest: f64,
    #[serde(rename = "capitalMasIntereses")]
    pub principal_plus_interest: f64,
    #[serde(rename = "costoTotalEmision")]
    pub total_issuance_cost: f64,
}

/// Issuance costs and investor returns for one simulation
///
/// Amounts are in the issuance currency at full precision; percentages are
/// expressed as percent (13.0 = 13%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResults {
    #[serde(rename = "valorNominal")]
    pub nominal_value: f64,
    /// Cash raised at a 100% price
    #[serde(rename = "valorEfectivo")]
    pub cash_value: f64,
    #[serde(rename = "plazo")]
    pub term_days: u32,
    #[serde(rename = "tasaInteres")]
    pub interest_rate: f64,
    #[serde(rename = "interesesTotales")]
    pub total_interest: f64,

    // Fee items
    #[serde(rename = "registroNacional")]
    pub national_registry: f64,
    #[serde(rename = "contribucionAnual")]
    pub annual_contribution: f64,
    #[serde(rename = "calificacionRiesgo")]
    pub risk_rating: f64,
    #[serde(rename = "estructuracion")]
    pub structuring: f64,
    #[serde(rename = "colocacion")]
    pub placement: f64,
    #[serde(rename = "representacion")]
    pub representation: f64,
    #[serde(rename = "inscripcionISIN")]
    pub isin_registration: f64,
    #[serde(rename = "publicacionAviso")]
    pub notice_publication: f64,
    pub cvv: f64,
    pub iva: f64,
    pub bvcc: f64,
    #[serde(rename = "liquidacion")]
    pub settlement: f64,

    // Issuer view
    #[serde(rename = "costoTotalEmision")]
    pub total_issuance_cost: f64,
    #[serde(rename = "costoFinanciamiento")]
    pub financing_cost_pct: f64,

    // Investor view
    #[serde(rename = "gananciaNeta")]
    pub net_gain: f64,
    #[serde(rename = "capitalMasIntereses")]
    pub principal_plus_interest: f64,
    #[serde(rename = "roiTotal")]
    pub total_roi_pct: f64,
    #[serde(rename = "roiAnualizado")]
    pub annualized_roi_pct: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolivares: Option<BolivaresSummary>,
}

impl CalculationResults {
    /// Amount of a single cost component
    pub fn component(&self, component: CostComponent) -> f64 {
        match component {
            CostComponent::Interest => self.total_interest,
            CostComponent::NationalRegistry => self.national_registry,
            CostComponent::AnnualContribution => self.annual_contribution,
            CostComponent::RiskRating => self.risk_rating,
            CostComponent::Structuring => self.structuring,
            CostComponent::Placement => self.placement,
            CostComponent::Representation => self.representation,
            CostComponent::IsinRegistration => self.isin_registration,
            CostComponent::NoticePublication => self.notice_publication,
            CostComponent::Cvv => self.cvv,
            CostComponent::Iva => self.iva,
            CostComponent::Bvcc => self.bvcc,
            CostComponent::Settlement => self.settlement,
        }
    }

    /// Every cost component with its amount, in report order
    pub fn cost_components(&self) -> Vec<(CostComponent, f64)> {
        CostComponent::ALL
            .iter()
            .map(|c| (*c, self.component(*c)))
            .collect()
    }
}
