//! Detail table rows and cost-distribution chart data
//!
//! Pure projections of [`CalculationResults`]; nothing is recomputed except
//! the chart shares.

use crate::engine::{CalculationResults, CostComponent};
use serde::Serialize;

/// One row of the detailed results table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    #[serde(rename = "concepto")]
    pub label: &'static str,
    pub usd: f64,
    #[serde(rename = "bolivares")]
    pub bs: Option<f64>,
}

/// Nominal value followed by every cost component
///
/// Only the nominal value and interest rows carry a bolivares amount, and
/// only when the results include a bolivares summary.
pub fn detail_rows(results: &CalculationResults) -> Vec<DetailRow> {
    let bs = results.bolivares.as_ref();
    let mut rows = Vec::with_capacity(CostComponent::ALL.len() + 1);

    rows.push(DetailRow {
        label: "Valor Nominal",
        usd: results.nominal_value,
        bs: bs.map(|b| b.nominal_value),
    });
    for (component, amount) in results.cost_components() {
        let bs_amount = match component {
            CostComponent::Interest => bs.map(|b| b.total_interest),
            _ => None,
        };
        rows.push(DetailRow { label: component.label(), usd: amount, bs: bs_amount });
    }
    rows
}

/// Closing row of the detail table
pub fn total_row(results: &CalculationResults) -> DetailRow {
    DetailRow {
        label: "COSTO TOTAL EMISIÓN",
        usd: results.total_issuance_cost,
        bs: results.bolivares.as_ref().map(|b| b.total_issuance_cost),
    }
}

/// One slice of the financing cost pie chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: f64,
    /// Share of the total issuance cost, in percent
    pub share_pct: f64,
}

/// Fee distribution grouped for the pie chart
///
/// Interest is not charted. Slices with no value are dropped.
pub fn chart_slices(results: &CalculationResults) -> Vec<ChartSlice> {
    let total = if results.total_issuance_cost != 0.0 { results.total_issuance_cost } else { 1.0 };

    let groups: [(&'static str, f64); 9] = [
        ("Estructuración", results.structuring),
        ("Colocación", results.placement),
        ("Representación", results.representation),
        ("Calificación Riesgo", results.risk_rating),
        ("Contribución Anual", results.annual_contribution),
        ("Registro Nacional", results.national_registry),
        ("CVV + IVA", results.cvv + results.iva),
        ("BVCC", results.bvcc),
        (
            "Liquidación y Otros",
            results.settlement + results.isin_registration + results.notice_publication,
        ),
    ];

    groups
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(label, value)| ChartSlice { label, value, share_pct: value / total * 100.0 })
        .collect()
}
