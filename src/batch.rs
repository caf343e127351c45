//! Batch simulation over CSV files
//!
//! Each input row is a submission with the same column names as the JSON
//! payload. Rows are validated and calculated in parallel; a rejected row is
//! reported in the output instead of aborting the run.

use crate::engine::{CalculationResults, IssuanceEngine};
use crate::simulation::SimulationSubmission;
use rayon::prelude::*;
use serde::Serialize;
use std::io;

/// Outcome counts for a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// One output line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub row: usize,
    pub profile: Option<String>,
    pub status: &'static str,
    pub error: Option<String>,
    #[serde(rename = "valorNominal")]
    pub nominal_value: Option<f64>,
    #[serde(rename = "plazo")]
    pub term_days: Option<u32>,
    #[serde(rename = "tasaInteres")]
    pub interest_rate: Option<f64>,
    #[serde(rename = "interesesTotales")]
    pub total_interest: Option<f64>,
    #[serde(rename = "costoTotalEmision")]
    pub total_issuance_cost: Option<f64>,
    #[serde(rename = "costoFinanciamiento")]
    pub financing_cost_pct: Option<f64>,
    #[serde(rename = "capitalMasIntereses")]
    pub principal_plus_interest: Option<f64>,
    #[serde(rename = "roiTotal")]
    pub total_roi_pct: Option<f64>,
    #[serde(rename = "roiAnualizado")]
    pub annualized_roi_pct: Option<f64>,
    #[serde(rename = "costoTotalEmisionBs")]
    pub total_issuance_cost_bs: Option<f64>,
    #[serde(rename = "capitalMasInteresesBs")]
    pub principal_plus_interest_bs: Option<f64>,
}

impl BatchRow {
    fn succeeded(row: usize, profile: &str, r: &CalculationResults) -> Self {
        Self {
            row,
            profile: Some(profile.to_string()),
            status: "ok",
            error: None,
            nominal_value: Some(r.nominal_value),
            term_days: Some(r.term_days),
            interest_rate: Some(r.interest_rate),
            total_interest: Some(r.total_interest),
            total_issuance_cost: Some(r.total_issuance_cost),
            financing_cost_pct: Some(r.financing_cost_pct),
            principal_plus_interest: Some(r.principal_plus_interest),
            total_roi_pct: Some(r.total_roi_pct),
            annualized_roi_pct: Some(r.annualized_roi_pct),
            total_issuance_cost_bs: r.bolivares.map(|b| b.total_issuance_cost),
            principal_plus_interest_bs: r.bolivares.map(|b| b.principal_plus_interest),
        }
    }

    fn failed(row: usize, profile: Option<String>, error: String) -> Self {
        Self {
            row,
            profile,
            status: "error",
            error: Some(error),
            nominal_value: None,
            term_days: None,
            interest_rate: None,
            total_interest: None,
            total_issuance_cost: None,
            financing_cost_pct: None,
            principal_plus_interest: None,
            total_roi_pct: None,
            annualized_roi_pct: None,
            total_issuance_cost_bs: None,
            principal_plus_interest_bs: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Read submissions from CSV
///
/// Rows that cannot be parsed at all are kept as errors so row numbers in the
/// output line up with the input.
pub fn read_submissions<R: io::Read>(reader: R) -> crate::Result<Vec<Result<SimulationSubmission, String>>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    // Surface a broken header instead of failing every row
    rdr.headers()?;

    let rows = rdr
        .deserialize::<SimulationSubmission>()
        .map(|row| row.map_err(|e| e.to_string()))
        .collect();
    Ok(rows)
}

/// Validate and calculate every submission in parallel
///
/// Output rows keep the input order; row numbers start at 1.
pub fn simulate_all(engine: &IssuanceEngine, submissions: &[Result<SimulationSubmission, String>]) -> Vec<BatchRow> {
    submissions
        .par_iter()
        .enumerate()
        .map(|(i, parsed)| {
            let row = i + 1;
            let submission = match parsed {
                Ok(submission) => submission,
                Err(e) => return BatchRow::failed(row, None, e.clone()),
            };
            match submission.validate() {
                Ok(request) => {
                    let results = engine.calculate(&request.to_simulation_data());
                    BatchRow::succeeded(row, request.profile().as_str(), &results)
                }
                Err(e) => BatchRow::failed(row, submission.profile.clone(), e.to_string()),
            }
        })
        .collect()
}

/// Run a whole batch from `input` to `output`
pub fn run_batch<R: io::Read, W: io::Write>(
    engine: &IssuanceEngine,
    input: R,
    output: W,
) -> crate::Result<BatchSummary> {
    let submissions = read_submissions(input)?;
    log::info!("simulating {} submissions", submissions.len());

    let rows = simulate_all(engine, &submissions);

    let mut wtr = csv::Writer::from_writer(output);
    for row in &rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    let succeeded = rows.iter().filter(|r| r.is_ok()).count();
    let summary = BatchSummary { total: rows.len(), succeeded, failed: rows.len() - succeeded };
    if summary.failed > 0 {
        log::warn!("{} of {} submissions rejected", summary.failed, summary.total);
    }
    log::info!("batch complete: {} ok, {} failed", summary.succeeded, summary.failed);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
profile,valorNominal,plazo,tasaInteres,frecuenciaPago,frecuenciaAmortizacion,tipoEmpresa,moneda,tipoCupon,tipoCambioInicial,tipoCambioVencimiento,nombreEmpresa
inversionista,100000,,,,,,,,,,
empresa,100000,360,13,anual,vencimiento,no_pyme,bolivares,con_cupon,36.5,38,Acme C.A.
empresa,500,360,13,anual,vencimiento,no_pyme,dolares,con_cupon,,,
empresa,50000,abc,13,anual,vencimiento,pyme,dolares,con_cupon,,,Beta
";

    #[test]
    fn test_simulate_all_keeps_order_and_errors() {
        let submissions = read_submissions(INPUT.as_bytes()).unwrap();
        assert_eq!(submissions.len(), 4);
        assert!(submissions[3].is_err());

        let rows = simulate_all(&IssuanceEngine::default(), &submissions);
        let numbers: Vec<usize> = rows.iter().map(|r| r.row).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);

        assert!(rows[0].is_ok());
        assert_eq!(rows[0].profile.as_deref(), Some("inversionista"));
        assert_eq!(rows[0].term_days, Some(360));
        assert_eq!(rows[0].total_issuance_cost_bs, None);

        assert!(rows[1].is_ok());
        assert!(rows[1].total_issuance_cost_bs.is_some());

        assert!(!rows[2].is_ok());
        let error = rows[2].error.as_deref().unwrap();
        assert!(error.contains("valorNominal"));
        assert!(error.contains("nombreEmpresa"));

        assert!(!rows[3].is_ok());
        assert_eq!(rows[3].profile, None);
    }

    #[test]
    fn test_run_batch_writes_csv() {
        let mut out = Vec::new();
        let summary = run_batch(&IssuanceEngine::default(), INPUT.as_bytes(), &mut out).unwrap();
        assert_eq!(summary, BatchSummary { total: 4, succeeded: 2, failed: 2 });

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("row,profile,status,error,valorNominal"));
        assert!(lines.next().unwrap().starts_with("1,inversionista,ok,,100000.0,360,13.0,"));
        assert_eq!(text.lines().count(), 5);
    }
}
