//! Plain-text simulation report
//!
//! Two layouts: a one-page investment summary for investors and a detailed
//! issuance report for issuers.

use super::format::{capitalize_first, format_currency, format_percentage, wrap_text, CurrencyUnit};
use super::tables::{detail_rows, total_row};
use crate::engine::CalculationResults;
use crate::simulation::{CompanyType, Profile, SimulationData};
use chrono::NaiveDate;
use std::fmt;

const TEXT_WIDTH: usize = 72;
const LABEL_WIDTH: usize = 32;

/// Report over one simulation's input and results
pub struct Report<'a> {
    data: &'a SimulationData,
    results: &'a CalculationResults,
    generated_on: NaiveDate,
}

impl<'a> Report<'a> {
    pub fn new(data: &'a SimulationData, results: &'a CalculationResults, generated_on: NaiveDate) -> Self {
        Self { data, results, generated_on }
    }

    fn write_investor(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.results;
        writeln!(f, "Reporte de Inversión")?;
        writeln!(f, "Papeles Comerciales")?;
        writeln!(f)?;
        writeln!(f, "Resumen de Inversión")?;
        write_line(f, "Capital Invertido:", &format_currency(r.nominal_value, CurrencyUnit::Usd))?;
        write_line(f, "Capital + Intereses:", &format_currency(r.principal_plus_interest, CurrencyUnit::Usd))?;
        write_line(f, "Rentabilidad (ROI):", &format_percentage(r.total_roi_pct))?;
        write_line(f, "Rentabilidad Anualizada:", &format_percentage(r.annualized_roi_pct))
    }

    fn write_issuer(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, r) = (self.data, self.results);
        let issuer_name = match d.company.name.trim() {
            "" => "Empresa Emisora",
            name => name,
        };

        writeln!(f, "Reporte Detallado de Emisión")?;
        writeln!(f, "Papeles Comerciales - {issuer_name}")?;
        writeln!(f)?;

        writeln!(f, "Datos de la Simulación")?;
        writeln!(f, "Valor Nominal: {}", format_currency(r.nominal_value, CurrencyUnit::Usd))?;
        writeln!(f, "Plazo: {} días", r.term_days)?;
        writeln!(f, "Tasa de Interés: {}", format_percentage(r.interest_rate))?;
        writeln!(f, "Frecuencia de Pago: {}", capitalize_first(d.payment_frequency.as_str()))?;
        let company_type = match d.company_type {
            CompanyType::Pyme => "PYME",
            CompanyType::NonPyme => "No PYME",
        };
        writeln!(f, "Tipo de Empresa: {company_type}")?;
        writeln!(f, "Moneda: {}", capitalize_first(d.currency.as_str()))?;

        if !d.company.name.trim().is_empty() {
            writeln!(f)?;
            writeln!(f, "El Emisor")?;
            writeln!(f, "Nombre: {}", d.company.name.trim())?;
            if !d.company.description.trim().is_empty() {
                writeln!(f, "Descripción:")?;
                for line in wrap_text(&d.company.description, TEXT_WIDTH) {
                    writeln!(f, "{line}")?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "Desglose de Costos")?;
        // Nominal value row is already listed under the simulation data
        for row in detail_rows(r).iter().skip(1) {
            write_line(f, row.label, &format_currency(row.usd, CurrencyUnit::Usd))?;
        }
        writeln!(f, "{}", "-".repeat(TEXT_WIDTH))?;
        let total = total_row(r);
        write_line(f, total.label, &format_currency(total.usd, CurrencyUnit::Usd))?;
        write_line(f, "COSTO FINANCIAMIENTO", &format_percentage(r.financing_cost_pct))?;

        if let Some(bs) = &r.bolivares {
            writeln!(f)?;
            writeln!(f, "Equivalente en Bolívares")?;
            write_line(f, "Valor Nominal", &format_currency(bs.nominal_value, CurrencyUnit::Bs))?;
            write_line(f, "Intereses Totales", &format_currency(bs.total_interest, CurrencyUnit::Bs))?;
            write_line(f, "COSTO TOTAL EMISIÓN", &format_currency(bs.total_issuance_cost, CurrencyUnit::Bs))?;
        }

        if !d.company.use_of_funds.trim().is_empty() {
            writeln!(f)?;
            writeln!(f, "Uso de Fondos (Detallado)")?;
            for line in wrap_text(&d.company.use_of_funds, TEXT_WIDTH) {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data.profile {
            Profile::Investor => self.write_investor(f)?,
            Profile::Issuer => self.write_issuer(f)?,
        }
        writeln!(f)?;
        writeln!(f, "Generado el {}", self.generated_on.format("%d/%m/%Y"))
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    writeln!(f, "{label:<LABEL_WIDTH$}{value:>18}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculate;
    use crate::simulation::{
        AmortizationFrequency, CompanyProfile, CouponType, Denomination, ExchangeRates, InvestorInput,
        IssuerInput, PaymentFrequency, SimulationRequest,
    };

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    fn issuer(company: CompanyProfile, denomination: Denomination) -> SimulationData {
        SimulationRequest::Issuer(IssuerInput {
            nominal_value: 100_000.0,
            term_days: 360,
            interest_rate: 13.0,
            payment_frequency: PaymentFrequency::Quarterly,
            amortization: AmortizationFrequency::AtMaturity,
            company_type: CompanyType::Pyme,
            denomination,
            coupon: CouponType::Periodic,
            company,
        })
        .to_simulation_data()
    }

    #[test]
    fn test_investor_report() {
        let data = SimulationRequest::Investor(InvestorInput { nominal_value: 100_000.0 }).to_simulation_data();
        let results = calculate(&data);
        let text = Report::new(&data, &results, date()).to_string();

        assert!(text.starts_with("Reporte de Inversión\nPapeles Comerciales\n"));
        assert!(text.contains("$100,000.00"));
        assert!(text.contains("$113,000.00"));
        assert!(text.contains("13.00%"));
        assert!(!text.contains("Desglose de Costos"));
        assert!(text.ends_with("Generado el 09/03/2026\n"));
    }

    #[test]
    fn test_issuer_report_sections() {
        let company = CompanyProfile {
            name: "Acme C.A.".into(),
            description: "Fabricante de envases".into(),
            use_of_funds: "Capital de trabajo".into(),
            environment: String::new(),
        };
        let data = issuer(company, Denomination::Dollars);
        let results = calculate(&data);
        let text = Report::new(&data, &results, date()).to_string();

        assert!(text.contains("Papeles Comerciales - Acme C.A."));
        assert!(text.contains("Frecuencia de Pago: Trimestral"));
        assert!(text.contains("Tipo de Empresa: PYME"));
        assert!(text.contains("Moneda: Dolares"));
        assert!(text.contains("El Emisor\nNombre: Acme C.A.\nDescripción:\nFabricante de envases\n"));
        assert!(text.contains("Inscripción Código ISIN"));
        assert!(text.contains("COSTO TOTAL EMISIÓN"));
        assert!(text.contains("COSTO FINANCIAMIENTO"));
        assert!(text.contains("Uso de Fondos (Detallado)\nCapital de trabajo\n"));
        assert!(!text.contains("Equivalente en Bolívares"));
    }

    #[test]
    fn test_issuer_report_without_metadata() {
        let rates = ExchangeRates { initial: 36.5, maturity: 38.0 };
        let data = issuer(CompanyProfile::default(), Denomination::Bolivares(rates));
        let results = calculate(&data);
        let text = Report::new(&data, &results, date()).to_string();

        assert!(text.contains("Papeles Comerciales - Empresa Emisora"));
        assert!(!text.contains("El Emisor"));
        assert!(!text.contains("Uso de Fondos"));
        assert!(text.contains("Equivalente en Bolívares"));
        assert!(text.contains("Bs 3,800,000.00"));
    }
}
