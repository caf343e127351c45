//! CSV export of the cost breakdown

use super::tables::{detail_rows, total_row};
use crate::engine::CalculationResults;
use std::io;

/// Write `concepto,usd,bolivares` rows: nominal value, every cost line, total
///
/// The bolivares column is empty where no conversion applies.
pub fn write_breakdown_csv<W: io::Write>(writer: W, results: &CalculationResults) -> crate::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["concepto", "usd", "bolivares"])?;

    let rows = detail_rows(results);
    let total = total_row(results);
    for row in rows.iter().chain(std::iter::once(&total)) {
        let usd = format!("{:.2}", row.usd);
        let bs = row.bs.map(|v| format!("{v:.2}")).unwrap_or_default();
        wtr.write_record([row.label, usd.as_str(), bs.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}
