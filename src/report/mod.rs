//! Presentation of calculation results
//!
//! Formatting, table and chart projections, the text report and CSV export.
//! Nothing here recomputes engine figures.

mod document;
mod export;
mod format;
mod tables;

pub use document::Report;
pub use export::write_breakdown_csv;
pub use format::{capitalize_first, format_currency, format_percentage, wrap_text, CurrencyUnit};
pub use tables::{chart_slices, detail_rows, total_row, ChartSlice, DetailRow};
