//! Downloadable documents: PDF bills and the Excel order export

pub mod bill;
pub mod export;

pub use bill::{Bill, BillLine, BillSection, PersonItem, render_pdf};
pub use export::{ExportRow, XLSX_CONTENT_TYPE, export_rows, orders_workbook};
