//! Spreadsheet export of every order line

use crate::entities::Order;
use anyhow::{Result, anyhow};
use rust_xlsxwriter::{Format, Workbook};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SHEET_NAME: &str = "Orders";
pub const COLUMNS: [&str; 7] = [
    "OrderID",
    "TableNumber",
    "OrderDate",
    "ItemName",
    "Quantity",
    "Price",
    "Total",
];

/// One spreadsheet row: an order line with its order's identifiers
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub order_id: String,
    pub table_number: Option<u32>,
    pub order_date: String,
    pub item_name: String,
    pub quantity: u32,
    pub price: f64,
    pub total: f64,
}

/// Flatten orders into one row per order item
pub fn export_rows(orders: &[Order]) -> Vec<ExportRow> {
    orders
        .iter()
        .flat_map(|order| {
            order.order_items.iter().map(move |item| ExportRow {
                order_id: order.order_id.to_string(),
                table_number: order.table_number,
                order_date: order.order_date.clone(),
                item_name: item.item_name.clone(),
                quantity: item.quantity,
                price: item.price,
                total: item.line_total(),
            })
        })
        .collect()
}

/// Build the `Orders` workbook: a bold header row, then `rows`
pub fn orders_workbook(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (col, name) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, name, &header)?;
    }

    for (row, line) in (1u32..).zip(rows) {
        sheet.write_string(row, 0, line.order_id.as_str())?;
        if let Some(table) = line.table_number {
            sheet.write_number(row, 1, f64::from(table))?;
        }
        sheet.write_string(row, 2, line.order_date.as_str())?;
        sheet.write_string(row, 3, line.item_name.as_str())?;
        sheet.write_number(row, 4, f64::from(line.quantity))?;
        sheet.write_number(row, 5, line.price)?;
        sheet.write_number(row, 6, line.total)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| anyhow!("Failed to write workbook: {}", e))
}
