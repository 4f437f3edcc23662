//! Delimited report export.
//!
//! Every data cell is double-quoted with embedded quotes doubled, so commas
//! and quotes inside titles survive a round trip. Absent values become `""`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::audit::product::ProductAudit;
use crate::evaluation::format::format_number;
use crate::extraction::details::ViolationDetails;

pub const REPORT_HEADERS: [&str; 9] = [
    "ID MeLi",
    "Producto",
    "Vendedor",
    "Ubicacion",
    "Status",
    "Tipo",
    "Precio",
    "MAP",
    "URL",
];

/// One report line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub meli_id: Option<String>,
    pub product: Option<String>,
    pub seller: Option<String>,
    pub seller_location: Option<String>,
    pub status: Option<String>,
    pub violation_type: Option<String>,
    pub price: Option<f64>,
    pub expected: Option<f64>,
    pub url: Option<String>,
}

impl ExportRow {
    /// Expected price is the minimum allowed when known, else the list price.
    pub fn from_audit(audit: &ProductAudit) -> Self {
        let expected = ViolationDetails::new(&audit.violation_details)
            .low_price()
            .and_then(|low| low.min_allowed)
            .or_else(|| audit.master_product.as_ref().and_then(|m| m.list_price));

        Self {
            meli_id: Some(audit.meli_id.clone()),
            product: Some(audit.title.clone()),
            seller: Some(audit.seller.clone()),
            seller_location: Some(audit.seller_location.clone()),
            status: Some(audit.status.as_str().to_string()),
            violation_type: Some(audit.violation_type.as_str().to_string()),
            price: Some(audit.price),
            expected,
            url: Some(audit.url.clone()),
        }
    }

    fn cells(&self) -> [Option<String>; 9] {
        [
            self.meli_id.clone(),
            self.product.clone(),
            self.seller.clone(),
            self.seller_location.clone(),
            self.status.clone(),
            self.violation_type.clone(),
            self.price.map(format_number),
            self.expected.map(format_number),
            self.url.clone(),
        ]
    }
}

fn quote(cell: Option<&str>) -> String {
    format!("\"{}\"", cell.unwrap_or("").replace('"', "\"\""))
}

/// Serialize rows under the fixed header. No filtering happens here.
pub fn rows_to_csv(rows: &[ExportRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(REPORT_HEADERS.join(","));
    for row in rows {
        let cells: Vec<String> = row.cells().iter().map(|c| quote(c.as_deref())).collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

/// Serialize audits as report rows, as UTF-8 bytes ready for download.
pub fn export_audits(audits: &[ProductAudit]) -> Vec<u8> {
    let rows: Vec<ExportRow> = audits.iter().map(ExportRow::from_audit).collect();
    let csv = rows_to_csv(&rows);
    log::info!("REPORT_EXPORTED rows={} bytes={}", rows.len(), csv.len());
    csv.into_bytes()
}

/// `brand_protection_report_<YYYY-MM-DD>.csv`
pub fn report_filename(date: NaiveDate) -> String {
    format!("brand_protection_report_{}.csv", date.format("%Y-%m-%d"))
}

/// Split one exported line back into cells.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    cells.push(current);
    cells
}
