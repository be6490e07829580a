//! Printable receipts for an order or one diner's share of it
//!
//! [`Bill`] is the laid-out content; [`render_pdf`] draws it on a 72 mm wide
//! receipt-roll page with the PDF built-in Helvetica faces.

use crate::config::BillConfig;
use crate::entities::{Order, OrderType};
use anyhow::{Result, anyhow};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use serde::Deserialize;

const PAGE_WIDTH: f32 = 72.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 3.5;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a share of the font size
const GLYPH_WIDTH: f32 = 0.5;
const AMOUNT_COLUMN: f32 = 16.0;

/// One line of a split bill, as sent by the client
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonItem {
    pub item_id: String,
    pub item_name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillLine {
    pub label: String,
    pub amount: f64,
}

/// Lines sharing a menu category, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct BillSection {
    pub category: String,
    pub lines: Vec<BillLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub title: String,
    pub issued_at: String,
    /// "Table Number: n" for dine-in, a pickup banner, or nothing
    pub service: Option<String>,
    pub address: Vec<String>,
    pub sections: Vec<BillSection>,
    pub total: f64,
}

fn line_label(quantity: u32, name: &str, item_id: &str) -> String {
    format!("{} X {} (#{})", quantity, name, item_id)
}

fn push_line(sections: &mut Vec<BillSection>, category: &str, line: BillLine) {
    match sections.iter_mut().find(|s| s.category == category) {
        Some(section) => section.lines.push(line),
        None => sections.push(BillSection {
            category: category.to_string(),
            lines: vec![line],
        }),
    }
}

fn address_lines(order: &Order) -> Vec<String> {
    let address = &order.address;
    let mut lines = Vec::new();

    if let Some(street) = address.street.as_deref().filter(|s| !s.is_empty()) {
        let street = match address.house_number.as_deref() {
            Some(number) if !number.is_empty() => format!("{} {}", street, number),
            _ => street.to_string(),
        };
        lines.push(street.to_lowercase());
    }

    let place = address
        .place
        .as_deref()
        .and_then(|p| p.split('/').next())
        .map(|p| p.trim().to_lowercase());
    let town = [address.postal_code.clone(), place]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !town.is_empty() {
        lines.push(town);
    }

    if let Some(phone) = address.phone_number.as_deref().filter(|s| !s.is_empty()) {
        lines.push(phone.to_string());
    }
    lines
}

impl Bill {
    /// Full bill for every item of the order
    pub fn for_order(order: &Order) -> Self {
        let mut sections = Vec::new();
        for item in &order.order_items {
            push_line(
                &mut sections,
                &item.category,
                BillLine {
                    label: line_label(item.quantity, &item.item_name, &item.item_id),
                    amount: item.line_total(),
                },
            );
        }

        let service = match order.order_type() {
            OrderType::DineIn => order
                .table_number
                .map(|table| format!("Table Number: {}", table)),
            OrderType::Pickup => Some("Abholbestellung".to_string()),
            OrderType::Online => None,
        };

        Self {
            title: order.display_id.to_string(),
            issued_at: order.created_at.format("%Y/%m/%d %H:%M").to_string(),
            service,
            address: address_lines(order),
            sections,
            total: order.total(),
        }
    }

    /// Bill for one diner's share
    ///
    /// Each person item takes its category from the order line with the same
    /// `itemId`; items the order does not contain are left off.
    pub fn for_person(order: &Order, items: &[PersonItem]) -> Self {
        let mut sections = Vec::new();
        let mut total = 0.0;

        for item in items {
            let Some(ordered) = order.order_items.iter().find(|o| o.item_id == item.item_id) else {
                tracing::debug!(item_id = %item.item_id, "split bill item not on the order, skipped");
                continue;
            };
            let amount = item.price * f64::from(item.quantity);
            total += amount;
            push_line(
                &mut sections,
                &ordered.category,
                BillLine {
                    label: line_label(item.quantity, &item.item_name, &item.item_id),
                    amount,
                },
            );
        }

        Self {
            title: format!("Order ID: {}", order.display_id),
            issued_at: order.created_at.format("%Y/%m/%d %H:%M").to_string(),
            service: order
                .table_number
                .map(|table| format!("Table Number: {}", table)),
            address: Vec::new(),
            sections,
            total,
        }
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("EUR {:.2}", amount)
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_WIDTH * PT_TO_MM
}

/// Cut `text` so it fits in `width` mm, marking the cut with "..."
fn fit(text: &str, size: f32, width: f32) -> String {
    if text_width(text, size) <= width {
        return text.to_string();
    }
    let keep = ((width / (size * GLYPH_WIDTH * PT_TO_MM)) as usize).saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

enum Align {
    Left,
    Center,
    Right,
}

/// Writes lines top to bottom, starting a new page when the roll runs out
struct Pen<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Pen<'_> {
    fn line_height(size: f32) -> f32 {
        size * PT_TO_MM * 1.4
    }

    fn ensure_room(&mut self, height: f32) {
        if self.y - height < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "bill");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn x_for(text: &str, size: f32, align: &Align) -> f32 {
        let width = text_width(text, size);
        match align {
            Align::Left => MARGIN,
            Align::Center => ((PAGE_WIDTH - width) / 2.0).max(MARGIN),
            Align::Right => (PAGE_WIDTH - MARGIN - width).max(MARGIN),
        }
    }

    fn text(&mut self, text: &str, size: f32, bold: bool, align: Align) {
        let height = Self::line_height(size);
        self.ensure_room(height);
        self.y -= height;
        let font = if bold { &self.bold } else { &self.regular };
        let x = Self::x_for(text, size, &align);
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    /// Label on the left, amount flush right on the same baseline
    fn row(&mut self, label: &str, amount: &str, size: f32) {
        let height = Self::line_height(size);
        self.ensure_room(height);
        self.y -= height;
        let label = fit(label, size, PAGE_WIDTH - 2.0 * MARGIN - AMOUNT_COLUMN);
        self.layer
            .use_text(label, size, Mm(MARGIN), Mm(self.y), &self.regular);
        let x = Self::x_for(amount, size, &Align::Right);
        self.layer.use_text(amount, size, Mm(x), Mm(self.y), &self.regular);
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }
}

/// Draw `bill` under the restaurant header and return the PDF bytes
pub fn render_pdf(bill: &Bill, header: &BillConfig) -> Result<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new(bill.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "bill");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("Failed to load bill font: {}", e))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow!("Failed to load bill font: {}", e))?;

    {
        let mut pen = Pen {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT - MARGIN,
            regular,
            bold,
        };

        pen.text(&header.restaurant_name, 18.0, true, Align::Center);
        pen.text(&header.address, 10.0, false, Align::Center);
        pen.text(&header.phone, 10.0, false, Align::Center);
        pen.gap(2.0);
        pen.text(&bill.title, 13.0, true, Align::Center);
        pen.gap(2.0);
        pen.text(&bill.issued_at, 10.0, false, Align::Center);
        pen.text("________________________________", 10.0, false, Align::Left);
        pen.gap(4.0);

        if let Some(service) = &bill.service {
            pen.text(service, 12.0, false, Align::Left);
            pen.gap(4.0);
        }
        if !bill.address.is_empty() {
            for (i, line) in bill.address.iter().enumerate() {
                pen.text(line, 12.0, i == 0, Align::Left);
            }
            pen.gap(4.0);
        }

        for section in &bill.sections {
            pen.text(&section.category, 10.0, true, Align::Left);
            pen.gap(0.8);
            for line in &section.lines {
                pen.row(&line.label, &format_amount(line.amount), 8.0);
            }
        }

        pen.gap(4.0);
        pen.text(
            &format!("Total: {}", format_amount(bill.total)),
            10.0,
            true,
            Align::Right,
        );
        pen.gap(4.0);
        pen.text(&header.footer, 9.0, true, Align::Center);
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow!("Failed to write bill PDF: {}", e))
}
