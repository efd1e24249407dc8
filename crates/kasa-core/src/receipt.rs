//! # Receipt Module
//!
//! Builds the printable line sequence for one completed sale.
//!
//! ## Receipt Anatomy (32 columns)
//! ```text
//! ┌────────────────────────────────┐
//! │ <header lines from the tenant> │  1. header + separator
//! │--------------------------------│
//! │          SATIŞ FİŞİ            │  2. title (medium) + separator
//! │--------------------------------│
//! │       Sipariş Bilgileri        │  3. order info block
//! │................................│
//! │ Sipariş No               A-1042│
//! │ Satıcı                   Elif K│
//! │--------------------------------│
//! │ Kahve                          │  4. items
//! │ 2 x 25.00 TL          50.00 TL │
//! │--------------------------------│  5. payment summary heading
//! │          Ödeme Özeti           │
//! │--------------------------------│
//! │ Ara Toplam            50.00 TL │  6-10. summary rows
//! │ Ödenen                50.00 TL │
//! │................................│
//! │         Genel Toplam           │  11. grand total (large)
//! │           50.00 TL             │
//! │                                │  13. thanks + paper feed
//! └────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasa_core::receipt::{build_receipt_lines, BuildReceiptLinesOptions};
//! use kasa_core::{CurrencyCode, ReceiptItem};
//!
//! let options = BuildReceiptLinesOptions {
//!     items: vec![ReceiptItem::new("Kahve", 2.0, 25.0, CurrencyCode::Try)],
//!     total: Some(50.0),
//!     paid: Some(50.0),
//!     ..Default::default()
//! };
//! let lines = build_receipt_lines(&options);
//! assert!(!lines.is_empty());
//! ```

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::layout::{push_centered, push_meta_row, push_responsive_columns};
use crate::money::{format_currency, format_percentage, is_meaningful, FormatOptions, NumberLocale, SymbolPosition};
use crate::normalize::{clamp_width, convert_amount, finite_or_zero, non_negative};
use crate::types::{CurrencyCode, MetaRow, RateTable, ReceiptContentLine, ReceiptItem, TextAlign, TextPreset};
use crate::{DEFAULT_INDENT, DEFAULT_RECEIPT_WIDTH, FEED_LINES};

// =============================================================================
// Labels
// =============================================================================

/// Fixed Turkish labels printed on every receipt.
pub mod labels {
    pub const ORDER_INFO: &str = "Sipariş Bilgileri";
    pub const PAYMENT_SUMMARY: &str = "Ödeme Özeti";
    pub const SUBTOTAL: &str = "Ara Toplam";
    pub const DISCOUNT: &str = "İndirim";
    pub const TAX: &str = "KDV";
    pub const PAID: &str = "Ödenen";
    pub const CHANGE: &str = "Para Üstü";
    pub const GRAND_TOTAL: &str = "Genel Toplam";
    pub const DEBT: &str = "Kalan Borç";
    pub const EMPTY_ITEMS: &str = "Ürün bulunmuyor";
}

// =============================================================================
// Options
// =============================================================================

/// Labels for the order info rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct MetaLabels {
    /// Default: "Sipariş No"
    pub order_number: String,
    /// Default: "Tarih"
    pub date: String,
    /// Default: "Müşteri"
    pub customer: String,
    /// Default: "Satıcı"
    pub seller: String,
    /// Printed as the seller when none is given. Default: "Kasa"
    pub seller_fallback: String,
}

impl Default for MetaLabels {
    fn default() -> Self {
        MetaLabels {
            order_number: "Sipariş No".to_string(),
            date: "Tarih".to_string(),
            customer: "Müşteri".to_string(),
            seller: "Satıcı".to_string(),
            seller_fallback: "Kasa".to_string(),
        }
    }
}

/// Everything the builder needs to lay out one receipt.
///
/// ## Fields
/// Amounts left as `None` count as 0. Summary amounts are in
/// `source_currency` unless `summary_in_target` says they were already
/// converted. Item amounts are always in each item's own currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildReceiptLinesOptions {
    /// Sold items in print order.
    pub items: Vec<ReceiptItem>,

    /// Tenant/business header, printed verbatim before everything else.
    pub header_lines: Vec<ReceiptContentLine>,

    pub subtotal: Option<f64>,
    pub discount: Option<f64>,
    pub tax: Option<f64>,
    pub total: Option<f64>,
    pub paid: Option<f64>,
    pub remaining: Option<f64>,

    /// Explicit change. When `None`, change is `max(paid − total, 0)`.
    pub change: Option<f64>,

    /// Currency of the summary amounts. Default: TRY
    pub source_currency: CurrencyCode,

    /// Currency everything is printed in. Default: TRY
    pub target_currency: CurrencyCode,

    /// Sell rates. Without a table nothing is converted.
    #[ts(as = "Option<std::collections::HashMap<String, f64>>")]
    pub rates: Option<RateTable>,

    /// Currency `paid` was tendered in, when it differs from the summary.
    pub paid_currency: Option<CurrencyCode>,

    /// Summary amounts are already in `target_currency`.
    pub summary_in_target: bool,

    /// Receipt width in characters. Default: 32 (58mm paper)
    #[serde(deserialize_with = "lenient_width")]
    pub width: usize,

    /// Left indent for column rows. Default: 1
    #[serde(deserialize_with = "lenient_indent")]
    pub indent: usize,

    /// Digit conventions for amounts. Default: English (`1,234.50`)
    pub number_locale: NumberLocale,

    /// Centered heading. Omitted when blank.
    pub title: Option<String>,

    /// Closing line. Omitted when blank.
    pub thank_you_message: Option<String>,

    /// Shown instead of items when the sale has none. Default: "Ürün bulunmuyor"
    pub empty_items_message: Option<String>,

    pub meta_labels: MetaLabels,
    pub order_number: Option<String>,
    pub date: Option<String>,
    pub customer_name: Option<String>,
    pub seller_name: Option<String>,

    /// Extra rows appended to the order info block.
    pub extra_meta_rows: Vec<MetaRow>,
}

impl Default for BuildReceiptLinesOptions {
    fn default() -> Self {
        BuildReceiptLinesOptions {
            items: Vec::new(),
            header_lines: Vec::new(),
            subtotal: None,
            discount: None,
            tax: None,
            total: None,
            paid: None,
            remaining: None,
            change: None,
            source_currency: CurrencyCode::Try,
            target_currency: CurrencyCode::Try,
            rates: None,
            paid_currency: None,
            summary_in_target: false,
            width: DEFAULT_RECEIPT_WIDTH,
            indent: DEFAULT_INDENT,
            number_locale: NumberLocale::English,
            title: None,
            thank_you_message: None,
            empty_items_message: None,
            meta_labels: MetaLabels::default(),
            order_number: None,
            date: None,
            customer_name: None,
            seller_name: None,
            extra_meta_rows: Vec::new(),
        }
    }
}

impl BuildReceiptLinesOptions {
    /// Decodes options sent by the POS front end (camelCase JSON).
    ///
    /// ## Example
    /// ```rust
    /// use kasa_core::receipt::BuildReceiptLinesOptions;
    ///
    /// let options = BuildReceiptLinesOptions::from_json(r#"{"total": 12.5, "width": 48}"#).unwrap();
    /// assert_eq!(options.total, Some(12.5));
    /// assert_eq!(options.width, 48);
    /// assert_eq!(options.indent, 1);
    /// ```
    pub fn from_json(payload: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Reads a character count from any JSON value.
///
/// Fractions are floored and negatives become 0; anything that is not a
/// finite number gives `fallback`.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D, fallback: usize) -> Result<usize, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw.as_f64() {
        Some(value) if value.is_finite() => value.max(0.0).floor() as usize,
        _ => fallback,
    })
}

fn lenient_width<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    lenient_count(deserializer, DEFAULT_RECEIPT_WIDTH)
}

fn lenient_indent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    lenient_count(deserializer, DEFAULT_INDENT)
}

/// Formats a timestamp the way the date row expects it: `19.10.2026 14:05`.
pub fn format_receipt_date<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%d.%m.%Y %H:%M").to_string()
}

// =============================================================================
// Normalized Input
// =============================================================================

/// Summary amounts converted to the target currency and guarded.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Summary {
    subtotal: f64,
    discount: f64,
    tax: f64,
    total: f64,
    paid: f64,
    remaining: f64,
    change: f64,
}

impl Summary {
    fn resolve(options: &BuildReceiptLinesOptions) -> Self {
        let rates = options.rates.as_ref();
        let target = options.target_currency;
        let summary = |amount: Option<f64>| {
            convert_amount(
                amount.unwrap_or(0.0),
                options.source_currency,
                target,
                rates,
                options.summary_in_target,
            )
        };

        let total = summary(options.total);
        let paid = match options.paid_currency {
            Some(currency) => convert_amount(options.paid.unwrap_or(0.0), currency, target, rates, false),
            None => summary(options.paid),
        };
        let change = match options.change {
            Some(change) => non_negative(summary(Some(change))),
            None => (paid - total).max(0.0),
        };

        let remaining = match options.remaining {
            Some(remaining) => non_negative(summary(Some(remaining))),
            None => (total - paid).max(0.0),
        };

        Summary {
            subtotal: summary(options.subtotal),
            discount: summary(options.discount),
            tax: summary(options.tax),
            total,
            paid,
            remaining,
            change,
        }
    }

    /// Debt still open on a sale that has something to pay.
    fn has_outstanding_debt(&self) -> bool {
        is_meaningful(self.remaining) && is_meaningful(self.total)
    }
}

/// Width, indent and formatting shared by every emitted line.
struct Layout {
    width: usize,
    indent: usize,
    target: CurrencyCode,
    rates: Option<RateTable>,
    amount_format: FormatOptions,
    quantity_format: FormatOptions,
}

impl Layout {
    fn resolve(options: &BuildReceiptLinesOptions) -> Self {
        let width = clamp_width(options.width);
        let amount_format = FormatOptions::default()
            .with_locale(options.number_locale)
            .with_symbol(SymbolPosition::Hidden);

        Layout {
            width,
            indent: options.indent.min(width - 1),
            target: options.target_currency,
            rates: options.rates.clone(),
            amount_format,
            quantity_format: FormatOptions {
                min_fraction_digits: 0,
                max_fraction_digits: 3,
                ..amount_format
            },
        }
    }

    /// `1,234.50 TL`
    fn amount(&self, amount: f64) -> String {
        format!(
            "{} {}",
            format_currency(amount, self.target, &self.amount_format),
            self.target.receipt_label()
        )
    }

    fn quantity(&self, quantity: f64) -> String {
        format_currency(quantity, self.target, &self.quantity_format)
    }

    fn item_amount(&self, amount: f64, currency: CurrencyCode) -> f64 {
        convert_amount(amount, currency, self.target, self.rates.as_ref(), false)
    }

    fn row(&self, lines: &mut Vec<ReceiptContentLine>, label: &str, value: &str) {
        push_responsive_columns(lines, label, value, self.indent, self.width, None);
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// `İndirim (%10)` when the percentage can be computed, else the bare label.
fn percentage_label(label: &str, amount: f64, base: f64) -> String {
    if !is_meaningful(base) {
        return label.to_string();
    }
    match format_percentage(amount / base * 100.0) {
        Some(pct) => format!("{label} (%{pct})"),
        None => label.to_string(),
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Builds the full line sequence for a sale.
///
/// Deterministic and infallible: the same options always give the same
/// lines, and missing or malformed values fall back to defaults.
pub fn build_receipt_lines(options: &BuildReceiptLinesOptions) -> Vec<ReceiptContentLine> {
    let layout = Layout::resolve(options);
    let summary = Summary::resolve(options);

    debug!(
        items = options.items.len(),
        width = layout.width,
        indent = layout.indent,
        target = %layout.target,
        total = summary.total,
        "Building receipt lines"
    );

    let mut lines = Vec::new();

    push_header(&mut lines, options, &layout);
    push_order_info(&mut lines, options, &layout);
    push_items(&mut lines, options, &layout);
    push_payment_summary(&mut lines, &summary, &layout);
    push_footer(&mut lines, options, &layout);

    debug!(lines = lines.len(), "Receipt lines built");
    lines
}

/// Builds a receipt for a plain sale where only the total may be known.
///
/// Paid defaults to the total and remaining to `max(total − paid, 0)`;
/// subtotal, discount and tax already default to 0.
pub fn build_sale_receipt_lines(options: &BuildReceiptLinesOptions) -> Vec<ReceiptContentLine> {
    let mut sale = options.clone();
    let total = finite_or_zero(sale.total.unwrap_or(0.0));

    if sale.paid.is_none() {
        sale.paid = Some(total);
        sale.paid_currency = None;
    }
    if sale.remaining.is_none() {
        let paid = finite_or_zero(sale.paid.unwrap_or(total));
        // Tendered in another currency: compare in the summary currency
        let summary_currency = if sale.summary_in_target {
            sale.target_currency
        } else {
            sale.source_currency
        };
        let paid = match sale.paid_currency {
            Some(currency) => convert_amount(paid, currency, summary_currency, sale.rates.as_ref(), false),
            None => paid,
        };
        sale.remaining = Some((total - paid).max(0.0));
    }

    build_receipt_lines(&sale)
}

/// Steps 1-2: tenant header and title.
fn push_header(lines: &mut Vec<ReceiptContentLine>, options: &BuildReceiptLinesOptions, layout: &Layout) {
    if !options.header_lines.is_empty() {
        lines.extend(options.header_lines.iter().cloned());
        lines.push(ReceiptContentLine::separator(layout.width));
    }

    if let Some(title) = non_blank(options.title.as_deref()) {
        push_centered(lines, title, layout.width, Some(TextPreset::Medium));
        lines.push(ReceiptContentLine::separator(layout.width));
    }
}

/// Step 3: order number, date, customer, seller and extra rows.
fn push_order_info(lines: &mut Vec<ReceiptContentLine>, options: &BuildReceiptLinesOptions, layout: &Layout) {
    let meta = &options.meta_labels;
    let mut rows: Vec<(&str, &str)> = Vec::new();

    if let Some(order_number) = non_blank(options.order_number.as_deref()) {
        rows.push((meta.order_number.as_str(), order_number));
    }
    if let Some(date) = non_blank(options.date.as_deref()) {
        rows.push((meta.date.as_str(), date));
    }
    if let Some(customer) = non_blank(options.customer_name.as_deref()) {
        rows.push((meta.customer.as_str(), customer));
    }

    let seller = non_blank(options.seller_name.as_deref())
        .or_else(|| non_blank(Some(meta.seller_fallback.as_str())));
    if let Some(seller) = seller {
        rows.push((meta.seller.as_str(), seller));
    }

    for extra in &options.extra_meta_rows {
        rows.push((extra.label.as_str(), extra.value.as_str()));
    }

    if rows.is_empty() {
        return;
    }

    push_centered(lines, labels::ORDER_INFO, layout.width, None);
    lines.push(ReceiptContentLine::dotted(layout.width));
    for (label, value) in rows {
        push_meta_row(lines, label, value, layout.indent, layout.width);
    }
    lines.push(ReceiptContentLine::separator(layout.width));
}

/// Step 4: one block per item, or the empty message.
fn push_items(lines: &mut Vec<ReceiptContentLine>, options: &BuildReceiptLinesOptions, layout: &Layout) {
    if options.items.is_empty() {
        let message = non_blank(options.empty_items_message.as_deref()).unwrap_or(labels::EMPTY_ITEMS);
        push_centered(lines, message, layout.width, None);
        return;
    }

    for (i, item) in options.items.iter().enumerate() {
        if i > 0 {
            lines.push(ReceiptContentLine::blank(1));
        }

        lines.push(ReceiptContentLine::styled(
            format!("{}{}", " ".repeat(layout.indent), item.display_name()),
            Some(TextPreset::Medium),
            Some(TextAlign::Left),
        ));

        let unit_price = layout.item_amount(finite_or_zero(item.unit_price), item.currency);
        let subtotal = layout.item_amount(item.line_subtotal(), item.currency);
        let left = format!(
            "{} x {}",
            layout.quantity(finite_or_zero(item.quantity)),
            layout.amount(unit_price)
        );
        layout.row(lines, &left, &layout.amount(subtotal));
    }
}

/// Steps 5-12: summary rows, grand total and the trailing debt row.
fn push_payment_summary(lines: &mut Vec<ReceiptContentLine>, summary: &Summary, layout: &Layout) {
    lines.push(ReceiptContentLine::separator(layout.width));
    push_centered(lines, labels::PAYMENT_SUMMARY, layout.width, None);
    lines.push(ReceiptContentLine::separator(layout.width));

    if is_meaningful(summary.subtotal) {
        layout.row(lines, labels::SUBTOTAL, &layout.amount(summary.subtotal));
    }

    if is_meaningful(summary.discount) {
        let label = percentage_label(labels::DISCOUNT, summary.discount, summary.subtotal);
        let value = format!("-{}", layout.amount(summary.discount.abs()));
        layout.row(lines, &label, &value);
    }

    if is_meaningful(summary.tax) {
        let base = (summary.subtotal - summary.discount).max(0.0);
        let label = percentage_label(labels::TAX, summary.tax, base);
        layout.row(lines, &label, &layout.amount(summary.tax));
    }

    // Open debt prints the total as the paid figure
    let has_debt = summary.has_outstanding_debt();
    let paid_shown = if has_debt { summary.total } else { summary.paid };
    layout.row(lines, labels::PAID, &layout.amount(paid_shown));

    if is_meaningful(summary.change) {
        layout.row(lines, labels::CHANGE, &layout.amount(summary.change));
    }

    lines.push(ReceiptContentLine::dotted(layout.width));
    push_centered(lines, labels::GRAND_TOTAL, layout.width, None);
    push_centered(lines, &layout.amount(summary.total), layout.width, Some(TextPreset::Large));

    if !has_debt && is_meaningful(summary.remaining) {
        layout.row(lines, labels::DEBT, &layout.amount(summary.remaining));
    }
}

/// Step 13: thanks and paper feed.
fn push_footer(lines: &mut Vec<ReceiptContentLine>, options: &BuildReceiptLinesOptions, layout: &Layout) {
    lines.push(ReceiptContentLine::blank(1));
    if let Some(thanks) = non_blank(options.thank_you_message.as_deref()) {
        push_centered(lines, thanks, layout.width, None);
    }
    lines.push(ReceiptContentLine::blank(FEED_LINES));
}

// =============================================================================
// Unit Tests
// =============================================================================
