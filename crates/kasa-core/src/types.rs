//! # Domain Types
//!
//! Types shared by the money formatter and the receipt builder.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CurrencyCode   │   │   RateTable     │   │  ReceiptItem    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  TRY (base)     │   │  USD → 34.20    │   │  name           │       │
//! │  │  USD EUR GBP    │   │  EUR → 37.10    │   │  quantity       │       │
//! │  └─────────────────┘   │  (TRY per unit) │   │  unit_price     │       │
//! │                        └─────────────────┘   │  currency       │       │
//! │                                              └─────────────────┘       │
//! │  ┌──────────────────────────────────────────────────────────────┐      │
//! │  │  ReceiptContentLine                                          │      │
//! │  │  Text { text, preset, align }                                │      │
//! │  │  Columns { left, right, indent, width, preset }              │      │
//! │  │  Separator { width, fill }                                   │      │
//! │  │  Blank { count }                                             │      │
//! │  └──────────────────────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::DEFAULT_ITEM_NAME;

// =============================================================================
// Currency Code
// =============================================================================

/// Currencies the receipt knows how to display.
///
/// TRY is the base unit: every cross-currency conversion goes through it.
/// Anything the POS sends that is not one of these four becomes TRY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// Turkish Lira.
    Try,
    /// US Dollar.
    Usd,
    /// Euro.
    Eur,
    /// Pound Sterling.
    Gbp,
}

impl CurrencyCode {
    /// All known codes, base currency first.
    pub const ALL: [CurrencyCode; 4] = [
        CurrencyCode::Try,
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
    ];

    /// Strict parse: trims and uppercases, `None` for unknown codes.
    ///
    /// ## Example
    /// ```rust
    /// use kasa_core::CurrencyCode;
    ///
    /// assert_eq!(CurrencyCode::parse(" usd "), Some(CurrencyCode::Usd));
    /// assert_eq!(CurrencyCode::parse("JPY"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "TRY" => Some(CurrencyCode::Try),
            "USD" => Some(CurrencyCode::Usd),
            "EUR" => Some(CurrencyCode::Eur),
            "GBP" => Some(CurrencyCode::Gbp),
            _ => None,
        }
    }

    /// Lenient parse: unknown codes fall back to TRY.
    ///
    /// ## Example
    /// ```rust
    /// use kasa_core::CurrencyCode;
    ///
    /// assert_eq!(CurrencyCode::normalize("eur"), CurrencyCode::Eur);
    /// assert_eq!(CurrencyCode::normalize("JPY"), CurrencyCode::Try);
    /// assert_eq!(CurrencyCode::normalize(""), CurrencyCode::Try);
    /// ```
    pub fn normalize(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            CurrencyCode::Try => "TRY",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
        }
    }

    /// Display glyph used by the on-screen formatter.
    pub const fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Try => "₺",
            CurrencyCode::Usd => "$",
            CurrencyCode::Eur => "€",
            CurrencyCode::Gbp => "£",
        }
    }

    /// Printer-safe label appended to amounts on the paper receipt.
    ///
    /// Thermal code pages rarely carry `₺` or `€`, so the receipt spells
    /// currencies out instead.
    pub const fn receipt_label(&self) -> &'static str {
        match self {
            CurrencyCode::Try => "TL",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
        }
    }

    /// Whether this is the base (pivot) currency.
    #[inline]
    pub const fn is_base(&self) -> bool {
        matches!(self, CurrencyCode::Try)
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        CurrencyCode::Try
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Accepts any string (or null) and normalizes it, so a bad code from the
/// front end never rejects the whole payload.
impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(CurrencyCode::normalize).unwrap_or_default())
    }
}

// =============================================================================
// Rate Table
// =============================================================================

/// Sell rates: units of TRY per one unit of a foreign currency.
///
/// Only positive, finite rates are usable. TRY is never looked up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct RateTable {
    rates: BTreeMap<CurrencyCode, f64>,
}

impl RateTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ## Example
    /// ```rust
    /// use kasa_core::{CurrencyCode, RateTable};
    ///
    /// let rates = RateTable::new().with_rate(CurrencyCode::Usd, 34.2);
    /// assert_eq!(rates.sell_rate(CurrencyCode::Usd), Some(34.2));
    /// ```
    pub fn with_rate(mut self, code: CurrencyCode, rate: f64) -> Self {
        self.insert(code, rate);
        self
    }

    /// Inserts or replaces a rate.
    pub fn insert(&mut self, code: CurrencyCode, rate: f64) {
        self.rates.insert(code, rate);
    }

    /// Returns the rate only when it can be used for conversion.
    pub fn sell_rate(&self, code: CurrencyCode) -> Option<f64> {
        self.rates
            .get(&code)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }

    /// Number of stored entries (usable or not).
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl From<BTreeMap<String, f64>> for RateTable {
    fn from(raw: BTreeMap<String, f64>) -> Self {
        let mut table = RateTable::new();
        for (key, rate) in raw {
            match CurrencyCode::parse(&key) {
                Some(code) => table.insert(code, rate),
                None => debug!(code = %key, "Dropping rate for unsupported currency"),
            }
        }
        table
    }
}

impl From<RateTable> for BTreeMap<String, f64> {
    fn from(table: RateTable) -> Self {
        table
            .rates
            .into_iter()
            .map(|(code, rate)| (code.code().to_string(), rate))
            .collect()
    }
}

impl FromIterator<(CurrencyCode, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (CurrencyCode, f64)>>(iter: I) -> Self {
        RateTable {
            rates: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Discount / Tax Adjustments
// =============================================================================

/// How an adjustment value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// `value` is a percentage of the base (10 = 10%).
    Percentage,
    /// `value` is a flat amount in base currency.
    Amount,
}

/// A cart-wide discount or tax.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Adjustment {
    pub kind: AdjustmentKind,
    pub value: f64,
}

impl Adjustment {
    /// Percentage adjustment.
    pub const fn percentage(value: f64) -> Self {
        Adjustment {
            kind: AdjustmentKind::Percentage,
            value,
        }
    }

    /// Flat amount adjustment.
    pub const fn amount(value: f64) -> Self {
        Adjustment {
            kind: AdjustmentKind::Amount,
            value,
        }
    }
}

// =============================================================================
// Receipt Item
// =============================================================================

/// One line of the sale as the POS hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptItem {
    /// Name printed on the receipt. Blank prints as "Ürün".
    pub name: String,

    /// Quantity sold (fractional for weighed goods).
    pub quantity: f64,

    /// Unit price in `currency`.
    pub unit_price: f64,

    /// Currency the item is priced in.
    pub currency: CurrencyCode,

    /// Precomputed line subtotal in `currency`.
    pub subtotal: Option<f64>,
}

impl ReceiptItem {
    /// Creates an item without a precomputed subtotal.
    pub fn new(name: impl Into<String>, quantity: f64, unit_price: f64, currency: CurrencyCode) -> Self {
        ReceiptItem {
            name: name.into(),
            quantity,
            unit_price,
            currency,
            subtotal: None,
        }
    }

    /// Name to print, falling back to the generic product label.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            DEFAULT_ITEM_NAME
        } else {
            name
        }
    }

    /// Line subtotal in the item's own currency.
    ///
    /// Uses the precomputed value when it is finite, else `quantity × unit_price`.
    pub fn line_subtotal(&self) -> f64 {
        match self.subtotal.filter(|value| value.is_finite()) {
            Some(subtotal) => subtotal,
            None => {
                let computed = self.quantity * self.unit_price;
                if computed.is_finite() {
                    computed
                } else {
                    0.0
                }
            }
        }
    }
}

impl Default for ReceiptItem {
    fn default() -> Self {
        ReceiptItem::new(String::new(), 0.0, 0.0, CurrencyCode::Try)
    }
}

/// Extra label/value row for the order info block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MetaRow {
    pub label: String,
    pub value: String,
}

impl MetaRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        MetaRow {
            label: label.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Receipt Content Lines
// =============================================================================

/// Font size preset the renderer maps to printer magnification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TextPreset {
    Normal,
    Medium,
    Large,
}

/// Horizontal alignment hint for text lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Fill character for solid separators.
pub const SOLID_RULE: char = '-';

/// Fill character for dotted separators.
pub const DOTTED_RULE: char = '.';

/// One printable instruction.
///
/// The rendering backend maps each variant to printer commands; this crate
/// only decides what goes where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReceiptContentLine {
    /// A single run of text.
    Text {
        text: String,
        preset: Option<TextPreset>,
        align: Option<TextAlign>,
    },
    /// Left text flush left after `indent`, right text flush right at `width`.
    Columns {
        left: String,
        right: String,
        indent: usize,
        width: usize,
        preset: Option<TextPreset>,
    },
    /// Horizontal rule. `None` fill means a solid rule.
    Separator { width: usize, fill: Option<char> },
    /// `count` empty lines.
    Blank { count: usize },
}

impl ReceiptContentLine {
    /// Plain text line without preset or alignment.
    pub fn text(text: impl Into<String>) -> Self {
        ReceiptContentLine::Text {
            text: text.into(),
            preset: None,
            align: None,
        }
    }

    /// Text line with explicit preset and alignment.
    pub fn styled(text: impl Into<String>, preset: Option<TextPreset>, align: Option<TextAlign>) -> Self {
        ReceiptContentLine::Text {
            text: text.into(),
            preset,
            align,
        }
    }

    /// Solid full-width separator.
    pub const fn separator(width: usize) -> Self {
        ReceiptContentLine::Separator { width, fill: None }
    }

    /// Dotted full-width separator.
    pub const fn dotted(width: usize) -> Self {
        ReceiptContentLine::Separator {
            width,
            fill: Some(DOTTED_RULE),
        }
    }

    /// Run of empty lines.
    pub const fn blank(count: usize) -> Self {
        ReceiptContentLine::Blank { count }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
