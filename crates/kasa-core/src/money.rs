//! # Money Module
//!
//! Currency symbols, amount formatting, TRY-pivoted conversion and cart-wide
//! discount/tax math.
//!
//! ## Conversion Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EVERYTHING PIVOTS THROUGH TRY                                          │
//! │                                                                         │
//! │     USD ──to_base(×34.20)──►  TRY  ──from_base(÷37.10)──►  EUR         │
//! │                                                                         │
//! │  Rate table holds "sell" rates: TRY per 1 unit of foreign currency.    │
//! │                                                                         │
//! │  Missing rate:                                                          │
//! │    to_base   → 0            (cannot price it in TRY)                   │
//! │    from_base → TRY amount   (show the base figure untouched)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasa_core::money::{format_currency, to_base, FormatOptions};
//! use kasa_core::{CurrencyCode, RateTable};
//!
//! let rates = RateTable::new().with_rate(CurrencyCode::Usd, 30.0);
//! let lira = to_base(10.0, CurrencyCode::Usd, &rates);
//! assert_eq!(lira, 300.0);
//!
//! assert_eq!(format_currency(1234.5, CurrencyCode::Try, &FormatOptions::default()), "₺1.234,50");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::normalize::finite_or_zero;
use crate::types::{Adjustment, AdjustmentKind, CurrencyCode, RateTable};
use crate::MEANINGFUL_THRESHOLD;

// =============================================================================
// Symbols
// =============================================================================

/// Returns the display glyph for a currency code.
///
/// Unknown codes come back uppercased so the amount is still labelled;
/// a missing code means TRY.
///
/// ## Example
/// ```rust
/// use kasa_core::money::symbol_for;
///
/// assert_eq!(symbol_for(Some("usd")), "$");
/// assert_eq!(symbol_for(Some("chf")), "CHF");
/// assert_eq!(symbol_for(None), "₺");
/// ```
pub fn symbol_for(code: Option<&str>) -> String {
    let raw = match code.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return CurrencyCode::Try.symbol().to_string(),
    };

    match CurrencyCode::parse(raw) {
        Some(known) => known.symbol().to_string(),
        None => raw.to_uppercase(),
    }
}

// =============================================================================
// Formatting Options
// =============================================================================

/// Digit grouping and decimal mark conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NumberLocale {
    /// `1.234,56` (tr-TR)
    #[default]
    Turkish,
    /// `1,234.56` (en-US)
    English,
}

impl NumberLocale {
    /// Thousands separator.
    pub const fn group_separator(&self) -> char {
        match self {
            NumberLocale::Turkish => '.',
            NumberLocale::English => ',',
        }
    }

    /// Decimal mark.
    pub const fn decimal_separator(&self) -> char {
        match self {
            NumberLocale::Turkish => ',',
            NumberLocale::English => '.',
        }
    }
}

/// Where the currency symbol goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPosition {
    /// `$12.34`
    #[default]
    Prefix,
    /// `12.34 $`
    Suffix,
    /// `12.34`
    Hidden,
}

/// Options for [`format_currency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    /// Fraction digits always shown. Default: 2
    pub min_fraction_digits: usize,
    /// Fraction digits at most shown (amount is rounded to this). Default: 2
    pub max_fraction_digits: usize,
    /// Symbol placement. Default: prefix
    pub symbol: SymbolPosition,
    /// Number conventions. Default: Turkish
    pub locale: NumberLocale,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            min_fraction_digits: 2,
            max_fraction_digits: 2,
            symbol: SymbolPosition::Prefix,
            locale: NumberLocale::Turkish,
        }
    }
}

impl FormatOptions {
    /// Same options with a different symbol placement.
    pub const fn with_symbol(mut self, symbol: SymbolPosition) -> Self {
        self.symbol = symbol;
        self
    }

    /// Same options with a different locale.
    pub const fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats an amount with grouping, fraction digits and currency symbol.
///
/// The sign is handled here rather than by the number formatting: the
/// absolute value is rendered and `-` is put in front of the whole thing,
/// so `-5` with a prefix symbol reads `-$5.00`, never `$-5.00`.
///
/// ## Example
/// ```rust
/// use kasa_core::money::{format_currency, FormatOptions, NumberLocale, SymbolPosition};
/// use kasa_core::CurrencyCode;
///
/// let en = FormatOptions::default().with_locale(NumberLocale::English);
/// assert_eq!(format_currency(12.34, CurrencyCode::Usd, &en), "$12.34");
/// assert_eq!(
///     format_currency(-12.34, CurrencyCode::Usd, &en.with_symbol(SymbolPosition::Suffix)),
///     "-12.34 $"
/// );
/// assert_eq!(format_currency(f64::NAN, CurrencyCode::Try, &en), "₺0.00");
/// ```
pub fn format_currency(amount: f64, code: CurrencyCode, options: &FormatOptions) -> String {
    let amount = finite_or_zero(amount);
    let number = format_number(amount.abs(), options);
    // Sign follows the rounded digits so -0.001 prints as 0.00
    let rounds_to_zero = !number.chars().any(|c| matches!(c, '1'..='9'));
    let sign = if amount < 0.0 && !rounds_to_zero { "-" } else { "" };

    match options.symbol {
        SymbolPosition::Prefix => format!("{sign}{}{number}", code.symbol()),
        SymbolPosition::Suffix => format!("{sign}{number} {}", code.symbol()),
        SymbolPosition::Hidden => format!("{sign}{number}"),
    }
}

/// Renders a non-negative number with grouping and a fraction digit range.
fn format_number(value: f64, options: &FormatOptions) -> String {
    let min = options.min_fraction_digits;
    let max = options.max_fraction_digits.max(min);

    let factor = 10f64.powi(max as i32);
    let rounded = (value * factor).round() / factor;
    let rounded = if rounded.is_finite() { rounded } else { value };

    let fixed = format!("{:.*}", max, rounded);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut fraction = frac_part.to_string();
    while fraction.len() > min && fraction.ends_with('0') {
        fraction.pop();
    }

    let grouped = group_digits(int_part, options.locale.group_separator());
    if fraction.is_empty() {
        grouped
    } else {
        format!("{grouped}{}{fraction}", options.locale.decimal_separator())
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Formats a percentage for labels: at most 2 decimals, no trailing zeros.
///
/// ## Example
/// ```rust
/// use kasa_core::money::format_percentage;
///
/// assert_eq!(format_percentage(10.0).as_deref(), Some("10"));
/// assert_eq!(format_percentage(12.5).as_deref(), Some("12.5"));
/// assert_eq!(format_percentage(33.3333).as_deref(), Some("33.33"));
/// assert_eq!(format_percentage(f64::INFINITY), None);
/// ```
pub fn format_percentage(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    let rounded = (value * 100.0).round() / 100.0;
    let fixed = format!("{:.2}", rounded);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    Some(match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    })
}

/// Whether an amount is large enough to print.
///
/// Anything under half a kuruş is treated as floating-point noise.
#[inline]
pub fn is_meaningful(amount: f64) -> bool {
    amount.is_finite() && amount.abs() >= MEANINGFUL_THRESHOLD
}

// =============================================================================
// Conversion
// =============================================================================

/// Converts a foreign amount into TRY.
///
/// Returns 0 when the rate is missing or unusable: an amount that cannot be
/// priced in lira contributes nothing.
///
/// ## Example
/// ```rust
/// use kasa_core::money::to_base;
/// use kasa_core::{CurrencyCode, RateTable};
///
/// let rates = RateTable::new().with_rate(CurrencyCode::Eur, 37.0);
/// assert_eq!(to_base(2.0, CurrencyCode::Eur, &rates), 74.0);
/// assert_eq!(to_base(2.0, CurrencyCode::Usd, &rates), 0.0);
/// assert_eq!(to_base(2.0, CurrencyCode::Try, &rates), 2.0);
/// ```
pub fn to_base(amount_fx: f64, code: CurrencyCode, rates: &RateTable) -> f64 {
    if code.is_base() {
        return amount_fx;
    }
    if amount_fx == 0.0 {
        return 0.0;
    }

    match rates.sell_rate(code) {
        Some(rate) => amount_fx * rate,
        None => 0.0,
    }
}

/// Converts a TRY amount into a foreign currency.
///
/// Unlike [`to_base`], a missing rate returns the TRY amount unconverted.
///
/// ## Example
/// ```rust
/// use kasa_core::money::from_base;
/// use kasa_core::{CurrencyCode, RateTable};
///
/// let rates = RateTable::new().with_rate(CurrencyCode::Eur, 37.0);
/// assert_eq!(from_base(74.0, CurrencyCode::Eur, &rates), 2.0);
/// assert_eq!(from_base(74.0, CurrencyCode::Usd, &rates), 74.0);
/// ```
pub fn from_base(amount_try: f64, code: CurrencyCode, rates: &RateTable) -> f64 {
    if code.is_base() {
        return amount_try;
    }
    if amount_try == 0.0 {
        return 0.0;
    }

    match rates.sell_rate(code) {
        Some(rate) => amount_try / rate,
        None => amount_try,
    }
}

// =============================================================================
// Cart-wide Discount and Tax
// =============================================================================

/// Result of [`apply_global_discount_tax`], all in TRY.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTaxBreakdown {
    pub discount: f64,
    pub tax: f64,
    pub final_total: f64,
}

/// Applies a cart-wide discount, then tax on what remains.
///
/// ## Order of Operations
/// ```text
/// subtotal ──► discount (on subtotal)
///                 │
///                 ▼
///        base = max(subtotal − discount, 0)
///                 │
///                 ▼
///          tax (on base)
///                 │
///                 ▼
///      final = max(base + tax, 0)
/// ```
///
/// ## Example
/// ```rust
/// use kasa_core::money::apply_global_discount_tax;
/// use kasa_core::Adjustment;
///
/// let result = apply_global_discount_tax(
///     200.0,
///     Some(Adjustment::percentage(10.0)),
///     Some(Adjustment::percentage(20.0)),
/// );
/// assert_eq!(result.discount, 20.0);
/// assert_eq!(result.tax, 36.0);
/// assert_eq!(result.final_total, 216.0);
/// ```
pub fn apply_global_discount_tax(
    subtotal_base: f64,
    discount: Option<Adjustment>,
    tax: Option<Adjustment>,
) -> DiscountTaxBreakdown {
    let subtotal = finite_or_zero(subtotal_base);

    let discount = adjustment_amount(subtotal, discount);
    let base_after_discount = (subtotal - discount).max(0.0);
    let tax = adjustment_amount(base_after_discount, tax);

    DiscountTaxBreakdown {
        discount,
        tax,
        final_total: (base_after_discount + tax).max(0.0),
    }
}

fn adjustment_amount(base: f64, adjustment: Option<Adjustment>) -> f64 {
    let Some(adjustment) = adjustment else {
        return 0.0;
    };
    let value = finite_or_zero(adjustment.value);

    match adjustment.kind {
        AdjustmentKind::Percentage => base * value / 100.0,
        AdjustmentKind::Amount => value.max(0.0),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
