//! # Normalization Module
//!
//! Boundary clean-up for receipt input. Nothing here fails: bad values are
//! replaced with safe defaults before layout runs.
//!
//! ## Normalization Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What Gets Normalized                               │
//! │                                                                         │
//! │  Amounts      NaN / ±∞            ──► 0                                │
//! │  Debt/change  negative            ──► 0                                │
//! │  Width        0                   ──► 1 (centering)                    │
//! │  Columns      width − indent < 8  ──► 8                                │
//! │  Currency     "jpy", ""           ──► TRY                              │
//! │                                                                         │
//! │  Conversion   every path goes through convert_amount()                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::{from_base, to_base};
use crate::types::{CurrencyCode, RateTable};
use crate::MIN_COLUMN_WIDTH;

// =============================================================================
// Amount Guards
// =============================================================================

/// Replaces NaN and infinities with 0.
#[inline]
pub fn finite_or_zero(amount: f64) -> f64 {
    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

/// Finite guard plus a floor at 0.
#[inline]
pub fn non_negative(amount: f64) -> f64 {
    finite_or_zero(amount).max(0.0)
}

// =============================================================================
// Layout Guards
// =============================================================================

/// Receipt width usable for centering and separators.
#[inline]
pub fn clamp_width(width: usize) -> usize {
    width.max(1)
}

/// Width left for a two-column row after the indent.
///
/// ## Example
/// ```rust
/// use kasa_core::normalize::column_width;
///
/// assert_eq!(column_width(32, 1), 31);
/// assert_eq!(column_width(6, 2), 8);
/// ```
#[inline]
pub fn column_width(width: usize, indent: usize) -> usize {
    width.saturating_sub(indent).max(MIN_COLUMN_WIDTH)
}

/// Printed width of a string, one column per character.
#[inline]
pub fn display_len(text: &str) -> usize {
    text.chars().count()
}

// =============================================================================
// Currency Pivot
// =============================================================================

/// Converts `amount` from `from` to `to` through the TRY base.
///
/// ## Decision Table
/// ```text
/// non-finite amount                         → 0
/// already_in_target                         → amount
/// from == to, no rate table, amount == 0    → amount
/// to   == TRY                               → to_base(amount, from)
/// from == TRY                               → from_base(amount, to)
/// otherwise                                 → from_base(to_base(amount, from), to)
/// ```
///
/// Items call this with `already_in_target = false`; the payment summary
/// passes the caller's "figures are already in the display currency" flag.
///
/// ## Example
/// ```rust
/// use kasa_core::normalize::convert_amount;
/// use kasa_core::{CurrencyCode, RateTable};
///
/// let rates = RateTable::new()
///     .with_rate(CurrencyCode::Usd, 30.0)
///     .with_rate(CurrencyCode::Eur, 40.0);
///
/// let eur = convert_amount(4.0, CurrencyCode::Usd, CurrencyCode::Eur, Some(&rates), false);
/// assert_eq!(eur, 3.0);
///
/// let untouched = convert_amount(4.0, CurrencyCode::Usd, CurrencyCode::Eur, Some(&rates), true);
/// assert_eq!(untouched, 4.0);
/// ```
pub fn convert_amount(
    amount: f64,
    from: CurrencyCode,
    to: CurrencyCode,
    rates: Option<&RateTable>,
    already_in_target: bool,
) -> f64 {
    let amount = finite_or_zero(amount);
    if already_in_target {
        return amount;
    }

    let rates = match rates {
        Some(rates) if from != to && amount != 0.0 => rates,
        _ => return amount,
    };

    let converted = if to.is_base() {
        to_base(amount, from, rates)
    } else if from.is_base() {
        from_base(amount, to, rates)
    } else {
        from_base(to_base(amount, from, rates), to, rates)
    };
    finite_or_zero(converted)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> RateTable {
        RateTable::new()
            .with_rate(CurrencyCode::Usd, 32.0)
            .with_rate(CurrencyCode::Eur, 40.0)
    }

    #[test]
    fn test_amount_guards() {
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(-3.5), -3.5);
        assert_eq!(non_negative(-3.5), 0.0);
        assert_eq!(non_negative(3.5), 3.5);
    }

    #[test]
    fn test_width_guards() {
        assert_eq!(clamp_width(0), 1);
        assert_eq!(clamp_width(48), 48);
        assert_eq!(column_width(32, 1), 31);
        assert_eq!(column_width(4, 10), 8);
        assert_eq!(column_width(0, 0), 8);
    }

    #[test]
    fn test_display_len_counts_characters() {
        assert_eq!(display_len("Çiğ köfte"), 9);
        assert_eq!(display_len(""), 0);
    }

    #[test]
    fn test_convert_passthrough_cases() {
        let r = rates();
        assert_eq!(convert_amount(5.0, CurrencyCode::Usd, CurrencyCode::Usd, Some(&r), false), 5.0);
        assert_eq!(convert_amount(5.0, CurrencyCode::Usd, CurrencyCode::Try, None, false), 5.0);
        assert_eq!(convert_amount(0.0, CurrencyCode::Usd, CurrencyCode::Try, Some(&r), false), 0.0);
        assert_eq!(convert_amount(f64::NAN, CurrencyCode::Usd, CurrencyCode::Try, Some(&r), false), 0.0);
    }

    #[test]
    fn test_convert_pivot_paths() {
        let r = rates();
        assert_eq!(convert_amount(2.0, CurrencyCode::Usd, CurrencyCode::Try, Some(&r), false), 64.0);
        assert_eq!(convert_amount(80.0, CurrencyCode::Try, CurrencyCode::Eur, Some(&r), false), 2.0);
        assert_eq!(convert_amount(5.0, CurrencyCode::Usd, CurrencyCode::Eur, Some(&r), false), 4.0);
    }

    #[test]
    fn test_convert_already_in_target_only_guards() {
        let r = rates();
        assert_eq!(convert_amount(2.0, CurrencyCode::Usd, CurrencyCode::Try, Some(&r), true), 2.0);
        assert_eq!(convert_amount(f64::INFINITY, CurrencyCode::Usd, CurrencyCode::Try, Some(&r), true), 0.0);
    }

    #[test]
    fn test_convert_missing_rate_follows_base_rules() {
        let r = rates();
        // GBP → TRY without a GBP rate prices at zero
        assert_eq!(convert_amount(3.0, CurrencyCode::Gbp, CurrencyCode::Try, Some(&r), false), 0.0);
        // TRY → GBP without a GBP rate shows the lira figure
        assert_eq!(convert_amount(3.0, CurrencyCode::Try, CurrencyCode::Gbp, Some(&r), false), 3.0);
    }
}
