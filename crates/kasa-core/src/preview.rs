//! # Plain-Text Preview
//!
//! Renders a line sequence the way a fixed-pitch printer would lay it out,
//! ignoring size presets. Used by `receipt-preview` and by tests that want
//! to look at a whole receipt at once.

use crate::normalize::display_len;
use crate::types::{ReceiptContentLine, SOLID_RULE};

/// Renders lines to text, one `\n`-terminated row per printed line.
///
/// ## Example
/// ```rust
/// use kasa_core::preview::render_plain_text;
/// use kasa_core::ReceiptContentLine;
///
/// let lines = vec![
///     ReceiptContentLine::separator(10),
///     ReceiptContentLine::Columns {
///         left: "KDV".into(),
///         right: "1.80".into(),
///         indent: 1,
///         width: 10,
///         preset: None,
///     },
///     ReceiptContentLine::blank(1),
/// ];
/// assert_eq!(render_plain_text(&lines), "----------\n KDV  1.80\n\n");
/// ```
pub fn render_plain_text(lines: &[ReceiptContentLine]) -> String {
    let mut out = String::new();

    for line in lines {
        match line {
            ReceiptContentLine::Text { text, .. } => {
                out.push_str(text);
                out.push('\n');
            }
            ReceiptContentLine::Columns {
                left,
                right,
                indent,
                width,
                ..
            } => {
                out.push_str(&render_columns(left, right, *indent, *width));
                out.push('\n');
            }
            ReceiptContentLine::Separator { width, fill } => {
                let fill = fill.unwrap_or(SOLID_RULE);
                out.extend(std::iter::repeat(fill).take(*width));
                out.push('\n');
            }
            ReceiptContentLine::Blank { count } => {
                out.extend(std::iter::repeat('\n').take(*count));
            }
        }
    }
    out
}

fn render_columns(left: &str, right: &str, indent: usize, width: usize) -> String {
    let used = indent + display_len(left) + display_len(right);
    let gap = width.saturating_sub(used).max(1);
    format!("{}{}{}{}", " ".repeat(indent), left, " ".repeat(gap), right)
}

// =============================================================================
// Unit Tests
// =============================================================================
