//! # Layout Primitives
//!
//! Fixed-width text helpers used by the receipt builder.
//!
//! ## Responsive Columns
//! ```text
//! width = 32, indent = 1  →  31 columns available
//!
//! Fits (left + right + 2 ≤ 31):
//! ┌────────────────────────────────┐
//! │ 2 x 25.00 TL          50.00 TL │   one Columns line
//! └────────────────────────────────┘
//!
//! Overflows:
//! ┌────────────────────────────────┐
//! │ Büyük Boy Karamelli Latte      │   Text line (left, indented)
//! │                      145.00 TL │   Columns line, empty left
//! └────────────────────────────────┘
//! ```
//!
//! Widths are counted in characters so `ş`, `ğ`, `İ` each take one column.

use tracing::trace;

use crate::normalize::{clamp_width, column_width, display_len};
use crate::types::{ReceiptContentLine, TextAlign, TextPreset};

/// Gap kept between the two columns.
const COLUMN_GAP: usize = 2;

// =============================================================================
// Text Helpers
// =============================================================================

/// Centers `text` in `width` columns with spaces.
///
/// Longer text is cut to the width. When the padding is odd the extra
/// space goes on the right.
///
/// ## Example
/// ```rust
/// use kasa_core::layout::center_line;
///
/// assert_eq!(center_line("KDV", 8), "  KDV   ");
/// assert_eq!(center_line("ABCDEFGHIJ", 4), "ABCD");
/// ```
pub fn center_line(text: &str, width: usize) -> String {
    let width = clamp_width(width);
    let len = display_len(text);

    if len >= width {
        return text.chars().take(width).collect();
    }

    let total = width - len;
    let left = total / 2;
    let right = total - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Greedy word wrap that never splits a word.
///
/// A single word longer than `max_width` gets a line of its own, unbroken.
///
/// ## Example
/// ```rust
/// use kasa_core::layout::wrap_text;
///
/// assert_eq!(wrap_text("  Kadıköy Şubesi  ", 20), vec!["Kadıköy Şubesi"]);
/// assert_eq!(
///     wrap_text("Moda Caddesi No 12 Kadıköy", 12),
///     vec!["Moda Caddesi", "No 12", "Kadıköy"]
/// );
/// ```
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();

    let joined = words.join(" ");
    if display_len(&joined) <= max_width {
        return vec![joined];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in words {
        let word_len = display_len(word);

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// =============================================================================
// Line Emitters
// =============================================================================

/// Pushes a centered text line.
pub fn push_centered(
    lines: &mut Vec<ReceiptContentLine>,
    text: &str,
    width: usize,
    preset: Option<TextPreset>,
) {
    lines.push(ReceiptContentLine::styled(
        center_line(text, width),
        preset,
        Some(TextAlign::Center),
    ));
}

/// Pushes `left`/`right` as one two-column line, or stacks them when they
/// would not fit side by side.
///
/// When stacked, the left text becomes a plain text line prefixed with the
/// indent, and the right text goes into a column line with an empty left
/// cell so it still lands flush right.
pub fn push_responsive_columns(
    lines: &mut Vec<ReceiptContentLine>,
    left: &str,
    right: &str,
    indent: usize,
    width: usize,
    preset: Option<TextPreset>,
) {
    let available = column_width(width, indent);
    let width = clamp_width(width);

    if display_len(left) + display_len(right) + COLUMN_GAP > available {
        trace!(left, right, available, "Stacking columns that do not fit");

        if !left.is_empty() {
            lines.push(ReceiptContentLine::styled(
                format!("{}{}", " ".repeat(indent), left),
                preset,
                None,
            ));
        }
        lines.push(ReceiptContentLine::Columns {
            left: String::new(),
            right: right.to_string(),
            indent,
            width,
            preset,
        });
        return;
    }

    lines.push(ReceiptContentLine::Columns {
        left: left.to_string(),
        right: right.to_string(),
        indent,
        width,
        preset,
    });
}

/// Pushes a label/value row whose value may wrap over several lines.
///
/// The first wrapped line sits next to the label; continuation lines get an
/// empty label so they stay under the value column.
pub fn push_meta_row(
    lines: &mut Vec<ReceiptContentLine>,
    label: &str,
    value: &str,
    indent: usize,
    width: usize,
) {
    let wrapped = wrap_text(value, column_width(width, indent));

    for (i, chunk) in wrapped.iter().enumerate() {
        let label = if i == 0 { label } else { "" };
        push_responsive_columns(lines, label, chunk, indent, width, None);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn padding(line: &str) -> (usize, usize) {
        let left = line.chars().take_while(|c| *c == ' ').count();
        let right = line.chars().rev().take_while(|c| *c == ' ').count();
        (left, right)
    }

    #[test]
    fn test_center_line_padding_split() {
        for width in [1usize, 7, 8, 31, 32, 48] {
            for text in ["X", "KDV", "Ödeme Özeti", "Genel Toplam"] {
                let len = display_len(text);
                if len >= width {
                    continue;
                }
                let line = center_line(text, width);
                let (left, right) = padding(&line);
                assert_eq!(left + right, width - len, "{text:?} in {width}");
                assert!(right - left <= 1, "{text:?} in {width}");
                assert_eq!(display_len(&line), width);
            }
        }
    }

    #[test]
    fn test_center_line_truncates_and_clamps() {
        assert_eq!(center_line("Teşekkürler", 5), "Teşek");
        assert_eq!(center_line("AB", 0), "A");
        assert_eq!(center_line("", 3), "   ");
    }

    #[test]
    fn test_wrap_text_fits() {
        assert_eq!(wrap_text("Kahve", 10), vec!["Kahve"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_text_keeps_long_word_whole() {
        assert_eq!(
            wrap_text("a Süperkalifrajilistik b", 6),
            vec!["a", "Süperkalifrajilistik", "b"]
        );
    }

    #[test]
    fn test_wrap_text_collapses_inner_spaces_when_it_fits() {
        assert_eq!(wrap_text(" Moda   Caddesi\tNo 12 ", 40), vec!["Moda Caddesi No 12"]);
        assert_eq!(wrap_text("Moda    Sahil", 12), vec!["Moda Sahil"]);
    }

    #[test]
    fn test_wrap_text_never_splits_and_rejoins() {
        let input = "  Bağdat   Caddesi No:145 Daire 7 Suadiye   Kadıköy İstanbul ";
        let normalized = input.split_whitespace().collect::<Vec<_>>().join(" ");

        for width in [1usize, 5, 8, 13, 20, 80] {
            let lines = wrap_text(input, width);
            assert_eq!(lines.join(" "), normalized, "width {width}");

            for line in &lines {
                let words: Vec<_> = line.split(' ').collect();
                if words.len() > 1 {
                    assert!(display_len(line) <= width, "{line:?} over {width}");
                }
                for word in words {
                    assert!(normalized.split(' ').any(|w| w == word), "{word:?} split");
                }
            }
        }
    }

    #[test]
    fn test_responsive_columns_fit() {
        let mut lines = Vec::new();
        push_responsive_columns(&mut lines, "2 x 25.00 TL", "50.00 TL", 1, 32, None);
        assert_eq!(
            lines,
            vec![ReceiptContentLine::Columns {
                left: "2 x 25.00 TL".to_string(),
                right: "50.00 TL".to_string(),
                indent: 1,
                width: 32,
                preset: None,
            }]
        );
    }

    #[test]
    fn test_responsive_columns_stack_when_too_wide() {
        let left = "Büyük Boy Karamelli Latte";
        let mut lines = Vec::new();
        push_responsive_columns(&mut lines, left, "145.00 TL", 1, 32, None);
        assert_eq!(
            lines,
            vec![
                ReceiptContentLine::text(" Büyük Boy Karamelli Latte"),
                ReceiptContentLine::Columns {
                    left: String::new(),
                    right: "145.00 TL".to_string(),
                    indent: 1,
                    width: 32,
                    preset: None,
                },
            ]
        );
    }

    #[test]
    fn test_responsive_columns_boundary() {
        // 31 available: 20 + 9 + 2 = 31 fits, one more char does not
        let mut lines = Vec::new();
        push_responsive_columns(&mut lines, &"a".repeat(20), &"b".repeat(9), 1, 32, None);
        assert_eq!(lines.len(), 1);

        let mut lines = Vec::new();
        push_responsive_columns(&mut lines, &"a".repeat(21), &"b".repeat(9), 1, 32, None);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_responsive_columns_empty_left_stack() {
        let mut lines = Vec::new();
        push_responsive_columns(&mut lines, "", &"9".repeat(40), 0, 32, None);
        assert_eq!(lines.len(), 1);
        assert!(matches!(&lines[0], ReceiptContentLine::Columns { left, .. } if left.is_empty()));
    }

    #[test]
    fn test_meta_row_wraps_under_label() {
        let mut lines = Vec::new();
        push_meta_row(&mut lines, "Müşteri", "Ayşe Yılmaz", 1, 32);
        assert_eq!(lines.len(), 1);

        let mut lines = Vec::new();
        push_meta_row(
            &mut lines,
            "Not",
            "Kapıda ödeme yapılacak lütfen zili çalmayın bebek uyuyor",
            1,
            32,
        );
        // value wraps to 31 columns, first chunk too wide to share with the
        // label so it stacks; the second chunk fits beside an empty label
        assert_eq!(
            lines,
            vec![
                ReceiptContentLine::text(" Not"),
                ReceiptContentLine::Columns {
                    left: String::new(),
                    right: "Kapıda ödeme yapılacak lütfen".to_string(),
                    indent: 1,
                    width: 32,
                    preset: None,
                },
                ReceiptContentLine::Columns {
                    left: String::new(),
                    right: "zili çalmayın bebek uyuyor".to_string(),
                    indent: 1,
                    width: 32,
                    preset: None,
                },
            ]
        );
    }
}
