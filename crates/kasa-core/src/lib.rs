//! # kasa-core: Receipt Layout and Money Formatting for Kasa POS
//!
//! This crate turns a completed sale into an ordered list of abstract
//! receipt lines for a narrow thermal printer. It has zero I/O: the host
//! application owns printer drivers and exchange-rate sources.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Receipt Data Flow                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           POS front end (sale, rates, layout settings)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ BuildReceiptLinesOptions (JSON)        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasa-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ normalize │─►│   money   │─►│  layout   │─►│  receipt  │  │   │
//! │  │   │  guards   │  │  convert  │  │ wrap/cols │  │  builder  │  │   │
//! │  │   │  pivot    │  │  format   │  │  center   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PRINTER ACCESS • PURE FUNCTIONS                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Vec<ReceiptContentLine>                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        Rendering backend (ESC/POS, preview, PDF ...)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Currency codes, rate tables, items, line variants
//! - [`money`] - Symbols, amount formatting, TRY-pivoted conversion
//! - [`normalize`] - Input guards and the single currency pivot
//! - [`layout`] - Centering, word wrap, responsive columns
//! - [`receipt`] - The line builder
//! - [`preview`] - Plain-text rendering for inspection
//! - [`error`] - Payload errors
//!
//! ## Example Usage
//!
//! ```rust
//! use kasa_core::receipt::{build_sale_receipt_lines, BuildReceiptLinesOptions};
//! use kasa_core::{CurrencyCode, ReceiptContentLine, ReceiptItem};
//!
//! let options = BuildReceiptLinesOptions {
//!     items: vec![ReceiptItem::new("Kahve", 2.0, 25.0, CurrencyCode::Try)],
//!     total: Some(50.0),
//!     ..Default::default()
//! };
//!
//! let lines = build_sale_receipt_lines(&options);
//! assert_eq!(lines.last(), Some(&ReceiptContentLine::blank(30)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod layout;
pub mod money;
pub mod normalize;
pub mod preview;
pub mod receipt;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use receipt::{build_receipt_lines, build_sale_receipt_lines, BuildReceiptLinesOptions};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Amounts below this magnitude are not printed.
///
/// Half a kuruş: anything smaller is floating-point residue from conversion.
pub const MEANINGFUL_THRESHOLD: f64 = 0.005;

/// Smallest usable width for a two-column row.
pub const MIN_COLUMN_WIDTH: usize = 8;

/// Characters per line on 58mm paper with the default font.
pub const DEFAULT_RECEIPT_WIDTH: usize = 32;

/// Default left indent for column rows.
pub const DEFAULT_INDENT: usize = 1;

/// Blank lines fed after the receipt so it clears the tear bar.
pub const FEED_LINES: usize = 30;

/// Printed for items without a name.
pub const DEFAULT_ITEM_NAME: &str = "Ürün";
