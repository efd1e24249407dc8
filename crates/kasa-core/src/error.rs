//! # Error Types
//!
//! Domain-specific error types for kasa-core.
//!
//! ## Where Errors Can Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Failure Surface                                 │
//! │                                                                         │
//! │  JSON payload ──► BuildReceiptLinesOptions::from_json ──► CoreError    │
//! │                                                                         │
//! │  Options ──► build_receipt_lines ──► Vec<ReceiptContentLine>           │
//! │              (never fails: bad amounts → 0, unknown currency → TRY)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Layout and money code degrade to defaults instead of failing, so the only
//! errors are about decoding input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while ingesting receipt input.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The options payload is not valid JSON or has the wrong shape.
    ///
    /// ## When This Occurs
    /// - Front end sends a string where a number is expected
    /// - Truncated payload from the IPC bridge
    #[error("Invalid receipt payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
