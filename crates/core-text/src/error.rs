//! Error taxonomy for the gap buffer engine and its extractors.
//!
//! Every variant here is a programmer error (a contract violation), not a
//! recoverable runtime condition: callers are expected to uphold the
//! invariants documented on each operation, and a `GapBufferError` means one
//! of them was violated. There is no retry and no partial-failure path.

use thiserror::Error;

/// Errors surfaced by [`crate::GapBuffer`] and the line/word extractors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GapBufferError {
    /// `configured_gap_size` must be strictly greater than 1.
    #[error("gap size must be greater than 1, got {gap_size}")]
    InvalidConfiguration { gap_size: usize },

    /// A count argument to a movement or deletion operation was negative
    /// before being narrowed to `usize` at the call boundary.
    #[error("count must be non-negative, got {count}")]
    InvalidArgument { count: i64 },

    /// An index or range fell outside `[0, content_grpm_len)`.
    #[error("grapheme index {index} out of bounds for content of length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// Allocator exhaustion. Never constructed by this crate: Rust's global
    /// allocator aborts the process on exhaustion, so this variant exists
    /// only for documentation parity with the source design's taxonomy.
    #[error("fatal allocation failure")]
    Fatal,
}

pub type Result<T> = std::result::Result<T, GapBufferError>;
