//! A Unicode-aware gap buffer for text editing.
//!
//! The buffer keeps a movable gap at the cursor so local insertions and
//! deletions are O(1) on the fast (no combining graphemes) path and O(k) in
//! the size of the touched grapheme run on the slow path. See [`GapBuffer`]
//! for the full operation set, and [`lines`]/[`words`] for the bounded
//! directional extractors built on top of it.

mod buffer;
mod error;
mod extract;
mod grapheme;
mod index;
mod lines;
mod words;

pub use buffer::GapBuffer;
pub use error::{GapBufferError, Result};
pub use extract::{accept_all, Direction, Subject};
pub use index::{BufIdx, CpPos, CursorPos, GrpmIdx};
pub use lines::lines;
pub use words::{words, DefaultSeparators, WordSeparators};
