//! Foundation types for the analysis pipeline.
//!
//! This module provides the fundamental types used throughout the linter:
//! - [`Position`], [`Span`] - row/column positions with row-major ordering
//! - [`DecodeError`], [`decode_source`] - UTF-8 source decoding
//!
//! This module has NO dependencies on other renard modules.

mod encoding;
mod position;

pub use encoding::{DecodeError, decode_source, decode_source_lossy};
pub use position::{Position, Span};
