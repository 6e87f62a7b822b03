//! Source decoding.
//!
//! The analysis core works on `&str`; callers holding raw bytes decode here.
//! `decode_source` is the strict path. The lenient path (`parse_bytes` at the
//! crate root) substitutes replacement characters and reports the first
//! invalid byte as a diagnostic instead of failing.

use std::borrow::Cow;

use thiserror::Error;

use super::position::Position;

/// Failure to decode source bytes as UTF-8
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid utf-8 sequence at byte offset {offset}")]
    InvalidUtf8 { offset: usize },
}

/// Strictly decode source bytes as UTF-8.
pub fn decode_source(bytes: &[u8]) -> Result<Cow<'_, str>, DecodeError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(e) => Err(DecodeError::InvalidUtf8 {
            offset: e.valid_up_to(),
        }),
    }
}

/// Lossily decode source bytes, reporting where the first invalid sequence
/// sat as a `Position` within the decodable prefix.
pub fn decode_source_lossy(bytes: &[u8]) -> (Cow<'_, str>, Option<Position>) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), None),
        Err(e) => {
            let valid = std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default();
            let position = Position::default().advanced(valid);
            (String::from_utf8_lossy(bytes), Some(position))
        }
    }
}
