//! Binary font bundle container.
//!
//! A bundle is a flat sequence of records with no header or trailer. Each
//! record is laid out as (multi-byte integers are big-endian):
//!
//! ```text
//! 1 byte   N  language code length
//! N bytes     language code, ASCII
//! 4 bytes  L  font data length (u32)
//! L bytes     font program
//! ```
//!
//! Decoding must consume the buffer exactly. Every length is bounds-checked
//! and a record that runs past the end of the buffer fails the whole decode.

mod writer;

use std::collections::HashMap;

use crate::types::{FontBundle, FontRecord};

pub use writer::BundleWriter;

/// Errors produced while decoding or encoding a font bundle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BundleError {
    /// A length prefix points past the end of the buffer.
    #[error(
        "font bundle truncated at offset {offset}: {field} needs {needed} bytes but only {remaining} remain"
    )]
    Truncated {
        offset: usize,
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// The language code contains bytes outside the ASCII range.
    #[error("language code at offset {offset} is not ASCII")]
    InvalidLanguageCode { offset: usize },

    /// A language code longer than the one-byte length prefix can describe.
    #[error("language code '{0}' is longer than 255 bytes")]
    LanguageCodeTooLong(String),

    /// Font data larger than the four-byte length prefix can describe.
    #[error("font data for '{code}' is {len} bytes, more than a record can hold")]
    DataTooLarge { code: String, len: usize },
}

/// Bounds-checked cursor over a bundle buffer.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    fn take(&mut self, needed: usize, field: &'static str) -> Result<&'a [u8], BundleError> {
        if needed > self.remaining() {
            return Err(BundleError::Truncated {
                offset: self.pos,
                field,
                needed,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(bytes)
    }

    fn read_u8(&mut self, field: &'static str) -> Result<u8, BundleError> {
        Ok(self.take(1, field)?[0])
    }

    fn read_u32(&mut self, field: &'static str) -> Result<u32, BundleError> {
        let bytes = self.take(4, field)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Decode a font bundle returned for `text_segment`.
///
/// `text_segment` is folded into each record's name so that bundles for
/// different segments never register colliding font names. When a bundle
/// carries several fonts for the same language code, the second and later
/// ones get a numeric suffix.
///
/// # Errors
///
/// Returns [`BundleError::Truncated`] if any length prefix extends past the
/// buffer, or [`BundleError::InvalidLanguageCode`] for a non-ASCII code.
/// An empty buffer is not an error and yields an empty bundle.
pub fn decode(buffer: &[u8], text_segment: &str) -> Result<FontBundle, BundleError> {
    let mut reader = Reader::new(buffer);
    let mut records = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    while !reader.is_at_end() {
        let code_len = reader.read_u8("language code length")?;
        let code_offset = reader.pos;
        let code_bytes = reader.take(usize::from(code_len), "language code")?;
        let code = std::str::from_utf8(code_bytes)
            .ok()
            .filter(|code| code.is_ascii())
            .ok_or(BundleError::InvalidLanguageCode {
                offset: code_offset,
            })?;

        // A length that does not fit in usize can never be satisfied either.
        let data_len = reader.read_u32("font data length")?;
        let data_len = usize::try_from(data_len).unwrap_or(usize::MAX);
        let data = reader.take(data_len, "font data")?;

        let mut record = FontRecord::new(code, data, text_segment);
        let count = seen.entry(code).or_insert(0);
        if *count > 0 {
            record.name = format!("{}_{}", record.name, count);
        }
        *count += 1;

        log::trace!(
            "Decoded font record '{}' ({} bytes)",
            record.name,
            record.data.len()
        );
        records.push(record);
    }

    Ok(FontBundle::new(records))
}
