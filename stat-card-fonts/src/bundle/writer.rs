//! Font bundle encoder.

use super::BundleError;

/// Builds a font bundle buffer record by record.
///
/// Used to package fonts for a font-serving endpoint and to build fixtures.
#[derive(Debug, Clone, Default)]
pub struct BundleWriter {
    buf: Vec<u8>,
    records: usize,
}

impl BundleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record.
    ///
    /// # Errors
    ///
    /// Fails if `language_code` is not ASCII or longer than 255 bytes, or if
    /// `data` does not fit a 32-bit length prefix. The writer is unchanged on
    /// error.
    pub fn push(&mut self, language_code: &str, data: &[u8]) -> Result<&mut Self, BundleError> {
        if !language_code.is_ascii() {
            return Err(BundleError::InvalidLanguageCode {
                offset: self.buf.len() + 1,
            });
        }
        let code_len = u8::try_from(language_code.len())
            .map_err(|_| BundleError::LanguageCodeTooLong(language_code.to_string()))?;
        let data_len = u32::try_from(data.len()).map_err(|_| BundleError::DataTooLarge {
            code: language_code.to_string(),
            len: data.len(),
        })?;

        self.buf.reserve(1 + language_code.len() + 4 + data.len());
        self.buf.push(code_len);
        self.buf.extend_from_slice(language_code.as_bytes());
        self.buf.extend_from_slice(&data_len.to_be_bytes());
        self.buf.extend_from_slice(data);
        self.records += 1;
        Ok(self)
    }

    /// Number of records written so far.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Encoded size so far, in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the encoded bundle.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
