//! Result of a custom generation.

use crate::config::OutputMode;
use crate::error::RngError;

/// Output of [`HardwareRng::generate_custom`](super::HardwareRng::generate_custom).
///
/// Raw output stays bytes. Hex and base64 output is returned as the
/// encoded text and is never decoded back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedOutput {
    /// Raw output.
    Bytes(Vec<u8>),
    /// Hex or base64 text.
    Text(String),
}

impl GeneratedOutput {
    /// Wraps the truncated generator buffer according to its encoding.
    pub(crate) fn from_buffer(buf: Vec<u8>, mode: OutputMode) -> Result<Self, RngError> {
        if !mode.is_text() {
            return Ok(Self::Bytes(buf));
        }
        String::from_utf8(buf)
            .map(Self::Text)
            .map_err(|_| RngError::GenerationFailure(format!("{:?} output is not valid text", mode)))
    }

    /// Length of the output in bytes (encoded length for text).
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns true for empty output.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The raw bytes, or the encoded text's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Bytes(bytes) => bytes,
            Self::Text(text) => text.as_bytes(),
        }
    }

    /// Returns the text for hex or base64 output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Bytes(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Consumes the output into bytes; text becomes its UTF-8 bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Bytes(bytes) => bytes,
            Self::Text(text) => text.into_bytes(),
        }
    }

    /// Consumes the output into its text, if it is text.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Bytes(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_stays_bytes() {
        let output = GeneratedOutput::from_buffer(vec![0xff, 0x00], OutputMode::Raw).unwrap();
        assert_eq!(output, GeneratedOutput::Bytes(vec![0xff, 0x00]));
        assert!(output.as_text().is_none());
    }

    #[test]
    fn test_hex_becomes_text() {
        let output = GeneratedOutput::from_buffer(b"00ff".to_vec(), OutputMode::Hex).unwrap();
        assert_eq!(output.as_text(), Some("00ff"));
        assert_eq!(output.len(), 4);
    }

    #[test]
    fn test_invalid_text_is_failure() {
        let result = GeneratedOutput::from_buffer(vec![0xff, 0xfe], OutputMode::Base64);
        assert!(matches!(result, Err(RngError::GenerationFailure(_))));
    }
}
