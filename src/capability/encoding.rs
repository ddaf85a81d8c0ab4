//! Output encodings shared by the bundled generators.

use crate::config::OutputMode;
use base64::{engine::general_purpose::STANDARD, Engine};

/// Encodes `raw` into `out` per `mode`.
///
/// Returns the number of bytes written, or -1 if `out` is too small.
pub(crate) fn encode_into(raw: &[u8], mode: OutputMode, out: &mut [u8]) -> i32 {
    let encoded;
    let bytes: &[u8] = match mode {
        OutputMode::Raw => raw,
        OutputMode::Hex => {
            encoded = hex::encode(raw);
            encoded.as_bytes()
        }
        OutputMode::Base64 => {
            encoded = STANDARD.encode(raw);
            encoded.as_bytes()
        }
    };

    if bytes.len() > out.len() || bytes.len() > i32::MAX as usize {
        return -1;
    }
    out[..bytes.len()].copy_from_slice(bytes);
    bytes.len() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_fills_capacity() {
        let mut out = [0u8; 6];
        let written = encode_into(&[0xde, 0xad, 0x01], OutputMode::Hex, &mut out);
        assert_eq!(written, 6);
        assert_eq!(&out, b"dead01");
    }

    #[test]
    fn test_base64_padded() {
        let mut out = [0u8; 8];
        let written = encode_into(b"abcd", OutputMode::Base64, &mut out);
        assert_eq!(written, 8);
        assert_eq!(&out, b"YWJjZA==");
    }

    #[test]
    fn test_too_small_buffer() {
        let mut out = [0u8; 3];
        assert_eq!(encode_into(&[1, 2, 3], OutputMode::Hex, &mut out), -1);
    }
}
