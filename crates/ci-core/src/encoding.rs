//! Text encoding of image payloads
//!
//! Image bytes are persisted as standard, padded base64 in a TEXT column.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Stored text could not be turned back into bytes
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid base64 payload: {0}")]
pub struct DecodeError(#[from] base64::DecodeError);

/// Encode raw bytes into their stored text form
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode stored text back into the original bytes
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(STANDARD.decode(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let samples: [&[u8]; 5] = [
            b"",
            b"a",
            b"\x89PNG\r\n\x1a\n",
            &[0u8, 255, 128, 7, 64],
            &[0xFF; 1024],
        ];
        for bytes in samples {
            assert_eq!(decode(&encode(bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn test_empty_encodes_to_empty() {
        assert_eq!(encode(b""), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_text_is_rejected() {
        assert!(decode("not base64!").is_err());
        assert!(decode("a").is_err());
        assert!(decode("Zm9v\u{0}").is_err());
    }
}
