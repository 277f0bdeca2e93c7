use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::errors::ServiceError;

/// Decode `"<header>,<base64>"`. Everything up to the first comma is
/// discarded; ASCII whitespace inside the payload is ignored.
///
/// Stricter than a lenient decoder on purpose: non-canonical trailing bits
/// and characters outside the standard alphabet are rejected, not skipped.
pub fn decode(image_data: &str) -> Result<Vec<u8>, ServiceError> {
    let (_header, encoded) = image_data
        .split_once(',')
        .ok_or_else(|| ServiceError::Decode("data URL 缺少 ',' 分隔符".into()))?;

    let decoded = if encoded.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD.decode(compact)
    } else {
        STANDARD.decode(encoded)
    };
    decoded.map_err(|e| ServiceError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_header_and_decodes() {
        let bytes = decode("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn header_is_not_interpreted() {
        // only the part after the first comma matters
        assert_eq!(decode("whatever,aGk=").unwrap(), b"hi");
        assert_eq!(decode(",aGk=").unwrap(), b"hi");
    }

    #[test]
    fn tolerates_line_breaks_in_payload() {
        assert_eq!(decode("data:image/png;base64,aGVs\r\nbG8=").unwrap(), b"hello");
    }

    #[test]
    fn missing_comma_is_a_decode_error() {
        let err = decode("aGVsbG8=").unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
        assert!(err.to_string().starts_with("图片解码失败: "));
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        assert!(matches!(decode("data:image/png;base64,@@not-base64@@"), Err(ServiceError::Decode(_))));
        assert!(matches!(decode("data:image/png;base64,aGVsbG8"), Err(ServiceError::Decode(_))));
    }

    #[test]
    fn rejects_what_a_lenient_decoder_would_skip() {
        // "aGl=" only differs from "aGk=" in bits that padding discards
        assert!(matches!(decode("x,aGl="), Err(ServiceError::Decode(_))));
        // stray non-alphabet character in the middle
        assert!(matches!(decode("x,aG!k="), Err(ServiceError::Decode(_))));
    }
}
