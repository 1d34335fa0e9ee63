//! Binary-safe content transfer.
//!
//! File content moves through a string-only parameter channel, so raw bytes
//! are encoded in two layers: standard base64 first, then lowercase hex of
//! the base64 text.  Base64 alone can emit `+`, `/`, and `=`, which are not
//! safe in every text transport the value crosses; the hex layer restricts
//! the wire value to `[0-9a-f]` at the cost of size.  Decoding reverses
//! exactly: hex, then base64.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;

use ep_domain::error::Error;

/// Failures while reversing the two-layer encoding.
#[derive(thiserror::Error, Debug)]
pub enum ContentCodecError {
    #[error("hex layer: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("base64 layer: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl From<ContentCodecError> for Error {
    fn from(e: ContentCodecError) -> Self {
        Error::Conversion(e.to_string())
    }
}

/// Encode raw bytes for the string-only parameter channel.
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(B64.encode(bytes))
}

/// Recover the raw bytes from a wire value produced by [`encode`].
pub fn decode(wire: &str) -> Result<Vec<u8>, ContentCodecError> {
    Ok(B64.decode(hex::decode(wire)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        // "hello" -> base64 "aGVsbG8=" -> hex of that text.
        assert_eq!(encode(b"hello"), "6147566c6247383d");
        assert_eq!(decode("6147566c6247383d").unwrap(), b"hello");
    }

    #[test]
    fn wire_alphabet_is_lowercase_hex() {
        let wire = encode(&[0x00, 0xff, 0x10, 0x80]);
        assert!(wire.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn roundtrips_arbitrary_bytes() {
        let all: Vec<u8> = (0u8..=255).collect();
        for len in [0, 1, 2, 3, 17, 256] {
            let bytes = &all[..len];
            assert_eq!(decode(&encode(bytes)).unwrap(), bytes, "len {len}");
        }
    }

    #[test]
    fn empty_input_roundtrips_to_empty_wire() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(matches!(
            decode("zz"),
            Err(ContentCodecError::Hex(_))
        ));
        // Odd length.
        assert!(matches!(decode("614"), Err(ContentCodecError::Hex(_))));
    }

    #[test]
    fn valid_hex_of_invalid_base64_is_rejected() {
        // hex of "!!!", which is not base64.
        let wire = hex::encode("!!!");
        assert!(matches!(
            decode(&wire),
            Err(ContentCodecError::Base64(_))
        ));
    }

    #[test]
    fn codec_error_maps_to_conversion() {
        let err: Error = decode("zz").unwrap_err().into();
        assert!(matches!(err, Error::Conversion(_)));
    }
}
