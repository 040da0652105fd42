use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::IoError;

/// Encode raw bytes with the standard base64 alphabet (with padding).
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a standard base64 payload.
///
/// A `data:<mime>;base64,` prefix, as sent by browsers, is stripped first.
///
/// # Example
///
/// ```
/// use segview_io::transport::decode_base64;
///
/// assert_eq!(decode_base64("aGk=").unwrap(), b"hi");
/// assert_eq!(decode_base64("data:image/jpeg;base64,aGk=").unwrap(), b"hi");
/// ```
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, IoError> {
    let payload = payload.trim();
    let payload = match payload.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => payload,
    };
    Ok(STANDARD.decode(payload)?)
}
