//! URI helpers shared by buffer resolution, the filesystem loader and the
//! writer.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const DATA_PREFIX: &str = "data:";

/// Returns true for `data:` URIs (case-insensitive scheme).
pub(crate) fn is_data_uri(uri: &str) -> bool {
    uri.get(..DATA_PREFIX.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(DATA_PREFIX))
}

/// Decodes the payload of a `data:[<mediatype>][;base64],<data>` URI.
pub(crate) fn decode_data_uri(uri: &str) -> Result<Vec<u8>, String> {
    let body = &uri[DATA_PREFIX.len()..];
    let comma = body
        .find(',')
        .ok_or_else(|| "data URI has no `,` separator".to_string())?;
    let (header, data) = (&body[..comma], &body[comma + 1..]);

    if header
        .rsplit(';')
        .next()
        .map_or(false, |param| param.eq_ignore_ascii_case("base64"))
    {
        STANDARD
            .decode(data)
            .map_err(|e| format!("invalid base64 payload: {}", e))
    } else {
        Ok(percent_decode(data))
    }
}

/// Encodes `data` as an `application/octet-stream` base64 data URI.
pub(crate) fn encode_data_uri(data: &[u8]) -> String {
    format!("data:application/octet-stream;base64,{}", STANDARD.encode(data))
}

/// Returns the URI scheme, if the URI has one.
///
/// Single-letter schemes are treated as drive letters (`C:/models`).
pub(crate) fn scheme(uri: &str) -> Option<&str> {
    let colon = uri.find(':')?;
    let candidate = &uri[..colon];
    let mut chars = candidate.chars();
    let starts_alpha = chars.next().map_or(false, |c| c.is_ascii_alphabetic());
    let valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if starts_alpha && valid && candidate.len() > 1 {
        Some(candidate)
    } else {
        None
    }
}

/// Decodes `%XX` escapes. Malformed escapes are kept literally.
pub(crate) fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut output = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                output.push((h << 4) | l);
                i += 3;
                continue;
            }
        }
        output.push(bytes[i]);
        i += 1;
    }

    output
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_base64() {
        let uri = "data:application/octet-stream;base64,AAECAw==";
        assert!(is_data_uri(uri));
        assert_eq!(decode_data_uri(uri).unwrap(), vec![0, 1, 2, 3]);
        assert!(decode_data_uri("data:;base64,@@@").is_err());
        assert!(decode_data_uri("data:application/octet-stream;base64").is_err());
    }

    #[test]
    fn test_data_uri_percent_encoded() {
        assert_eq!(decode_data_uri("data:,a%20b%00").unwrap(), b"a b\0".to_vec());
        assert!(is_data_uri("DATA:,x"));
        assert!(!is_data_uri("buffer.bin"));
    }

    #[test]
    fn test_percent_decode_keeps_malformed_escapes() {
        assert_eq!(percent_decode("100%"), b"100%".to_vec());
        assert_eq!(percent_decode("%zz%41"), b"%zzA".to_vec());
        assert_eq!(percent_decode("a%2"), b"a%2".to_vec());
    }

    #[test]
    fn test_scheme() {
        assert_eq!(scheme("https://example.com/a.bin"), Some("https"));
        assert_eq!(scheme("file:///tmp/a.bin"), Some("file"));
        assert_eq!(scheme("C:/models/a.bin"), None);
        assert_eq!(scheme("buffers/a.bin"), None);
        assert_eq!(scheme("a b:c"), None);
    }

    #[test]
    fn test_encode_data_uri() {
        let uri = encode_data_uri(&[0, 1, 2, 3]);
        assert_eq!(uri, "data:application/octet-stream;base64,AAECAw==");
        assert_eq!(decode_data_uri(&uri).unwrap(), vec![0, 1, 2, 3]);
    }
}
