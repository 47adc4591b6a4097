//! Shared utilities.

use std::borrow::Cow;

/// Decode text with automatic encoding detection.
///
/// Tries UTF-8 first (handles BOM automatically). On malformed UTF-8, falls
/// back to the encoding named in the document's `meta charset`, then to
/// Windows-1252 (a superset of ISO-8859-1, common in older exports).
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Sniff a `charset=` declaration from the head of an HTML document.
///
/// Only the first 1024 bytes are inspected, per the usual meta-charset
/// prescan window.
pub fn sniff_charset(bytes: &[u8]) -> Option<String> {
    let window = &bytes[..bytes.len().min(1024)];
    let lossy = String::from_utf8_lossy(window).to_ascii_lowercase();
    let start = lossy.find("charset=")? + "charset=".len();
    let rest = lossy[start..].trim_start_matches(['"', '\'']);
    let end = rest
        .find(|c: char| c == '"' || c == '\'' || c == '>' || c.is_whitespace())
        .unwrap_or(rest.len());
    let name = rest[..end].trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("héllo".as_bytes(), None), "héllo");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // 0xE9 is é in Windows-1252 but malformed UTF-8
        assert_eq!(decode_text(b"caf\xe9", None), "café");
    }

    #[test]
    fn test_decode_with_hint() {
        assert_eq!(decode_text(b"caf\xe9", Some("iso-8859-1")), "café");
    }

    #[test]
    fn test_sniff_charset() {
        assert_eq!(
            sniff_charset(br#"<html><head><meta charset="utf-8"></head>"#).as_deref(),
            Some("utf-8")
        );
        assert_eq!(
            sniff_charset(
                br#"<meta http-equiv="Content-Type" content="text/html; charset=windows-1252">"#
            )
            .as_deref(),
            Some("windows-1252")
        );
        assert_eq!(sniff_charset(b"<html><head></head>"), None);
    }
}
