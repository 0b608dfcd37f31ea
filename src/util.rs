//! Byte decoding for HTML bodies of unknown charset.

use std::borrow::Cow;

/// How far into the document a charset declaration is searched for.
const SNIFF_LEN: usize = 1024;

/// Decode an HTML body to a string.
///
/// 1. Valid UTF-8 (with or without BOM) is taken as is.
/// 2. Otherwise the charset declared in a `<meta>` tag or XML declaration
///    within the first kilobyte is used, when `encoding_rs` knows it.
/// 3. Otherwise Windows-1252, the usual label-less mail charset.
///
/// Returns a borrowed string when the input is already UTF-8.
pub fn decode_html(bytes: &[u8]) -> Cow<'_, str> {
    let hint = extract_meta_charset(bytes).or_else(|| extract_xml_encoding(bytes));
    decode_text(bytes, hint)
}

/// Decode bytes, trying UTF-8, then `hint_encoding`, then Windows-1252.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        tracing::debug!(charset = encoding.name(), "decoding with declared charset");
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    tracing::debug!("input is not UTF-8, falling back to windows-1252");
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Charset from `<meta charset="...">` or
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(SNIFF_LEN)];

    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let after = &prefix[pos + 8..];

    let (start, terminator): (usize, &[u8]) = match *after.first()? {
        b'"' => (1, &b"\""[..]),
        b'\'' => (1, &b"'"[..]),
        _ => (0, &b"\"'; >/"[..]),
    };
    let value = &after[start..];
    let end = value
        .iter()
        .position(|b| terminator.contains(b) || b.is_ascii_whitespace())
        .unwrap_or(value.len());

    let charset = std::str::from_utf8(&value[..end]).ok()?;
    (!charset.is_empty()).then_some(charset)
}

/// Encoding from an `<?xml ... encoding="..."?>` declaration, found in the
/// first 100 bytes.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(100)];

    let xml_start = prefix.windows(5).position(|w| w == b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let quote = *after_enc.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let value_end = after_enc[1..].iter().position(|&b| b == quote)? + 1;
    std::str::from_utf8(&after_enc[1..value_end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_is_borrowed() {
        let decoded = decode_html("héllo".as_bytes());
        assert!(matches!(decoded, Cow::Borrowed("héllo")));
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let decoded = decode_html(b"\xEF\xBB\xBFhi");
        assert_eq!(decoded, "hi");
    }

    #[test]
    fn test_meta_charset_is_honored() {
        // 0xE9 is 'é' in Latin-1 and 'И' in KOI8-R.
        let html = b"<meta charset=\"koi8-r\"><p>\xE9</p>";
        assert_eq!(decode_html(html), "<meta charset=\"koi8-r\"><p>\u{418}</p>");
    }

    #[test]
    fn test_windows_1252_fallback() {
        let decoded = decode_html(b"caf\xE9 \x93quoted\x94");
        assert_eq!(decoded, "caf\u{e9} \u{201c}quoted\u{201d}");
    }

    #[test]
    fn test_extract_meta_charset() {
        assert_eq!(extract_meta_charset(b"<meta charset=utf-8>"), Some("utf-8"));
        assert_eq!(
            extract_meta_charset(
                b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=ISO-8859-1\">"
            ),
            Some("ISO-8859-1")
        );
        assert_eq!(extract_meta_charset(b"<meta charset='koi8-r'>"), Some("koi8-r"));
        assert_eq!(extract_meta_charset(b"<p>no charset</p>"), None);
    }

    #[test]
    fn test_extract_xml_encoding() {
        assert_eq!(
            extract_xml_encoding(b"<?xml version=\"1.0\" encoding=\"iso-8859-2\"?><html/>"),
            Some("iso-8859-2")
        );
        assert_eq!(extract_xml_encoding(b"<html/>"), None);
    }
}
