//! Percent-escaping for the path segment.
//!
//! Paths are escaped with URI rules: letters, digits and the URI
//! punctuation below pass through, everything else becomes `%XX` over its
//! UTF-8 bytes. That keeps `|` and non-ASCII text out of the frame header.
//!
//! Decoding mirrors it, except that escapes of URI-reserved characters
//! (`%2F` for `/` and friends) stay literal, because they could not have
//! been produced from an unescaped character.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, PercentEncode, NON_ALPHANUMERIC};

use crate::error::Violation;

/// Bytes that are escaped when encoding a path.
const PATH_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Escapes that decoding leaves untouched.
const RESERVED: &[u8] = b";/?:@&=+$,#";

pub(crate) fn encode_path(path: &str) -> PercentEncode<'_> {
    utf8_percent_encode(path, PATH_ESCAPES)
}

/// Decodes an escaped path.
///
/// Fails on a `%` that isn't followed by two hex digits, and on escape
/// sequences that don't form valid UTF-8.
pub(crate) fn decode_path(raw: &str) -> Result<Cow<'_, str>, Violation> {
    if !raw.contains('%') {
        return Ok(Cow::Borrowed(raw));
    }

    let bytes = raw.as_bytes();
    let mut decoded = String::with_capacity(raw.len());
    let mut chunk_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let escaped = bytes
            .get(i + 1..i + 3)
            .and_then(hex_byte)
            .ok_or(Violation::MalformedPath)?;
        if RESERVED.contains(&escaped) {
            decoded.push_str(&decode_chunk(&raw[chunk_start..i])?);
            decoded.push_str(&raw[i..i + 3]);
            chunk_start = i + 3;
        }
        i += 3;
    }
    decoded.push_str(&decode_chunk(&raw[chunk_start..])?);
    Ok(Cow::Owned(decoded))
}

fn decode_chunk(chunk: &str) -> Result<Cow<'_, str>, Violation> {
    percent_decode_str(chunk)
        .decode_utf8()
        .map_err(|_| Violation::MalformedPath)
}

fn hex_byte(pair: &[u8]) -> Option<u8> {
    let hi = char::from(pair[0]).to_digit(16)?;
    let lo = char::from(pair[1]).to_digit(16)?;
    u8::try_from(hi * 16 + lo).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(path: &str) -> String {
        encode_path(path).to_string()
    }

    #[test]
    fn test_encode_escapes_space_and_pipe() {
        assert_eq!(encoded("/hi there"), "/hi%20there");
        assert_eq!(encoded("/a|b"), "/a%7Cb");
    }

    #[test]
    fn test_encode_keeps_uri_punctuation() {
        let path = "/a;b,c?d:e@f&g=h+i$j-k_l.m!n~o*p'q(r)s#t";
        assert_eq!(encoded(path), path);
    }

    #[test]
    fn test_encode_escapes_percent_and_unicode() {
        assert_eq!(encoded("100%"), "100%25");
        assert_eq!(encoded("/café"), "/caf%C3%A9");
    }

    #[test]
    fn test_decode_plain_path_borrows() {
        assert!(matches!(decode_path("/plain"), Ok(Cow::Borrowed("/plain"))));
    }

    #[test]
    fn test_decode_escapes() {
        assert_eq!(decode_path("/hi%20there").unwrap(), "/hi there");
        assert_eq!(decode_path("/caf%C3%A9").unwrap(), "/café");
        assert_eq!(decode_path("%7c").unwrap(), "|");
    }

    #[test]
    fn test_decode_keeps_reserved_escapes() {
        assert_eq!(decode_path("/a%2Fb%20c").unwrap(), "/a%2Fb c");
        assert_eq!(decode_path("%3f%23").unwrap(), "%3f%23");
    }

    #[test]
    fn test_decode_rejects_malformed_escape() {
        assert!(matches!(decode_path("/bad%zz"), Err(Violation::MalformedPath)));
        assert!(matches!(decode_path("/cut%2"), Err(Violation::MalformedPath)));
        assert!(matches!(decode_path("%"), Err(Violation::MalformedPath)));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(matches!(decode_path("%C3"), Err(Violation::MalformedPath)));
        assert!(matches!(decode_path("%FF%FE"), Err(Violation::MalformedPath)));
    }

    #[test]
    fn test_decode_inverts_encode() {
        for path in ["/hi there", "/a|b", "100%", "/café/日本", "/already%2Fescaped"] {
            assert_eq!(decode_path(&encoded(path)).unwrap(), path);
        }
    }
}
