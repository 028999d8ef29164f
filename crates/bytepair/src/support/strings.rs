//! # String Utilities

use std::borrow::Cow;

/// Owned-buffer variant of [`String::from_utf8_lossy`].
///
/// Invalid sequences are replaced with `U+FFFD`; valid input is reused without copying.
pub fn string_from_utf8_lossy(v: Vec<u8>) -> String {
    match String::from_utf8_lossy(&v) {
        Cow::Owned(string) => string,
        Cow::Borrowed(_) => {
            // SAFETY: `String::from_utf8_lossy` only borrows when the
            // input is already valid UTF-8.
            unsafe { String::from_utf8_unchecked(v) }
        }
    }
}

/// Render bytes as a string with one char per byte (Latin-1, ``U+0000..=U+00FF``).
pub fn latin1_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Inverse of [`latin1_string`].
///
/// Returns `None` if any char is outside ``U+0000..=U+00FF``.
pub fn latin1_bytes(s: &str) -> Option<Vec<u8>> {
    s.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_from_utf8_lossy() {
        let v = vec![0x61, 0x62, 0xff, 0x28];
        let s = string_from_utf8_lossy(v);
        assert_eq!(s, "ab\u{FFFD}(".to_string());

        let v = vec![0x61, 0x62];
        let s = string_from_utf8_lossy(v);
        assert_eq!(s, "ab".to_string());
    }

    #[test]
    fn test_latin1() {
        let bytes: Vec<u8> = (0..=255).collect();
        let s = latin1_string(&bytes);
        assert_eq!(s.chars().count(), 256);
        assert_eq!(latin1_bytes(&s), Some(bytes));

        // "é" is two UTF-8 bytes, rendered as two chars.
        assert_eq!(latin1_string("é".as_bytes()), "\u{00c3}\u{00a9}");

        assert_eq!(latin1_bytes("<UNK>"), Some(b"<UNK>".to_vec()));
        assert_eq!(latin1_bytes("\u{4f60}"), None);
    }
}
