// Copyright 2013-2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! URLs use special characters to indicate the parts of the request.
//! For example, a `?` question mark marks the end of a path and the start of a query string.
//! In order for that character to exist inside a path, it needs to be encoded differently.
//!
//! Percent encoding replaces reserved characters with the `%` escape character
//! followed by a byte value as two hexadecimal digits.
//! For example, an ASCII space character is replaced with `%20`.
//!
//! When encoding, the set of characters that can (and should, for readability) be left alone
//! depends on the context. The `?` question mark mentioned above is not a separator
//! when used in a query string, and therefore does not need to be encoded there.
//! [`AsciiSet`] lets callers configure this per WHATWG URL Standard encode set.
//!
//! This crate deliberately does not do UTF-8 decoding or normalization, leaving callers
//! in control of which bytes are passed through unencoded.

#![no_std]
#![doc(html_root_url = "https://docs.rs/percent-encoding/2.3.2")]

#[cfg(feature = "alloc")]
extern crate alloc;

// For forwards compatibility
#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
use alloc::borrow::Cow;
#[cfg(feature = "alloc")]
use alloc::string::String;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use core::{fmt, slice, str};

mod ascii;
pub use crate::ascii::AsciiSet;

/// The WHATWG "C0 control percent-encode set".
///
/// Bytes `< 0x20` (the C0 controls) or `> 0x7E` (non-ASCII bytes).
pub const CONTROLS: &AsciiSet = &ascii::CONTROLS;

/// Everything that is not an ASCII letter or digit. The most aggressive set provided
/// here, preserving only alphanumerics; useful as a safe default outside WHATWG contexts.
pub const NON_ALPHANUMERIC: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'-')
    .add(b'.')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'_')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}')
    .add(b'~');

/// The WHATWG "fragment percent-encode set", used inside fragment identifiers.
///
/// `CONTROLS` plus space, `"`, `<`, `>`, and `` ` ``.
pub const FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// The WHATWG "path percent-encode set", used for path segments.
///
/// `FRAGMENT` plus `#`, `?`, `{`, and `}`.
pub const PATH: &AsciiSet = &FRAGMENT.add(b'#').add(b'?').add(b'{').add(b'}');

/// The WHATWG "userinfo percent-encode set", used for usernames and passwords.
///
/// `PATH` plus `/`, `:`, `;`, `=`, `@`, `[`, `\`, `]`, `^`, and `|`.
pub const USERINFO: &AsciiSet = &PATH
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// The WHATWG "component percent-encode set", used for URL-adjacent components that
/// are not part of the path/query/fragment grammar (form fields, search-param values).
///
/// `USERINFO` plus `$`, `&`, `+`, and `,`.
pub const COMPONENT: &AsciiSet = &USERINFO.add(b'$').add(b'&').add(b'+').add(b',');

/// The WHATWG "query percent-encode set", used for the query of a non-special-scheme URL.
///
/// `CONTROLS` plus space, `"`, `#`, `<`, and `>`.
pub const QUERY: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'<').add(b'>');

/// The WHATWG "special-query percent-encode set", used for the query of a special-scheme URL.
///
/// `QUERY` plus `'`, since an unencoded `'` in a special-scheme query string has historically
/// been exploitable as a SQL-injection vector by naive server-side code.
pub const SPECIAL_QUERY: &AsciiSet = &QUERY.add(b'\'');

include!("table.rs");

/// Percent-encode the given bytes with the given [`AsciiSet`].
///
/// Non-ASCII bytes and bytes in the set are encoded. All other bytes are unchanged.
///
/// ```
/// use percent_encoding::{percent_encode, NON_ALPHANUMERIC};
///
/// assert_eq!(percent_encode(b"foo bar?", NON_ALPHANUMERIC).to_string(), "foo%20bar%3F");
/// ```
#[inline]
pub fn percent_encode<'a>(input: &'a [u8], ascii_set: &'static AsciiSet) -> PercentEncode<'a> {
    PercentEncode {
        bytes: input,
        ascii_set,
    }
}

/// Percent-encode the UTF-8 encoding of the given string with the given [`AsciiSet`].
#[inline]
pub fn utf8_percent_encode<'a>(input: &'a str, ascii_set: &'static AsciiSet) -> PercentEncode<'a> {
    percent_encode(input.as_bytes(), ascii_set)
}

/// The return type of [`percent_encode`] and [`utf8_percent_encode`].
///
/// Implements `Iterator<Item = &str>`, yielding one `&'static str` per escaped byte and
/// one borrowed slice per maximal run of unencoded bytes (so that e.g. an all-ASCII
/// unreserved string yields a single item). Implements `Display` for direct formatting.
#[derive(Clone)]
pub struct PercentEncode<'a> {
    bytes: &'a [u8],
    ascii_set: &'static AsciiSet,
}

impl<'a> Iterator for PercentEncode<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.bytes.is_empty() {
            return None;
        }
        if self.ascii_set.should_percent_encode(self.bytes[0]) {
            let (byte, rest) = self.bytes.split_at(1);
            self.bytes = rest;
            return Some(PERCENT_ENCODE_TABLE[byte[0] as usize]);
        }
        let run_len = self
            .bytes
            .iter()
            .position(|&b| self.ascii_set.should_percent_encode(b))
            .unwrap_or(self.bytes.len());
        let (run, rest) = self.bytes.split_at(run_len);
        self.bytes = rest;
        // `run` contains only bytes the set exempted from encoding. Every encode set in
        // this crate only exempts ASCII bytes, so `run` is valid UTF-8.
        Some(unsafe { str::from_utf8_unchecked(run) })
    }
}

impl<'a> fmt::Display for PercentEncode<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.clone().try_for_each(|s| f.write_str(s))
    }
}

#[cfg(feature = "alloc")]
impl<'a> From<PercentEncode<'a>> for Cow<'a, str> {
    fn from(mut iter: PercentEncode<'a>) -> Self {
        match iter.next() {
            None => Cow::Borrowed(""),
            Some(first) => match iter.next() {
                None => Cow::Borrowed(first),
                Some(second) => {
                    let mut string = String::with_capacity(first.len() + second.len());
                    string.push_str(first);
                    string.push_str(second);
                    string.extend(iter);
                    Cow::Owned(string)
                }
            },
        }
    }
}

/// Percent-decode the given bytes.
///
/// Bytes in `input` that are not part of a valid `%HH` escape (including a lone trailing `%`
/// or a `%` followed by non-hex digits) are copied through unchanged, per
/// <https://url.spec.whatwg.org/#percent-decode>.
///
/// ```
/// use percent_encoding::percent_decode;
///
/// assert_eq!(percent_decode(b"foo%20bar").collect::<Vec<u8>>(), b"foo bar");
/// assert_eq!(percent_decode(b"100%").collect::<Vec<u8>>(), b"100%");
/// ```
pub fn percent_decode(input: &[u8]) -> PercentDecode<'_> {
    PercentDecode {
        bytes: input.iter(),
    }
}

/// Percent-decode the given string.
///
/// Shorthand for `percent_decode(input.as_bytes())`.
pub fn percent_decode_str(input: &str) -> PercentDecode<'_> {
    percent_decode(input.as_bytes())
}

/// The return type of [`percent_decode`]. Implements `Iterator<Item = u8>`.
#[derive(Clone, Debug)]
pub struct PercentDecode<'a> {
    bytes: slice::Iter<'a, u8>,
}

/// If the next two bytes of `iter` are ASCII hex digits, consumes them and returns the
/// decoded value; otherwise leaves `iter` untouched and returns `None`.
fn decode_escape(iter: &mut slice::Iter<'_, u8>) -> Option<u8> {
    let mut lookahead = iter.clone();
    let h = from_hex(*lookahead.next()?)?;
    let l = from_hex(*lookahead.next()?)?;
    *iter = lookahead;
    Some(h << 4 | l)
}

impl<'a> Iterator for PercentDecode<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.bytes.next().map(|&byte| {
            if byte == b'%' {
                decode_escape(&mut self.bytes).unwrap_or(byte)
            } else {
                byte
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, max) = self.bytes.size_hint();
        (0, max)
    }
}

#[cfg(feature = "alloc")]
impl<'a> PercentDecode<'a> {
    /// If the percent-decoded bytes are not valid UTF-8, a replacement character is
    /// substituted, matching `String::from_utf8_lossy`.
    pub fn decode_utf8_lossy(self) -> Cow<'a, str> {
        let bytes: Cow<'a, [u8]> = self.into_cow_bytes();
        match bytes {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
            Cow::Owned(bytes) => match String::from_utf8_lossy(&bytes) {
                // `from_utf8_lossy` didn't need to allocate a new string, meaning `bytes`
                // was already valid UTF-8.
                Cow::Borrowed(_) => Cow::Owned(unsafe { String::from_utf8_unchecked(bytes) }),
                Cow::Owned(s) => Cow::Owned(s),
            },
        }
    }

    /// If the percent-decoded bytes are valid UTF-8, return them, borrowing the input
    /// when no byte was actually decoded.
    pub fn decode_utf8(self) -> Result<Cow<'a, str>, str::Utf8Error> {
        match self.into_cow_bytes() {
            Cow::Borrowed(bytes) => str::from_utf8(bytes).map(Cow::Borrowed),
            Cow::Owned(bytes) => String::from_utf8(bytes)
                .map(Cow::Owned)
                .map_err(|e| e.utf8_error()),
        }
    }

    fn into_cow_bytes(self) -> Cow<'a, [u8]> {
        let input = self.bytes.as_slice();
        if !input.contains(&b'%') {
            return Cow::Borrowed(input);
        }
        Cow::Owned(self.collect())
    }
}

/// Error returned by [`percent_decode_strict`] when a `%` is not followed by two hex
/// digits, rather than the lenient pass-through behavior of [`percent_decode`].
///
/// The WHATWG URL Standard's own string-percent-decode is always lenient; this strict
/// variant matches algorithms built on top of it that are specified to fail outright on
/// a malformed escape, such as opaque-host parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedEscape;

impl fmt::Display for MalformedEscape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("malformed percent-escape sequence")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MalformedEscape {}

/// Strictly percent-decode `input`, rejecting any `%` not followed by two hex digits.
#[cfg(feature = "alloc")]
pub fn percent_decode_strict(input: &[u8]) -> Result<Vec<u8>, MalformedEscape> {
    let mut output = Vec::with_capacity(input.len());
    let mut iter = input.iter();
    while let Some(&byte) = iter.next() {
        if byte == b'%' {
            output.push(decode_escape(&mut iter).ok_or(MalformedEscape)?);
        } else {
            output.push(byte);
        }
    }
    Ok(output)
}

#[inline]
pub(crate) fn from_hex(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "alloc")]
    #[test]
    fn roundtrip_every_byte() {
        for b in 0u8..=255 {
            let input = [b];
            let encoded: Vec<u8> = percent_encode(&input, NON_ALPHANUMERIC)
                .flat_map(|s| s.bytes())
                .collect();
            let decoded: Vec<u8> = percent_decode(&encoded).collect();
            assert_eq!(decoded, input);
        }
    }

    #[test]
    fn encode_reserved() {
        assert_eq!(
            utf8_percent_encode("foo bar?", NON_ALPHANUMERIC).to_string(),
            "foo%20bar%3F"
        );
    }

    #[test]
    fn encode_preserves_unreserved_run() {
        let mut iter = utf8_percent_encode("hello", NON_ALPHANUMERIC);
        assert_eq!(iter.next(), Some("hello"));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn decode_percent_sequences() {
        assert_eq!(
            percent_decode(b"foo%20bar").collect::<Vec<u8>>(),
            b"foo bar"
        );
    }

    #[test]
    fn decode_lone_percent_is_literal() {
        assert_eq!(percent_decode(b"100%").collect::<Vec<u8>>(), b"100%");
        assert_eq!(percent_decode(b"100%zz").collect::<Vec<u8>>(), b"100%zz");
    }

    #[test]
    fn strict_decode_rejects_malformed() {
        assert!(percent_decode_strict(b"100%").is_err());
        assert!(percent_decode_strict(b"100%2g").is_err());
        assert_eq!(percent_decode_strict(b"100%20").unwrap(), b"100 ");
    }

    #[test]
    fn query_set_does_not_encode_single_quote() {
        assert!(!QUERY.should_percent_encode(b'\''));
        assert!(SPECIAL_QUERY.should_percent_encode(b'\''));
    }

    #[test]
    fn decode_utf8_lossy_substitutes_replacement_char() {
        let decoded = percent_decode(b"%FF%FE").decode_utf8_lossy();
        assert!(decoded.contains('\u{FFFD}'));
    }
}
