// Copyright 2013-2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The static table of [special schemes](https://url.spec.whatwg.org/#special-scheme).

/// Whether `scheme` is one of the six schemes the standard singles out for special
/// authority/path handling: `ftp`, `file`, `http`, `https`, `ws`, `wss`. Note `gopher` was
/// special under the legacy (pre-2017) URL Standard but is ordinary under the current one.
pub(crate) fn is_special(scheme: &str) -> bool {
    matches!(
        scheme,
        "ftp" | "file" | "http" | "https" | "ws" | "wss"
    )
}

/// The scheme's default port, or `None` if it has none (including for `file`, and for any
/// non-special scheme).
pub(crate) fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "ftp" => Some(21),
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}

/// `file` gets its own boolean in a few hot paths of the state machine (host rules,
/// drive-letter handling) that don't apply to any other special scheme.
pub(crate) fn is_file(scheme: &str) -> bool {
    scheme == "file"
}

/// A scheme is valid if it matches `[a-zA-Z][a-zA-Z0-9+\-.]*`.
pub(crate) fn validate(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_schemes_are_exactly_six() {
        for s in ["ftp", "file", "http", "https", "ws", "wss"] {
            assert!(is_special(s), "{s} should be special");
        }
        assert!(!is_special("gopher"));
        assert!(!is_special("mailto"));
    }

    #[test]
    fn default_ports_match_the_standard() {
        assert_eq!(default_port("http"), Some(80));
        assert_eq!(default_port("https"), Some(443));
        assert_eq!(default_port("ftp"), Some(21));
        assert_eq!(default_port("ws"), Some(80));
        assert_eq!(default_port("wss"), Some(443));
        assert_eq!(default_port("file"), None);
        assert_eq!(default_port("mailto"), None);
    }

    #[test]
    fn validate_rejects_leading_digit() {
        assert!(!validate("1http"));
        assert!(validate("a1+.-"));
    }
}
