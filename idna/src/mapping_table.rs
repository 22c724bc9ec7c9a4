// Copyright 2013-2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-code-point status lookup for the UTS #46 mapping step.
//!
//! The full standard ships this as a generated table covering every assigned Unicode
//! code point (IdnaMappingTable.txt). This module hand-covers the ranges that matter for
//! URL host processing: the ASCII repertoire exactly, the handful of "deviation"
//! characters IDNA2008 and Unicode disagree on, and the default-ignorable characters
//! most commonly seen in domain names. Everything else is treated as `Valid`, deferring
//! correctness to the NFC normalization and bidi checks later in the pipeline.

use alloc::borrow::Cow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mapping {
    Valid,
    Ignored,
    Mapped(&'static str),
    Deviation(&'static str),
    Disallowed,
    DisallowedStd3Valid,
    DisallowedStd3Mapped(&'static str),
    NeedsCaseFold,
}

/// Default-ignorable code points commonly present in otherwise-ASCII domains.
/// Not exhaustive; the full Unicode `Default_Ignorable_Code_Point` property covers more.
const IGNORED: &[char] = &[
    '\u{00AD}', // SOFT HYPHEN
    '\u{034F}', // COMBINING GRAPHEME JOINER
    '\u{180B}', '\u{180C}', '\u{180D}', '\u{180E}',
    '\u{200B}', // ZERO WIDTH SPACE
    '\u{FE00}', '\u{FE01}', '\u{FE02}', '\u{FE03}', '\u{FE04}', '\u{FE05}', '\u{FE06}',
    '\u{FE07}', '\u{FE08}', '\u{FE09}', '\u{FE0A}', '\u{FE0B}', '\u{FE0C}', '\u{FE0D}',
    '\u{FE0E}', '\u{FE0F}',
    '\u{FEFF}', // ZERO WIDTH NO-BREAK SPACE / BOM
];

pub(crate) fn find_char(codepoint: char) -> Mapping {
    if codepoint.is_ascii() {
        return ascii_mapping(codepoint as u8);
    }

    // The four IDNA2008/Unicode "deviation" characters (UTS #46 table 2).
    match codepoint {
        '\u{00DF}' => return Mapping::Deviation("ss"), // LATIN SMALL LETTER SHARP S
        '\u{03C2}' => return Mapping::Deviation("\u{03C3}"), // GREEK SMALL LETTER FINAL SIGMA
        '\u{200C}' => return Mapping::Deviation(""),   // ZERO WIDTH NON-JOINER
        '\u{200D}' => return Mapping::Deviation(""),   // ZERO WIDTH JOINER
        _ => {}
    }

    if IGNORED.contains(&codepoint) {
        return Mapping::Ignored;
    }

    // Non-ASCII uppercase letters are case-folded by `map_label` directly, since their
    // lowercase form isn't always a single code point and can't be named as a `&'static
    // str` without the generated table this module stands in for.
    if codepoint.is_uppercase() {
        return Mapping::NeedsCaseFold;
    }

    Mapping::Valid
}

fn ascii_mapping(byte: u8) -> Mapping {
    match byte {
        b'a'..=b'z' | b'0'..=b'9' | b'-' => Mapping::Valid,
        b'A'..=b'Z' => Mapping::Mapped(ascii_lower(byte)),
        b'.' => Mapping::Valid,
        _ => Mapping::DisallowedStd3Valid,
    }
}

fn ascii_lower(byte: u8) -> &'static str {
    const LOWER: [&str; 26] = [
        "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
        "s", "t", "u", "v", "w", "x", "y", "z",
    ];
    LOWER[(byte - b'A') as usize]
}

/// Applies NFC-independent case/ignorable mapping to `label`, per UTS #46 4.1,
/// returning the possibly-rewritten label and whether a fatal ("disallowed") code
/// point was found. `transitional` selects whether deviation characters are mapped
/// (transitional, matching IDNA2003) or kept as-is (non-transitional, the WHATWG default).
pub(crate) fn map_label<'a>(
    label: &'a str,
    use_std3_ascii_rules: bool,
    transitional: bool,
    has_error: &mut bool,
) -> Cow<'a, str> {
    let mut needs_owned = false;
    for c in label.chars() {
        match find_char(c) {
            Mapping::Valid => {}
            Mapping::Deviation(_) if !transitional => {}
            _ => {
                needs_owned = true;
                break;
            }
        }
    }
    if !needs_owned {
        return Cow::Borrowed(label);
    }

    let mut out = alloc::string::String::with_capacity(label.len());
    for c in label.chars() {
        match find_char(c) {
            Mapping::Valid => out.push(c),
            Mapping::Ignored => {}
            Mapping::Mapped(replacement) => out.push_str(replacement),
            Mapping::NeedsCaseFold => {
                for lower in c.to_lowercase() {
                    out.push(lower);
                }
            }
            Mapping::Deviation(replacement) => {
                if transitional {
                    out.push_str(replacement);
                } else {
                    out.push(c);
                }
            }
            Mapping::DisallowedStd3Valid => {
                if use_std3_ascii_rules {
                    *has_error = true;
                } else {
                    out.push(c);
                }
            }
            Mapping::DisallowedStd3Mapped(replacement) => {
                if use_std3_ascii_rules {
                    *has_error = true;
                } else {
                    out.push_str(replacement);
                }
            }
            Mapping::Disallowed => {
                *has_error = true;
                out.push(c);
            }
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_letters_map_to_lowercase() {
        assert_eq!(find_char('A'), Mapping::Mapped("a"));
        assert_eq!(find_char('z'), Mapping::Valid);
    }

    #[test]
    fn sharp_s_is_a_deviation() {
        assert_eq!(find_char('\u{00DF}'), Mapping::Deviation("ss"));
    }

    #[test]
    fn soft_hyphen_is_ignored() {
        assert_eq!(find_char('\u{00AD}'), Mapping::Ignored);
    }

    #[test]
    fn map_label_lowercases_ascii() {
        let mut err = false;
        assert_eq!(map_label("EXAMPLE", false, false, &mut err), "example");
        assert!(!err);
    }

    #[test]
    fn map_label_transitional_maps_sharp_s() {
        let mut err = false;
        assert_eq!(map_label("stra\u{00DF}e", false, true, &mut err), "strasse");
    }

    #[test]
    fn map_label_non_transitional_keeps_sharp_s() {
        let mut err = false;
        assert_eq!(
            map_label("stra\u{00DF}e", false, false, &mut err),
            "stra\u{00DF}e"
        );
    }
}
