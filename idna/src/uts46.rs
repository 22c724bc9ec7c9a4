// Copyright 2013-2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The processing, validity-checking and bidi rules of UTS #46, and the [`Config`]
//! builder that wires them together into `to_ascii`/`to_unicode`.

use crate::mapping_table::map_label;
use crate::punycode;
use alloc::{fmt, string::String};
use unicode_bidi::{bidi_class, BidiClass};
use unicode_normalization::UnicodeNormalization;

/// Holds whether any processing error occurred, and (when the `std` feature is enabled)
/// what kind(s). With `std` disabled there is no heap to collect a list of errors into, so
/// only a single flag is tracked; this mirrors the real UTS46 implementation, which uses a
/// bitset of `std`-only error kinds.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Errors {
    punycode: bool,
    other: bool,
}

impl Errors {
    pub(crate) fn is_empty(&self) -> bool {
        !self.punycode && !self.other
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Errors {{ punycode: {}, other: {} }}", self.punycode, self.other)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Errors {}

/// The [Processing](https://www.unicode.org/reports/tr46/#Processing) configuration for
/// domain to ASCII/domain to Unicode conversions.
///
/// The `Default` config matches what the WHATWG URL Standard calls for: non-transitional
/// processing, `beStrict` unset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    use_std3_ascii_rules: bool,
    transitional_processing: bool,
    verify_dns_length: bool,
    check_hyphens: bool,
    check_bidi: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_std3_ascii_rules: false,
            transitional_processing: false,
            verify_dns_length: false,
            check_hyphens: false,
            check_bidi: true,
        }
    }
}

impl Config {
    /// Reject code points disallowed by STD3 (the restricted LDH host repertoire) that
    /// this implementation would otherwise pass through unchanged.
    pub fn use_std3_ascii_rules(mut self, value: bool) -> Self {
        self.use_std3_ascii_rules = value;
        self
    }

    /// Use IDNA2003's deviation-character mappings (e.g. ß ⟶ ss) instead of leaving
    /// them as-is. The WHATWG URL Standard always uses non-transitional processing; this
    /// exists for compatibility with strict IDNA2008 consumers.
    pub fn transitional_processing(mut self, value: bool) -> Self {
        self.transitional_processing = value;
        self
    }

    /// Reject domains, or individual labels, that violate DNS length limits (255 bytes
    /// overall, 63 bytes per label).
    pub fn verify_dns_length(mut self, value: bool) -> Self {
        self.verify_dns_length = value;
        self
    }

    /// Enforce the hyphen placement rules (no hyphen in the 3rd/4th position unless
    /// already an ACE label, no leading or trailing hyphen).
    pub fn check_hyphens(mut self, value: bool) -> Self {
        self.check_hyphens = value;
        self
    }

    /// Run the bidirectional-text checks of RFC 5893 on labels that contain a
    /// right-to-left code point.
    pub fn check_bidi(mut self, value: bool) -> Self {
        self.check_bidi = value;
        self
    }

    /// The [domain to ASCII](https://url.spec.whatwg.org/#concept-domain-to-ascii)
    /// algorithm, appending the result to `out` and returning accumulated errors.
    pub fn to_ascii(&self, domain: &str, out: &mut String) -> Errors {
        let mut errors = Errors::default();
        let mut first = true;
        for label in self.processing(domain, &mut errors) {
            if !first {
                out.push('.');
            }
            first = false;
            if label.is_ascii() {
                if self.check_hyphens && is_invalid_hyphen_placement(&label) {
                    errors.other = true;
                }
                out.push_str(&label);
            } else {
                out.push_str("xn--");
                if punycode::encode_into(label.chars(), out).is_err() {
                    errors.punycode = true;
                }
            }
        }
        if self.verify_dns_length && !verify_dns_length(out) {
            errors.other = true;
        }
        errors
    }

    /// The [domain to Unicode](https://url.spec.whatwg.org/#concept-domain-to-unicode)
    /// algorithm, appending the result to `out` and returning accumulated errors.
    pub fn to_unicode(&self, domain: &str, out: &mut String) -> Result<(), Errors> {
        let mut errors = Errors::default();
        let mut first = true;
        for label in self.processing(domain, &mut errors) {
            if !first {
                out.push('.');
            }
            first = false;
            out.push_str(&label);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The shared [Processing](https://www.unicode.org/reports/tr46/#Processing) step:
    /// map, normalize, split into labels, decode any `xn--` label, and validate. Returns
    /// the resulting labels so callers can either re-join them as-is (`to_unicode`) or
    /// re-encode non-ASCII ones (`to_ascii`).
    fn processing(&self, domain: &str, errors: &mut Errors) -> alloc::vec::Vec<String> {
        let mut result = alloc::vec::Vec::new();
        // (index into `result`, was_ace) for labels that still need validating; a label
        // whose `xn--` prefix failed to decode is pushed raw but skips validation, same
        // as before this was split into two passes.
        let mut to_validate = alloc::vec::Vec::new();

        for label in domain.split('.') {
            let (label, was_ace, skip_validation) = if let Some(rest) = label.strip_prefix("xn--") {
                match punycode::decode_to_string(rest) {
                    Some(decoded) => (decoded, true, false),
                    None => {
                        errors.punycode = true;
                        (String::from(label), true, true)
                    }
                }
            } else {
                let mut has_error = false;
                let mapped = map_label(
                    label,
                    self.use_std3_ascii_rules,
                    self.transitional_processing,
                    &mut has_error,
                );
                if has_error {
                    errors.other = true;
                }
                (mapped.chars().nfc().collect::<String>(), false, false)
            };

            let index = result.len();
            result.push(label);
            if !skip_validation {
                to_validate.push((index, was_ace));
            }
        }

        // The Bidi Rule (RFC 5893) only constrains a domain that has at least one RTL
        // label; compute that once over every label before validating any of them.
        let is_bidi_domain = result.iter().any(|label| is_bidi_label(label));
        let label_count = result.len();

        for (index, was_ace) in to_validate {
            // An empty label is only legal as the trailing root label of a multi-label
            // domain (the "example.com." FQDN form); an empty label anywhere else,
            // including a lone ".", is always an error regardless of `verify_dns_length`.
            let is_root_label = label_count > 1 && index == label_count - 1;
            if !self.is_valid(&result[index], was_ace, is_bidi_domain, is_root_label) {
                errors.other = true;
            }
        }
        result
    }

    fn is_valid(&self, label: &str, was_ace: bool, is_bidi_domain: bool, is_root_label: bool) -> bool {
        if label.is_empty() {
            return is_root_label;
        }
        if self.check_hyphens && is_invalid_hyphen_placement(label) {
            return false;
        }
        if self.verify_dns_length && label.len() > 63 {
            return false;
        }
        if !was_ace {
            let mut has_error = false;
            let remapped = map_label(label, self.use_std3_ascii_rules, false, &mut has_error);
            if has_error || remapped != label {
                return false;
            }
        }
        if self.check_bidi && !passes_bidi(label, is_bidi_domain) {
            return false;
        }
        true
    }
}

/// Whether `label` is an RTL label per RFC 5893 §1.3: its first character's bidi class
/// is R, AL, or AN. A domain containing at least one such label is a "Bidi domain name"
/// and the Bidi Rule applies to every one of its labels.
fn is_bidi_label(label: &str) -> bool {
    matches!(
        label.chars().next().map(bidi_class),
        Some(BidiClass::R) | Some(BidiClass::AL) | Some(BidiClass::AN)
    )
}

/// Checks the hyphen-placement rules of UTS #46 validity criterion 2/3: no `--` in the
/// 3rd/4th position (reserved for ACE labels), and no leading or trailing hyphen.
fn is_invalid_hyphen_placement(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.len() >= 4 && bytes[2] == b'-' && bytes[3] == b'-' {
        return true;
    }
    bytes.first() == Some(&b'-') || bytes.last() == Some(&b'-')
}

fn verify_dns_length(domain: &str) -> bool {
    if domain.is_empty() {
        return false;
    }
    let trimmed = domain.strip_suffix('.').unwrap_or(domain);
    if trimmed.is_empty() || trimmed.len() > 253 {
        return false;
    }
    trimmed.split('.').all(|label| !label.is_empty() && label.len() <= 63)
}

/// The [Bidi Rule](https://tools.ietf.org/html/rfc5893#section-2) (RFC 5893). Only
/// constrains anything when `is_bidi_domain` is set — i.e. some label in the domain
/// (not necessarily this one) is itself an RTL label.
fn passes_bidi(label: &str, is_bidi_domain: bool) -> bool {
    if !is_bidi_domain {
        return true;
    }
    let mut chars = label.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return true,
    };
    let first_class = bidi_class(first);
    let rtl = matches!(
        first_class,
        BidiClass::R | BidiClass::AL | BidiClass::AN
    );
    let ltr = first_class == BidiClass::L;
    if !rtl && !ltr {
        // Neither an RTL nor an LTR label; the rule does not constrain it further.
        return true;
    }

    let mut last_class = first_class;
    let mut saw_en = false;
    let mut saw_an = false;
    for c in chars.clone() {
        let class = bidi_class(c);
        last_class = class;
        match class {
            BidiClass::L if rtl => return false, // Rule 2: only R, AL, AN, EN, ES, CS, ET, ON, BN, NSM
            BidiClass::R | BidiClass::AL if ltr => return false, // Rule 5 counterpart
            BidiClass::EN => saw_en = true,
            BidiClass::AN => saw_an = true,
            _ => {}
        }
    }
    if rtl && saw_en && saw_an {
        return false; // Rule 4: cannot mix EN and AN in an RTL label
    }
    let trailing_ok = if rtl {
        matches!(
            last_class,
            BidiClass::R | BidiClass::AL | BidiClass::EN | BidiClass::AN | BidiClass::NSM
        )
    } else {
        matches!(last_class, BidiClass::L | BidiClass::EN | BidiClass::NSM)
    };
    trailing_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_ascii_roundtrips_pure_ascii() {
        let mut out = String::new();
        let errors = Config::default().to_ascii("example.com", &mut out);
        assert!(errors.is_empty());
        assert_eq!(out, "example.com");
    }

    #[test]
    fn to_ascii_encodes_unicode_label() {
        let mut out = String::new();
        let errors = Config::default().to_ascii("mañana.com", &mut out);
        assert!(errors.is_empty());
        assert_eq!(out, "xn--maana-pta.com");
    }

    #[test]
    fn to_unicode_decodes_ace_label() {
        let mut out = String::new();
        Config::default()
            .to_unicode("xn--maana-pta.com", &mut out)
            .unwrap();
        assert_eq!(out, "mañana.com");
    }

    #[test]
    fn hyphen_rule_rejects_reserved_ace_marker() {
        assert!(is_invalid_hyphen_placement("ab--cd"));
        assert!(!is_invalid_hyphen_placement("xn--ls8h"));
    }

    #[test]
    fn bidi_rejects_mixed_ltr_label_starting_rtl() {
        // Hebrew (RTL) label followed by a Latin letter is not allowed.
        assert!(!passes_bidi("\u{05D0}a", true));
    }

    #[test]
    fn bidi_allows_plain_ltr_label() {
        assert!(passes_bidi("example", true));
    }

    #[test]
    fn bidi_rule_does_not_apply_absent_an_rtl_label() {
        // "a-" would fail the RTL-domain trailing-character check, but since no label in
        // the domain is RTL the Bidi Rule never constrains it at all.
        assert!(passes_bidi("a-", false));
    }

    #[test]
    fn ltr_only_domain_with_trailing_hyphen_label_is_not_bidi_rejected() {
        let mut out = String::new();
        let errors = Config::default().to_ascii("café.a-.com", &mut out);
        assert!(errors.is_empty());
    }

    #[test]
    fn trailing_dot_fqdn_form_is_allowed() {
        let mut out = String::new();
        let errors = Config::default().to_ascii("example.com.", &mut out);
        assert!(errors.is_empty());
        assert_eq!(out, "example.com.");
    }

    #[test]
    fn internal_empty_label_is_always_rejected() {
        let mut out = String::new();
        let errors = Config::default().to_ascii("a..b", &mut out);
        assert!(!errors.is_empty());
    }
}
