// Copyright 2013-2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The [host parser](https://url.spec.whatwg.org/#host-parsing) and the polymorphic
//! [`Host`] value it produces.

use crate::error::{ParseError, SyntaxViolation};
use crate::ipv4::parse_ipv4;
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use crate::net_types::{Ipv4Addr, Ipv6Addr};
use alloc::borrow::ToOwned;
use alloc::fmt;
use alloc::string::String;
use percent_encoding::percent_decode_str;

/// A parsed host, generic over its string storage so [`Host<&str>`] can be handed back
/// from a borrowing getter while [`Host<String>`] is what [`crate::Url`] stores.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Host<S = String> {
    /// A DNS domain, already [`idna`]-processed: lowercase ASCII, Punycode-encoded labels.
    Domain(S),
    /// An IPv4 address.
    Ipv4(Ipv4Addr),
    /// An IPv6 address.
    Ipv6(Ipv6Addr),
    /// Anything else: an opaque, percent-encoded ASCII string (e.g. the `host` of
    /// `non-special:host`).
    Opaque(S),
}

impl<S: AsRef<str>> fmt::Display for Host<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Domain(s) => f.write_str(s.as_ref()),
            Host::Opaque(s) => f.write_str(s.as_ref()),
            Host::Ipv4(addr) => write!(f, "{}", crate::ipv4::serialize_ipv4(u32::from(*addr))),
            Host::Ipv6(addr) => write!(f, "[{}]", serialize_ipv6(addr.segments())),
        }
    }
}

impl<'a> From<Host<&'a str>> for Host<String> {
    fn from(host: Host<&'a str>) -> Self {
        match host {
            Host::Domain(s) => Host::Domain(s.to_owned()),
            Host::Opaque(s) => Host::Opaque(s.to_owned()),
            Host::Ipv4(a) => Host::Ipv4(a),
            Host::Ipv6(a) => Host::Ipv6(a),
        }
    }
}

impl Host<String> {
    pub(crate) fn as_ref(&self) -> Host<&str> {
        match self {
            Host::Domain(s) => Host::Domain(s.as_str()),
            Host::Opaque(s) => Host::Opaque(s.as_str()),
            Host::Ipv4(a) => Host::Ipv4(*a),
            Host::Ipv6(a) => Host::Ipv6(*a),
        }
    }
}

/// The forbidden-host-code-point set of an opaque (non-special) host: these bytes are
/// always an error even outside strict percent-decoding.
fn is_forbidden_host_code_point(byte: u8) -> bool {
    matches!(
        byte,
        0x00 | 0x09 | 0x0A | 0x0D | b' ' | b'#' | b'/' | b':' | b'<' | b'>' | b'?' | b'@'
            | b'[' | b'\\' | b']' | b'^' | b'|'
    )
}

/// The stricter set applied to domain hosts (adds `%`, since a domain host is percent-
/// decoded before IDNA processing and a bare `%` not starting a valid escape is an error).
fn is_forbidden_domain_code_point(byte: u8) -> bool {
    is_forbidden_host_code_point(byte) || byte == b'%'
}

/// [`§4.H` parse_host](https://url.spec.whatwg.org/#concept-host-parser): dispatches on
/// a bracketed literal, an opaque non-special host, or a domain that might "end in a
/// number" and thus be re-parsed as IPv4.
pub(crate) fn parse_host(
    input: &str,
    is_special: bool,
    mut on_violation: impl FnMut(SyntaxViolation),
) -> Result<Host<String>, ParseError> {
    if let Some(inner) = input.strip_prefix('[') {
        let inner = inner
            .strip_suffix(']')
            .ok_or(ParseError::InvalidIpv6Address)?;
        let pieces = parse_ipv6(inner).map_err(|_| ParseError::InvalidIpv6Address)?;
        return Ok(Host::Ipv6(Ipv6Addr::from(pieces)));
    }

    if !is_special {
        return parse_opaque_host(input).map(Host::Opaque);
    }

    if input.is_empty() {
        return Err(ParseError::EmptyHost);
    }

    for byte in input.bytes() {
        if is_forbidden_domain_code_point(byte) {
            return Err(ParseError::ForbiddenHostCodePoint);
        }
    }

    let decoded = percent_decode_str(input)
        .decode_utf8()
        .map_err(|_| ParseError::CannotDecodeHostCodePoint)?;
    let domain = idna::domain_to_ascii(&decoded).map_err(|_| ParseError::DomainError)?;

    if domain.is_empty() {
        return Err(ParseError::EmptyHost);
    }

    if ends_in_a_number(&domain) {
        let address = parse_ipv4(&domain).map_err(|_| ParseError::InvalidIpv4Address)?;
        on_violation(SyntaxViolation::NonUrlCodePoint);
        return Ok(Host::Ipv4(Ipv4Addr::from(address)));
    }

    Ok(Host::Domain(domain))
}

fn parse_opaque_host(input: &str) -> Result<String, ParseError> {
    for byte in input.bytes() {
        if is_forbidden_host_code_point(byte) {
            return Err(ParseError::ForbiddenHostCodePoint);
        }
    }
    percent_encoding::percent_decode_strict(input.as_bytes())
        .map_err(|_| ParseError::ForbiddenHostCodePoint)?;
    let mut out = String::with_capacity(input.len());
    for chunk in percent_encoding::utf8_percent_encode(input, percent_encoding::CONTROLS) {
        out.push_str(chunk);
    }
    Ok(out)
}

/// [Ends in a number](https://url.spec.whatwg.org/#ends-in-a-number-checker): the last
/// (possibly empty, if the domain ends in `.`) label parses as a number.
fn ends_in_a_number(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let last = match domain.rsplit('.').next() {
        Some(l) if !l.is_empty() => l,
        _ => return false,
    };
    if last.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }
    if let Some(rest) = last.strip_prefix("0x").or_else(|| last.strip_prefix("0X")) {
        return rest.is_empty() || rest.bytes().all(|b| b.is_ascii_hexdigit());
    }
    false
}

/// The host's serialization without the `[...]` brackets IPv6 gets as part of an
/// authority string — used by the façade's `hostname()` getter.
pub(crate) fn serialize_host_no_brackets(host: &Host<String>) -> String {
    match host {
        Host::Domain(s) | Host::Opaque(s) => s.clone(),
        Host::Ipv4(a) => crate::ipv4::serialize_ipv4(u32::from(*a)),
        Host::Ipv6(a) => serialize_ipv6(a.segments()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: SyntaxViolation) {}

    #[test]
    fn plain_domain() {
        let host = parse_host("example.com", true, noop).unwrap();
        assert_eq!(host, Host::Domain("example.com".to_owned()));
    }

    #[test]
    fn domain_ending_in_hex_number_becomes_ipv4() {
        let host = parse_host("0x7f.0.0.0x7f", true, noop).unwrap();
        assert_eq!(host, Host::Ipv4(Ipv4Addr::new(127, 0, 0, 127)));
    }

    #[test]
    fn bracketed_ipv6() {
        let host = parse_host("[::1]", true, noop).unwrap();
        assert_eq!(host, Host::Ipv6(Ipv6Addr::LOCALHOST));
    }

    #[test]
    fn opaque_host_rejects_forbidden_code_point() {
        assert_eq!(
            parse_host("exa mple", false, noop),
            Err(ParseError::ForbiddenHostCodePoint)
        );
    }

    #[test]
    fn opaque_host_rejects_malformed_percent_escape() {
        assert_eq!(
            parse_host("host%zz", false, noop),
            Err(ParseError::ForbiddenHostCodePoint)
        );
    }

    #[test]
    fn empty_host_on_special_scheme_is_an_error() {
        assert_eq!(parse_host("", true, noop), Err(ParseError::EmptyHost));
    }

    #[test]
    fn idna_domain_is_punycoded() {
        let host = parse_host("xn--bih.ws", true, noop).unwrap();
        assert_eq!(host, Host::Domain("xn--bih.ws".to_owned()));
        let host = parse_host("\u{2318}.ws", true, noop).unwrap();
        assert_eq!(host, Host::Domain("xn--bih.ws".to_owned()));
    }
}
