// Copyright 2013-2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use alloc::fmt;

/// A fatal error from the basic URL parser. Recoverable deviations from the standard are
/// reported through [`crate::SyntaxViolation`] instead and never appear here.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// A character was found where only an ASCII letter could start a scheme, or an
    /// invalid character was found in the remainder of a scheme, and no state override
    /// was active to allow returning a partial result instead.
    InvalidSchemeCharacter,
    /// An input with no scheme wasn't prefixed with `#` and either no base URL or a
    /// cannot-be-a-base base URL was provided.
    NotAnAbsoluteUrlWithFragment,
    /// A special-scheme URL had an empty host.
    EmptyHost,
    /// A host was forced to parse as IPv4 (because it "ends in a number") but failed.
    InvalidIpv4Address,
    /// A bracketed host failed to parse as IPv6.
    InvalidIpv6Address,
    /// An opaque (non-special) host contained a forbidden host code point.
    ForbiddenHostCodePoint,
    /// Percent-decoding a host produced a byte sequence that is not valid UTF-8.
    CannotDecodeHostCodePoint,
    /// [`idna`] rejected the domain (STD3 rules, length limit, bidi rule, or an
    /// unresolvable Punycode label).
    DomainError,
    /// A state override tried to make a URL cannot-be-a-base, which isn't legal for the
    /// affected property.
    CannotBeABase,
    /// A setter tried to set a username, password, or port on a URL that has no host, has
    /// an empty host, has the `file` scheme, or cannot be a base.
    CannotHaveAUsernamePasswordOrPort,
    /// The port digits didn't fit in 16 bits.
    InvalidPort,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseError::InvalidSchemeCharacter => "invalid character in scheme",
            ParseError::NotAnAbsoluteUrlWithFragment => {
                "relative URL without a base, and without a leading '#'"
            }
            ParseError::EmptyHost => "empty host for a special scheme",
            ParseError::InvalidIpv4Address => "invalid IPv4 address",
            ParseError::InvalidIpv6Address => "invalid IPv6 address",
            ParseError::ForbiddenHostCodePoint => "forbidden character in host",
            ParseError::CannotDecodeHostCodePoint => "host is not valid UTF-8 once decoded",
            ParseError::DomainError => "invalid international domain name",
            ParseError::CannotBeABase => "URL cannot be a base",
            ParseError::CannotHaveAUsernamePasswordOrPort => {
                "URL cannot have a username, password, or port"
            }
            ParseError::InvalidPort => "invalid port number",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// A non-fatal deviation from the strict grammar of the URL Standard, observed during
/// parsing. Accumulating these never stops a parse; they exist purely for diagnostics
/// (see [`crate::ParseOptions::syntax_violation_callback`]).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyntaxViolation {
    Backslash,
    C0SpaceIgnored,
    EmbeddedCredentials,
    ExpectedDoubleSlash,
    ExpectedFileDoubleSlash,
    FileWithHostAndWindowsDrive,
    NonUrlCodePoint,
    NullInFragment,
    PercentDecode,
    TabOrNewlineIgnored,
    UnknownScheme,
}

impl SyntaxViolation {
    pub fn description(&self) -> &'static str {
        match self {
            SyntaxViolation::Backslash => "backslash",
            SyntaxViolation::C0SpaceIgnored => "leading or trailing control or space character are ignored in URLs",
            SyntaxViolation::EmbeddedCredentials => {
                "embedding authentication information (username or password) in an URL is not recommended"
            }
            SyntaxViolation::ExpectedDoubleSlash => "expected //",
            SyntaxViolation::ExpectedFileDoubleSlash => "expected file doubleslash",
            SyntaxViolation::FileWithHostAndWindowsDrive => "file: with host and Windows drive letter",
            SyntaxViolation::NonUrlCodePoint => "non-URL code point",
            SyntaxViolation::NullInFragment => "NULL characters are ignored in URL fragment identifiers",
            SyntaxViolation::PercentDecode => "expected 2 hex digits after %",
            SyntaxViolation::TabOrNewlineIgnored => "tabs or newlines are ignored in URLs",
            SyntaxViolation::UnknownScheme => "unknown scheme",
        }
    }
}

impl fmt::Display for SyntaxViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
