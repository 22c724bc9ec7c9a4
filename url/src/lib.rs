// Copyright 2013-2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `url`, a library for parsing, normalizing, manipulating and serializing URLs in
//! conformance with the [WHATWG URL Living Standard](https://url.spec.whatwg.org/).
//!
//! ```rust
//! use url::Url;
//!
//! let url = Url::parse("https://example.org/some/path?x=1#frag")?;
//! assert_eq!(url.host_str().as_deref(), Some("example.org"));
//! assert_eq!(url.path(), "/some/path");
//! # Ok::<(), url::ParseError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod error;
mod host;
mod ipv4;
mod ipv6;
mod net_types;
mod origin;
mod parser;
mod path_segments;
mod scheme;
#[cfg(feature = "serde")]
mod serde_support;

use alloc::borrow::ToOwned;
use alloc::fmt;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

pub use crate::error::{ParseError, SyntaxViolation};
pub use crate::host::Host;
pub use crate::origin::{OpaqueOrigin, Origin};
pub use crate::path_segments::PathSegmentsMut;

/// The [path](https://url.spec.whatwg.org/#concept-url-path) of a URL record: either an
/// ordered sequence of already-encoded segments (§I5: the common case, for a URL that
/// can be a base), or a single opaque string (for `cannot_be_a_base` URLs like
/// `mailto:user@host`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Path {
    Segments(Vec<String>),
    Opaque(String),
}

/// A parsed URL, in conformance with the [WHATWG URL Standard's URL record](https://url.spec.whatwg.org/#concept-url).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Url {
    scheme: String,
    username: String,
    password: Option<String>,
    host: Option<Host<String>>,
    port: Option<u16>,
    path: Path,
    query: Option<String>,
    fragment: Option<String>,
    cannot_be_a_base: bool,
}

impl Url {
    /// Parses `input` as an absolute URL (no base).
    pub fn parse(input: &str) -> Result<Url, ParseError> {
        Url::options().parse(input)
    }

    /// Parses `input`, resolving it against `self` as a base URL if it is relative.
    pub fn join(&self, input: &str) -> Result<Url, ParseError> {
        Url::options().base_url(Some(self)).parse(input)
    }

    /// Starts building a [`ParseOptions`] to configure a parse (base URL, violation
    /// callback) before running it.
    pub fn options<'a>() -> ParseOptions<'a> {
        ParseOptions {
            base_url: None,
            syntax_violation_callback: None,
        }
    }

    /// The scheme, lowercase and without the trailing `:`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Whether [`Self::scheme`] is one of the special schemes.
    pub fn is_special(&self) -> bool {
        scheme::is_special(&self.scheme)
    }

    /// The username. Empty if there is none.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password, if any.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The host, as the tagged [`Host`] variant, if this URL has one.
    pub fn host(&self) -> Option<Host<&str>> {
        self.host.as_ref().map(Host::as_ref)
    }

    /// The host serialized as a string (IPv6 addresses between `[` and `]`), if any.
    pub fn host_str(&self) -> Option<String> {
        self.host.as_ref().map(ToString::to_string)
    }

    /// The `host[:port]` string (empty if there is no host).
    pub fn authority_host_port(&self) -> String {
        match &self.host {
            None => String::new(),
            Some(host) => match self.port {
                Some(port) => alloc::format!("{host}:{port}"),
                None => host.to_string(),
            },
        }
    }

    /// The port, if explicitly set (never the scheme's default — see invariant I3).
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The port if set, or the scheme's default port otherwise.
    pub fn port_or_default(&self) -> Option<u16> {
        self.port.or_else(|| scheme::default_port(&self.scheme))
    }

    /// Whether this URL [cannot be a base](https://url.spec.whatwg.org/#is-special) —
    /// e.g. `mailto:user@host`, `data:text/plain,hi`.
    pub fn cannot_be_a_base(&self) -> bool {
        self.cannot_be_a_base
    }

    /// The path: for a cannot-be-a-base URL, the single opaque string; otherwise every
    /// segment joined with `/`, which always starts with a leading `/` since a
    /// base-able URL always has at least one (possibly empty) segment.
    pub fn path(&self) -> String {
        match &self.path {
            Path::Opaque(s) => s.clone(),
            Path::Segments(segments) => {
                let mut out = String::new();
                for segment in segments {
                    out.push('/');
                    out.push_str(segment);
                }
                out
            }
        }
    }

    /// An iterator over the path's segments, if this URL can be a base.
    pub fn path_segments(&self) -> Option<impl Iterator<Item = &str>> {
        match &self.path {
            Path::Segments(segments) => Some(segments.iter().map(String::as_str)),
            Path::Opaque(_) => None,
        }
    }

    /// A guard for pushing/popping/clearing path segments in place, if this URL can be a
    /// base.
    pub fn path_segments_mut(&mut self) -> Option<PathSegmentsMut<'_>> {
        match &mut self.path {
            Path::Segments(segments) => Some(PathSegmentsMut::new(segments)),
            Path::Opaque(_) => None,
        }
    }

    /// The query string, not including the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The fragment, not including the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// `?query` including the leading `?`, or empty if there is no query.
    pub fn search(&self) -> String {
        match &self.query {
            Some(query) => alloc::format!("?{query}"),
            None => String::new(),
        }
    }

    /// `#fragment` including the leading `#`, or empty if there is no fragment.
    pub fn hash(&self) -> String {
        match &self.fragment {
            Some(fragment) => alloc::format!("#{fragment}"),
            None => String::new(),
        }
    }

    /// This URL's [origin](https://url.spec.whatwg.org/#origin).
    pub fn origin(&self) -> Origin {
        origin::url_origin(self)
    }

    /// Sets the scheme. Fails (leaving `self` unchanged) if `input` isn't a valid scheme,
    /// or if switching between special and non-special schemes.
    pub fn set_scheme(&mut self, scheme: &str) -> Result<(), ()> {
        let scheme = scheme.to_ascii_lowercase();
        if !crate::scheme::validate(&scheme) {
            return Err(());
        }
        if scheme::is_special(&self.scheme) != scheme::is_special(&scheme) {
            return Err(());
        }
        if scheme::is_file(&scheme) && (self.username_or_password_present() || self.port.is_some())
        {
            return Err(());
        }
        self.scheme = scheme;
        Ok(())
    }

    /// Sets the username. Fails if this URL [cannot have a username/password/port](
    /// https://url.spec.whatwg.org/#cannot-have-a-username-password-or-port) (I4).
    pub fn set_username(&mut self, username: &str) -> Result<(), ()> {
        if self.cannot_have_a_username_password_or_port() {
            return Err(());
        }
        self.username = percent_encoding::utf8_percent_encode(username, percent_encoding::USERINFO)
            .collect();
        Ok(())
    }

    /// Sets the password. Fails under the same rule as [`Self::set_username`].
    pub fn set_password(&mut self, password: Option<&str>) -> Result<(), ()> {
        if self.cannot_have_a_username_password_or_port() {
            return Err(());
        }
        self.password = password
            .map(|p| percent_encoding::utf8_percent_encode(p, percent_encoding::USERINFO).collect());
        Ok(())
    }

    /// Sets the host (and clears the port if `host` is `None`, per the standard).
    pub fn set_host(&mut self, host: Option<&str>) -> Result<(), ParseError> {
        match host {
            None => {
                if self.is_special() && !scheme::is_file(&self.scheme) {
                    return Err(ParseError::EmptyHost);
                }
                self.host = None;
            }
            Some(s) => {
                let parsed = crate::host::parse_host(s, self.is_special(), |_| {})?;
                self.host = Some(parsed);
            }
        }
        Ok(())
    }

    /// Sets the port. `None` clears it back to "use the scheme's default".
    pub fn set_port(&mut self, port: Option<u16>) -> Result<(), ()> {
        if self.cannot_have_a_username_password_or_port() {
            return Err(());
        }
        self.port = port.filter(|p| Some(*p) != scheme::default_port(&self.scheme));
        Ok(())
    }

    /// Sets the path from an unencoded pathname (leading `/` optional; it is normalized
    /// in).
    pub fn set_path(&mut self, path: &str) {
        self.path = parser::parse_path_from_setter(path, self.is_special(), self.cannot_be_a_base);
    }

    /// Sets the query. `None` removes it.
    pub fn set_query(&mut self, query: Option<&str>) {
        self.query = query.map(|q| parser::encode_query(q, self.is_special()));
    }

    /// Sets the fragment. `None` removes it.
    pub fn set_fragment(&mut self, fragment: Option<&str>) {
        self.fragment = fragment.map(parser::encode_fragment);
    }

    fn username_or_password_present(&self) -> bool {
        !self.username.is_empty() || self.password.is_some()
    }

    /// <https://url.spec.whatwg.org/#cannot-have-a-username-password-or-port>
    fn cannot_have_a_username_password_or_port(&self) -> bool {
        self.host.is_none()
            || matches!(self.host, Some(Host::Domain(ref d)) if d.is_empty())
            || matches!(self.host, Some(Host::Opaque(ref d)) if d.is_empty())
            || scheme::is_file(&self.scheme)
            || self.cannot_be_a_base
    }

    /// Returns a copy with the username, password, and fragment removed — the
    /// [sanitization](https://url.spec.whatwg.org/#url-sanitization) a consumer should
    /// apply before showing a URL it didn't construct itself to a user.
    pub fn sanitize(&self) -> Url {
        let mut copy = self.clone();
        copy.username.clear();
        copy.password = None;
        copy.fragment = None;
        copy
    }

    /// A copy with the query removed.
    pub fn without_query(&self) -> Url {
        let mut copy = self.clone();
        copy.query = None;
        copy
    }

    /// A copy with the fragment removed.
    pub fn without_fragment(&self) -> Url {
        let mut copy = self.clone();
        copy.fragment = None;
        copy
    }

    /// The canonical serialization (§4.K), with the fragment included.
    fn serialization(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.scheme);
        out.push(':');

        let authority_present = self.host.is_some() || scheme::is_file(&self.scheme);
        if authority_present {
            out.push_str("//");
            if self.host.is_some() && self.username_or_password_present() {
                out.push_str(&self.username);
                if let Some(password) = &self.password {
                    out.push(':');
                    out.push_str(password);
                }
                out.push('@');
            }
            if let Some(host) = &self.host {
                out.push_str(&host.to_string());
            }
            if let Some(port) = self.port {
                out.push(':');
                out.push_str(&port.to_string());
            }
        }

        match &self.path {
            Path::Opaque(s) => out.push_str(s),
            Path::Segments(segments) => {
                if segments.is_empty() && authority_present {
                    // A base URL with a host and zero segments still serializes as `/`.
                }
                for segment in segments {
                    out.push('/');
                    out.push_str(segment);
                }
            }
        }

        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }

    /// The canonical serialization, without the fragment.
    pub fn as_str_without_fragment(&self) -> String {
        self.without_fragment().serialization()
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialization())
    }
}

impl core::str::FromStr for Url {
    type Err = ParseError;
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Url::parse(input)
    }
}

/// A configured parse: an optional base URL and an optional [`SyntaxViolation`] callback,
/// per [`Url::options`]. This is spec.md §4.J's "base URL" parameter and
/// "validation-error channel" made concrete and chainable.
pub struct ParseOptions<'a> {
    base_url: Option<&'a Url>,
    syntax_violation_callback: Option<&'a dyn Fn(SyntaxViolation)>,
}

impl<'a> ParseOptions<'a> {
    /// Sets the base URL relative input is resolved against.
    pub fn base_url(mut self, base: Option<&'a Url>) -> Self {
        self.base_url = base;
        self
    }

    /// Sets a callback invoked for every non-fatal [`SyntaxViolation`] encountered.
    pub fn syntax_violation_callback(mut self, callback: Option<&'a dyn Fn(SyntaxViolation)>) -> Self {
        self.syntax_violation_callback = callback;
        self
    }

    /// Runs the basic URL parser (§4.J) with this configuration.
    pub fn parse(self, input: &str) -> Result<Url, ParseError> {
        parser::parse_url(input, self.base_url, self.syntax_violation_callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_http_url() {
        let url = Url::parse("http://example.org/path?q=1#f").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_str().as_deref(), Some("example.org"));
        assert_eq!(url.query(), Some("q=1"));
        assert_eq!(url.fragment(), Some("f"));
    }

    #[test]
    fn default_port_is_omitted_from_serialization() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(url.port(), None);
        assert_eq!(url.to_string(), "https://example.com/");
    }

    #[test]
    fn non_default_port_is_kept() {
        let url = Url::parse("https://example.com:8443/").unwrap();
        assert_eq!(url.port(), Some(8443));
    }

    #[test]
    fn cannot_be_a_base_mailto() {
        let url = Url::parse("mailto:user@host").unwrap();
        assert!(url.cannot_be_a_base());
        assert_eq!(url.path(), "user@host");
    }

    #[test]
    fn join_resolves_relative_reference() {
        let base = Url::parse("https://example.org/a/b").unwrap();
        let joined = base.join("../c").unwrap();
        assert_eq!(joined.to_string(), "https://example.org/c");
    }

    #[test]
    fn set_scheme_rejects_special_to_non_special() {
        let mut url = Url::parse("http://example.org/").unwrap();
        assert!(url.set_scheme("mailto").is_err());
        assert!(url.set_scheme("https").is_ok());
    }

    #[test]
    fn empty_opaque_host_also_cannot_have_username_password_or_port() {
        let mut url = Url::parse("non-special://host.example/path").unwrap();
        url.set_host(Some("")).unwrap();
        assert!(url.set_username("alice").is_err());
        assert!(url.set_password(Some("hunter2")).is_err());
        assert!(url.set_port(Some(1234)).is_err());
    }
}
