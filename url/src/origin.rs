// Copyright 2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [Origin](https://url.spec.whatwg.org/#origin) computation: `Url::origin()` and its
//! `(scheme, host, port)` tuple or opaque result.

use crate::host::Host;
use crate::Url;
use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use core::sync::atomic::{AtomicUsize, Ordering};

/// <https://url.spec.whatwg.org/#concept-url-origin>
pub(crate) fn url_origin(url: &Url) -> Origin {
    match url.scheme() {
        "ftp" | "http" | "https" | "ws" | "wss" => Origin::Tuple(
            url.scheme().to_owned(),
            url.host().unwrap().into(),
            url.port(),
        ),
        // file: is left as an implementation-defined choice by the standard; an opaque
        // origin is always a conforming answer.
        _ => Origin::new_opaque(),
    }
}

/// The [origin](https://url.spec.whatwg.org/#origin) of a URL.
///
/// Two URLs with the same origin are considered to originate from the same entity.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Origin {
    /// A globally unique identifier, equal only to itself.
    Opaque(OpaqueOrigin),
    /// The URL's scheme, host, and port.
    Tuple(String, Host<String>, Option<u16>),
}

impl Origin {
    /// Creates a new opaque origin, distinct from every other opaque origin ever created
    /// in this process (including earlier ones with the same debug representation).
    pub fn new_opaque() -> Origin {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Origin::Opaque(OpaqueOrigin(COUNTER.fetch_add(1, Ordering::SeqCst)))
    }

    /// Whether this is a `(scheme, host, port)` tuple origin, as opposed to opaque.
    pub fn is_tuple(&self) -> bool {
        matches!(self, Origin::Tuple(..))
    }

    /// <https://html.spec.whatwg.org/multipage/#ascii-serialisation-of-an-origin>
    pub fn ascii_serialization(&self) -> String {
        match self {
            Origin::Opaque(_) => "null".into(),
            Origin::Tuple(scheme, host, Some(port)) => format!("{scheme}://{host}:{port}"),
            Origin::Tuple(scheme, host, None) => format!("{scheme}://{host}"),
        }
    }

    /// <https://html.spec.whatwg.org/multipage/#unicode-serialisation-of-an-origin>
    pub fn unicode_serialization(&self) -> String {
        match self {
            Origin::Opaque(_) => "null".into(),
            Origin::Tuple(scheme, host, port) => {
                let host = match host {
                    Host::Domain(domain) => {
                        let (domain, _errors) = idna::domain_to_unicode(domain);
                        Host::Domain(domain)
                    }
                    other => other.clone(),
                };
                match port {
                    Some(port) => format!("{scheme}://{host}:{port}"),
                    None => format!("{scheme}://{host}"),
                }
            }
        }
    }
}

/// Opaque identifier for a non-tuple origin.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct OpaqueOrigin(usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_new_opaque_origins_are_distinct() {
        assert_ne!(Origin::new_opaque(), Origin::new_opaque());
    }

    #[test]
    fn opaque_serializes_to_null() {
        assert_eq!(Origin::new_opaque().ascii_serialization(), "null");
    }

    #[test]
    fn default_port_url_origin_omits_the_port() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(url.origin().ascii_serialization(), "https://example.com");
    }

    #[test]
    fn tuple_serialization_omits_default_looking_port_only_if_none() {
        let origin = Origin::Tuple(
            "https".into(),
            Host::Domain("example.com".into()),
            Some(8443),
        );
        assert_eq!(origin.ascii_serialization(), "https://example.com:8443");
    }
}
