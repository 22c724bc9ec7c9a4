// Copyright 2013-2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Implementation of [Unicode Technical Standard #46: Unicode IDNA Compatibility
//! Processing](https://www.unicode.org/reports/tr46/), as referenced by the
//! [WHATWG URL Standard](https://url.spec.whatwg.org/#idna).
//!
//! Percent-encoded bytes are not decoded before being passed to this crate; the `url`
//! crate is responsible for that.
//!
//! ```rust
//! assert_eq!(idna::domain_to_ascii("example.com"), Ok("example.com".into()));
//! assert_eq!(idna::domain_to_ascii("üñîçødé.com"), Ok("xn--7ca8a8b0b1bfkm.com".into()));
//! ```

#![no_std]
#![forbid(unsafe_code)]

#[cfg(any(feature = "alloc", feature = "std", test))]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

mod mapping_table;
pub mod punycode;
mod uts46;

#[cfg(any(feature = "alloc", feature = "std"))]
use alloc::{borrow::Cow, string::String};

pub use crate::uts46::{Config, Errors};

/// The [domain to ASCII](https://url.spec.whatwg.org/#concept-domain-to-ascii) algorithm,
/// with the strict flag unset, returning a `Cow<str>` to avoid allocating when the input
/// was already pure ASCII.
#[cfg(any(feature = "alloc", feature = "std"))]
pub fn domain_to_ascii_cow(domain: &str, config: Config) -> Result<Cow<'_, str>, Errors> {
    let mut result = String::with_capacity(domain.len());
    let errors = config.to_ascii(domain, &mut result);
    if !errors.is_empty() {
        return Err(errors);
    }
    if domain.is_ascii() && result == domain {
        Ok(Cow::Borrowed(domain))
    } else {
        Ok(Cow::Owned(result))
    }
}

/// The [domain to ASCII](https://url.spec.whatwg.org/#concept-domain-to-ascii) algorithm,
/// with the strict flag unset.
#[cfg(any(feature = "alloc", feature = "std"))]
pub fn domain_to_ascii(domain: &str) -> Result<String, Errors> {
    domain_to_ascii_cow(domain, Config::default()).map(|cow| cow.into_owned())
}

/// The [domain to ASCII](https://url.spec.whatwg.org/#concept-domain-to-ascii) algorithm,
/// with the strict flag set.
#[cfg(any(feature = "alloc", feature = "std"))]
pub fn domain_to_ascii_strict(domain: &str) -> Result<String, Errors> {
    domain_to_ascii_cow(
        domain,
        Config::default()
            .use_std3_ascii_rules(true)
            .verify_dns_length(true)
            .check_hyphens(true),
    )
    .map(|cow| cow.into_owned())
}

/// The [domain to Unicode](https://url.spec.whatwg.org/#concept-domain-to-unicode) algorithm,
/// returning a `Cow<str>` to avoid allocating when the input was already pure ASCII and
/// required no further normalization.
#[cfg(any(feature = "alloc", feature = "std"))]
pub fn domain_to_unicode_cow(domain: &str, config: Config) -> (Cow<'_, str>, Result<(), Errors>) {
    let mut result = String::with_capacity(domain.len());
    let errors = config.to_unicode(domain, &mut result);
    if domain.is_ascii() && result == domain {
        (Cow::Borrowed(domain), errors)
    } else {
        (Cow::Owned(result), errors)
    }
}

/// The [domain to Unicode](https://url.spec.whatwg.org/#concept-domain-to-unicode) algorithm.
#[cfg(any(feature = "alloc", feature = "std"))]
pub fn domain_to_unicode(domain: &str) -> (String, Result<(), Errors>) {
    let (cow, result) = domain_to_unicode_cow(domain, Config::default());
    (cow.into_owned(), result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_only_passthrough() {
        assert_eq!(domain_to_ascii("example.com"), Ok("example.com".into()));
    }

    #[test]
    fn unicode_label_punycode_round_trips() {
        let ascii = domain_to_ascii("mañana.com").unwrap();
        assert_eq!(ascii, "xn--maana-pta.com");
        let (unicode, result) = domain_to_unicode(&ascii);
        assert!(result.is_ok());
        assert_eq!(unicode, "mañana.com");
    }

    #[test]
    fn rejects_empty_label_by_default() {
        assert!(domain_to_ascii("a..b").is_err());
    }
}
