// Copyright 2013-2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A small data-driven suite in the same `{input, base, href}` shape as the real
//! `rust-url` test suite's `urltestdata.json`, run against a local fixture instead of the
//! full upstream file.

use serde::Deserialize;
use url::Url;

#[derive(Deserialize)]
struct Case {
    input: String,
    base: Option<String>,
    href: String,
}

#[test]
fn fixture_cases_parse_to_the_expected_href() {
    let json = include_str!("fixtures/urltestdata.json");
    let cases: Vec<Case> = serde_json::from_str(json).expect("fixture is valid JSON");
    assert!(!cases.is_empty());

    for case in cases {
        let result = match &case.base {
            Some(base) => {
                let base = Url::parse(base)
                    .unwrap_or_else(|e| panic!("base {:?} failed to parse: {e}", case.base));
                base.join(&case.input)
            }
            None => Url::parse(&case.input),
        };
        let url = result.unwrap_or_else(|e| {
            panic!(
                "input {:?} (base {:?}) failed to parse: {e}",
                case.input, case.base
            )
        });
        assert_eq!(
            url.to_string(),
            case.href,
            "input {:?} (base {:?})",
            case.input,
            case.base
        );
    }
}
