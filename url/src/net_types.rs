// Copyright 2013-2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Re-exports `Ipv4Addr`/`Ipv6Addr` from `std` when available, or from the `no-std-net`
//! crate under the `no_std_net` feature, so [`crate::host::Host`] doesn't need a `core::net`
//! MSRV higher than this crate's own.

#[cfg(feature = "std")]
pub(crate) use std::net::{Ipv4Addr, Ipv6Addr};

#[cfg(all(not(feature = "std"), feature = "no_std_net"))]
pub(crate) use no_std_net::{Ipv4Addr, Ipv6Addr};
