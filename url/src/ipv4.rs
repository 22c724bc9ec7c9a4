// Copyright 2013-2016 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The [IPv4 parser](https://url.spec.whatwg.org/#concept-ipv4-parser) and serializer.

use alloc::{fmt, string::String};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ipv4Error {
    TooManySegments,
    EmptySegment,
    InvalidSegmentNumber,
    Overflow,
}

impl fmt::Display for Ipv4Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Ipv4Error::TooManySegments => "more than 4 segments",
            Ipv4Error::EmptySegment => "empty segment",
            Ipv4Error::InvalidSegmentNumber => "segment is not a number in its inferred radix",
            Ipv4Error::Overflow => "segment value out of range",
        })
    }
}

/// Parses `input` (with no surrounding brackets or scheme) as an IPv4 address per the
/// standard's "ends in a number" + radix-inferring algorithm, returning the address as a
/// big-endian `u32`.
pub(crate) fn parse_ipv4(input: &str) -> Result<u32, Ipv4Error> {
    let mut parts: alloc::vec::Vec<&str> = input.split('.').collect();
    if parts.last() == Some(&"") && parts.len() > 1 {
        parts.pop();
    }
    if parts.len() > 4 {
        return Err(Ipv4Error::TooManySegments);
    }

    let mut numbers = [0u32; 4];
    let last = parts.len() - 1;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            return Err(Ipv4Error::EmptySegment);
        }
        let n = parse_ipv4_number(part)?;
        if i != last && n > 255 {
            return Err(Ipv4Error::Overflow);
        }
        numbers[i] = n;
    }

    // The terminal part fills however many bytes remain; non-terminal parts occupy
    // exactly one byte each. For `129.79.245` (3 parts) this yields 129.79.0.245, not
    // 129.79.245.0 — see DESIGN.md's Open Question (a).
    let terminal_max = match last {
        0 => u32::MAX,
        1 => 0x00FF_FFFF,
        2 => 0x0000_FFFF,
        _ => 0x0000_00FF,
    };
    if numbers[last] > terminal_max {
        return Err(Ipv4Error::Overflow);
    }

    let mut address = numbers[last];
    let shift_for = |i: usize| -> u32 { 8 * (last - i) as u32 };
    for i in 0..last {
        address += numbers[i] << shift_for(i);
    }
    Ok(address)
}

/// A strict decimal-only parse, used for the embedded dotted-quad tail of an IPv6
/// address, which the standard requires to be base-10 with no radix inference.
pub(crate) fn parse_ipv4_number_strict(part: &str) -> Result<u32, Ipv4Error> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Ipv4Error::InvalidSegmentNumber);
    }
    part.parse().map_err(|_| Ipv4Error::Overflow)
}

fn parse_ipv4_number(part: &str) -> Result<u32, Ipv4Error> {
    let (digits, radix) = if let Some(rest) = part.strip_prefix("0x").or_else(|| part.strip_prefix("0X")) {
        (rest, 16)
    } else if part.len() > 1 && part.starts_with('0') {
        (&part[1..], 8)
    } else {
        (part, 10)
    };
    if digits.is_empty() {
        return Ok(0);
    }
    u32::from_str_radix(digits, radix).map_err(|_| Ipv4Error::InvalidSegmentNumber)
}

/// [Serialize an IPv4 address](https://url.spec.whatwg.org/#concept-ipv4-serializer) as
/// four dot-separated decimal octets.
pub(crate) fn serialize_ipv4(address: u32) -> String {
    let bytes = address.to_be_bytes();
    let mut out = String::with_capacity(15);
    for (i, byte) in bytes.iter().enumerate() {
        if i != 0 {
            out.push('.');
        }
        write_u8_decimal(&mut out, *byte);
    }
    out
}

fn write_u8_decimal(out: &mut String, mut n: u8) {
    if n >= 100 {
        out.push((b'0' + n / 100) as char);
        n %= 100;
        out.push((b'0' + n / 10) as char);
        n %= 10;
    } else if n >= 10 {
        out.push((b'0' + n / 10) as char);
        n %= 10;
    }
    out.push((b'0' + n) as char);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_dotted_quad() {
        assert_eq!(parse_ipv4("127.0.0.1"), Ok(0x7F000001));
    }

    #[test]
    fn hex_and_octal_segments() {
        assert_eq!(parse_ipv4("0x7f.0.0.0x7f"), Ok(0x7F000000 | 0x7F));
        assert_eq!(parse_ipv4("0177.0.0.1"), Ok(0x7F000001));
    }

    #[test]
    fn three_part_fills_remainder_per_standard() {
        // 129.79.245 -> 129.79.0.245, not 129.79.245.0.
        assert_eq!(parse_ipv4("129.79.245"), Ok(0x814F00F5));
    }

    #[test]
    fn single_number_whole_address() {
        assert_eq!(parse_ipv4("2130706433"), Ok(0x7F000001));
    }

    #[test]
    fn too_many_segments_is_an_error() {
        assert_eq!(parse_ipv4("1.2.3.4.5"), Err(Ipv4Error::TooManySegments));
    }

    #[test]
    fn non_terminal_overflow_is_an_error() {
        assert_eq!(parse_ipv4("256.0.0.1"), Err(Ipv4Error::Overflow));
    }

    #[test]
    fn terminal_overflow_by_one_is_an_error() {
        // 4 parts, terminal max is 255; 256 overflows by exactly one.
        assert_eq!(parse_ipv4("0.0.0.256"), Err(Ipv4Error::Overflow));
    }

    #[test]
    fn serialize_round_trips() {
        assert_eq!(serialize_ipv4(0x7F000001), "127.0.0.1");
        assert_eq!(serialize_ipv4(0), "0.0.0.0");
        assert_eq!(serialize_ipv4(u32::MAX), "255.255.255.255");
    }
}
