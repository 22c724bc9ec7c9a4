// Copyright 2013 The rust-url developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Punycode ([RFC 3492](https://tools.ietf.org/html/rfc3492)) implementation, operating on
//! one domain label at a time.
//!
//! Since Punycode fundamentally works on Unicode code points, [`decode`] and [`encode`]
//! take and return iterators/slices of `char`. [`decode_to_string`] and [`encode_str`] are
//! convenience wrappers for Rust's UTF-8 based `str` and `String`. Neither direction adds
//! or strips the `xn--` ACE prefix; that is the caller's responsibility (see
//! [`crate::uts46`]).

use alloc::{string::String, vec::Vec};
use core::char;
use core::fmt::Write;

// Bootstring parameters for Punycode, from RFC 3492 section 5.
const BASE: u32 = 36;
const T_MIN: u32 = 1;
const T_MAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 0x80;

#[inline]
fn adapt(mut delta: u32, num_points: u32, first_time: bool) -> u32 {
    delta /= if first_time { DAMP } else { 2 };
    delta += delta / num_points;
    let mut k = 0;
    while delta > ((BASE - T_MIN) * T_MAX) / 2 {
        delta /= BASE - T_MIN;
        k += BASE;
    }
    k + (((BASE - T_MIN + 1) * delta) / (delta + SKEW))
}

/// Convert Punycode to a Unicode `String`.
///
/// Returns `None` on malformed input or overflow. Overflow can only happen on inputs that
/// take more than 63 encoded bytes, the DNS limit on domain name labels.
#[inline]
pub fn decode_to_string(input: &str) -> Option<String> {
    Some(Decoder::default().decode(input.as_bytes()).ok()?.collect())
}

/// Convert Punycode to Unicode code points.
///
/// Returns `None` on malformed input or overflow.
pub fn decode(input: &str) -> Option<Vec<char>> {
    Some(Decoder::default().decode(input.as_bytes()).ok()?.collect())
}

pub(crate) trait PunycodeCodeUnit {
    fn is_delimiter(&self) -> bool;
    fn is_ascii(&self) -> bool;
    fn digit(&self) -> Option<u32>;
    fn char(&self) -> char;
}

impl PunycodeCodeUnit for u8 {
    fn is_delimiter(&self) -> bool {
        *self == b'-'
    }
    fn is_ascii(&self) -> bool {
        *self < 0x80
    }
    fn digit(&self) -> Option<u32> {
        Some(match *self {
            byte @ b'0'..=b'9' => byte - b'0' + 26,
            byte @ b'A'..=b'Z' => byte - b'A',
            byte @ b'a'..=b'z' => byte - b'a',
            _ => return None,
        } as u32)
    }
    fn char(&self) -> char {
        char::from(self.to_ascii_lowercase())
    }
}

/// Decodes a single label's encoded-delta sequence, using the insertion-point algorithm
/// of RFC 3492 section 6.3. The `insertions` buffer is reused across labels of a domain
/// to avoid repeated allocation; most labels need only a handful of insertions.
#[derive(Default)]
pub(crate) struct Decoder {
    insertions: smallvec::SmallVec<[(usize, char); 59]>,
}

impl Decoder {
    pub(crate) fn decode<'a>(&'a mut self, input: &'a [u8]) -> Result<Decode<'a>, ()> {
        self.insertions.clear();
        // Handle "basic" (ASCII) code points: encoded as-is before the last delimiter, if any.
        let (base, input) = if let Some(position) = input.iter().rposition(|c| c.is_delimiter()) {
            (
                &input[..position],
                if position > 0 {
                    &input[position + 1..]
                } else {
                    input
                },
            )
        } else {
            (&input[..0], input)
        };

        if !base.iter().all(|c| c.is_ascii()) {
            return Err(());
        }

        let base_len = base.len();
        let mut length = base_len as u32;
        let mut code_point = INITIAL_N;
        let mut bias = INITIAL_BIAS;
        let mut i = 0;
        let mut iter = input.iter();
        loop {
            let previous_i = i;
            let mut weight = 1;
            let mut k = BASE;
            let mut byte = match iter.next() {
                None => break,
                Some(byte) => byte,
            };

            // Decode a generalized variable-length integer into delta, added to i.
            loop {
                let digit = byte.digit().ok_or(())?;
                if digit > (u32::MAX - i) / weight {
                    return Err(()); // Overflow
                }
                i += digit * weight;
                let t = if k <= bias {
                    T_MIN
                } else if k >= bias + T_MAX {
                    T_MAX
                } else {
                    k - bias
                };
                if digit < t {
                    break;
                }
                if weight > u32::MAX / (BASE - t) {
                    return Err(()); // Overflow
                }
                weight *= BASE - t;
                k += BASE;
                byte = match iter.next() {
                    None => return Err(()), // End of input before the end of this delta
                    Some(byte) => byte,
                };
            }

            bias = adapt(i - previous_i, length + 1, previous_i == 0);
            if i / (length + 1) > u32::MAX - code_point {
                return Err(()); // Overflow
            }

            // i was supposed to wrap around from length+1 to 0, incrementing code_point.
            code_point += i / (length + 1);
            i %= length + 1;
            let c = char::from_u32(code_point).ok_or(())?;

            // Move earlier insertions farther out in the string.
            for (idx, _) in &mut self.insertions {
                if *idx >= i as usize {
                    *idx += 1;
                }
            }
            self.insertions.push((i as usize, c));
            length += 1;
            i += 1;
        }

        self.insertions.sort_by_key(|(i, _)| *i);
        Ok(Decode {
            base: base.iter(),
            insertions: &self.insertions,
            inserted: 0,
            position: 0,
            len: base_len + self.insertions.len(),
        })
    }
}

pub(crate) struct Decode<'a> {
    base: core::slice::Iter<'a, u8>,
    insertions: &'a [(usize, char)],
    inserted: usize,
    position: usize,
    len: usize,
}

impl<'a> Iterator for Decode<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((pos, c)) = self.insertions.get(self.inserted) {
                if *pos == self.position {
                    self.inserted += 1;
                    self.position += 1;
                    return Some(*c);
                }
            }
            if let Some(c) = self.base.next() {
                self.position += 1;
                return Some(c.char());
            } else if self.inserted >= self.insertions.len() {
                return None;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len - self.position;
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for Decode<'a> {
    fn len(&self) -> usize {
        self.len - self.position
    }
}

/// Convert a Unicode `str` to Punycode. Convenience wrapper around [`encode_into`].
#[inline]
pub fn encode_str(input: &str) -> Option<String> {
    if input.len() > u32::MAX as usize {
        return None;
    }
    let mut buf = String::with_capacity(input.len());
    encode_into(input.chars(), &mut buf).ok().map(|()| buf)
}

/// Convert Unicode code points to Punycode.
///
/// Returns `None` on overflow, which can only happen on inputs that would take more than
/// 63 encoded bytes, the DNS limit on domain name labels.
pub fn encode(input: &[char]) -> Option<String> {
    if input.len() > u32::MAX as usize {
        return None;
    }
    let mut buf = String::with_capacity(input.len());
    encode_into(input.iter().copied(), &mut buf)
        .ok()
        .map(|()| buf)
}

pub(crate) enum PunycodeEncodeError {
    Overflow,
    Sink,
}

impl From<core::fmt::Error> for PunycodeEncodeError {
    fn from(_: core::fmt::Error) -> Self {
        PunycodeEncodeError::Sink
    }
}

pub(crate) fn encode_into<I, W>(input: I, output: &mut W) -> Result<(), PunycodeEncodeError>
where
    I: Iterator<Item = char> + Clone,
    W: Write + ?Sized,
{
    // Handle "basic" (ASCII) code points: encoded as-is.
    let (mut input_length, mut basic_length) = (0u32, 0);
    for c in input.clone() {
        input_length = input_length
            .checked_add(1)
            .ok_or(PunycodeEncodeError::Overflow)?;
        if c.is_ascii() {
            output.write_char(c)?;
            basic_length += 1;
        }
    }

    if basic_length > 0 {
        output.write_char('-')?;
    }
    let mut code_point = INITIAL_N;
    let mut delta = 0;
    let mut bias = INITIAL_BIAS;
    let mut processed = basic_length;
    while processed < input_length {
        // All code points < code_point have been handled already; find the next larger one.
        let min_code_point = input
            .clone()
            .map(|c| c as u32)
            .filter(|&c| c >= code_point)
            .min()
            .unwrap();
        if min_code_point - code_point > (u32::MAX - delta) / (processed + 1) {
            return Err(PunycodeEncodeError::Overflow);
        }
        // Increase delta to advance the decoder's <code_point,i> state to <min_code_point,0>.
        delta += (min_code_point - code_point) * (processed + 1);
        code_point = min_code_point;
        for c in input.clone() {
            let c = c as u32;
            if c < code_point {
                delta = delta.checked_add(1).ok_or(PunycodeEncodeError::Overflow)?;
            }
            if c == code_point {
                // Represent delta as a generalized variable-length integer.
                let mut q = delta;
                let mut k = BASE;
                loop {
                    let t = if k <= bias {
                        T_MIN
                    } else if k >= bias + T_MAX {
                        T_MAX
                    } else {
                        k - bias
                    };
                    if q < t {
                        break;
                    }
                    let value = t + ((q - t) % (BASE - t));
                    output.write_char(value_to_digit(value))?;
                    q = (q - t) / (BASE - t);
                    k += BASE;
                }
                output.write_char(value_to_digit(q))?;
                bias = adapt(delta, processed + 1, processed == basic_length);
                delta = 0;
                processed += 1;
            }
        }
        delta += 1;
        code_point += 1;
    }
    Ok(())
}

#[inline]
fn value_to_digit(value: u32) -> char {
    match value {
        0..=25 => (value as u8 + b'a') as char,       // a..z
        26..=35 => (value as u8 - 26 + b'0') as char, // 0..9
        _ => unreachable!("generalized variable-length integer digit out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    // RFC 3492 section 7.1 sample strings.
    const SAMPLES: &[(&str, &str)] = &[
        ("ليهمابتكلموشعربي؟", "egbpdaj6bu4bxfgehfvwxn"),
        ("他们为什么不说中文", "ihqwcrb4cv8a8dqg056pqjye"),
        ("Why can't they just speak in 简体中文", "Whynotsecharyf-d0cu2p"),
        ("ひとつ屋根の下で", "n8jok5ay5dzabd5bym9f0cm5685rrjetr6pdxa"),
        ("пример", "e1afmkfd"),
    ];

    #[test]
    fn rfc3492_samples_encode() {
        for (unicode, punycode) in SAMPLES {
            assert_eq!(encode_str(unicode).unwrap(), *punycode, "encoding {unicode:?}");
        }
    }

    #[test]
    fn rfc3492_samples_decode() {
        for (unicode, punycode) in SAMPLES {
            assert_eq!(
                decode_to_string(punycode).unwrap(),
                *unicode,
                "decoding {punycode:?}"
            );
        }
    }

    #[test]
    fn round_trip_ascii_only_label() {
        assert_eq!(encode_str("example").unwrap(), "example-");
        assert_eq!(decode_to_string("example-").unwrap(), "example");
    }

    #[test]
    fn decode_rejects_malformed_digit() {
        assert!(decode_to_string("a-!!!").is_none());
    }

    #[test]
    fn decode_empty_is_empty() {
        assert_eq!(decode(""), Some(vec![]));
    }
}
