// Copyright 2020 CoD Technologies Corp.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Numeric parsing.

use crate::error::ParseNumericError;
use crate::{Numeric, NumericDigit, DEC_DIGITS};
use smallvec::SmallVec;
use std::str::FromStr;

/// Splits a decimal string bytes into sign and the rest, without inspecting
/// or validating the rest.
#[inline]
fn extract_sign(s: &[u8]) -> (bool, &[u8]) {
    match s.first() {
        Some(&b'+') => (false, &s[1..]),
        Some(&b'-') => (true, &s[1..]),
        _ => (false, s),
    }
}

/// Carves off decimal digits up to the first non-digit character.
#[inline]
fn eat_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let i = s.iter().take_while(|&i| i.is_ascii_digit()).count();
    (&s[..i], &s[i..])
}

/// Reads a `NumericDigit` from at most `DEC_DIGITS` decimal digit values.
#[inline]
fn read_numeric_digit(s: &[u8]) -> NumericDigit {
    debug_assert!(s.len() <= DEC_DIGITS as usize);

    let mut digit = 0;
    for &i in s {
        digit = digit * 10 + i as NumericDigit;
    }

    digit
}

/// Parses a string into a numeric.
///
/// Accepted inputs are `[+-]?([0-9]*\.[0-9]*|[0-9]+)` and the exact string
/// `NaN`. Leading or trailing whitespace and scientific notation are not
/// accepted.
fn parse_numeric(s: &str) -> Result<Numeric, ParseNumericError> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return Err(ParseNumericError::empty());
    }

    if bytes == b"NaN" {
        return Ok(Numeric::nan());
    }

    let (negative, rest) = extract_sign(bytes);

    let (integral, rest) = eat_digits(rest);
    let fractional = match rest.first() {
        None => {
            if integral.is_empty() {
                return Err(ParseNumericError::invalid());
            }
            &b""[..]
        }
        Some(&b'.') => {
            let (fractional, rest) = eat_digits(&rest[1..]);
            if !rest.is_empty() {
                return Err(ParseNumericError::invalid());
            }
            fractional
        }
        Some(_) => return Err(ParseNumericError::invalid()),
    };

    // Collect the decimal digits on both sides of the point, then strip
    // insignificant zeroes from both ends. `frac_pos` tracks where the
    // decimal point sits in what remains.
    let mut dec_digits: SmallVec<[u8; 64]> =
        SmallVec::with_capacity(integral.len() + fractional.len());
    dec_digits.extend_from_slice(integral);
    dec_digits.extend_from_slice(fractional);

    let mut frac_pos = integral.len() as i32;

    while dec_digits.last() == Some(&b'0') {
        dec_digits.pop();
    }
    if dec_digits.is_empty() {
        return Ok(Numeric::zero());
    }

    let leading = dec_digits.iter().take_while(|&&c| c == b'0').count();
    frac_pos -= leading as i32;
    let digits_str = &dec_digits[leading..];

    // weight = ceil(frac_pos / 4) - 1; div_euclid keeps the ceiling correct
    // when the most significant digit is below the decimal point.
    let weight = (frac_pos + DEC_DIGITS - 1).div_euclid(DEC_DIGITS) - 1;

    // Left padding inside the first base-10000 digit, then total digits.
    let offset = (weight + 1) * DEC_DIGITS - frac_pos;
    let ndigits = (digits_str.len() as i32 + offset + DEC_DIGITS - 1) / DEC_DIGITS;

    if weight > i16::max_value() as i32
        || weight < i16::min_value() as i32
        || ndigits > i16::max_value() as i32
    {
        return Err(ParseNumericError::overflow());
    }

    let mut padded: SmallVec<[u8; 64]> = SmallVec::with_capacity((ndigits * DEC_DIGITS) as usize);
    padded.extend(std::iter::repeat(0u8).take(offset as usize));
    padded.extend(digits_str.iter().map(|&c| c - b'0'));
    padded.extend(std::iter::repeat(0u8).take((ndigits * DEC_DIGITS) as usize - padded.len()));

    let mut digits = Vec::with_capacity(ndigits as usize);
    for chunk in padded.chunks_exact(DEC_DIGITS as usize) {
        digits.push(read_numeric_digit(chunk));
    }
    debug_assert_eq!(digits.len(), ndigits as usize);

    Ok(Numeric::from_magnitude(digits, weight, negative))
}

impl FromStr for Numeric {
    type Err = ParseNumericError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_numeric(s)
    }
}
