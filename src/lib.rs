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

//! Arbitrary precision decimal, compatible with PostgreSQL's `numeric`.
//!
//! A [`Numeric`] stores a decimal number as a sequence of base-10000 digits
//! together with a weight, exactly as PostgreSQL stores `numeric` values on
//! the wire, so values round-trip losslessly through the binary protocol.
//! Addition, subtraction and multiplication are exact; division produces a
//! requested (or automatically selected) number of decimal digits.
//!
//! # Examples
//!
//! ```
//! use pgdecimal::Numeric;
//!
//! let a: Numeric = "123.456".parse().unwrap();
//! let b = Numeric::from(10i32);
//! assert_eq!((&a * &b).to_string(), "1234.56");
//!
//! let (q, r) = Numeric::from(10i32).quo_rem(&Numeric::from(3i32));
//! assert_eq!(q.to_string(), "3");
//! assert_eq!(r.to_string(), "1");
//! ```

mod binary;
mod convert;
mod div;
mod error;
mod ops;
mod parse;

pub use crate::error::{DecodeNumericError, ParseNumericError};

use std::fmt;

/// Use `i16` to represent a single base-10000 digit.
pub type NumericDigit = i16;

pub(crate) const NBASE: i32 = 10000;
pub(crate) const HALF_NBASE: i32 = 5000;
pub(crate) const DEC_DIGITS: i32 = 4;

pub(crate) const DIVIDE_BY_ZERO_MSG: &str = "attempt to divide by zero";

/// Sign of a [`Numeric`] value.
///
/// `NaN` is a distinct sign rather than a flag; a NaN value carries no
/// digits. Zero is always `Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
    NaN,
}

/// An arbitrary precision decimal number.
///
/// The value is `sign * SUM(digits[i] * 10000^(weight - i))`, i.e. `weight`
/// is the base-10000 exponent of the first stored digit. `weight` may be
/// negative for values smaller than one.
///
/// Values are kept in canonical form: the first and last digits are nonzero,
/// zero has no digits, positive sign and zero weight, and NaN has no digits
/// and zero weight. All constructors and operations maintain this form, so
/// equal values always have identical representations.
#[derive(Debug, Clone)]
pub struct Numeric {
    sign: Sign,
    weight: i16,
    digits: Vec<NumericDigit>,
}

impl Numeric {
    /// Creates a zero numeric.
    #[inline]
    pub const fn zero() -> Self {
        Numeric {
            sign: Sign::Positive,
            weight: 0,
            digits: Vec::new(),
        }
    }

    /// Creates a `NaN` numeric.
    #[inline]
    pub const fn nan() -> Self {
        Numeric {
            sign: Sign::NaN,
            weight: 0,
            digits: Vec::new(),
        }
    }

    /// Assembles a numeric from raw parts.
    ///
    /// `digits` are base-10000 digits, most significant first; `weight` is
    /// the base-10000 exponent of `digits[0]`. Leading and trailing zero
    /// digits are stripped, so the parts do not have to be canonical.
    /// A `Sign::NaN` sign produces NaN regardless of the other parts.
    ///
    /// # Panics
    ///
    /// Panics if any digit is outside `0..=9999`.
    pub fn from_parts(sign: Sign, weight: i16, digits: Vec<NumericDigit>) -> Self {
        for &d in &digits {
            assert!(
                d >= 0 && (d as i32) < NBASE,
                "numeric digit out of range: {}",
                d
            );
        }

        if sign == Sign::NaN {
            return Numeric::nan();
        }

        let (digits, weight) = trim_abs(digits, weight as i32);
        Numeric::from_magnitude(digits, weight, sign == Sign::Negative)
    }

    /// Returns the sign.
    #[inline]
    pub const fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns the weight, the base-10000 exponent of the first digit.
    /// Zero and NaN have weight 0.
    #[inline]
    pub const fn weight(&self) -> i16 {
        self.weight
    }

    /// Returns the base-10000 digits, most significant first.
    #[inline]
    pub fn digits(&self) -> &[NumericDigit] {
        &self.digits
    }

    /// Checks if `self` is `NaN`.
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.sign == Sign::NaN
    }

    /// Checks if `self` is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Positive && self.digits.is_empty()
    }

    /// Computes the absolute value of `self`. NaN is returned unchanged.
    #[inline]
    pub fn abs(&self) -> Numeric {
        let mut result = self.clone();
        if result.sign == Sign::Negative {
            result.sign = Sign::Positive;
        }
        result
    }

    /// Builds a canonical value from an already trimmed magnitude.
    #[inline]
    pub(crate) fn from_magnitude(digits: Vec<NumericDigit>, weight: i32, negative: bool) -> Self {
        if digits.is_empty() {
            return Numeric::zero();
        }

        debug_assert!(digits.first() != Some(&0) && digits.last() != Some(&0));
        debug_assert!(weight >= i16::min_value() as i32 && weight <= i16::max_value() as i32);

        Numeric {
            sign: if negative {
                Sign::Negative
            } else {
                Sign::Positive
            },
            weight: weight as i16,
            digits,
        }
    }

    #[inline]
    pub(crate) fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }

    pub(crate) fn add_impl(&self, other: &Numeric) -> Numeric {
        if self.is_nan() || other.is_nan() {
            return Numeric::nan();
        }
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }

        let (digits, weight, negative) = add_signed(
            &self.digits,
            self.weight as i32,
            self.is_negative(),
            &other.digits,
            other.weight as i32,
            other.is_negative(),
        );

        Numeric::from_magnitude(digits, weight, negative)
    }

    pub(crate) fn sub_impl(&self, other: &Numeric) -> Numeric {
        if self.is_nan() || other.is_nan() {
            return Numeric::nan();
        }
        if other.is_zero() {
            return self.clone();
        }
        if self.is_zero() {
            let mut result = other.clone();
            result.sign = if other.is_negative() {
                Sign::Positive
            } else {
                Sign::Negative
            };
            return result;
        }

        let (digits, weight, negative) = sub_signed(
            &self.digits,
            self.weight as i32,
            self.is_negative(),
            &other.digits,
            other.weight as i32,
            other.is_negative(),
        );

        Numeric::from_magnitude(digits, weight, negative)
    }

    pub(crate) fn mul_impl(&self, other: &Numeric) -> Numeric {
        if self.is_nan() || other.is_nan() {
            return Numeric::nan();
        }
        if self.is_zero() || other.is_zero() {
            return Numeric::zero();
        }

        let (digits, weight) = mul_abs(
            &self.digits,
            self.weight as i32,
            &other.digits,
            other.weight as i32,
        );

        Numeric::from_magnitude(digits, weight, self.sign != other.sign)
    }

    /// Compares two values. NaN equals NaN and is greater than any other
    /// number, which matches PostgreSQL's ordering of `numeric`.
    pub(crate) fn cmp_impl(&self, other: &Numeric) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        match (self.is_nan(), other.is_nan()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => (),
        }

        match (self.sign, other.sign) {
            (Sign::Positive, Sign::Negative) => return Ordering::Greater,
            (Sign::Negative, Sign::Positive) => return Ordering::Less,
            _ => (),
        }

        let result = cmp_abs(
            &self.digits,
            self.weight as i32,
            &other.digits,
            other.weight as i32,
        );

        if self.is_negative() {
            result.reverse()
        } else {
            result
        }
    }
}

impl Default for Numeric {
    #[inline]
    fn default() -> Self {
        Numeric::zero()
    }
}

/// Returns the base-10000 digit of `(digits, weight)` at weight `pos`,
/// or 0 if `pos` lies outside the stored digits.
#[inline]
pub(crate) fn digit_at_weight(digits: &[NumericDigit], weight: i32, pos: i32) -> i32 {
    if pos > weight || pos <= weight - digits.len() as i32 {
        0
    } else {
        digits[(weight - pos) as usize] as i32
    }
}

/// Strips leading and trailing zero digits, adjusting the weight.
/// An all-zero magnitude collapses to the canonical empty form.
pub(crate) fn trim_abs(mut digits: Vec<NumericDigit>, mut weight: i32) -> (Vec<NumericDigit>, i32) {
    let leading = digits.iter().take_while(|&&d| d == 0).count();
    if leading == digits.len() {
        digits.clear();
        return (digits, 0);
    }

    if leading > 0 {
        digits.drain(..leading);
        weight -= leading as i32;
    }

    while let Some(&0) = digits.last() {
        digits.pop();
    }

    (digits, weight)
}

/// Compares two magnitudes, ignoring sign.
pub(crate) fn cmp_abs(
    d1: &[NumericDigit],
    w1: i32,
    d2: &[NumericDigit],
    w2: i32,
) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    match (d1.is_empty(), d2.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => (),
    }

    // Canonical form guarantees a nonzero first digit, so the weight alone
    // orders magnitudes of different size.
    match w1.cmp(&w2) {
        Ordering::Equal => (),
        ord => return ord,
    }

    for (a, b) in d1.iter().zip(d2.iter()) {
        match a.cmp(b) {
            Ordering::Equal => (),
            ord => return ord,
        }
    }

    d1.len().cmp(&d2.len())
}

/// Adds two magnitudes. The result weight reserves one digit for carry;
/// the returned magnitude is trimmed.
pub(crate) fn add_abs(
    d1: &[NumericDigit],
    w1: i32,
    d2: &[NumericDigit],
    w2: i32,
) -> (Vec<NumericDigit>, i32) {
    let lo = (w1 - d1.len() as i32 + 1).min(w2 - d2.len() as i32 + 1);
    let hi = w1.max(w2);

    let mut result = vec![0 as NumericDigit; (hi - lo + 2) as usize];
    let mut index = result.len();
    let mut carry = 0i32;

    for pos in lo..=hi {
        index -= 1;
        let sum = digit_at_weight(d1, w1, pos) + digit_at_weight(d2, w2, pos) + carry;
        carry = sum / NBASE;
        result[index] = (sum % NBASE) as NumericDigit;
    }
    result[0] = carry as NumericDigit;

    trim_abs(result, hi + 1)
}

/// Subtracts magnitude `(d2, w2)` from `(d1, w1)`.
/// The first magnitude must be the greater one.
fn sub_abs_ordered(
    d1: &[NumericDigit],
    w1: i32,
    d2: &[NumericDigit],
    w2: i32,
) -> (Vec<NumericDigit>, i32) {
    debug_assert_ne!(cmp_abs(d1, w1, d2, w2), std::cmp::Ordering::Less);

    let lo = (w1 - d1.len() as i32 + 1).min(w2 - d2.len() as i32 + 1);
    let hi = w1.max(w2);

    let mut result = vec![0 as NumericDigit; (hi - lo + 1) as usize];
    let mut index = result.len();
    let mut borrow = 0i32;

    for pos in lo..=hi {
        index -= 1;
        let mut diff = digit_at_weight(d1, w1, pos) - digit_at_weight(d2, w2, pos) - borrow;
        if diff < 0 {
            diff += NBASE;
            borrow = 1;
        } else {
            borrow = 0;
        }
        result[index] = diff as NumericDigit;
    }
    debug_assert_eq!(borrow, 0);

    trim_abs(result, hi)
}

/// Subtracts two magnitudes, returning the magnitude of the difference and
/// whether the difference is negative.
pub(crate) fn sub_abs(
    d1: &[NumericDigit],
    w1: i32,
    d2: &[NumericDigit],
    w2: i32,
) -> (Vec<NumericDigit>, i32, bool) {
    use std::cmp::Ordering;

    match cmp_abs(d1, w1, d2, w2) {
        Ordering::Less => {
            let (digits, weight) = sub_abs_ordered(d2, w2, d1, w1);
            (digits, weight, true)
        }
        Ordering::Equal => (Vec::new(), 0, false),
        Ordering::Greater => {
            let (digits, weight) = sub_abs_ordered(d1, w1, d2, w2);
            (digits, weight, false)
        }
    }
}

fn add_signed(
    d1: &[NumericDigit],
    w1: i32,
    neg1: bool,
    d2: &[NumericDigit],
    w2: i32,
    neg2: bool,
) -> (Vec<NumericDigit>, i32, bool) {
    if neg1 == neg2 {
        let (digits, weight) = add_abs(d1, w1, d2, w2);
        (digits, weight, neg1)
    } else {
        sub_signed(d1, w1, neg1, d2, w2, !neg2)
    }
}

fn sub_signed(
    d1: &[NumericDigit],
    w1: i32,
    neg1: bool,
    d2: &[NumericDigit],
    w2: i32,
    neg2: bool,
) -> (Vec<NumericDigit>, i32, bool) {
    if neg1 == neg2 {
        let (digits, weight, mut negative) = sub_abs(d1, w1, d2, w2);
        if !digits.is_empty() && neg1 {
            negative = !negative;
        }
        (digits, weight, negative)
    } else {
        add_signed(d1, w1, neg1, d2, w2, !neg2)
    }
}

/// Multiplies two magnitudes with the schoolbook convolution, accumulating
/// whole result columns before propagating carries.
pub(crate) fn mul_abs(
    d1: &[NumericDigit],
    w1: i32,
    d2: &[NumericDigit],
    w2: i32,
) -> (Vec<NumericDigit>, i32) {
    let len1 = d1.len();
    let len2 = d2.len();
    if len1 == 0 || len2 == 0 {
        return (Vec::new(), 0);
    }

    // Columns of the digit-by-digit product, counted from the least
    // significant end. One extra digit holds the final carry.
    let columns = len1 + len2 - 1;
    let mut result = vec![0 as NumericDigit; columns + 1];
    let mut carry = 0i64;

    for i in 0..columns {
        // A column sum is bounded by 9999^2 * 32767 plus the carried-in
        // value, which stays well inside i64.
        let mut acc = carry;
        let j_lo = (i + 1).saturating_sub(len2);
        let j_hi = (len1 - 1).min(i);
        for j1 in j_lo..=j_hi {
            let j2 = i - j1;
            acc += d1[len1 - 1 - j1] as i64 * d2[len2 - 1 - j2] as i64;
        }
        carry = acc / NBASE as i64;
        result[columns - i] = (acc % NBASE as i64) as NumericDigit;
    }
    result[0] = carry as NumericDigit;

    trim_abs(result, w1 + w2 + 1)
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nan() {
            return f.write_str("NaN");
        }

        if self.is_negative() {
            f.write_str("-")?;
        }

        let ndigits = self.digits.len() as i32;
        let weight = self.weight as i32;

        // Integer part. The stored digits may run out before the decimal
        // point ("10000000" stores a single digit 1000 at weight 1), in
        // which case zero groups fill the gap.
        if weight < 0 || ndigits == 0 {
            f.write_str("0")?;
        } else {
            for i in 0..=weight.min(ndigits - 1) {
                let digit = self.digits[i as usize];
                if i == 0 {
                    write!(f, "{}", digit)?;
                } else {
                    write!(f, "{:04}", digit)?;
                }
            }
            for _ in 0..(weight + 1 - ndigits) {
                f.write_str("0000")?;
            }
        }

        // Fraction part, without trailing zeroes.
        if ndigits > weight + 1 {
            f.write_str(".")?;
            for _ in 0..(-weight - 1) {
                f.write_str("0000")?;
            }
            for i in (weight + 1).max(0)..ndigits {
                let digit = self.digits[i as usize];
                if i < ndigits - 1 {
                    write!(f, "{:04}", digit)?;
                } else {
                    // Canonical form guarantees the last digit is nonzero.
                    let mut digit = digit as i32;
                    let mut width = DEC_DIGITS as usize;
                    while digit % 10 == 0 {
                        digit /= 10;
                        width -= 1;
                    }
                    write!(f, "{:0width$}", digit, width = width)?;
                }
            }
        }

        Ok(())
    }
}
