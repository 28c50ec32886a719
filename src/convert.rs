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

//! Numeric conversion utilities.

use crate::{Numeric, NumericDigit, Sign, NBASE};

/// Zero value.
trait Zero: Copy + PartialEq {
    const ZERO: Self;

    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

macro_rules! impl_zero {
    ($t: ty) => {
        impl Zero for $t {
            const ZERO: Self = 0;
        }
    };
}

impl_zero!(i8);
impl_zero!(i16);
impl_zero!(i32);
impl_zero!(i64);
impl_zero!(i128);
impl_zero!(u8);
impl_zero!(u16);
impl_zero!(u32);
impl_zero!(u64);
impl_zero!(u128);

/// Unsigned integer.
trait Unsigned: Copy + Zero + Sized {
    const MAX_NDIGITS: usize;

    fn next_digit(self) -> (NumericDigit, Self);
}

macro_rules! impl_unsigned {
    ($t: ty, $ndigits: expr) => {
        impl Unsigned for $t {
            const MAX_NDIGITS: usize = $ndigits;

            #[inline]
            fn next_digit(self) -> (NumericDigit, Self) {
                let new_val = self / NBASE as Self;
                let digit = (self - new_val * NBASE as Self) as NumericDigit;
                (digit, new_val)
            }
        }
    };
}

impl_unsigned!(u16, 2);
impl_unsigned!(u32, 3);
impl_unsigned!(u64, 5);
impl_unsigned!(u128, 10);

impl Unsigned for u8 {
    const MAX_NDIGITS: usize = 1;

    #[inline]
    fn next_digit(self) -> (NumericDigit, Self) {
        (self as NumericDigit, 0)
    }
}

/// Signed integer.
trait Signed: Copy + PartialOrd + Zero {
    type AbsType: Unsigned;

    fn is_negative(self) -> bool;
    fn abs(self) -> Self::AbsType;
}

macro_rules! impl_signed {
    ($t: ty, $abs_ty: ty) => {
        impl Signed for $t {
            type AbsType = $abs_ty;

            #[inline]
            fn is_negative(self) -> bool {
                self < 0
            }

            #[inline]
            fn abs(self) -> $abs_ty {
                if self >= 0 {
                    self as $abs_ty
                } else {
                    -(self + 1) as $abs_ty + 1
                }
            }
        }
    };
}

impl_signed!(i8, u8);
impl_signed!(i16, u16);
impl_signed!(i32, u32);
impl_signed!(i64, u64);
impl_signed!(i128, u128);

/// Converts an unsigned integer to numeric.
fn from_unsigned<T: Unsigned>(val: T) -> Numeric {
    if val.is_zero() {
        return Numeric::zero();
    }

    let mut digits: Vec<NumericDigit> = Vec::with_capacity(T::MAX_NDIGITS);
    let mut val = val;
    loop {
        let (digit, rest) = val.next_digit();
        digits.push(digit);
        val = rest;
        if val.is_zero() {
            break;
        }
    }

    // Digits were collected least significant first; the weight counts all
    // of them, including any about-to-be-trimmed trailing zeroes.
    let weight = digits.len() as i32 - 1;
    digits.reverse();
    while let Some(&0) = digits.last() {
        digits.pop();
    }

    Numeric::from_magnitude(digits, weight, false)
}

/// Converts a signed integer to numeric.
fn from_signed<T: Signed>(val: T) -> Numeric {
    let negative = val.is_negative();
    let mut n = from_unsigned(val.abs());
    if negative {
        n.sign = Sign::Negative;
    }
    n
}

macro_rules! impl_from_signed {
    ($t: ty) => {
        impl From<$t> for Numeric {
            #[inline]
            fn from(val: $t) -> Numeric {
                from_signed(val)
            }
        }
    };
}

macro_rules! impl_from_unsigned {
    ($t: ty) => {
        impl From<$t> for Numeric {
            #[inline]
            fn from(val: $t) -> Numeric {
                from_unsigned(val)
            }
        }
    };
}

impl_from_signed!(i8);
impl_from_signed!(i16);
impl_from_signed!(i32);
impl_from_signed!(i64);
impl_from_signed!(i128);
impl_from_unsigned!(u8);
impl_from_unsigned!(u16);
impl_from_unsigned!(u32);
impl_from_unsigned!(u64);
impl_from_unsigned!(u128);

macro_rules! impl_to_signed {
    ($method: ident, $t: ty) => {
        /// Converts to the integer type, truncating the fraction toward
        /// zero. Returns 0 for NaN and saturates to the type's minimum or
        /// maximum when the value is out of range.
        #[inline]
        pub fn $method(&self) -> $t {
            let val = self.to_i128();
            if val > <$t>::max_value() as i128 {
                <$t>::max_value()
            } else if val < <$t>::min_value() as i128 {
                <$t>::min_value()
            } else {
                val as $t
            }
        }
    };
}

macro_rules! impl_to_unsigned {
    ($method: ident, $t: ty) => {
        /// Converts to the integer type, truncating the fraction toward
        /// zero. Returns 0 for NaN and for negative values, and saturates
        /// to the type's maximum when the value is too large.
        #[inline]
        pub fn $method(&self) -> $t {
            let val = self.to_u128();
            if val > <$t>::max_value() as u128 {
                <$t>::max_value()
            } else {
                val as $t
            }
        }
    };
}

impl Numeric {
    impl_to_signed!(to_i8, i8);
    impl_to_signed!(to_i16, i16);
    impl_to_signed!(to_i32, i32);
    impl_to_signed!(to_i64, i64);
    impl_to_unsigned!(to_u8, u8);
    impl_to_unsigned!(to_u16, u16);
    impl_to_unsigned!(to_u32, u32);
    impl_to_unsigned!(to_u64, u64);

    /// Converts to `i128`, truncating the fraction toward zero. Returns 0
    /// for NaN and saturates to `i128::min_value()`/`i128::max_value()`
    /// when the value is out of range.
    pub fn to_i128(&self) -> i128 {
        if self.is_nan() || self.digits.is_empty() {
            return 0;
        }

        let weight = self.weight as i32;
        if weight < 0 {
            return 0;
        }

        let negative = self.is_negative();
        let saturated = if negative {
            i128::min_value()
        } else {
            i128::max_value()
        };

        // Accumulate the digits down to the decimal point. Negative values
        // accumulate downward so that i128::min_value() itself is
        // representable.
        let mut result: i128 = 0;
        let last = weight.min(self.digits.len() as i32 - 1);
        for i in 0..=last {
            let digit = self.digits[i as usize] as i128;
            result = match result.checked_mul(NBASE as i128).and_then(|r| {
                if negative {
                    r.checked_sub(digit)
                } else {
                    r.checked_add(digit)
                }
            }) {
                Some(r) => r,
                None => return saturated,
            };
        }
        // The stored digits may run out before the decimal point.
        for _ in last + 1..=weight {
            result = match result.checked_mul(NBASE as i128) {
                Some(r) => r,
                None => return saturated,
            };
        }

        result
    }

    /// Converts to `u128`, truncating the fraction toward zero. Returns 0
    /// for NaN and for negative values, and saturates to
    /// `u128::max_value()` when the value is too large.
    pub fn to_u128(&self) -> u128 {
        if self.sign != Sign::Positive || self.digits.is_empty() {
            return 0;
        }

        let weight = self.weight as i32;
        if weight < 0 {
            return 0;
        }

        let mut result: u128 = 0;
        let last = weight.min(self.digits.len() as i32 - 1);
        for i in 0..=last {
            let digit = self.digits[i as usize] as u128;
            result = match result
                .checked_mul(NBASE as u128)
                .and_then(|r| r.checked_add(digit))
            {
                Some(r) => r,
                None => return u128::max_value(),
            };
        }
        for _ in last + 1..=weight {
            result = match result.checked_mul(NBASE as u128) {
                Some(r) => r,
                None => return u128::max_value(),
            };
        }

        result
    }
}
