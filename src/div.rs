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

//! Numeric division, rounding and truncation.

use crate::{
    trim_abs, Numeric, NumericDigit, DEC_DIGITS, DIVIDE_BY_ZERO_MSG, HALF_NBASE, NBASE,
};

// Limits on the scales chosen for division results, mirroring
// NUMERIC_MAX_DISPLAY_SCALE / NUMERIC_MIN_DISPLAY_SCALE and
// NUMERIC_MIN_SIG_DIGITS in PostgreSQL's numeric implementation.
const NUMERIC_MAX_DISPLAY_SCALE: i32 = 1000;
const NUMERIC_MIN_DISPLAY_SCALE: i32 = 0;
// For inherently inexact calculations such as division, produce at least
// this many significant digits so the result is no worse than float8 would
// deliver.
const NUMERIC_MIN_SIG_DIGITS: i32 = 16;

static ROUND_POWERS: [i32; 4] = [0, 1000, 100, 10];

// No representable value has a decimal digit further than this from the
// decimal point (the weight spans 65536 base-10000 positions), so scales
// beyond it act like infinity and can be clamped before any digit index
// arithmetic.
const NUMERIC_SCALE_LIMIT: i32 =
    (i16::max_value() as i32 - i16::min_value() as i32 + 1) * DEC_DIGITS;

#[inline]
fn clamp_scale(scale: i32) -> i32 {
    scale.max(-NUMERIC_SCALE_LIMIT).min(NUMERIC_SCALE_LIMIT)
}

/// Emulated display scale of a magnitude: the number of stored decimal
/// digits after the decimal point, never negative. Trailing zeroes inside
/// the last stored digit still count ("0.9" stored as 9000 reports 4).
pub(crate) fn scale_abs(digits: &[NumericDigit], weight: i32) -> i32 {
    let scale = (digits.len() as i32 - weight - 1) * DEC_DIGITS;
    scale.max(0)
}

/// Selects the result scale for a division the way PostgreSQL does:
/// at least [`NUMERIC_MIN_SIG_DIGITS`] significant digits, no less than
/// either operand's emulated display scale, clamped to the display scale
/// limits.
pub(crate) fn select_div_scale(
    d1: &[NumericDigit],
    mut w1: i32,
    d2: &[NumericDigit],
    mut w2: i32,
) -> i32 {
    // Values are canonical, so the first stored digit is the first
    // significant one; an empty magnitude means zero.
    let first_digit1 = d1.first().copied().unwrap_or(0) as i32;
    if first_digit1 == 0 {
        w1 = 0;
    }
    let first_digit2 = d2.first().copied().unwrap_or(0) as i32;
    if first_digit2 == 0 {
        w2 = 0;
    }

    // Estimate the weight of the quotient. If the two first digits are
    // equal, we can't be sure, but assume that the dividend is less.
    let mut qweight = w1 - w2;
    if first_digit1 <= first_digit2 {
        qweight -= 1;
    }

    let mut rscale = NUMERIC_MIN_SIG_DIGITS - qweight * DEC_DIGITS;
    rscale = rscale.max(scale_abs(d1, w1));
    rscale = rscale.max(scale_abs(d2, w2));
    rscale = rscale.max(NUMERIC_MIN_DISPLAY_SCALE);
    rscale.min(NUMERIC_MAX_DISPLAY_SCALE)
}

/// Rounds a magnitude to `scale` decimal digits after the decimal point,
/// half away from zero. A negative `scale` rounds before the decimal point.
/// The result may need trimming.
pub(crate) fn round_abs(
    mut digits: Vec<NumericDigit>,
    mut weight: i32,
    scale: i32,
) -> (Vec<NumericDigit>, i32) {
    if digits.is_empty() {
        return (digits, 0);
    }

    // Decimal digits to keep. Below zero everything is dropped; at exactly
    // zero the value loses all digits but may still round up to 1.
    let di = (weight + 1) * DEC_DIGITS + scale;
    if di < 0 {
        digits.clear();
        return (digits, 0);
    }

    let mut ndigits = ((di + DEC_DIGITS - 1) / DEC_DIGITS) as usize;
    let di = di % DEC_DIGITS;

    if ndigits > digits.len() || (ndigits == digits.len() && di == 0) {
        return (digits, weight);
    }

    let mut carry: i32;
    if di == 0 {
        let extra = digits[ndigits] as i32;
        digits.truncate(ndigits);
        carry = if extra >= HALF_NBASE { 1 } else { 0 };
    } else {
        // Round within the last kept digit.
        digits.truncate(ndigits);
        let pow10 = ROUND_POWERS[di as usize];
        ndigits -= 1;
        let extra = digits[ndigits] as i32 % pow10;
        digits[ndigits] -= extra as NumericDigit;
        carry = 0;
        if extra >= pow10 / 2 {
            let mut sum = pow10 + digits[ndigits] as i32;
            if sum >= NBASE {
                sum -= NBASE;
                carry = 1;
            }
            digits[ndigits] = sum as NumericDigit;
        }
    }

    while carry > 0 && ndigits > 0 {
        ndigits -= 1;
        let sum = digits[ndigits] as i32 + carry;
        if sum >= NBASE {
            digits[ndigits] = (sum - NBASE) as NumericDigit;
            carry = 1;
        } else {
            digits[ndigits] = sum as NumericDigit;
            carry = 0;
        }
    }
    if carry > 0 {
        digits.insert(0, carry as NumericDigit);
        weight += 1;
    }

    (digits, weight)
}

/// Truncates a magnitude at `scale` decimal digits after the decimal point.
/// A negative `scale` truncates before the decimal point. The result may
/// need trimming.
pub(crate) fn trunc_abs(
    mut digits: Vec<NumericDigit>,
    weight: i32,
    scale: i32,
) -> (Vec<NumericDigit>, i32) {
    if digits.is_empty() {
        return (digits, 0);
    }

    let di = (weight + 1) * DEC_DIGITS + scale;
    if di <= 0 {
        digits.clear();
        return (digits, 0);
    }

    let ndigits = ((di + DEC_DIGITS - 1) / DEC_DIGITS) as usize;
    if ndigits <= digits.len() {
        digits.truncate(ndigits);

        let di = di % DEC_DIGITS;
        if di > 0 {
            // Truncate within the last kept digit.
            let pow10 = ROUND_POWERS[di as usize];
            let last = ndigits - 1;
            let extra = digits[last] as i32 % pow10;
            digits[last] -= extra as NumericDigit;
        }
    }

    (digits, weight)
}

/// Divides magnitude `(d1, w1)` by `(d2, w2)`, producing `scale` decimal
/// digits after the decimal point, rounded or truncated. Both inputs must
/// be nonzero.
///
/// The multiple-digit path is Knuth volume 2, Algorithm 4.3.1D; a single
/// digit divisor takes the short division fast path (cf. Knuth section
/// 4.3.1 exercise 16).
pub(crate) fn div_abs(
    d1: &[NumericDigit],
    w1: i32,
    d2: &[NumericDigit],
    w2: i32,
    scale: i32,
    round: bool,
) -> (Vec<NumericDigit>, i32) {
    debug_assert!(!d1.is_empty() && d1[0] != 0);
    debug_assert!(!d2.is_empty() && d2[0] != 0);

    let var1_ndigits = d1.len() as i32;
    let var2_ndigits = d2.len() as i32;

    let res_weight = w1 - w2;

    // The number of accurate result digits to produce: enough for the
    // integral part plus `scale` decimal digits, at least 1, and one guard
    // digit when rounding.
    let mut res_ndigits = res_weight + 1 + (scale + DEC_DIGITS - 1) / DEC_DIGITS;
    res_ndigits = res_ndigits.max(1);
    if round {
        res_ndigits += 1;
    }

    // The working dividend normally requires res_ndigits + var2_ndigits
    // digits, but make it at least var1_ndigits so we can load all of d1
    // into it. There is an additional digit dividend[0] in front for the
    // normalization overflow; for consistency with Knuth's notation it is
    // not counted in div_ndigits. The divisor gets a zero at divisor[0]
    // with its data in divisor[1..=var2_ndigits].
    let div_ndigits = (res_ndigits + var2_ndigits).max(var1_ndigits);

    let mut workspace = vec![0 as NumericDigit; (div_ndigits + var2_ndigits + 2) as usize];
    let (dividend, divisor) = workspace.split_at_mut((div_ndigits + 1) as usize);
    dividend[1..=d1.len()].copy_from_slice(d1);
    divisor[1..=d2.len()].copy_from_slice(d2);

    let mut res_digits = vec![0 as NumericDigit; res_ndigits as usize];

    if var2_ndigits == 1 {
        let divisor1 = divisor[1] as i32;
        let mut carry = 0i32;
        for (i, res) in res_digits.iter_mut().enumerate() {
            carry = carry * NBASE + dividend[i + 1] as i32;
            *res = (carry / divisor1) as NumericDigit;
            carry %= divisor1;
        }
    } else {
        // We need the first divisor digit to be >= NBASE/2. If it isn't,
        // make it so by scaling up both the divisor and dividend by the
        // factor d.
        if (divisor[1] as i32) < HALF_NBASE {
            let d = NBASE / (divisor[1] as i32 + 1);

            let mut carry = 0i32;
            for i in (1..=var2_ndigits as usize).rev() {
                carry += divisor[i] as i32 * d;
                divisor[i] = (carry % NBASE) as NumericDigit;
                carry /= NBASE;
            }
            carry = 0;
            // Only the first var1_ndigits digits of the dividend can be
            // nonzero here.
            for i in (0..=var1_ndigits as usize).rev() {
                carry += dividend[i] as i32 * d;
                dividend[i] = (carry % NBASE) as NumericDigit;
                carry /= NBASE;
            }
            debug_assert!(divisor[1] as i32 >= HALF_NBASE);
        }

        let divisor1 = divisor[1] as i32;
        let divisor2 = divisor[2] as i32;

        // Each iteration produces the j'th quotient digit by dividing
        // dividend[j ..= j + var2_ndigits] by the divisor, much like the
        // common manual procedure for long division.
        for j in 0..res_ndigits as usize {
            // Estimate the quotient digit from the first two dividend
            // digits. When they are zero the digit must be zero, which
            // falls out quickly on trailing zeroes in the dividend.
            let next2digits = dividend[j] as i32 * NBASE + dividend[j + 1] as i32;
            if next2digits == 0 {
                res_digits[j] = 0;
                continue;
            }

            let mut qhat = if dividend[j] as i32 == divisor1 {
                NBASE - 1
            } else {
                next2digits / divisor1
            };

            // Knuth proves that after this adjustment the quotient digit is
            // either correct or just one too large. (It is OK to look at
            // dividend[j + 2] here since the divisor has at least 2 digits.)
            while divisor2 * qhat
                > (next2digits - qhat * divisor1) * NBASE + dividend[j + 2] as i32
            {
                qhat -= 1;
            }

            if qhat > 0 {
                // Multiply the divisor by qhat and subtract that from the
                // working dividend. carry tracks the multiplication, borrow
                // the subtraction.
                let mut carry = 0i32;
                let mut borrow = 0i32;
                for i in (0..=var2_ndigits as usize).rev() {
                    carry += divisor[i] as i32 * qhat;
                    borrow -= carry % NBASE;
                    carry /= NBASE;
                    borrow += dividend[j + i] as i32;
                    if borrow < 0 {
                        dividend[j + i] = (borrow + NBASE) as NumericDigit;
                        borrow = -1;
                    } else {
                        dividend[j + i] = borrow as NumericDigit;
                        borrow = 0;
                    }
                }

                // A borrow out of the top dividend digit means qhat was one
                // too large; fix it and add back the divisor.
                if borrow != 0 {
                    qhat -= 1;
                    let mut carry = 0i32;
                    for i in (0..=var2_ndigits as usize).rev() {
                        carry += dividend[j + i] as i32 + divisor[i] as i32;
                        if carry >= NBASE {
                            dividend[j + i] = (carry - NBASE) as NumericDigit;
                            carry = 1;
                        } else {
                            dividend[j + i] = carry as NumericDigit;
                            carry = 0;
                        }
                    }
                }
            }

            res_digits[j] = qhat as NumericDigit;
        }
    }

    let (digits, weight) = if round {
        round_abs(res_digits, res_weight, scale)
    } else {
        trunc_abs(res_digits, res_weight, scale)
    };

    trim_abs(digits, weight)
}

impl Numeric {
    /// Returns the emulated display scale: the number of stored decimal
    /// digits after the decimal point, never negative. Zero and NaN report
    /// a scale of 0.
    #[inline]
    pub fn scale(&self) -> i32 {
        scale_abs(&self.digits, self.weight as i32)
    }

    /// Computes `self / other` with an automatically selected scale that
    /// yields at least 16 significant digits, rounded.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero and neither operand is NaN.
    #[inline]
    pub fn quo(&self, other: &Numeric) -> Numeric {
        let scale = select_div_scale(
            &self.digits,
            self.weight as i32,
            &other.digits,
            other.weight as i32,
        );
        self.quo_prec(other, scale, true)
    }

    /// Computes `self / other` to `scale` decimal digits after the decimal
    /// point, rounded if `round` is true and truncated toward zero
    /// otherwise. A negative `scale` applies before the decimal point;
    /// scales beyond any representable digit position are clamped.
    ///
    /// NaN operands produce NaN before the divisor is inspected.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero and neither operand is NaN.
    pub fn quo_prec(&self, other: &Numeric, scale: i32, round: bool) -> Numeric {
        if self.is_nan() || other.is_nan() {
            return Numeric::nan();
        }
        if other.is_zero() {
            panic!("{}", DIVIDE_BY_ZERO_MSG);
        }
        if self.is_zero() {
            return Numeric::zero();
        }

        let scale = clamp_scale(scale);
        let (digits, weight) = div_abs(
            &self.digits,
            self.weight as i32,
            &other.digits,
            other.weight as i32,
            scale,
            round,
        );

        Numeric::from_magnitude(digits, weight, self.sign != other.sign)
    }

    /// Computes the quotient and remainder of T-division:
    ///
    /// ```text
    /// q = self / other    truncated toward zero
    /// r = self - other * q
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero and neither operand is NaN.
    pub fn quo_rem(&self, other: &Numeric) -> (Numeric, Numeric) {
        let quotient = self.quo_prec(other, 0, false);
        let remainder = self.sub_impl(&quotient.mul_impl(other));
        (quotient, remainder)
    }

    /// Computes the remainder of T-division; see [`Numeric::quo_rem`].
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero and neither operand is NaN.
    #[inline]
    pub fn rem(&self, other: &Numeric) -> Numeric {
        self.quo_rem(other).1
    }

    /// Rounds to `scale` digits after the decimal point, half away from
    /// zero. A negative `scale` rounds before the decimal point; scales
    /// beyond any representable digit position are clamped. NaN is
    /// returned unchanged.
    pub fn round(&self, scale: i32) -> Numeric {
        if self.is_nan() {
            return Numeric::nan();
        }

        let scale = clamp_scale(scale);
        let (digits, weight) = round_abs(self.digits.clone(), self.weight as i32, scale);
        let (digits, weight) = trim_abs(digits, weight);
        Numeric::from_magnitude(digits, weight, self.is_negative())
    }

    /// Truncates to `scale` digits after the decimal point, toward zero.
    /// A negative `scale` truncates before the decimal point; scales
    /// beyond any representable digit position are clamped. NaN is
    /// returned unchanged.
    pub fn trunc(&self, scale: i32) -> Numeric {
        if self.is_nan() {
            return Numeric::nan();
        }

        let scale = clamp_scale(scale);
        let (digits, weight) = trunc_abs(self.digits.clone(), self.weight as i32, scale);
        let (digits, weight) = trim_abs(digits, weight);
        Numeric::from_magnitude(digits, weight, self.is_negative())
    }
}
