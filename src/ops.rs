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

//! Implementing operators for numeric.

use crate::{Numeric, Sign};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

// The main implementation
// &self + &other
impl Add<&Numeric> for &Numeric {
    type Output = Numeric;

    #[inline]
    fn add(self, other: &Numeric) -> Self::Output {
        self.add_impl(other)
    }
}

// self + &other
impl Add<&Numeric> for Numeric {
    type Output = Numeric;

    #[inline]
    fn add(self, other: &Numeric) -> Self::Output {
        Add::add(&self, other)
    }
}

// &self + other
impl Add<Numeric> for &Numeric {
    type Output = Numeric;

    #[inline]
    fn add(self, other: Numeric) -> Self::Output {
        Add::add(self, &other)
    }
}

// self + other
impl Add<Numeric> for Numeric {
    type Output = Numeric;

    #[inline]
    fn add(self, other: Numeric) -> Self::Output {
        Add::add(&self, &other)
    }
}

// &mut self += &other
impl AddAssign<&Numeric> for Numeric {
    #[inline]
    fn add_assign(&mut self, other: &Numeric) {
        let result = Add::add(self as &Numeric, other);
        *self = result;
    }
}

// &mut self += other
impl AddAssign<Numeric> for Numeric {
    #[inline]
    fn add_assign(&mut self, other: Numeric) {
        let result = Add::add(self as &Numeric, &other);
        *self = result;
    }
}

// The main implementation
// &self - &other
impl Sub<&Numeric> for &Numeric {
    type Output = Numeric;

    #[inline]
    fn sub(self, other: &Numeric) -> Self::Output {
        self.sub_impl(other)
    }
}

// self - &other
impl Sub<&Numeric> for Numeric {
    type Output = Numeric;

    #[inline]
    fn sub(self, other: &Numeric) -> Self::Output {
        Sub::sub(&self, other)
    }
}

// &self - other
impl Sub<Numeric> for &Numeric {
    type Output = Numeric;

    #[inline]
    fn sub(self, other: Numeric) -> Self::Output {
        Sub::sub(self, &other)
    }
}

// self - other
impl Sub<Numeric> for Numeric {
    type Output = Numeric;

    #[inline]
    fn sub(self, other: Numeric) -> Self::Output {
        Sub::sub(&self, &other)
    }
}

// &mut self -= &other
impl SubAssign<&Numeric> for Numeric {
    #[inline]
    fn sub_assign(&mut self, other: &Numeric) {
        let result = Sub::sub(self as &Numeric, other);
        *self = result;
    }
}

// &mut self -= other
impl SubAssign<Numeric> for Numeric {
    #[inline]
    fn sub_assign(&mut self, other: Numeric) {
        let result = Sub::sub(self as &Numeric, &other);
        *self = result;
    }
}

// The main implementation
// &self * &other
impl Mul<&Numeric> for &Numeric {
    type Output = Numeric;

    #[inline]
    fn mul(self, other: &Numeric) -> Self::Output {
        self.mul_impl(other)
    }
}

// self * &other
impl Mul<&Numeric> for Numeric {
    type Output = Numeric;

    #[inline]
    fn mul(self, other: &Numeric) -> Self::Output {
        Mul::mul(&self, other)
    }
}

// &self * other
impl Mul<Numeric> for &Numeric {
    type Output = Numeric;

    #[inline]
    fn mul(self, other: Numeric) -> Self::Output {
        Mul::mul(self, &other)
    }
}

// self * other
impl Mul<Numeric> for Numeric {
    type Output = Numeric;

    #[inline]
    fn mul(self, other: Numeric) -> Self::Output {
        Mul::mul(&self, &other)
    }
}

// &mut self *= &other
impl MulAssign<&Numeric> for Numeric {
    #[inline]
    fn mul_assign(&mut self, other: &Numeric) {
        let result = Mul::mul(self as &Numeric, other);
        *self = result;
    }
}

// &mut self *= other
impl MulAssign<Numeric> for Numeric {
    #[inline]
    fn mul_assign(&mut self, other: Numeric) {
        let result = Mul::mul(self as &Numeric, &other);
        *self = result;
    }
}

// The main implementation
// &self / &other
impl Div<&Numeric> for &Numeric {
    type Output = Numeric;

    #[inline]
    fn div(self, other: &Numeric) -> Self::Output {
        self.quo(other)
    }
}

// self / &other
impl Div<&Numeric> for Numeric {
    type Output = Numeric;

    #[inline]
    fn div(self, other: &Numeric) -> Self::Output {
        Div::div(&self, other)
    }
}

// &self / other
impl Div<Numeric> for &Numeric {
    type Output = Numeric;

    #[inline]
    fn div(self, other: Numeric) -> Self::Output {
        Div::div(self, &other)
    }
}

// self / other
impl Div<Numeric> for Numeric {
    type Output = Numeric;

    #[inline]
    fn div(self, other: Numeric) -> Self::Output {
        Div::div(&self, &other)
    }
}

// &mut self /= &other
impl DivAssign<&Numeric> for Numeric {
    #[inline]
    fn div_assign(&mut self, other: &Numeric) {
        let result = Div::div(self as &Numeric, other);
        *self = result;
    }
}

// &mut self /= other
impl DivAssign<Numeric> for Numeric {
    #[inline]
    fn div_assign(&mut self, other: Numeric) {
        let result = Div::div(self as &Numeric, &other);
        *self = result;
    }
}

// The main implementation
// &self % &other
impl Rem<&Numeric> for &Numeric {
    type Output = Numeric;

    #[inline]
    fn rem(self, other: &Numeric) -> Self::Output {
        Numeric::rem(self, other)
    }
}

// self % &other
impl Rem<&Numeric> for Numeric {
    type Output = Numeric;

    #[inline]
    fn rem(self, other: &Numeric) -> Self::Output {
        Rem::rem(&self, other)
    }
}

// &self % other
impl Rem<Numeric> for &Numeric {
    type Output = Numeric;

    #[inline]
    fn rem(self, other: Numeric) -> Self::Output {
        Rem::rem(self, &other)
    }
}

// self % other
impl Rem<Numeric> for Numeric {
    type Output = Numeric;

    #[inline]
    fn rem(self, other: Numeric) -> Self::Output {
        Rem::rem(&self, &other)
    }
}

// &mut self %= &other
impl RemAssign<&Numeric> for Numeric {
    #[inline]
    fn rem_assign(&mut self, other: &Numeric) {
        let result = Rem::rem(self as &Numeric, other);
        *self = result;
    }
}

// &mut self %= other
impl RemAssign<Numeric> for Numeric {
    #[inline]
    fn rem_assign(&mut self, other: Numeric) {
        let result = Rem::rem(self as &Numeric, &other);
        *self = result;
    }
}

// The main implementation
// -&self
impl Neg for &Numeric {
    type Output = Numeric;

    #[inline]
    fn neg(self) -> Self::Output {
        let mut result = self.clone();
        if !result.is_nan() && !result.is_zero() {
            result.sign = match result.sign {
                Sign::Positive => Sign::Negative,
                Sign::Negative => Sign::Positive,
                Sign::NaN => Sign::NaN,
            };
        }
        result
    }
}

// -self
impl Neg for Numeric {
    type Output = Numeric;

    #[inline]
    fn neg(self) -> Self::Output {
        Neg::neg(&self)
    }
}

impl PartialEq for Numeric {
    #[inline]
    fn eq(&self, other: &Numeric) -> bool {
        self.cmp_impl(other) == Ordering::Equal
    }
}

impl Eq for Numeric {}

impl PartialOrd for Numeric {
    #[inline]
    fn partial_cmp(&self, other: &Numeric) -> Option<Ordering> {
        Some(self.cmp_impl(other))
    }
}

impl Ord for Numeric {
    #[inline]
    fn cmp(&self, other: &Numeric) -> Ordering {
        self.cmp_impl(other)
    }
}

// Canonical form makes equal values structurally identical, so hashing the
// parts is consistent with the comparator-based equality.
impl Hash for Numeric {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sign.hash(state);
        self.weight.hash(state);
        self.digits.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use crate::Numeric;
    use std::cmp::Ordering;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn numeric(s: &str) -> Numeric {
        s.parse::<Numeric>().unwrap()
    }

    #[test]
    fn operators() {
        let a = numeric("123.456");
        let b = numeric("0.544");

        assert_eq!((&a + &b).to_string(), "124");
        assert_eq!((a.clone() + &b).to_string(), "124");
        assert_eq!((&a + b.clone()).to_string(), "124");
        assert_eq!((a.clone() + b.clone()).to_string(), "124");

        assert_eq!((&a - &b).to_string(), "122.912");
        assert_eq!((&a * numeric("10")).to_string(), "1234.56");
        assert_eq!((numeric("10") / numeric("4")).to_string(), "2.5");
        assert_eq!((numeric("10") % numeric("3")).to_string(), "1");
        assert_eq!((-&a).to_string(), "-123.456");
        assert_eq!((-numeric("-1")).to_string(), "1");
        assert!((-numeric("0")).is_zero());
        assert!((-numeric("NaN")).is_nan());
    }

    #[test]
    fn assign_operators() {
        let mut n = numeric("10");
        n += numeric("5");
        assert_eq!(n.to_string(), "15");
        n -= numeric("3");
        assert_eq!(n.to_string(), "12");
        n *= numeric("2");
        assert_eq!(n.to_string(), "24");
        n /= numeric("8");
        assert_eq!(n.to_string(), "3");
        n %= numeric("2");
        assert_eq!(n.to_string(), "1");
    }

    fn assert_cmp(x: &str, y: &str, expected: Ordering) {
        assert_eq!(numeric(x).cmp(&numeric(y)), expected, "{} ? {}", x, y);
    }

    #[test]
    fn cmp() {
        assert_cmp("0", "0", Ordering::Equal);
        assert_cmp("123.456", "123.456", Ordering::Equal);
        assert_cmp("123.456", "123.457", Ordering::Less);
        assert_cmp("123.457", "123.456", Ordering::Greater);
        assert_cmp("123.456", "0.0000789", Ordering::Greater);
        assert_cmp("0.0000789", "123.456", Ordering::Less);
        assert_cmp("0.000078912345678", "0.0000789", Ordering::Greater);
        assert_cmp("0.00007891", "0.000078912345678", Ordering::Less);
        assert_cmp("123.456", "1.2345678", Ordering::Greater);
        assert_cmp("-1", "1", Ordering::Less);
        assert_cmp("-1", "-2", Ordering::Greater);
        assert_cmp("0", "-1", Ordering::Greater);
        assert_cmp("0", "1", Ordering::Less);

        // NaN equals NaN and sorts above everything else.
        assert_cmp("NaN", "NaN", Ordering::Equal);
        assert_cmp("NaN", "1.2345678", Ordering::Greater);
        assert_cmp("1.2345678", "NaN", Ordering::Less);
        assert_cmp("NaN", "-1", Ordering::Greater);
    }

    #[test]
    fn eq() {
        assert_eq!(numeric("123.456"), numeric("123.456"));
        assert_eq!(numeric("0"), numeric("-0.000"));
        assert_eq!(numeric("NaN"), numeric("NaN"));
        assert_ne!(numeric("1"), numeric("-1"));
        assert_ne!(numeric("1"), numeric("NaN"));
    }

    fn hash_of(n: &Numeric) -> u64 {
        let mut hasher = DefaultHasher::new();
        n.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn hash_consistent_with_eq() {
        let pairs = [("123.456", "123.4560000"), ("0", "-0.0"), ("NaN", "NaN")];
        for (x, y) in pairs.iter() {
            let a = numeric(x);
            let b = numeric(y);
            assert_eq!(a, b);
            assert_eq!(hash_of(&a), hash_of(&b), "{} vs {}", x, y);
        }
    }

    #[test]
    fn sort() {
        let mut values = vec![
            numeric("NaN"),
            numeric("1"),
            numeric("-1"),
            numeric("0"),
            numeric("123.456"),
            numeric("-123.456"),
        ];
        values.sort();
        let sorted: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(sorted, ["-123.456", "-1", "0", "1", "123.456", "NaN"]);
    }
}
