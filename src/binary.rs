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

//! Numeric binary representation.
//!
//! This is the layout PostgreSQL uses for `numeric` in the binary protocol:
//! a header of four big-endian 16-bit words (number of digits, weight, sign
//! and display scale) followed by the base-10000 digits as big-endian `i16`
//! values.

use crate::div::scale_abs;
use crate::error::DecodeNumericError;
use crate::{trim_abs, Numeric, Sign, NBASE};

// Interpretation of the sign word.
const NUMERIC_POS: u16 = 0x0000;
const NUMERIC_NEG: u16 = 0x4000;
const NUMERIC_NAN: u16 = 0xC000;

const NUMERIC_HEADER_LEN: usize = 8;

// PostgreSQL stores the display scale in 14 bits, so an emulated scale
// deeper than this saturates at the ceiling.
const NUMERIC_DSCALE_MAX: i32 = 0x3FFF;

impl Numeric {
    /// Encodes the value into its binary representation.
    ///
    /// There is no display scale stored internally, so the dscale word is
    /// emulated from the stored digits the same way [`Numeric::scale`]
    /// reports it, saturating at the protocol's 14-bit dscale ceiling.
    pub fn to_binary(&self) -> Vec<u8> {
        let ndigits = self.digits.len();
        debug_assert!(ndigits <= i16::max_value() as usize);

        let sign = match self.sign {
            Sign::Positive => NUMERIC_POS,
            Sign::Negative => NUMERIC_NEG,
            Sign::NaN => NUMERIC_NAN,
        };
        let dscale = scale_abs(&self.digits, self.weight as i32).min(NUMERIC_DSCALE_MAX) as i16;

        let mut buf = Vec::with_capacity(NUMERIC_HEADER_LEN + 2 * ndigits);
        buf.extend_from_slice(&(ndigits as i16).to_be_bytes());
        buf.extend_from_slice(&self.weight.to_be_bytes());
        buf.extend_from_slice(&sign.to_be_bytes());
        buf.extend_from_slice(&dscale.to_be_bytes());
        for &digit in &self.digits {
            buf.extend_from_slice(&digit.to_be_bytes());
        }

        buf
    }

    /// Decodes a value from its binary representation.
    ///
    /// The dscale word is read and ignored; the effective scale is derived
    /// from the digits. Digits are canonicalized, so a record carrying
    /// redundant zero digits decodes to the trimmed form.
    pub fn from_binary(bytes: &[u8]) -> Result<Numeric, DecodeNumericError> {
        if bytes.len() < NUMERIC_HEADER_LEN {
            return Err(DecodeNumericError::invalid_length());
        }

        let ndigits = i16::from_be_bytes([bytes[0], bytes[1]]);
        let weight = i16::from_be_bytes([bytes[2], bytes[3]]);
        let sign_word = u16::from_be_bytes([bytes[4], bytes[5]]);

        if ndigits < 0 || bytes.len() != NUMERIC_HEADER_LEN + ndigits as usize * 2 {
            return Err(DecodeNumericError::invalid_length());
        }

        let sign = match sign_word {
            NUMERIC_POS => Sign::Positive,
            NUMERIC_NEG => Sign::Negative,
            NUMERIC_NAN => {
                if ndigits != 0 {
                    return Err(DecodeNumericError::nan_with_digits());
                }
                // Servers have been seen to send NaN with a nonzero
                // weight; normalize it away.
                return Ok(Numeric::nan());
            }
            _ => return Err(DecodeNumericError::invalid_sign()),
        };

        let mut digits = Vec::with_capacity(ndigits as usize);
        for chunk in bytes[NUMERIC_HEADER_LEN..].chunks_exact(2) {
            let digit = i16::from_be_bytes([chunk[0], chunk[1]]);
            if digit < 0 || digit as i32 >= NBASE {
                return Err(DecodeNumericError::digit_out_of_range());
            }
            digits.push(digit);
        }

        let (digits, weight) = trim_abs(digits, weight as i32);
        Ok(Numeric::from_magnitude(
            digits,
            weight,
            sign == Sign::Negative,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(s: &str) -> Numeric {
        s.parse::<Numeric>().unwrap()
    }

    fn assert_round_trip(s: &str) {
        let n = numeric(s);
        let decoded = Numeric::from_binary(&n.to_binary()).unwrap();
        assert_eq!(decoded, n, "{}", s);
        assert_eq!(decoded.to_string(), s, "{}", s);
    }

    #[test]
    fn round_trip() {
        let values = [
            "NaN",
            "0",
            "1",
            "-1",
            "123.456",
            "-123.456",
            "10000000000",
            "0.000000000001",
            "1234567890.12425345132423143452",
            "478997845379834578934789978543897534897978324897543789547856896548905649828940569346523457987.7734578789365789657894657895643789564786547865478657865798454697878956234789",
        ];
        for v in values.iter() {
            assert_round_trip(v);
        }
    }

    #[test]
    fn encode() {
        assert_eq!(
            numeric("1").to_binary(),
            [0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]
        );
        assert_eq!(
            numeric("-1001").to_binary(),
            [0x00, 0x01, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x03, 0xE9]
        );
        // Emulated dscale covers the full last digit: 123.456 stores
        // digits 123 and 4560, so dscale is 4.
        assert_eq!(
            numeric("123.456").to_binary(),
            [0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00, 0x7B, 0x11, 0xD0]
        );
        // 0.001 is a single digit 10 at weight -1.
        assert_eq!(
            numeric("0.001").to_binary(),
            [0x00, 0x01, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x04, 0x00, 0x0A]
        );
        assert_eq!(
            numeric("0").to_binary(),
            [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            numeric("NaN").to_binary(),
            [0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn encode_saturates_deep_dscale() {
        // The emulated scale of this value exceeds the 14-bit dscale
        // field; the emitted word saturates instead of wrapping negative.
        let n = format!("0.{}1", "0".repeat(40000))
            .parse::<Numeric>()
            .unwrap();
        assert_eq!(n.scale(), 40004);

        let bytes = n.to_binary();
        let dscale = i16::from_be_bytes([bytes[6], bytes[7]]);
        assert_eq!(dscale, 0x3FFF);

        // The digits and weight are unaffected, so the value still
        // round-trips.
        assert_eq!(Numeric::from_binary(&bytes).unwrap(), n);
    }

    #[test]
    fn decode_canonicalizes() {
        // Redundant zero digits around the value are trimmed, adjusting
        // the weight.
        let bytes = [
            0x00, 0x03, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, // header
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, // digits 0, 1, 0
        ];
        let n = Numeric::from_binary(&bytes).unwrap();
        assert_eq!(n.digits(), &[1]);
        assert_eq!(n.weight(), 1);
        assert_eq!(n.to_string(), "10000");

        // NaN with an unexpected weight is normalized.
        let bytes = [0x00, 0x00, 0x00, 0x63, 0xC0, 0x00, 0x00, 0x00];
        let n = Numeric::from_binary(&bytes).unwrap();
        assert!(n.is_nan());
        assert_eq!(n.weight(), 0);

        // The dscale word is ignored.
        let bytes = [0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x30, 0x39, 0x00, 0x07];
        let n = Numeric::from_binary(&bytes).unwrap();
        assert_eq!(n.to_string(), "7");
    }

    #[test]
    fn decode_errors() {
        // Too short for a header.
        assert_eq!(
            Numeric::from_binary(&[0x00, 0x01]),
            Err(DecodeNumericError::invalid_length())
        );
        // Length inconsistent with the digit count.
        assert_eq!(
            Numeric::from_binary(&[0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]),
            Err(DecodeNumericError::invalid_length())
        );
        // Negative digit count.
        assert_eq!(
            Numeric::from_binary(&[0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
            Err(DecodeNumericError::invalid_length())
        );
        // Unknown sign word.
        assert_eq!(
            Numeric::from_binary(&[0x00, 0x00, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00]),
            Err(DecodeNumericError::invalid_sign())
        );
        // NaN must not carry digits.
        assert_eq!(
            Numeric::from_binary(&[
                0x00, 0x01, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x01
            ]),
            Err(DecodeNumericError::nan_with_digits())
        );
        // Digit out of range: 10000.
        assert_eq!(
            Numeric::from_binary(&[
                0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x27, 0x10
            ]),
            Err(DecodeNumericError::digit_out_of_range())
        );
        // Digit out of range: negative.
        assert_eq!(
            Numeric::from_binary(&[
                0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF
            ]),
            Err(DecodeNumericError::digit_out_of_range())
        );
    }
}
