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

//! Numeric error definitions.

use std::error::Error;
use std::fmt;

/// An error which can be returned when parsing a numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNumericError {
    kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseErrorKind {
    Empty,
    Invalid,
    Overflow,
}

impl ParseNumericError {
    #[inline]
    pub(crate) const fn new(kind: ParseErrorKind) -> Self {
        ParseNumericError { kind }
    }

    #[inline]
    pub(crate) const fn empty() -> Self {
        Self::new(ParseErrorKind::Empty)
    }

    #[inline]
    pub(crate) const fn invalid() -> Self {
        Self::new(ParseErrorKind::Invalid)
    }

    #[inline]
    pub(crate) const fn overflow() -> Self {
        Self::new(ParseErrorKind::Overflow)
    }
}

impl fmt::Display for ParseNumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.kind {
            ParseErrorKind::Empty => write!(f, "cannot parse numeric from empty string"),
            ParseErrorKind::Invalid => write!(f, "invalid numeric literal"),
            ParseErrorKind::Overflow => write!(f, "value overflows numeric format"),
        }
    }
}

impl Error for ParseNumericError {}

/// An error which can be returned when decoding a numeric from its binary
/// representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeNumericError {
    kind: DecodeErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DecodeErrorKind {
    InvalidLength,
    InvalidSign,
    NanWithDigits,
    DigitOutOfRange,
}

impl DecodeNumericError {
    #[inline]
    pub(crate) const fn new(kind: DecodeErrorKind) -> Self {
        DecodeNumericError { kind }
    }

    #[inline]
    pub(crate) const fn invalid_length() -> Self {
        Self::new(DecodeErrorKind::InvalidLength)
    }

    #[inline]
    pub(crate) const fn invalid_sign() -> Self {
        Self::new(DecodeErrorKind::InvalidSign)
    }

    #[inline]
    pub(crate) const fn nan_with_digits() -> Self {
        Self::new(DecodeErrorKind::NanWithDigits)
    }

    #[inline]
    pub(crate) const fn digit_out_of_range() -> Self {
        Self::new(DecodeErrorKind::DigitOutOfRange)
    }
}

impl fmt::Display for DecodeNumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.kind {
            DecodeErrorKind::InvalidLength => {
                write!(f, "binary length is inconsistent with the digit count")
            }
            DecodeErrorKind::InvalidSign => write!(f, "invalid sign word in binary numeric"),
            DecodeErrorKind::NanWithDigits => write!(f, "NaN numeric must not carry digits"),
            DecodeErrorKind::DigitOutOfRange => {
                write!(f, "binary numeric digit is out of range")
            }
        }
    }
}

impl Error for DecodeNumericError {}
