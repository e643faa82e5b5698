/*
 * Copyright (C) 2025 Movibase Platform Private Limited
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Error types for ISO 8601 parsing, instant construction and zone lookup.

use std::error::Error;
use std::fmt;

/// What went wrong while parsing an ISO 8601 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended while a mandatory field was still expected.
    UnexpectedEnd {
        /// Name of the field that was expected.
        expected: &'static str,
    },
    /// A non-digit character was found inside a fixed-width number.
    ExpectedDigit {
        /// The offending character.
        found: char,
    },
    /// A time of day was present but the input ended before a time zone indicator.
    NoTimeZoneIndicator,
    /// Something other than `Z`, `+` or `-` appeared where a time zone indicator belongs.
    InvalidTimeZoneIndicator(char),
    /// A numeric offset had an hour above 23 or a minute above 59.
    InvalidOffset,
    /// More than nine digits followed the fractional second separator.
    TooManyFractionDigits,
    /// A calendar component was out of range (strict field mode only).
    InvalidComponent(time::error::ComponentRange),
    /// The resulting instant does not fit the supported range.
    OutOfRange,
    /// A whole-input parse left characters unconsumed.
    TrailingCharacters,
    /// The start offset was past the end of the input or not on a character boundary.
    StartOutOfBounds,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            ParseErrorKind::ExpectedDigit { found } => {
                write!(f, "Expected digit, found '{}'", found)
            }
            ParseErrorKind::NoTimeZoneIndicator => write!(f, "No time zone indicator"),
            ParseErrorKind::InvalidTimeZoneIndicator(c) => {
                write!(f, "Invalid time zone indicator '{}'", c)
            }
            ParseErrorKind::InvalidOffset => write!(f, "Invalid time zone offset"),
            ParseErrorKind::TooManyFractionDigits => {
                write!(f, "Too many fractional second digits")
            }
            ParseErrorKind::InvalidComponent(e) => {
                write!(f, "Invalid value for {} ({})", e.name(), e)
            }
            ParseErrorKind::OutOfRange => write!(f, "Date is out of the supported range"),
            ParseErrorKind::TrailingCharacters => write!(f, "Unexpected trailing characters"),
            ParseErrorKind::StartOutOfBounds => {
                write!(f, "Start offset is past the end of the input")
            }
        }
    }
}

/// A failed parse: the kind of failure, the byte offset where it was
/// detected and the input that was being parsed.
///
/// Every grammar character is ASCII, so for any input that is well formed up
/// to the failure the byte offset is also the character index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    position: usize,
    input: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, position: usize, input: &str) -> Self {
        ParseError {
            kind,
            position,
            input: input.to_string(),
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Byte offset into the input at which the failure was detected.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to parse date {:?} at position {}: {}",
            self.input, self.position, self.kind
        )
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidComponent(e) => Some(e),
            _ => None,
        }
    }
}

/// Raised when a millisecond count lies outside [`Instant::MIN`]..=[`Instant::MAX`].
///
/// [`Instant::MIN`]: crate::Instant::MIN
/// [`Instant::MAX`]: crate::Instant::MAX
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeError {
    pub(crate) millis: i128,
}

impl RangeError {
    /// The rejected value, in milliseconds since the Unix epoch.
    pub fn millis(&self) -> i128 {
        self.millis
    }
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timestamp {} ms is outside the supported range",
            self.millis
        )
    }
}

impl Error for RangeError {}

/// Raised when a zone name cannot be resolved to a UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownZone(pub String);

impl fmt::Display for UnknownZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown time zone {:?}", self.0)
    }
}

impl Error for UnknownZone {}
