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

//! Single-pass ISO 8601 parser.
//!
//! Accepted layout, left to right:
//!
//! ```text
//! YYYY [[-]MM [[-]DD]] [T hh [:]mm [[:]ss [(.|,)f{1,9}]]] [Z | z | ±hh[[:]mm]]
//! ```
//!
//! A separator, when present, makes the following field mandatory. A time of
//! day needs the full date and must be followed by a time zone indicator.
//! Date-only input without an indicator is interpreted at
//! [`ParseOptions::default_offset`]. Fractional seconds are truncated or
//! padded to milliseconds.

use time::{Date, Duration, Month, PrimitiveDateTime, Time, UtcOffset};

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};
use crate::instant::Instant;
use crate::offset::read_numeric_offset;
use crate::options::{FieldMode, ParseOptions};

/// Result of a cursor-based parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed {
    pub instant: Instant,
    /// Byte offset just past the last consumed character.
    pub end: usize,
}

/// A parsed number together with where it started, for error positions.
#[derive(Debug, Clone, Copy)]
struct Field {
    value: u32,
    at: usize,
}

impl Field {
    fn absent(value: u32, at: usize) -> Self {
        Field { value, at }
    }
}

#[derive(Debug, Clone, Copy)]
struct Fields {
    year: Field,
    month: Field,
    day: Field,
    hour: Field,
    minute: Field,
    second: Field,
    millisecond: u32,
}

/// Parses the whole of `text` with default options.
///
/// ```
/// use isotime::parse;
/// let instant = parse("2018-06-25T00:00:00-03:00").unwrap();
/// assert_eq!(instant, parse("2018-06-25T03:00:00Z").unwrap());
/// ```
///
/// # Errors
///
/// Returns a `ParseError` on any grammar violation, out-of-range component,
/// or trailing input.
pub fn parse(text: &str) -> Result<Instant, ParseError> {
    parse_with(text, &ParseOptions::default())
}

/// Parses the whole of `text` with the given options.
///
/// # Errors
///
/// As [`parse_at`], plus `TrailingCharacters` if input remains after the
/// date-time.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Instant, ParseError> {
    let parsed = parse_at(text, 0, options)?;
    if parsed.end != text.len() {
        let err = ParseError::new(ParseErrorKind::TrailingCharacters, parsed.end, text);
        tracing::debug!(position = err.position(), kind = %err.kind(), "iso8601 parse failed");
        return Err(err);
    }
    Ok(parsed.instant)
}

/// Parses a date-time starting at byte offset `start`.
///
/// On success returns the instant and the offset just past the last consumed
/// character; anything after that is left for the caller. Nothing is
/// consumed on failure and the caller must restart.
///
/// ```
/// use isotime::{parse_at, ParseOptions};
/// let text = "at 2018-06-25T01:02:03.7Z, then more";
/// let parsed = parse_at(text, 3, &ParseOptions::default()).unwrap();
/// assert_eq!(&text[parsed.end..], ", then more");
/// assert_eq!(parsed.instant.as_unix_millis() % 1000, 700);
/// ```
///
/// # Errors
///
/// Returns a `ParseError` carrying the byte offset where the violation was
/// detected.
pub fn parse_at(text: &str, start: usize, options: &ParseOptions) -> Result<Parsed, ParseError> {
    let result = if text.is_char_boundary(start) {
        read_date_time(&mut Cursor::new(text, start), options)
    } else {
        Err(ParseError::new(ParseErrorKind::StartOutOfBounds, start, text))
    };
    match &result {
        Ok(parsed) => {
            tracing::trace!(
                start,
                end = parsed.end,
                millis = parsed.instant.as_unix_millis(),
                "iso8601 parsed"
            );
        }
        Err(e) => {
            tracing::debug!(position = e.position(), kind = %e.kind(), "iso8601 parse failed");
        }
    }
    result
}

fn read_date_time(cursor: &mut Cursor<'_>, options: &ParseOptions) -> Result<Parsed, ParseError> {
    let year = Field {
        at: cursor.pos(),
        value: cursor.digits(4, "year")?,
    };
    let mut month = Field::absent(1, cursor.pos());
    let mut day = Field::absent(1, cursor.pos());
    let mut full_date = false;

    if cursor.eat(b'-') || cursor.peek_is_digit() {
        month = Field {
            at: cursor.pos(),
            value: cursor.digits(2, "month")?,
        };
        if cursor.eat(b'-') || cursor.peek_is_digit() {
            day = Field {
                at: cursor.pos(),
                value: cursor.digits(2, "day")?,
            };
            full_date = true;
        }
    }

    let mut fields = Fields {
        year,
        month,
        day,
        hour: Field::absent(0, cursor.pos()),
        minute: Field::absent(0, cursor.pos()),
        second: Field::absent(0, cursor.pos()),
        millisecond: 0,
    };

    let has_time = full_date && cursor.eat(b'T');
    if has_time {
        read_time(cursor, &mut fields)?;
    }

    let offset = match cursor.peek() {
        None if has_time => return Err(cursor.error(ParseErrorKind::NoTimeZoneIndicator)),
        None => options.default_offset,
        Some(b'Z' | b'z') => {
            cursor.bump();
            UtcOffset::UTC
        }
        Some(b'+' | b'-') => read_numeric_offset(cursor)?,
        Some(_) => {
            let c = cursor.current_char().unwrap_or('\u{FFFD}');
            return Err(cursor.error(ParseErrorKind::InvalidTimeZoneIndicator(c)));
        }
    };

    let local = match options.fields {
        FieldMode::Strict => strict_date_time(cursor, &fields)?,
        FieldMode::Lenient => lenient_date_time(cursor, &fields)?,
    };
    let instant = Instant::try_from(local.assume_offset(offset))
        .map_err(|_| cursor.error_at(ParseErrorKind::OutOfRange, fields.year.at))?;

    Ok(Parsed {
        instant,
        end: cursor.pos(),
    })
}

fn read_time(cursor: &mut Cursor<'_>, fields: &mut Fields) -> Result<(), ParseError> {
    fields.hour = Field {
        at: cursor.pos(),
        value: cursor.digits(2, "hour")?,
    };
    cursor.eat(b':');
    fields.minute = Field {
        at: cursor.pos(),
        value: cursor.digits(2, "minute")?,
    };
    if !(cursor.eat(b':') || cursor.peek_is_digit()) {
        return Ok(());
    }
    fields.second = Field {
        at: cursor.pos(),
        value: cursor.digits(2, "second")?,
    };
    if cursor.eat(b'.') || cursor.eat(b',') {
        fields.millisecond = read_fraction(cursor)?;
    }
    Ok(())
}

/// Reads 1..=9 fraction digits as milliseconds: `7` is 700, `73` is 730,
/// and digits past the third are dropped.
fn read_fraction(cursor: &mut Cursor<'_>) -> Result<u32, ParseError> {
    let start = cursor.pos();
    let digits = cursor.digit_run();
    if digits.is_empty() {
        return Err(match cursor.current_char() {
            Some(found) => cursor.error(ParseErrorKind::ExpectedDigit { found }),
            None => cursor.error(ParseErrorKind::UnexpectedEnd {
                expected: "fractional seconds",
            }),
        });
    }
    if digits.len() > 9 {
        return Err(cursor.error_at(ParseErrorKind::TooManyFractionDigits, start + 9));
    }
    let millis = digits
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'));
    Ok(millis)
}

fn strict_date_time(cursor: &Cursor<'_>, f: &Fields) -> Result<PrimitiveDateTime, ParseError> {
    let month = Month::try_from(f.month.value as u8)
        .map_err(|e| cursor.error_at(ParseErrorKind::InvalidComponent(e), f.month.at))?;
    let date = Date::from_calendar_date(f.year.value as i32, month, f.day.value as u8)
        .map_err(|e| cursor.error_at(ParseErrorKind::InvalidComponent(e), f.day.at))?;

    // up to three leap seconds collapse onto the last regular second
    let second = match f.second.value {
        60..=62 => 59,
        s => s,
    };
    let time = Time::from_hms_milli(
        f.hour.value as u8,
        f.minute.value as u8,
        second as u8,
        f.millisecond as u16,
    )
    .map_err(|e| {
        let at = match e.name() {
            "hour" => f.hour.at,
            "minute" => f.minute.at,
            _ => f.second.at,
        };
        cursor.error_at(ParseErrorKind::InvalidComponent(e), at)
    })?;

    Ok(PrimitiveDateTime::new(date, time))
}

fn lenient_date_time(cursor: &Cursor<'_>, f: &Fields) -> Result<PrimitiveDateTime, ParseError> {
    let out_of_range = || cursor.error_at(ParseErrorKind::OutOfRange, f.year.at);

    // month 0 is December of the previous year, 13 is January of the next
    let months = f.month.value as i32 - 1;
    let year = f.year.value as i32 + months.div_euclid(12);
    let month = Month::try_from((months.rem_euclid(12) + 1) as u8).map_err(|_| out_of_range())?;
    let first = Date::from_calendar_date(year, month, 1).map_err(|_| out_of_range())?;

    let carry = Duration::days(f.day.value as i64 - 1)
        + Duration::hours(f.hour.value as i64)
        + Duration::minutes(f.minute.value as i64)
        + Duration::seconds(f.second.value as i64)
        + Duration::milliseconds(f.millisecond as i64);

    first.midnight().checked_add(carry).ok_or_else(out_of_range)
}
