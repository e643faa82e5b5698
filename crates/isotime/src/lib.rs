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

//! Conversion between millisecond [`Instant`]s and ISO 8601 text.
//!
//! [`format`] renders an instant as `YYYY-MM-DDThh:mm:ss[.sss](Z|±hh:mm)`.
//! [`parse`] and friends read that layout back, along with the common
//! variations: missing separators, reduced-precision dates, `,` as the
//! decimal sign, 1 to 9 fraction digits and `±hh`, `±hhmm` or `±hh:mm`
//! offsets.
//!
//! ```
//! use isotime::{format, parse, Instant};
//! use time::macros::offset;
//!
//! let instant = Instant::from_unix_millis(1_530_209_176_870).unwrap();
//! let text = format(instant, true, offset!(-3));
//! assert_eq!(text, "2018-06-28T15:06:16.870-03:00");
//! assert_eq!(parse(&text).unwrap(), instant);
//! ```

mod cursor;
pub mod error;
pub mod format;
pub mod instant;
pub mod offset;
pub mod options;
pub mod parse;
pub mod serde;

pub use error::{ParseError, ParseErrorKind, RangeError, UnknownZone};
pub use format::{format, format_in_zone, format_millis, format_utc};
pub use instant::Instant;
pub use offset::{FixedZones, ZoneResolver, format_offset, parse_offset};
pub use options::{FieldMode, ParseOptions};
pub use parse::{Parsed, parse, parse_at, parse_with};
pub use time::UtcOffset;
