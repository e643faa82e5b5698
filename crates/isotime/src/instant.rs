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

//! Millisecond-resolution instants.
//!
//! An [`Instant`] is an absolute point in time stored as a signed count of
//! milliseconds since the Unix epoch. It carries no offset; offsets only
//! matter when an instant is broken down into calendar fields, which is
//! delegated to `time::OffsetDateTime`.

use std::fmt;

use time::{Duration, OffsetDateTime, UtcOffset};

use crate::error::RangeError;

/// An absolute point in time with millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

impl Instant {
    /// 1970-01-01T00:00:00.000Z
    pub const UNIX_EPOCH: Instant = Instant(0);

    /// 0000-01-02T00:00:00.000Z
    ///
    /// One day inside years 0000..=9999, so that the local year stays four
    /// digits under any `UtcOffset` and every formatted instant parses back.
    pub const MIN: Instant = Instant(-62_167_132_800_000);

    /// 9999-12-30T23:59:59.999Z
    pub const MAX: Instant = Instant(253_402_214_399_999);

    /// Builds an instant from milliseconds since the Unix epoch.
    ///
    /// ```
    /// use isotime::Instant;
    /// let instant = Instant::from_unix_millis(1_530_209_176_870).unwrap();
    /// assert_eq!(instant.as_unix_millis(), 1_530_209_176_870);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `RangeError` if `millis` is outside `MIN..=MAX`.
    pub fn from_unix_millis(millis: i64) -> Result<Instant, RangeError> {
        if millis < Self::MIN.0 || millis > Self::MAX.0 {
            return Err(RangeError {
                millis: millis as i128,
            });
        }
        Ok(Instant(millis))
    }

    pub fn as_unix_millis(self) -> i64 {
        self.0
    }

    /// Breaks the instant down into calendar fields at the given offset.
    pub fn to_offset(self, offset: UtcOffset) -> OffsetDateTime {
        // cannot overflow: MIN/MAX keep a margin wider than any UtcOffset
        (OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(self.0)).to_offset(offset)
    }
}

impl TryFrom<OffsetDateTime> for Instant {
    type Error = RangeError;

    /// Sub-millisecond precision is truncated toward negative infinity.
    fn try_from(odt: OffsetDateTime) -> Result<Self, Self::Error> {
        let millis = odt.unix_timestamp_nanos().div_euclid(1_000_000);
        match i64::try_from(millis) {
            Ok(millis) => Instant::from_unix_millis(millis),
            Err(_) => Err(RangeError { millis }),
        }
    }
}

impl From<Instant> for OffsetDateTime {
    fn from(instant: Instant) -> Self {
        instant.to_offset(UtcOffset::UTC)
    }
}

impl fmt::Display for Instant {
    /// Canonical UTC form with milliseconds, e.g. `2018-06-28T18:06:16.870Z`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::format(*self, true, UtcOffset::UTC))
    }
}
