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

//! Fixed-layout ISO 8601 rendering of [`Instant`]s.
//!
//! Output is always `YYYY-MM-DDThh:mm:ss`, optionally followed by `.sss`, and
//! terminated by `Z` or `±hh:mm`.

use std::fmt::Write;

use once_cell::sync::Lazy;
use time::format_description::{self, BorrowedFormatItem};
use time::{OffsetDateTime, UtcOffset};

use crate::error::UnknownZone;
use crate::instant::Instant;
use crate::offset::{ZoneResolver, push_offset, truncate_to_minutes};

// "YYYY-MM-DDThh:mm:ss" + ".sss" + "+hh:mm"
const MAX_LEN: usize = 19 + 4 + 6;

static SECONDS_LAYOUT: Lazy<Option<Vec<BorrowedFormatItem<'static>>>> = Lazy::new(|| {
    format_description::parse("[year]-[month]-[day]T[hour]:[minute]:[second]").ok()
});

/// Formats `instant` as ISO 8601 in the given offset's local time.
///
/// Offsets are written, and applied, at minute precision. Zero renders as
/// `Z`.
///
/// ```
/// use isotime::{format, Instant};
/// use time::macros::offset;
///
/// let instant = Instant::from_unix_millis(1_530_209_176_870).unwrap();
/// assert_eq!(format(instant, true, offset!(UTC)), "2018-06-28T18:06:16.870Z");
/// assert_eq!(format(instant, true, offset!(-3)), "2018-06-28T15:06:16.870-03:00");
/// assert_eq!(format(instant, false, offset!(-3)), "2018-06-28T15:06:16-03:00");
/// ```
pub fn format(instant: Instant, with_millis: bool, offset: UtcOffset) -> String {
    let offset = truncate_to_minutes(offset);
    let local = instant.to_offset(offset);

    let mut out = String::with_capacity(MAX_LEN);
    push_seconds(&mut out, &local);
    if with_millis {
        let _ = write!(out, ".{:03}", local.millisecond());
    }
    push_offset(&mut out, offset);
    out
}

/// Writes `YYYY-MM-DDThh:mm:ss`. The year is always four digits since
/// `Instant` stays inside 0000..=9999 under any offset.
fn push_seconds(out: &mut String, local: &OffsetDateTime) {
    if let Some(layout) = SECONDS_LAYOUT.as_deref() {
        match local.format(layout) {
            Ok(base) => {
                out.push_str(&base);
                return;
            }
            Err(e) => tracing::debug!(error = %e, "layout formatting failed, writing fields"),
        }
    }
    let _ = write!(
        out,
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        local.year(),
        u8::from(local.month()),
        local.day(),
        local.hour(),
        local.minute(),
        local.second()
    );
}

/// Formats in UTC without milliseconds.
pub fn format_utc(instant: Instant) -> String {
    format(instant, false, UtcOffset::UTC)
}

/// Formats in UTC, with or without milliseconds.
pub fn format_millis(instant: Instant, with_millis: bool) -> String {
    format(instant, with_millis, UtcOffset::UTC)
}

/// Formats in the offset that `resolver` gives for `zone`.
///
/// # Errors
///
/// Returns `UnknownZone` if the resolver does not know the name.
pub fn format_in_zone<R>(
    instant: Instant,
    with_millis: bool,
    zone: &str,
    resolver: &R,
) -> Result<String, UnknownZone>
where
    R: ZoneResolver + ?Sized,
{
    let offset = resolver
        .resolve(zone)
        .ok_or_else(|| UnknownZone(zone.to_string()))?;
    Ok(format(instant, with_millis, offset))
}
