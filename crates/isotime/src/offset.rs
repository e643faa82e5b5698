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

//! UTC offsets: the `Z` / `±hh:mm` designator, and name-to-offset lookup.
//!
//! There is no time zone database here. A [`ZoneResolver`] maps a name to a
//! single fixed offset; [`FixedZones`] is the provided implementation and
//! callers may plug in their own (any `Fn(&str) -> Option<UtcOffset>` works).

use std::collections::HashMap;
use std::fmt::Write;

use once_cell::sync::Lazy;
use time::UtcOffset;

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind};

// Names that always mean UTC.
static UTC_ALIASES: Lazy<HashMap<&'static str, UtcOffset>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for name in ["UTC", "GMT", "UCT", "Z", "Zulu", "Etc/UTC", "Etc/GMT", "Etc/UCT", "Etc/Zulu"] {
        map.insert(name, UtcOffset::UTC);
    }
    map
});

/// Reads a numeric offset `±hh`, `±hhmm` or `±hh:mm` at the cursor.
///
/// The cursor must be on the sign. Hours are limited to 0..=23 and minutes
/// to 0..=59; anything else fails at the sign's position.
pub(crate) fn read_numeric_offset(cursor: &mut Cursor<'_>) -> Result<UtcOffset, ParseError> {
    let start = cursor.pos();
    let negative = match cursor.peek() {
        Some(b'+') => false,
        Some(b'-') => true,
        Some(_) => {
            let c = cursor.current_char().unwrap_or('\u{FFFD}');
            return Err(cursor.error(ParseErrorKind::InvalidTimeZoneIndicator(c)));
        }
        None => return Err(cursor.error(ParseErrorKind::NoTimeZoneIndicator)),
    };
    cursor.bump();

    let hours = cursor.digits(2, "offset hour")?;
    let minutes = if cursor.eat(b':') || cursor.peek_is_digit() {
        cursor.digits(2, "offset minute")?
    } else {
        0
    };
    if hours > 23 || minutes > 59 {
        return Err(cursor.error_at(ParseErrorKind::InvalidOffset, start));
    }

    let sign = if negative { -1 } else { 1 };
    UtcOffset::from_hms(sign * hours as i8, sign * minutes as i8, 0)
        .map_err(|e| cursor.error_at(ParseErrorKind::InvalidComponent(e), start))
}

/// Parses a complete offset designator: `Z`, `z`, `±hh`, `±hhmm` or `±hh:mm`.
///
/// ```
/// use isotime::offset::parse_offset;
/// let offset = parse_offset("-02:58").unwrap();
/// assert_eq!(offset.whole_minutes(), -178);
/// assert!(parse_offset("Z").unwrap().is_utc());
/// ```
///
/// # Errors
///
/// Returns a `ParseError` if the text is empty, malformed, out of range or
/// has anything after the designator.
pub fn parse_offset(text: &str) -> Result<UtcOffset, ParseError> {
    let mut cursor = Cursor::new(text, 0);
    let offset = if cursor.eat(b'Z') || cursor.eat(b'z') {
        UtcOffset::UTC
    } else {
        read_numeric_offset(&mut cursor)?
    };
    if !cursor.is_at_end() {
        return Err(cursor.error(ParseErrorKind::TrailingCharacters));
    }
    Ok(offset)
}

/// Drops the seconds component of an offset. Only minute precision is ever
/// written out, so the fields must be computed at that precision too.
pub(crate) fn truncate_to_minutes(offset: UtcOffset) -> UtcOffset {
    let (hours, minutes, _) = offset.as_hms();
    UtcOffset::from_hms(hours, minutes, 0).unwrap_or(offset)
}

/// Renders an offset as `Z` when it is zero, else as `±hh:mm`.
pub fn format_offset(offset: UtcOffset) -> String {
    let mut out = String::with_capacity(6);
    push_offset(&mut out, offset);
    out
}

pub(crate) fn push_offset(out: &mut String, offset: UtcOffset) {
    let total_minutes = offset.whole_minutes();
    if total_minutes == 0 {
        out.push('Z');
        return;
    }
    let abs = total_minutes.unsigned_abs();
    let sign = if total_minutes < 0 { '-' } else { '+' };
    let _ = write!(out, "{}{:02}:{:02}", sign, abs / 60, abs % 60);
}

/// Maps a zone name or offset id to a fixed UTC offset.
pub trait ZoneResolver {
    fn resolve(&self, name: &str) -> Option<UtcOffset>;
}

impl<F> ZoneResolver for F
where
    F: Fn(&str) -> Option<UtcOffset>,
{
    fn resolve(&self, name: &str) -> Option<UtcOffset> {
        self(name)
    }
}

impl ZoneResolver for HashMap<String, UtcOffset> {
    fn resolve(&self, name: &str) -> Option<UtcOffset> {
        self.get(name).copied()
    }
}

/// A resolver over a table of named fixed offsets.
///
/// Out of the box it knows the UTC aliases (`UTC`, `GMT`, `Etc/UTC`, ...)
/// and offset ids of the form `GMT+hh:mm`, `UTC-hhmm` or a bare `+hh`.
/// Other names have to be registered.
///
/// ```
/// use isotime::offset::{FixedZones, ZoneResolver};
/// use time::macros::offset;
///
/// let zones = FixedZones::new().with_zone("Brazil/East", offset!(-3));
/// assert_eq!(zones.resolve("Brazil/East"), Some(offset!(-3)));
/// assert_eq!(zones.resolve("GMT+05:30"), Some(offset!(+5:30)));
/// assert_eq!(zones.resolve("Mars/Olympus"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedZones {
    zones: HashMap<String, UtcOffset>,
}

impl FixedZones {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers `name`, replacing any previous offset for it.
    pub fn insert<S: Into<String>>(&mut self, name: S, offset: UtcOffset) {
        self.zones.insert(name.into(), offset);
    }

    pub fn with_zone<S: Into<String>>(mut self, name: S, offset: UtcOffset) -> Self {
        self.insert(name, offset);
        self
    }
}

impl ZoneResolver for FixedZones {
    fn resolve(&self, name: &str) -> Option<UtcOffset> {
        if let Some(offset) = self.zones.get(name) {
            return Some(*offset);
        }
        if let Some(offset) = UTC_ALIASES.get(name) {
            return Some(*offset);
        }
        let id = name
            .strip_prefix("GMT")
            .or_else(|| name.strip_prefix("UTC"))
            .unwrap_or(name);
        if !id.starts_with(['+', '-']) {
            return None;
        }
        parse_offset(id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn parse_offset_accepts_all_layouts() {
        assert_eq!(parse_offset("+03:00").unwrap(), offset!(+3));
        assert_eq!(parse_offset("+0300").unwrap(), offset!(+3));
        assert_eq!(parse_offset("+03").unwrap(), offset!(+3));
        assert_eq!(parse_offset("-02:58").unwrap(), offset!(-2:58));
        assert_eq!(parse_offset("z").unwrap(), UtcOffset::UTC);
        assert_eq!(parse_offset("-00:00").unwrap(), UtcOffset::UTC);
    }

    #[test]
    fn parse_offset_rejects_out_of_range() {
        let err = parse_offset("+24:00").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::InvalidOffset);
        assert_eq!(err.position(), 0);
        assert_eq!(parse_offset("-05:60").unwrap_err().kind(), ParseErrorKind::InvalidOffset);
    }

    #[test]
    fn parse_offset_rejects_malformed() {
        assert_eq!(
            parse_offset("").unwrap_err().kind(),
            ParseErrorKind::NoTimeZoneIndicator
        );
        assert_eq!(
            parse_offset("03:00").unwrap_err().kind(),
            ParseErrorKind::InvalidTimeZoneIndicator('0')
        );
        assert_eq!(
            parse_offset("+3").unwrap_err().kind(),
            ParseErrorKind::UnexpectedEnd { expected: "offset hour" }
        );
        assert_eq!(
            parse_offset("+03:0").unwrap_err().kind(),
            ParseErrorKind::UnexpectedEnd { expected: "offset minute" }
        );
        let err = parse_offset("+03:00x").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::TrailingCharacters);
        assert_eq!(err.position(), 6);
    }

    #[test]
    fn format_offset_uses_z_for_zero() {
        assert_eq!(format_offset(UtcOffset::UTC), "Z");
        assert_eq!(format_offset(offset!(-3)), "-03:00");
        assert_eq!(format_offset(offset!(+5:45)), "+05:45");
        assert_eq!(format_offset(UtcOffset::from_hms(0, -30, 0).unwrap()), "-00:30");
    }

    #[test]
    fn truncate_drops_seconds_only() {
        assert_eq!(truncate_to_minutes(offset!(+5:30:15)), offset!(+5:30));
        let seconds_only = UtcOffset::from_hms(0, 0, -45).unwrap();
        assert_eq!(truncate_to_minutes(seconds_only), UtcOffset::UTC);
        assert_eq!(truncate_to_minutes(offset!(-2:58)), offset!(-2:58));
    }

    #[test]
    fn fixed_zones_resolves_aliases_ids_and_registered_names() {
        let mut zones = FixedZones::new();
        zones.insert("Asia/Kolkata", offset!(+5:30));

        assert_eq!(zones.resolve("Etc/UTC"), Some(UtcOffset::UTC));
        assert_eq!(zones.resolve("Asia/Kolkata"), Some(offset!(+5:30)));
        assert_eq!(zones.resolve("GMT-0300"), Some(offset!(-3)));
        assert_eq!(zones.resolve("UTC+01"), Some(offset!(+1)));
        assert_eq!(zones.resolve("-04:00"), Some(offset!(-4)));
        assert_eq!(zones.resolve("GMTZ"), None);
        assert_eq!(zones.resolve("GMT+25:00"), None);
        assert_eq!(zones.resolve("America/Sao_Paulo"), None);
    }

    #[test]
    fn registered_names_shadow_aliases() {
        let zones = FixedZones::new().with_zone("GMT", offset!(+1));
        assert_eq!(zones.resolve("GMT"), Some(offset!(+1)));
    }

    #[test]
    fn closures_and_maps_are_resolvers() {
        let closure = |name: &str| (name == "X").then_some(offset!(+2));
        assert_eq!(closure.resolve("X"), Some(offset!(+2)));

        let mut map = HashMap::new();
        map.insert("Y".to_string(), offset!(-7));
        assert_eq!(map.resolve("Y"), Some(offset!(-7)));
        assert_eq!(map.resolve("X"), None);
    }
}
