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

//! Parser configuration.
//!
//! Nothing here is read from process-wide state: the offset used for
//! date-only strings is an explicit field, and [`ParseOptions::system`] reads
//! the host's local offset exactly once, when it is called.

use serde::{Deserialize, Serialize};
use time::UtcOffset;

/// How calendar components outside their natural range are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMode {
    /// Reject out-of-range components (hour 24, minute 60, February 30, ...).
    /// Leap seconds 60..=62 are clamped to 59.
    #[default]
    Strict,
    /// Carry excess into the next larger field, so `T61:60:62` on June 25
    /// becomes 14:01:02 on June 27 and month 13 becomes January of the
    /// following year.
    Lenient,
}

/// Options for [`parse_at`](crate::parse::parse_at) and
/// [`parse_with`](crate::parse::parse_with).
///
/// Deserializes from a config map such as
/// `{"default_offset": "-03:00", "fields": "lenient"}`; missing keys take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Offset applied to date-only input that carries no indicator.
    #[serde(with = "crate::serde::offset")]
    pub default_offset: UtcOffset,
    pub fields: FieldMode,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            default_offset: UtcOffset::UTC,
            fields: FieldMode::Strict,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Options whose default offset is the host's current local offset.
    ///
    /// Falls back to UTC when the local offset cannot be determined, which
    /// `time` reports for multi-threaded processes on some Unix platforms.
    pub fn system() -> Self {
        let default_offset = match UtcOffset::current_local_offset() {
            Ok(offset) => offset,
            Err(e) => {
                tracing::warn!(error = %e, "local offset is indeterminate, using UTC");
                UtcOffset::UTC
            }
        };
        ParseOptions {
            default_offset,
            ..Default::default()
        }
    }

    pub fn with_default_offset(mut self, offset: UtcOffset) -> Self {
        self.default_offset = offset;
        self
    }

    pub fn with_fields(mut self, fields: FieldMode) -> Self {
        self.fields = fields;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn defaults_are_utc_and_strict() {
        let options = ParseOptions::new();
        assert_eq!(options.default_offset, UtcOffset::UTC);
        assert_eq!(options.fields, FieldMode::Strict);
    }

    #[test]
    fn builders_replace_fields() {
        let options = ParseOptions::new()
            .with_default_offset(offset!(+5:30))
            .with_fields(FieldMode::Lenient);
        assert_eq!(options.default_offset, offset!(+5:30));
        assert_eq!(options.fields, FieldMode::Lenient);
    }

    #[test]
    fn system_never_fails() {
        let options = ParseOptions::system();
        assert_eq!(options.fields, FieldMode::Strict);
    }

    #[test]
    fn deserializes_from_config_json() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"default_offset": "-03:00", "fields": "lenient"}"#).unwrap();
        assert_eq!(options.default_offset, offset!(-3));
        assert_eq!(options.fields, FieldMode::Lenient);

        let partial: ParseOptions = serde_json::from_str(r#"{"fields": "strict"}"#).unwrap();
        assert_eq!(partial, ParseOptions::default());
    }

    #[test]
    fn rejects_bad_offsets_in_config() {
        let result = serde_json::from_str::<ParseOptions>(r#"{"default_offset": "+25:00"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_offset_as_text() {
        let options = ParseOptions::new().with_default_offset(offset!(+5:45));
        let json = serde_json::to_value(options).unwrap();
        assert_eq!(json["default_offset"], "+05:45");
        assert_eq!(json["fields"], "strict");
    }
}
