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

//! Serde support: [`Instant`] as ISO 8601 text (or millis for binary
//! formats), and [`offset`] for `UtcOffset` fields stored as `Z` / `±hh:mm`.

// Module name shadows the `serde` crate, so the external crate is `::serde`.

use std::fmt;

use ::serde::de::{self, Deserialize, Deserializer, Visitor};
use ::serde::ser::{Serialize, Serializer};
use time::UtcOffset;

use crate::format::format;
use crate::instant::Instant;
use crate::parse::parse;

impl Serialize for Instant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&format(*self, true, UtcOffset::UTC))
        } else {
            serializer.serialize_i64(self.as_unix_millis())
        }
    }
}

struct InstantVisitor;

impl<'de> Visitor<'de> for InstantVisitor {
    type Value = Instant;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an ISO 8601 date-time string or milliseconds since the epoch")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse(v).map_err(E::custom)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Instant::from_unix_millis(v).map_err(E::custom)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let millis = i64::try_from(v)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))?;
        Instant::from_unix_millis(millis).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(InstantVisitor)
        } else {
            deserializer.deserialize_i64(InstantVisitor)
        }
    }
}

/// `#[serde(with = "isotime::serde::offset")]` for `UtcOffset` fields.
///
/// ```
/// use serde::Deserialize;
/// use time::UtcOffset;
///
/// #[derive(Deserialize)]
/// struct Config {
///     #[serde(with = "isotime::serde::offset")]
///     zone: UtcOffset,
/// }
///
/// let config: Config = serde_json::from_str(r#"{"zone": "+05:30"}"#).unwrap();
/// assert_eq!(config.zone.whole_minutes(), 330);
/// ```
pub mod offset {
    use ::serde::de::{self, Deserialize, Deserializer};
    use ::serde::ser::Serializer;
    use time::UtcOffset;

    use crate::offset::{format_offset, parse_offset};

    pub fn serialize<S>(offset: &UtcOffset, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_offset(*offset))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<UtcOffset, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_offset(&text).map_err(de::Error::custom)
    }
}
