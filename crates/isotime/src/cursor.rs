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

//! Byte cursor shared by the date-time and offset readers.

use crate::error::{ParseError, ParseErrorKind};

/// Parse position over an input string. Only ever advanced over ASCII bytes,
/// so `pos` always stays on a character boundary.
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str, pos: usize) -> Self {
        Cursor { input, pos }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub(crate) fn peek_is_digit(&self) -> bool {
        self.peek().is_some_and(|b| b.is_ascii_digit())
    }

    /// The full character at the cursor, for error messages.
    pub(crate) fn current_char(&self) -> Option<char> {
        self.input.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    pub(crate) fn bump(&mut self) {
        self.pos += 1;
    }

    /// Consumes `byte` if it is next.
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Reads exactly `width` ASCII digits as a number.
    pub(crate) fn digits(&mut self, width: usize, expected: &'static str) -> Result<u32, ParseError> {
        let mut value = 0u32;
        for _ in 0..width {
            match self.peek() {
                Some(b) if b.is_ascii_digit() => {
                    value = value * 10 + u32::from(b - b'0');
                    self.pos += 1;
                }
                Some(_) => {
                    let found = self.current_char().unwrap_or('\u{FFFD}');
                    return Err(self.error(ParseErrorKind::ExpectedDigit { found }));
                }
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd { expected })),
            }
        }
        Ok(value)
    }

    /// Consumes the longest run of ASCII digits and returns it.
    pub(crate) fn digit_run(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek_is_digit() {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    pub(crate) fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.pos)
    }

    pub(crate) fn error_at(&self, kind: ParseErrorKind, position: usize) -> ParseError {
        ParseError::new(kind, position, self.input)
    }
}
