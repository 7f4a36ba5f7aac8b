// Copyright (c) 2025 Zensical and contributors

// SPDX-License-Identifier: MIT
// Third-party contributions licensed under DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Byte scanning.

use std::ops::Range;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Iterator over segments separated by unquoted `;` separators.
///
/// Segments are returned as byte ranges into the scanned data, which allows
/// callers to decide how to decode them, i.e., slicing a string directly, or
/// validating raw bytes as UTF-8 first. All range boundaries either fall onto
/// an ASCII byte or onto the start or end of the data, so they're always valid
/// character boundaries when the data originates from a string.
///
/// Note that the iterator always yields at least one segment, even for empty
/// data, which is the primary token of a header value.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    /// Data to scan.
    data: &'a [u8],
    /// Start of the next segment.
    position: usize,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a> Segments<'a> {
    /// Creates a segment iterator.
    #[inline]
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Iterator for Segments<'_> {
    type Item = Range<usize>;

    /// Returns the next segment.
    fn next(&mut self) -> Option<Self::Item> {
        if self.position > self.data.len() {
            return None;
        }

        // The segment extends to the next unquoted separator or the end of the
        // data - advancing past the end marks the iterator as exhausted
        let start = self.position;
        let end = find_separator(self.data, start).unwrap_or(self.data.len());
        self.position = end + 1;
        Some(start..end)
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Returns whether the given byte is whitespace.
#[inline]
#[must_use]
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Returns the given range with surrounding whitespace removed.
///
/// If the range only consists of whitespace, an empty range positioned at its
/// end is returned.
#[must_use]
pub fn trimmed(data: &[u8], range: Range<usize>) -> Range<usize> {
    let Range { mut start, mut end } = range;
    while start < end && is_whitespace(data[start]) {
        start += 1;
    }
    while end > start && is_whitespace(data[end - 1]) {
        end -= 1;
    }
    start..end
}

/// Returns the position of the next unquoted `;`, starting at the given index.
///
/// The scan keeps track of whether it's within a quoted span, which is opened
/// and closed by `"`. Within a span, a backslash escapes the following byte,
/// so `\"` doesn't close it. Outside of a span, a backslash only escapes a
/// following `"`, so `\;` is still a separator. If a span is never closed,
/// all subsequent bytes are considered quoted, and no separator is found.
#[must_use]
pub fn find_separator(data: &[u8], start: usize) -> Option<usize> {
    let mut within_quotes = false;
    let mut escaped = false;
    for (i, &byte) in data.iter().enumerate().skip(start) {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if within_quotes => escaped = true,
            b'\\' => escaped = data.get(i + 1) == Some(&b'"'),
            b'"' => within_quotes = !within_quotes,
            b';' if !within_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
