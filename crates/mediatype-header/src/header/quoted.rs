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

//! Quoted strings.

use std::borrow::Cow;
use std::fmt;

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Removes surrounding quotes from a parameter value.
///
/// Values that are at least two bytes long and both start and end with `"`
/// are unquoted, and the escape sequences `\\` and `\"` are resolved. Any other
/// backslash is kept verbatim. The value is only copied if it contains escape
/// sequences, which is rare in practice.
#[must_use]
pub fn unquote(value: &str) -> Cow<'_, str> {
    let inner = match value.as_bytes() {
        [b'"', .., b'"'] => &value[1..value.len() - 1],
        _ => return Cow::Borrowed(value),
    };

    // Fast path - nothing to unescape
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }

    // Resolve escape sequences
    let mut output = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(char) = chars.next() {
        if char == '\\' {
            if let Some(&next @ ('\\' | '"')) = chars.peek() {
                output.push(next);
                chars.next();
                continue;
            }
        }
        output.push(char);
    }
    Cow::Owned(output)
}

/// Writes a parameter value, quoting it if necessary.
///
/// Values that consist only of token characters are written verbatim, all
/// other values, including the empty value, are written as quoted strings.
pub fn write(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if !value.is_empty() && value.bytes().all(is_token) {
        return f.write_str(value);
    }

    // Write quoted string - backslashes and quotes are prefixed with a single
    // backslash, and the escaped byte is written as part of the next chunk
    f.write_str("\"")?;
    let mut start = 0;
    for (i, byte) in value.bytes().enumerate() {
        if matches!(byte, b'\\' | b'"') {
            f.write_str(&value[start..i])?;
            f.write_str("\\")?;
            start = i;
        }
    }
    f.write_str(&value[start..])?;
    f.write_str("\"")
}

/// Returns whether the given byte is a token character.
#[inline]
#[must_use]
pub fn is_token(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Formats a value with [`write`].
    struct Quoted<'a>(&'a str);

    impl fmt::Display for Quoted<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write(f, self.0)
        }
    }

    #[test]
    fn test_unquote() {
        let test_cases = vec![
            ("", ""),
            ("value", "value"),
            ("\"", "\""),
            ("\"\"", ""),
            ("\"value\"", "value"),
            ("\"key; value\"", "key; value"),
            ("\"\\\"\"", "\""),
            ("\"a\\\\b\"", "a\\b"),
            ("\"a\\nb\"", "a\\nb"),
            ("\"unterminated", "\"unterminated"),
            ("'single'", "'single'"),
        ];

        for (value, expected) in test_cases {
            let result = unquote(value);
            assert_eq!(result, expected, "Failed for value: {value:?}");
        }
    }

    #[test]
    fn test_unquote_borrows() {
        assert!(matches!(unquote("\"utf-8\""), Cow::Borrowed("utf-8")));
        assert!(matches!(unquote("\"a\\\"b\""), Cow::Owned(_)));
    }

    #[test]
    fn test_write() {
        let test_cases = vec![
            ("utf-8", "utf-8"),
            ("", "\"\""),
            ("key; value", "\"key; value\""),
            ("\"", "\"\\\"\""),
            ("a\\b", "\"a\\\\b\""),
            ("text/plain", "\"text/plain\""),
        ];

        for (value, expected) in test_cases {
            let result = Quoted(value).to_string();
            assert_eq!(result, expected, "Failed for value: {value:?}");
        }
    }
}
