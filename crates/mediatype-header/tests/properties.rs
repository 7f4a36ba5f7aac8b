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

use mediatype_header::{MediaType, Mode, Parser, parse_header};
use proptest::prelude::*;

// ----------------------------------------------------------------------------
// Strategies
// ----------------------------------------------------------------------------

/// Whitespace that is trimmed from tokens.
fn whitespace() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,4}"
}

/// Header value without separators or quotes.
fn plain() -> impl Strategy<Value = String> {
    "[^;\"\\\\]{0,32}"
}

/// Parameter value, which may need quoting.
fn value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9;=\"\\\\ /.-]{0,12}"
}

// ----------------------------------------------------------------------------
// Properties
// ----------------------------------------------------------------------------

proptest! {
    /// Values without separators and quotes are trimmed and nothing else.
    #[test]
    fn plain_value_is_trimmed(value in plain()) {
        let expected = value.trim_matches([' ', '\t', '\r', '\n']);
        for mode in [Mode::Full, Mode::Compat] {
            let media_type = Parser::new().mode(mode).parse(&value);
            prop_assert_eq!(&*media_type.primary, expected);
            prop_assert!(media_type.params.is_empty());
        }
    }

    /// The primary token never has surrounding whitespace.
    #[test]
    fn primary_is_trimmed(value in any::<String>()) {
        let media_type = parse_header(&value);
        let primary = media_type.primary.as_bytes();
        if let (Some(first), Some(last)) = (primary.first(), primary.last()) {
            prop_assert!(!b" \t\r\n".contains(first));
            prop_assert!(!b" \t\r\n".contains(last));
        }
    }

    /// The primary token ends at the first unquoted separator.
    #[test]
    fn primary_ends_at_separator(
        head in whitespace(),
        primary in "[a-z]{1,8}/[a-z0-9.+-]{1,8}",
        tail in whitespace(),
        rest in any::<String>(),
    ) {
        let value = format!("{head}{primary}{tail};{rest}");
        for mode in [Mode::Full, Mode::Compat] {
            let media_type = Parser::new().mode(mode).parse(&value);
            prop_assert_eq!(&*media_type.primary, primary.as_str());
        }
    }

    /// Compat mode never populates parameters, and agrees with full mode on
    /// the primary token.
    #[test]
    fn compat_agrees_on_primary(value in any::<String>()) {
        let full = Parser::new().parse(&value);
        let compat = Parser::new().mode(Mode::Compat).parse(&value);
        prop_assert_eq!(&full.primary, &compat.primary);
        prop_assert!(compat.params.is_empty());
    }

    /// Parsing the primary token again yields the primary token itself.
    #[test]
    fn primary_is_idempotent(value in any::<String>()) {
        let primary = parse_header(&value).primary;
        let again = parse_header(&primary);
        prop_assert_eq!(&again.primary, &primary);
        prop_assert!(again.params.is_empty());
    }

    /// Parsing bytes is equivalent to parsing the string they were taken from.
    #[test]
    fn bytes_agree_with_string(value in any::<String>()) {
        let parser = Parser::new();
        let media_type = parser.parse_bytes(value.as_bytes());
        prop_assert_eq!(media_type.ok(), Some(parser.parse(&value)));
    }

    /// Formatted media types parse to the same media type.
    #[test]
    fn display_is_reparsable(
        primary in "[a-z]{1,8}/[a-z0-9.+-]{1,8}",
        params in proptest::collection::btree_map("[a-z]{1,6}", value(), 0..4),
    ) {
        let media_type = MediaType {
            primary: primary.into(),
            params: params.into_iter().collect(),
        };
        let output = media_type.to_string();
        prop_assert_eq!(parse_header(&output), media_type);
    }
}
