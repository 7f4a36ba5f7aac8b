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

//! Media type header parser.

use std::borrow::Cow;
use std::convert::Infallible;
use std::ops::Range;
use std::{result, str};

use super::error::{Error, Result};
use super::quoted::unquote;
use super::scan::{Segments, trimmed};
use super::{MediaType, Params};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Parameter mode.
///
/// Callers that only dispatch on the primary token, and rely on parameters
/// being left empty, can opt into [`Mode::Compat`], which returns right after
/// the primary token. This also skips decoding and allocating parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Parse the primary token and all parameters.
    #[default]
    Full,
    /// Parse the primary token only, and always return empty parameters.
    Compat,
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Media type header parser.
///
/// The parser scans the header value left to right exactly once. The primary
/// token extends up to the first `;` that is not part of a quoted string, and
/// is trimmed of surrounding spaces, tabs, carriage returns and line feeds.
/// Everything after it is split into parameters in the same manner, unless
/// the parser is in [`Mode::Compat`].
///
/// Parameters are `name=value` pairs. Segments without a `=` are skipped, and
/// values enclosed in double quotes are unquoted. Parameter names are folded
/// to lowercase by default, since they are case-insensitive.
///
/// Parsing never fails for string input. Malformed quoting is not an error -
/// an unterminated quote just swallows all separators that follow it.
///
/// # Examples
///
/// ```
/// use mediatype_header::{Mode, Parser};
///
/// // Create parser and parse header value
/// let parser = Parser::new().mode(Mode::Full);
/// let media_type = parser.parse("text/html; Charset=utf-8");
/// assert_eq!(media_type.primary, "text/html");
/// assert_eq!(media_type.params.get("charset"), Some("utf-8"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parser {
    /// Parameter mode.
    mode: Mode,
    /// Whether to lowercase parameter names.
    lowercase: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Parser {
    /// Creates a parser.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::Parser;
    ///
    /// // Create parser
    /// let parser = Parser::new();
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parameter mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::{Mode, Parser};
    ///
    /// // Create parser and set mode
    /// let parser = Parser::new()
    ///     .mode(Mode::Compat);
    ///
    /// // Parameters are not parsed
    /// let media_type = parser.parse("text/plain; charset=utf-8");
    /// assert!(media_type.params.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether parameter names are lowercased.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::Parser;
    ///
    /// // Create parser and keep case of parameter names
    /// let parser = Parser::new()
    ///     .lowercase(false);
    ///
    /// // Parameter names are stored verbatim
    /// let media_type = parser.parse("text/plain; Charset=utf-8");
    /// assert_eq!(media_type.params.get("Charset"), Some("utf-8"));
    /// ```
    #[inline]
    #[must_use]
    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Parses the given header value.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::Parser;
    ///
    /// // Parse header value
    /// let media_type = Parser::new().parse("  text/plain  ");
    /// assert_eq!(media_type.primary, "text/plain");
    /// assert!(media_type.params.is_empty());
    /// ```
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip_all, fields(len = line.len()))
    )]
    #[must_use]
    pub fn parse<'a>(&self, line: &'a str) -> MediaType<'a> {
        // All ranges start and end at ASCII bytes or at the boundaries of the
        // line, so slicing the line with them can never split a character
        let Ok(media_type) = self.parse_with(line.as_bytes(), |range| {
            Ok::<_, Infallible>(&line[range])
        });
        media_type
    }

    /// Parses the given header value from raw bytes.
    ///
    /// Header values usually arrive as bytes, so this saves callers from
    /// validating the entire value upfront. Only the parts that end up in the
    /// returned [`MediaType`] are decoded, which is why bytes that are skipped
    /// anyway, e.g., in segments without a `=`, are not validated.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Utf8`], if the primary token, or the name
    /// or value of a parameter is not valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use mediatype_header::Parser;
    ///
    /// // Parse header value from bytes
    /// let media_type = Parser::new().parse_bytes(b"text/plain; charset=utf-8")?;
    /// assert_eq!(media_type.primary, "text/plain");
    /// # Ok(())
    /// # }
    /// ```
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip_all, fields(len = bytes.len()))
    )]
    pub fn parse_bytes<'a>(&self, bytes: &'a [u8]) -> Result<MediaType<'a>> {
        self.parse_with(bytes, |range| {
            str::from_utf8(&bytes[range]).map_err(Error::from)
        })
    }

    /// Parses the given data, decoding ranges with the given function.
    fn parse_with<'a, F, E>(
        &self,
        data: &'a [u8],
        decode: F,
    ) -> result::Result<MediaType<'a>, E>
    where
        F: Fn(Range<usize>) -> result::Result<&'a str, E>,
    {
        let mut segments = Segments::new(data);

        // The first segment is always present and holds the primary token,
        // even if the data is empty or consists only of whitespace
        let primary = segments.next().unwrap_or(0..0);
        let primary = decode(trimmed(data, primary))?;
        if self.mode == Mode::Compat {
            return Ok(MediaType::new(primary));
        }

        // Split each remaining segment at its first `=` into name and value,
        // and skip segments without, which also covers empty segments
        let mut params = Params::new();
        for segment in segments {
            let segment = trimmed(data, segment);
            let Some(n) = data[segment.clone()].iter().position(|&b| b == b'=')
            else {
                continue;
            };

            // Trim name and value independently, as whitespace may surround
            // the `=` separator, then normalize name and unquote value
            let name = trimmed(data, segment.start..segment.start + n);
            let value = trimmed(data, segment.start + n + 1..segment.end);
            let name = self.normalize(decode(name)?);
            params.insert(name, unquote(decode(value)?));
        }

        // Return media type
        Ok(MediaType { primary: Cow::Borrowed(primary), params })
    }

    /// Normalizes the given parameter name.
    ///
    /// Names are lowercased with full Unicode case mapping. Most names are
    /// lowercase ASCII already, which is checked first to avoid allocating.
    fn normalize<'a>(&self, name: &'a str) -> Cow<'a, str> {
        let is_lower_ascii =
            name.is_ascii() && !name.bytes().any(|b| b.is_ascii_uppercase());
        if !self.lowercase || is_lower_ascii {
            return Cow::Borrowed(name);
        }

        // Only allocate if lowercasing actually changed the name
        let lower = name.to_lowercase();
        if lower == name {
            Cow::Borrowed(name)
        } else {
            Cow::Owned(lower)
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Parser {
    /// Creates a default parser.
    ///
    /// The default parser parses parameters and lowercases their names.
    #[inline]
    fn default() -> Self {
        Self { mode: Mode::Full, lowercase: true }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compat() {
        let parser = Parser::new().mode(Mode::Compat);
        let test_cases = vec![
            ("", ""),
            ("   ", ""),
            ("strange", "strange"),
            ("text/plain", "text/plain"),
            ("  text/plain  ", "text/plain"),
            ("\ttext/plain\r\n", "text/plain"),
            ("text/html; charset=utf-8", "text/html"),
            ("text/plain; x=\"a;b\"", "text/plain"),
            ("\"falcon/peregrine\" ; key=\"value\"", "\"falcon/peregrine\""),
            ("\"a;b\"; c=d", "\"a;b\""),
            ("text/\"plain; x=y", "text/\"plain; x=y"),
            ("; charset=utf-8", ""),
            ("text/plain; x=\"unterminated", "text/plain"),
            ("text/plain\\; charset=utf-8", "text/plain\\"),
        ];

        for (value, expected) in test_cases {
            let media_type = parser.parse(value);
            assert_eq!(media_type.primary, expected, "Failed for {value:?}");
            assert!(media_type.params.is_empty(), "Failed for {value:?}");
        }
    }

    #[test]
    fn test_parse_full() {
        let parser = Parser::new();
        let test_cases = vec![
            ("", "", vec![]),
            ("strange", "strange", vec![]),
            ("text/plain ", "text/plain", vec![]),
            (
                "falcon/peregrine;  key1; key2=value; key3",
                "falcon/peregrine",
                vec![("key2", "value")],
            ),
            (
                "\"falcon/peregrine\" ; key=\"value\"",
                "\"falcon/peregrine\"",
                vec![("key", "value")],
            ),
            (
                "text/plain; charset=utf-8",
                "text/plain",
                vec![("charset", "utf-8")],
            ),
            (
                "application/falcon; P1 = \"key; value\"; P2=\"\\\"\"",
                "application/falcon",
                vec![("p1", "key; value"), ("p2", "\"")],
            ),
            (
                "text/plain; charset=utf-8; charset=latin-1",
                "text/plain",
                vec![("charset", "latin-1")],
            ),
            (
                "text/plain;;; ; q=0.5;",
                "text/plain",
                vec![("q", "0.5")],
            ),
            (
                "text/plain; a=b=c; empty=",
                "text/plain",
                vec![("a", "b=c"), ("empty", "")],
            ),
            (
                "text/plain; x=\"unterminated",
                "text/plain",
                vec![("x", "\"unterminated")],
            ),
            ("text/\"plain; x=y", "text/\"plain; x=y", vec![]),
        ];

        for (value, primary, params) in test_cases {
            let media_type = parser.parse(value);
            assert_eq!(media_type.primary, primary, "Failed for {value:?}");
            assert_eq!(
                media_type.params,
                Params::from_iter(params),
                "Failed for {value:?}"
            );
        }
    }

    #[test]
    fn test_parse_preserves_case_of_values() {
        let media_type = Parser::new().parse("Text/HTML; Charset=UTF-8");
        assert_eq!(media_type.primary, "Text/HTML");
        assert_eq!(media_type.params.get("charset"), Some("UTF-8"));
    }

    #[test]
    fn test_parse_borrows() {
        let media_type = Parser::new().parse("text/plain; charset=\"utf-8\"");
        assert!(matches!(media_type.primary, Cow::Borrowed(_)));
        for (name, value) in media_type.params {
            assert!(matches!(name, Cow::Borrowed("charset")));
            assert!(matches!(value, Cow::Borrowed("utf-8")));
        }
    }

    #[test]
    fn test_parse_backslash_outside_quotes() {
        let media_type =
            Parser::new().parse(r"text/plain; name=C:\; charset=utf-8");
        assert_eq!(media_type.primary, "text/plain");
        assert_eq!(
            media_type.params,
            Params::from_iter([("name", "C:\\"), ("charset", "utf-8")])
        );

        // An escaped quote outside of a quoted span doesn't open one
        let media_type = Parser::new().parse(r#"text/plain; a=\"; b=c"#);
        assert_eq!(media_type.params.get("a"), Some(r#"\""#));
        assert_eq!(media_type.params.get("b"), Some("c"));
    }

    #[test]
    fn test_parse_lowercases_non_ascii_names() {
        let media_type = Parser::new().parse("text/plain; NÄME=x; Ünï=y");
        assert_eq!(media_type.params.get("näme"), Some("x"));
        assert_eq!(media_type.params.get("ünï"), Some("y"));

        // Names are kept verbatim when lowercasing is disabled
        let parser = Parser::new().lowercase(false);
        let media_type = parser.parse("text/plain; NÄME=x");
        assert_eq!(media_type.params.get("NÄME"), Some("x"));
    }

    #[test]
    fn test_parse_non_ascii() {
        let media_type = Parser::new().parse(" tëxt/plâin ; nämé=\"ünï\" ");
        assert_eq!(media_type.primary, "tëxt/plâin");
        assert_eq!(media_type.params.get("nämé"), Some("ünï"));
    }

    #[test]
    fn test_parse_bytes() {
        let media_type =
            Parser::new().parse_bytes(b" text/plain ; a=b ").unwrap();
        assert_eq!(media_type.primary, "text/plain");
        assert_eq!(media_type.params.get("a"), Some("b"));
    }

    #[test]
    fn test_parse_bytes_invalid_primary() {
        let result = Parser::new().parse_bytes(b"text/\xff; a=b");
        assert!(matches!(result, Err(Error::Utf8(_))));

        // Compat mode still decodes the primary token
        let parser = Parser::new().mode(Mode::Compat);
        let result = parser.parse_bytes(b"\xfe\xff");
        assert!(matches!(result, Err(Error::Utf8(_))));
    }

    #[test]
    fn test_parse_bytes_invalid_param() {
        let result = Parser::new().parse_bytes(b"text/plain; a=\xff");
        assert!(matches!(result, Err(Error::Utf8(_))));

        // Invalid bytes after the primary token are never decoded in compat
        // mode, and neither are segments that are skipped
        let parser = Parser::new().mode(Mode::Compat);
        let media_type = parser.parse_bytes(b"text/plain; a=\xff").unwrap();
        assert_eq!(media_type.primary, "text/plain");
        let media_type = Parser::new().parse_bytes(b"text/plain; \xff").unwrap();
        assert!(media_type.params.is_empty());
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_parse_emits_span() {
        use std::sync::{Arc, Mutex};
        use tracing::span::{Attributes, Id};
        use tracing::Subscriber;
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
        use tracing_subscriber::Registry;

        /// Layer recording the names of created spans.
        struct Spans(Arc<Mutex<Vec<&'static str>>>);

        impl<S: Subscriber> Layer<S> for Spans {
            fn on_new_span(
                &self,
                attrs: &Attributes<'_>,
                _: &Id,
                _: Context<'_, S>,
            ) {
                self.0.lock().unwrap().push(attrs.metadata().name());
            }
        }

        let names = Arc::new(Mutex::new(Vec::new()));
        let subscriber = Registry::default().with(Spans(Arc::clone(&names)));
        tracing::subscriber::with_default(subscriber, || {
            let _ = Parser::new().parse("text/plain; charset=utf-8");
            let _ = Parser::new().parse_bytes(b"text/plain");
        });
        assert_eq!(*names.lock().unwrap(), vec!["parse", "parse_bytes"]);
    }
}
