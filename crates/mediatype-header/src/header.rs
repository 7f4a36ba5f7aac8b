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

//! Media type header.

use std::borrow::Cow;
use std::fmt;

mod error;
mod params;
mod parser;
mod quoted;
mod scan;

pub use error::{Error, Result};
pub use params::Params;
pub use parser::{Mode, Parser};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Media type header.
///
/// A media type consists of a primary token, e.g., `text/html`, and optional
/// parameters, e.g., `charset=utf-8`. Both are stored as they appear in the
/// header value, except for surrounding whitespace, unquoting of parameter
/// values, and lowercasing of parameter names. The primary token is neither
/// validated nor normalized, as matching it against known media types is up
/// to the caller.
///
/// When created with [`Parser::parse`], all parts borrow from the header value
/// where possible. Use [`MediaType::into_owned`] to detach the media type from
/// the lifetime of the header value.
///
/// # Examples
///
/// ```
/// use mediatype_header::MediaType;
///
/// // Create media type from string
/// let media_type = MediaType::from("text/html; charset=utf-8");
/// assert_eq!(media_type.primary, "text/html");
/// assert_eq!(media_type.params.get("charset"), Some("utf-8"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaType<'a> {
    /// Primary token.
    pub primary: Cow<'a, str>,
    /// Parameters.
    pub params: Params<'a>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a> MediaType<'a> {
    /// Creates a media type without parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::MediaType;
    ///
    /// // Create media type
    /// let media_type = MediaType::new("text/plain");
    /// ```
    #[inline]
    #[must_use]
    pub fn new<P>(primary: P) -> Self
    where
        P: Into<Cow<'a, str>>,
    {
        Self { primary: primary.into(), params: Params::new() }
    }

    /// Adds a parameter to the media type.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::MediaType;
    ///
    /// // Create media type and add parameter
    /// let media_type = MediaType::new("text/plain")
    ///     .param("charset", "utf-8");
    /// assert_eq!(media_type.to_string(), "text/plain; charset=utf-8");
    /// ```
    #[inline]
    #[must_use]
    pub fn param<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<Cow<'a, str>>,
        V: Into<Cow<'a, str>>,
    {
        self.params.insert(name, value);
        self
    }

    /// Converts the media type into an owned media type.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::MediaType;
    ///
    /// // Parse media type from temporary string
    /// let media_type = {
    ///     let value = String::from("text/plain; charset=utf-8");
    ///     MediaType::from(value.as_str()).into_owned()
    /// };
    /// assert_eq!(media_type.primary, "text/plain");
    /// ```
    #[must_use]
    pub fn into_owned(self) -> MediaType<'static> {
        MediaType {
            primary: Cow::Owned(self.primary.into_owned()),
            params: self.params.into_owned(),
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<'a> From<&'a str> for MediaType<'a> {
    /// Creates a media type from a string.
    ///
    /// This uses the default [`Parser`], which parses all parameters. Note
    /// that we can't implement [`FromStr`][] for [`MediaType`] because of the
    /// required `&'a str` lifetime, which is not compatible with the trait.
    ///
    /// [`FromStr`]: std::str::FromStr
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::MediaType;
    ///
    /// // Create media type from string
    /// let media_type = MediaType::from("text/plain");
    /// ```
    #[inline]
    fn from(value: &'a str) -> Self {
        Parser::new().parse(value)
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for MediaType<'_> {
    /// Formats the media type for display.
    ///
    /// Parameter values are quoted where necessary, so the output can be
    /// parsed again, yielding the same media type.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary)?;
        fmt::Display::fmt(&self.params, f)
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Parses a `Content-Type`-like header value.
///
/// This is a shorthand for [`Parser::parse`] with the default [`Parser`], see
/// there for a detailed description.
///
/// # Examples
///
/// ```
/// use mediatype_header::parse_header;
///
/// // Parse header value
/// let media_type = parse_header("application/json; charset=\"utf-8\"");
/// assert_eq!(media_type.primary, "application/json");
/// assert_eq!(media_type.params.get("charset"), Some("utf-8"));
/// ```
#[inline]
#[must_use]
pub fn parse_header(line: &str) -> MediaType<'_> {
    Parser::new().parse(line)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
