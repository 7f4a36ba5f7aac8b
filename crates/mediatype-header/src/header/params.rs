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

//! Media type parameters.

use std::borrow::Cow;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use super::quoted;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Media type parameters.
///
/// Parameter names are unique, and inserting a name that already exists will
/// replace its value, so when a header repeats a parameter, the last value
/// wins. Names and values can be borrowed or owned, since most of the time,
/// they can be sliced right out of the header value. Names are compared as
/// they are stored, which is lowercase when created by the [`Parser`][].
///
/// As there are rarely more than a handful of parameters, a [`BTreeMap`] is
/// used, which also gives us a stable order when formatting.
///
/// [`Parser`]: crate::header::Parser
///
/// # Examples
///
/// ```
/// use mediatype_header::Params;
///
/// // Create parameters and add parameter
/// let mut params = Params::new();
/// params.insert("charset", "utf-8");
///
/// // Obtain string representation
/// assert_eq!(params.to_string(), "; charset=utf-8");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params<'a> {
    /// Ordered map of parameters.
    inner: BTreeMap<Cow<'a, str>, Cow<'a, str>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a> Params<'a> {
    /// Creates parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::Params;
    ///
    /// // Create parameters
    /// let params = Params::new();
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { inner: BTreeMap::new() }
    }

    /// Returns the value for the given parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::Params;
    ///
    /// // Create parameters and add parameter
    /// let mut params = Params::new();
    /// params.insert("charset", "utf-8");
    ///
    /// // Obtain reference to parameter value
    /// assert_eq!(params.get("charset"), Some("utf-8"));
    /// ```
    pub fn get<K>(&self, name: K) -> Option<&str>
    where
        K: AsRef<str>,
    {
        self.inner.get(name.as_ref()).map(AsRef::as_ref)
    }

    /// Returns whether the parameter is contained.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::Params;
    ///
    /// // Create parameters and add parameter
    /// let mut params = Params::new();
    /// params.insert("charset", "utf-8");
    ///
    /// // Ensure presence of parameter
    /// let check = params.contains("charset");
    /// assert_eq!(check, true);
    /// ```
    pub fn contains<K>(&self, name: K) -> bool
    where
        K: AsRef<str>,
    {
        self.inner.contains_key(name.as_ref())
    }

    /// Updates the given parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::Params;
    ///
    /// // Create parameters and add parameter twice
    /// let mut params = Params::new();
    /// params.insert("charset", "utf-8");
    /// params.insert("charset", "latin-1");
    /// assert_eq!(params.get("charset"), Some("latin-1"));
    /// ```
    #[inline]
    pub fn insert<K, V>(&mut self, name: K, value: V)
    where
        K: Into<Cow<'a, str>>,
        V: Into<Cow<'a, str>>,
    {
        self.inner.insert(name.into(), value.into());
    }

    /// Removes the given parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::Params;
    ///
    /// // Create parameters and add parameter
    /// let mut params = Params::new();
    /// params.insert("charset", "utf-8");
    ///
    /// // Remove parameter
    /// params.remove("charset");
    /// assert!(params.is_empty());
    /// ```
    pub fn remove<K>(&mut self, name: K)
    where
        K: AsRef<str>,
    {
        self.inner.remove(name.as_ref());
    }

    /// Returns an iterator over all parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::Params;
    ///
    /// // Create parameters and add parameters
    /// let mut params = Params::new();
    /// params.insert("charset", "utf-8");
    /// params.insert("boundary", "x");
    ///
    /// // Iterate over parameters
    /// for (name, value) in params.iter() {
    ///     println!("{name}={value}");
    /// }
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .map(|(name, value)| (name.as_ref(), value.as_ref()))
    }

    /// Converts the parameters into owned parameters.
    #[must_use]
    pub fn into_owned(self) -> Params<'static> {
        self.inner
            .into_iter()
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect()
    }
}

#[allow(clippy::must_use_candidate)]
impl Params<'_> {
    /// Returns the number of parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether there are any parameters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<'a, K, V> FromIterator<(K, V)> for Params<'a>
where
    K: Into<Cow<'a, str>>,
    V: Into<Cow<'a, str>>,
{
    /// Creates parameters from an iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatype_header::Params;
    ///
    /// // Create parameters from iterator
    /// let params = Params::from_iter([
    ///     ("charset", "utf-8"),
    ///     ("boundary", "x"),
    /// ]);
    /// ```
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<'a> IntoIterator for Params<'a> {
    type Item = (Cow<'a, str>, Cow<'a, str>);
    type IntoIter = btree_map::IntoIter<Cow<'a, str>, Cow<'a, str>>;

    /// Creates a consuming iterator over all parameters.
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for Params<'_> {
    /// Formats the parameters for display.
    ///
    /// Each parameter is prefixed with a `; ` separator, so the output can be
    /// appended right after the primary token of a media type.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.inner {
            f.write_str("; ")?;
            f.write_str(name)?;
            f.write_str("=")?;
            quoted::write(f, value)?;
        }

        // No errors occurred
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
