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

//! Media type header parser Python bindings.

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

use mediatype_header::{MediaType, Mode, Parser};
use pyo3::prelude::*;
use std::collections::HashMap;

mod error;
#[cfg(feature = "tracing")]
mod trace;

use error::Result;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Header value, as passed from Python.
#[derive(FromPyObject)]
enum Line {
    /// Header value as `str`.
    Text(String),
    /// Header value as `bytes`.
    Bytes(Vec<u8>),
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Parse the header value and convert the result for Python.
fn parse(line: &Line, mode: Mode) -> Result<(String, HashMap<String, String>)> {
    let parser = Parser::new().mode(mode);
    let MediaType { primary, params } = match line {
        Line::Text(text) => parser.parse(text),
        Line::Bytes(bytes) => parser.parse_bytes(bytes)?,
    };

    // Python expects a plain dictionary of owned strings
    let params = params
        .into_iter()
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    // Return primary token and parameters
    Ok((primary.into_owned(), params))
}

// ----------------------------------------------------------------------------

/// Parses a Content-Type like header.
///
/// Returns the primary token and a dictionary of parameters. With `compat`,
/// parameters are not parsed, and the dictionary is always empty.
#[pyfunction]
#[pyo3(signature = (line, *, compat = false))]
fn parse_header(
    line: Line,
    compat: bool,
) -> PyResult<(String, HashMap<String, String>)> {
    let mode = if compat { Mode::Compat } else { Mode::Full };
    Ok(parse(&line, mode)?)
}

/// Returns the current version.
#[pyfunction]
fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// ----------------------------------------------------------------------------

/// Expose Rust runtime to Python.
#[pymodule]
fn mediatype(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_header, m)?)?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    #[cfg(feature = "tracing")]
    m.add_class::<trace::Trace>()?;
    Ok(())
}
