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

//! Tracing session.

use pyo3::prelude::*;
use pyo3::types::PyTuple;
use std::path::PathBuf;
use tracing::subscriber::DefaultGuard;
use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Tracing session.
///
/// While the session is active, spans emitted by the parser are recorded into
/// a trace file, which can be inspected with `chrome://tracing` or Perfetto.
/// The subscriber is only installed for the current thread, which is why the
/// session can't be moved to other threads.
///
/// Parser spans are emitted at trace level, which is kept in release builds
/// of the extension, so the `tracing` feature is all that's needed.
///
/// ``` python
/// with mediatype.Trace("trace.json"):
///     mediatype.parse_header("text/plain; charset=utf-8")
/// ```
#[pyclass(unsendable)]
pub struct Trace {
    /// Path to trace file.
    path: PathBuf,
    /// Subscriber and flush guards, if active.
    guards: Option<(DefaultGuard, FlushGuard)>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

#[pymethods]
impl Trace {
    /// Creates a tracing session.
    #[new]
    fn new(path: PathBuf) -> Self {
        Self { path, guards: None }
    }

    /// Starts the tracing session.
    fn __enter__(mut slf: PyRefMut<'_, Self>) -> PyRefMut<'_, Self> {
        if slf.guards.is_none() {
            let (chrome_layer, flush) = ChromeLayerBuilder::new()
                .file(slf.path.clone())
                .include_args(true)
                .include_locations(true)
                .build();

            // Create and subscribe tracing subscriber for this thread
            let subscriber = Registry::default().with(chrome_layer);
            let default = tracing::subscriber::set_default(subscriber);
            slf.guards = Some((default, flush));
        }
        slf
    }

    /// Stops the tracing session and flushes the trace file.
    #[pyo3(signature = (*_args))]
    fn __exit__(&mut self, _args: &Bound<'_, PyTuple>) -> bool {
        // The subscriber guard comes first, so it's dropped before the trace
        // file is flushed and closed
        self.guards.take();
        false
    }
}
