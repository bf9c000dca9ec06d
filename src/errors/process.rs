// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Configuration-level failures of a [`LinkedListProcessor`](crate::engine::LinkedListProcessor).
///
/// Per-node failures are not errors; they are counted in
/// [`ProcessResult`](crate::engine::ProcessResult).
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The processor could not obtain a usable entry point.
    #[error("Failed to resolve entry point '{function}': {source}")]
    Resolution {
        function: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// `on_error` value outside `{"stop", "skip"}`.
    #[error("Invalid on_error policy '{policy}': expected 'stop' or 'skip'")]
    InvalidPolicy { policy: String },

    /// `process` was called after `dispose`.
    #[error("Processor has been disposed")]
    Disposed,
}

impl ProcessError {
    pub(crate) fn resolution<E>(function: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Resolution {
            function: function.to_string(),
            source: Box::new(source),
        }
    }
}
