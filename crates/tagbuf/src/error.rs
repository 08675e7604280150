// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for tagbuf.
use thiserror::Error;

/// Errors that can occur when working with buffers.
#[derive(Debug, Error)]
pub enum BufferError {
    /// The buffer failed its validity check.
    #[error("buffer is not initialized")]
    InvalidBuffer,

    /// A serialized header value does not fit in a machine word.
    #[error("header value {0} does not fit in a machine word")]
    Overflow(u64),

    /// The underlying stream failed.
    #[error("stream error: {0}")]
    Io(#[from] std::io::Error),
}
