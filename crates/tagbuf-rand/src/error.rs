// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for tagbuf-rand.
use thiserror::Error;

/// Errors from entropy sources.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum EntropyError {
    /// The OS entropy source is unavailable or failed.
    #[error("entropy not available")]
    EntropyNotAvailable,
}
