// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! RAII guard that finalizes a buffer on drop.

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

use crate::buffer::Buffer;

/// RAII guard that owns a [`Buffer`] and finalizes it when dropped.
///
/// The bare [`Buffer`] is manually managed; `ScopedBuffer` is the opt-in layer
/// for code that wants scope-bound cleanup. It derefs to the wrapped handle, so
/// every buffer operation is available on it unchanged.
///
/// # Usage
///
/// ```rust
/// use tagbuf::ScopedBuffer;
///
/// {
///     let mut buffer = ScopedBuffer::new();
///     buffer.alloc(64);
///     assert_eq!(buffer.size(), 64);
/// } // buffer drops here → memory freed, handle finalized
/// ```
///
/// Use [`ScopedBuffer::into_inner`] to hand the handle back to manual management.
pub struct ScopedBuffer {
    inner: Buffer,
}

impl ScopedBuffer {
    /// Creates a guard over a valid, empty buffer.
    pub fn new() -> Self {
        Self::from_buffer(Buffer::new())
    }

    /// Takes ownership of `buffer`, valid or not.
    pub fn from_buffer(buffer: Buffer) -> Self {
        Self { inner: buffer }
    }

    /// Disarms the guard and returns the handle unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tagbuf::ScopedBuffer;
    ///
    /// let mut guard = ScopedBuffer::new();
    /// guard.store(b"keep");
    ///
    /// let mut buffer = guard.into_inner();
    /// assert_eq!(buffer.as_slice(), b"keep");
    /// buffer.finalize();
    /// ```
    pub fn into_inner(mut self) -> Buffer {
        // Leaves an uninit handle behind, whose finalize is a no-op.
        mem::take(&mut self.inner)
    }
}

impl Default for ScopedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScopedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopedBuffer").field(&self.inner).finish()
    }
}

impl Deref for ScopedBuffer {
    type Target = Buffer;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ScopedBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl Drop for ScopedBuffer {
    fn drop(&mut self) {
        self.inner.finalize();
    }
}
