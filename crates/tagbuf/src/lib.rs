// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Manually managed byte buffers with validity tags.
//!
//! A [`Buffer`] pairs an owned raw byte block with its logical size, its
//! allocated size, an opaque user word and a validity tag. The tag proves that
//! the handle went through [`Buffer::init`]; a default-constructed or finalized
//! handle fails [`Buffer::is_valid`] and is never dereferenced.
//!
//! # Lifecycle
//!
//! ```text
//!  uninit ──init──▶ valid/empty ──get/alloc/realloc/store──▶ valid/allocated
//!    ▲                 ▲  │                                       │
//!    │                 │  └──────────────free─────────────────────┘
//!    └────finalize─────┴──────────────────────────────────────────┘
//! ```
//!
//! Operations that create content (`get`, `alloc`, `realloc`, `store`, `load`)
//! initialize an invalid handle on the fly. Operations that consume content
//! (`copy`, `copy_into`, `write_content`, `read_content`, `save`) fail with
//! [`BufferError::InvalidBuffer`] instead.
//!
//! # Manual ownership
//!
//! A bare [`Buffer`] never frees on drop: every allocation has to be matched
//! by [`Buffer::free`] or [`Buffer::finalize`]. [`ScopedBuffer`] is the opt-in
//! wrapper that finalizes on scope exit.
//!
//! # Example
//!
//! ```rust
//! use tagbuf::{Buffer, BufferError};
//!
//! fn example() -> Result<(), BufferError> {
//!     let mut buffer = Buffer::new();
//!     buffer.store(b"hello");
//!     buffer.set_user_data(7);
//!
//!     let mut copy = buffer.copy()?;
//!     assert_eq!(copy.as_slice(), b"hello");
//!     assert_eq!(copy.user_data(), 7);
//!
//!     // Keep the envelope, only move the logical size.
//!     buffer.realloc(2, false);
//!     assert_eq!(buffer.size(), 2);
//!     assert_eq!(buffer.alloc_size(), 5);
//!
//!     buffer.finalize();
//!     copy.finalize();
//!     assert!(!buffer.is_valid());
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: save/load
//!
//! ```rust
//! # fn example() -> Result<(), tagbuf::BufferError> {
//! use std::io::Cursor;
//! use tagbuf::ScopedBuffer;
//!
//! let mut stream = Cursor::new(Vec::new());
//!
//! let mut source = ScopedBuffer::new();
//! source.store(&[1, 2, 3]);
//! source.save(&mut stream, true)?;
//!
//! stream.set_position(0);
//! let mut loaded = ScopedBuffer::new();
//! loaded.load(&mut stream, true)?;
//! assert_eq!(loaded.as_slice(), &[1, 2, 3]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod buffer;
mod error;
mod guard;
mod raw;
mod stream;
mod tag;

pub use buffer::Buffer;
pub use error::BufferError;
pub use guard::ScopedBuffer;
pub use stream::HEADER_LEN;
pub use tag::MARKER;

pub use tagbuf_rand::{ProcessSignatures, SignatureSequence, SignatureSource};
