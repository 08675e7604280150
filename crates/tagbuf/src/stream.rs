// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Stream protocol over `std::io`.
//!
//! Two formats:
//!
//! - **Raw content**: exactly `size` bytes, no metadata.
//! - **Self-describing**: `user_data` and `size` as little-endian `u64`, then
//!   exactly `size` bytes.
//!
//! ```text
//! ┌──────────────┬──────────────┬─────────────────────┐
//! │ user_data:u64│   size:u64   │  content[size]      │
//! └──────────────┴──────────────┴─────────────────────┘
//! ```
//!
//! With `advance == false` the stream position is captured before any I/O
//! and restored afterwards, whether the operation succeeded or not.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::buffer::Buffer;
use crate::error::BufferError;

/// Size in bytes of the `save`/`load` header.
pub const HEADER_LEN: usize = 2 * std::mem::size_of::<u64>();

fn with_position<S, T>(
    stream: &mut S,
    advance: bool,
    op: impl FnOnce(&mut S) -> Result<T, BufferError>,
) -> Result<T, BufferError>
where
    S: Seek + ?Sized,
{
    if advance {
        return op(stream);
    }

    let start = stream.stream_position()?;
    let result = op(stream);
    stream.seek(SeekFrom::Start(start))?;

    result
}

fn to_word(value: u64) -> Result<usize, BufferError> {
    usize::try_from(value).map_err(|_| BufferError::Overflow(value))
}

fn to_size(value: u64) -> Result<usize, BufferError> {
    match to_word(value)? {
        size if size > isize::MAX as usize => Err(BufferError::Overflow(value)),
        size => Ok(size),
    }
}

impl Buffer {
    /// Writes the `size` content bytes, without metadata.
    ///
    /// Writes nothing when `size == 0`. With `advance == false` the stream
    /// position is restored afterwards.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidBuffer`] if the buffer is invalid (the stream is
    /// not touched), [`BufferError::Io`] if the stream fails.
    pub fn write_content<W>(&self, stream: &mut W, advance: bool) -> Result<(), BufferError>
    where
        W: Write + Seek + ?Sized,
    {
        if !self.is_valid() {
            return Err(BufferError::InvalidBuffer);
        }

        if self.is_empty() {
            return Ok(());
        }

        with_position(stream, advance, |stream| {
            stream.write_all(self.as_slice())?;
            Ok(())
        })
    }

    /// Reads exactly `size` bytes into the buffer, without metadata.
    ///
    /// Reads nothing when `size == 0`. With `advance == false` the stream
    /// position is restored afterwards.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidBuffer`] if the buffer is invalid (the stream is
    /// not touched), [`BufferError::Io`] if the stream fails or ends early.
    pub fn read_content<R>(&mut self, stream: &mut R, advance: bool) -> Result<(), BufferError>
    where
        R: Read + Seek + ?Sized,
    {
        if !self.is_valid() {
            return Err(BufferError::InvalidBuffer);
        }

        if self.is_empty() {
            return Ok(());
        }

        with_position(stream, advance, |stream| {
            stream.read_exact(self.as_mut_slice())?;
            Ok(())
        })
    }

    /// Writes `user_data`, `size` and the content bytes.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidBuffer`] if the buffer is invalid (the stream is
    /// not touched), [`BufferError::Io`] if the stream fails.
    pub fn save<W>(&self, stream: &mut W, advance: bool) -> Result<(), BufferError>
    where
        W: Write + Seek + ?Sized,
    {
        if !self.is_valid() {
            return Err(BufferError::InvalidBuffer);
        }

        let mut header = [0u8; HEADER_LEN];
        header[..8].copy_from_slice(&(self.user_data() as u64).to_le_bytes());
        header[8..].copy_from_slice(&(self.size() as u64).to_le_bytes());

        with_position(stream, advance, |stream| {
            stream.write_all(&header)?;
            stream.write_all(self.as_slice())?;
            Ok(())
        })
    }

    /// Reads a buffer written by [`Buffer::save`].
    ///
    /// Resizes the buffer to the stored size first (initializing an invalid
    /// handle), then reads the content and sets the user data.
    ///
    /// # Errors
    ///
    /// [`BufferError::Overflow`] if a header value does not fit in a machine
    /// word or the size exceeds `isize::MAX` (nothing is allocated).
    /// [`BufferError::Io`] if the stream fails or ends early.
    pub fn load<R>(&mut self, stream: &mut R, advance: bool) -> Result<(), BufferError>
    where
        R: Read + Seek + ?Sized,
    {
        with_position(stream, advance, |stream| {
            let mut header = [0u8; HEADER_LEN];
            stream.read_exact(&mut header)?;

            let mut word = [0u8; 8];
            word.copy_from_slice(&header[..8]);
            let user_data = to_word(u64::from_le_bytes(word))?;
            word.copy_from_slice(&header[8..]);
            let size = to_size(u64::from_le_bytes(word))?;

            self.realloc(size, true);
            stream.read_exact(self.as_mut_slice())?;
            self.set_user_data(user_data);

            log::trace!("loaded {size} bytes");
            Ok(())
        })
    }
}
