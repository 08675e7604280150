// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

/// Configurable behavior for [`MockStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockStreamBehaviour {
    /// Normal operation (delegates to an in-memory cursor).
    None,
    /// Fail the Nth read call (1-indexed: 1 = first call fails).
    FailAtNthRead(usize),
    /// Fail the Nth write call (1-indexed: 1 = first call fails).
    FailAtNthWrite(usize),
    /// Fail every seek, including `stream_position()`.
    FailSeek,
}

/// In-memory seekable stream that counts calls and injects failures.
///
/// Wraps a `Cursor<Vec<u8>>`. Every `read`, `write` and `seek` is counted
/// whether it succeeds or not, so tests can assert that an operation did not
/// touch the stream at all.
#[derive(Debug)]
pub struct MockStream {
    inner: Cursor<Vec<u8>>,
    behaviour: MockStreamBehaviour,
    read_count: usize,
    write_count: usize,
    seek_count: usize,
}

impl MockStream {
    /// Creates an empty stream with the specified behavior.
    pub fn new(behaviour: MockStreamBehaviour) -> Self {
        Self::with_bytes(Vec::new(), behaviour)
    }

    /// Creates a stream over `bytes`, positioned at 0.
    pub fn with_bytes(bytes: Vec<u8>, behaviour: MockStreamBehaviour) -> Self {
        Self {
            inner: Cursor::new(bytes),
            behaviour,
            read_count: 0,
            write_count: 0,
            seek_count: 0,
        }
    }

    /// Changes the mock behavior at runtime.
    pub fn change_behaviour(&mut self, behaviour: MockStreamBehaviour) {
        self.behaviour = behaviour;
    }

    /// Returns the bytes written so far.
    pub fn bytes(&self) -> &[u8] {
        self.inner.get_ref()
    }

    /// Returns the current position.
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Sets the current position without counting a seek.
    pub fn set_position(&mut self, position: u64) {
        self.inner.set_position(position);
    }

    /// Returns the number of read calls.
    pub fn read_count(&self) -> usize {
        self.read_count
    }

    /// Returns the number of write calls.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Returns the number of seek calls.
    pub fn seek_count(&self) -> usize {
        self.seek_count
    }

    /// Returns `true` if no read, write or seek happened.
    pub fn untouched(&self) -> bool {
        self.read_count == 0 && self.write_count == 0 && self.seek_count == 0
    }

    /// Resets all call counters.
    pub fn reset_counts(&mut self) {
        self.read_count = 0;
        self.write_count = 0;
        self.seek_count = 0;
    }
}

fn injected(what: &str) -> io::Error {
    io::Error::other(format!("injected {what} failure"))
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_count += 1;

        match self.behaviour {
            MockStreamBehaviour::FailAtNthRead(n) if self.read_count == n => Err(injected("read")),
            _ => self.inner.read(buf),
        }
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_count += 1;

        match self.behaviour {
            MockStreamBehaviour::FailAtNthWrite(n) if self.write_count == n => {
                Err(injected("write"))
            }
            _ => self.inner.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Seek for MockStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.seek_count += 1;

        match self.behaviour {
            MockStreamBehaviour::FailSeek => Err(injected("seek")),
            _ => self.inner.seek(pos),
        }
    }
}
