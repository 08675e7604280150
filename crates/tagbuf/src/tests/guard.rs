// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{Buffer, ScopedBuffer};

#[test]
fn test_scoped_new_is_valid() {
    let buffer = ScopedBuffer::new();

    assert!(buffer.is_valid());
    assert_eq!(buffer.size(), 0);
}

#[test]
fn test_scoped_derefs_to_buffer() {
    let mut buffer = ScopedBuffer::default();

    buffer.store(&[1, 2, 3]);
    buffer.realloc(2, false);

    assert_eq!(buffer.as_slice(), &[1, 2]);
    assert_eq!(buffer.alloc_size(), 3);
}

#[test]
fn test_into_inner_keeps_handle() {
    let mut scoped = Buffer::new().scoped();
    scoped.store(b"kept");
    scoped.set_user_data(8);
    let ptr = scoped.as_ptr();

    let mut buffer = scoped.into_inner();

    assert!(buffer.is_valid());
    assert_eq!(buffer.as_ptr(), ptr);
    assert_eq!(buffer.as_slice(), b"kept");
    assert_eq!(buffer.user_data(), 8);

    buffer.finalize();
}

#[test]
fn test_scoped_over_uninit() {
    let buffer = ScopedBuffer::from_buffer(Buffer::uninit());

    assert!(!buffer.is_valid());
    // Dropping finalizes an uninit handle: no-op.
}

#[test]
fn test_scoped_manual_finalize_then_drop() {
    let mut buffer = ScopedBuffer::new();
    buffer.alloc(32);

    buffer.finalize();

    assert!(!buffer.is_valid());
    // Drop finalizes again: no-op, no double free.
}

#[test]
fn test_scoped_debug() {
    let buffer = ScopedBuffer::from_buffer(Buffer::uninit());

    assert_eq!(format!("{:?}", buffer), "ScopedBuffer(Buffer(uninit))");
}
