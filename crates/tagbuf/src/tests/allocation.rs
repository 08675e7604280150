// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::Buffer;

// =============================================================================
// get()
// =============================================================================

#[test]
fn test_get_sets_sizes() {
    let mut buffer = Buffer::new();

    unsafe { buffer.get(32) };

    assert_eq!(buffer.size(), 32);
    assert_eq!(buffer.alloc_size(), 32);
    assert!(buffer.memory().is_some());

    buffer.free();
}

#[test]
fn test_get_zero_has_no_memory() {
    let mut buffer = Buffer::new();

    unsafe { buffer.get(0) };

    assert!(buffer.is_valid());
    assert_eq!(buffer.size(), 0);
    assert!(buffer.memory().is_none());
    assert!(buffer.as_ptr().is_null());
}

#[test]
fn test_get_initializes_invalid_buffer() {
    let mut buffer = Buffer::uninit();

    unsafe { buffer.get(8) };

    assert!(buffer.is_valid());
    assert_eq!(buffer.size(), 8);

    buffer.free();
}

#[test]
fn test_get_then_write_through_pointer() {
    let mut buffer = Buffer::new();
    unsafe { buffer.get(4) };

    let ptr = buffer.as_mut_ptr();
    for i in 0..4 {
        unsafe { ptr.add(i).write(i as u8 + 1) };
    }

    assert_eq!(buffer.as_slice(), &[1, 2, 3, 4]);

    buffer.free();
}

#[test]
fn test_get_replaces_previous_block() {
    let mut buffer = Buffer::new();
    buffer.alloc(100);
    buffer.set_user_data(6);

    unsafe { buffer.get(10) };

    assert_eq!(buffer.size(), 10);
    assert_eq!(buffer.alloc_size(), 10);
    // Only the block is replaced.
    assert_eq!(buffer.user_data(), 6);

    buffer.free();
}

// =============================================================================
// alloc()
// =============================================================================

#[test]
fn test_alloc_zero_fills() {
    let mut buffer = Buffer::new();

    buffer.alloc(64);

    assert_eq!(buffer.size(), 64);
    assert!(buffer.as_slice().iter().all(|b| *b == 0));

    buffer.free();
}

#[test]
fn test_alloc_after_dirty_block_zero_fills() {
    let mut buffer = Buffer::new();
    buffer.store(&[0xFF; 64]);

    buffer.alloc(64);

    assert!(buffer.as_slice().iter().all(|b| *b == 0));

    buffer.free();
}

#[test]
fn test_alloc_zero_has_no_memory() {
    let mut buffer = Buffer::uninit();

    buffer.alloc(0);

    assert!(buffer.is_valid());
    assert!(buffer.memory().is_none());
}

// =============================================================================
// free()
// =============================================================================

#[test]
fn test_free_releases_and_stays_valid() {
    let mut buffer = Buffer::new();
    buffer.alloc(16);

    buffer.free();

    assert!(buffer.is_valid());
    assert_eq!(buffer.size(), 0);
    assert_eq!(buffer.alloc_size(), 0);
    assert!(buffer.memory().is_none());
}

#[test]
fn test_free_twice() {
    let mut buffer = Buffer::new();
    buffer.alloc(16);

    buffer.free();
    buffer.free();

    assert!(buffer.is_valid());
    assert_eq!(buffer.alloc_size(), 0);
}

#[test]
fn test_free_initializes_invalid_buffer() {
    let mut buffer = Buffer::uninit();

    buffer.free();

    assert!(buffer.is_valid());
    assert_eq!(buffer.size(), 0);
}

#[test]
fn test_free_keeps_user_data() {
    let mut buffer = Buffer::new();
    buffer.alloc(4);
    buffer.set_user_data(77);

    buffer.free();

    assert_eq!(buffer.user_data(), 77);
}
