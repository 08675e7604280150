// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::Buffer;

fn filled(bytes: &[u8]) -> Buffer {
    let mut buffer = Buffer::new();
    buffer.store(bytes);
    buffer
}

// =============================================================================
// invalid / zero
// =============================================================================

#[test]
fn test_realloc_invalid_allocates() {
    let mut buffer = Buffer::uninit();

    buffer.realloc(8, false);

    assert!(buffer.is_valid());
    assert_eq!(buffer.size(), 8);
    assert_eq!(buffer.alloc_size(), 8);
    assert_eq!(buffer.as_slice(), &[0; 8]);

    buffer.free();
}

#[test]
fn test_realloc_to_zero_frees() {
    let mut buffer = filled(&[1, 2, 3]);

    buffer.realloc(0, false);

    assert!(buffer.is_valid());
    assert_eq!(buffer.size(), 0);
    assert_eq!(buffer.alloc_size(), 0);
    assert!(buffer.memory().is_none());
}

#[test]
fn test_realloc_empty_valid_allocates_zeroed() {
    let mut buffer = Buffer::new();

    buffer.realloc(5, true);

    assert_eq!(buffer.as_slice(), &[0; 5]);

    buffer.free();
}

// =============================================================================
// physical resize
// =============================================================================

#[test]
fn test_realloc_grow_preserves_prefix_and_zeroes_tail() {
    let mut buffer = filled(&[1, 2, 3]);

    buffer.realloc(6, false);

    assert_eq!(buffer.size(), 6);
    assert_eq!(buffer.alloc_size(), 6);
    assert_eq!(buffer.as_slice(), &[1, 2, 3, 0, 0, 0]);

    buffer.free();
}

#[test]
fn test_realloc_shrink_allowed() {
    let mut buffer = filled(&[1, 2, 3, 4, 5]);

    buffer.realloc(2, true);

    assert_eq!(buffer.size(), 2);
    assert_eq!(buffer.alloc_size(), 2);
    assert_eq!(buffer.as_slice(), &[1, 2]);

    buffer.free();
}

#[test]
fn test_realloc_grow_past_envelope_without_shrink() {
    let mut buffer = filled(&[1, 2, 3, 4]);
    buffer.realloc(2, false);

    buffer.realloc(8, false);

    assert_eq!(buffer.size(), 8);
    assert_eq!(buffer.alloc_size(), 8);
    // Bytes inside the old envelope survive, the rest is zeroed.
    assert_eq!(buffer.as_slice(), &[1, 2, 3, 4, 0, 0, 0, 0]);

    buffer.free();
}

#[test]
fn test_realloc_same_size_is_noop() {
    let mut buffer = filled(&[1, 2, 3, 4]);
    buffer.realloc(2, false);
    let ptr = buffer.as_ptr();

    buffer.realloc(2, true);

    assert_eq!(buffer.size(), 2);
    assert_eq!(buffer.alloc_size(), 4);
    assert_eq!(buffer.as_ptr(), ptr);

    buffer.free();
}

// =============================================================================
// envelope reuse
// =============================================================================

#[test]
fn test_realloc_shrink_keeps_envelope() {
    let mut buffer = filled(&[1, 2, 3, 4, 5, 6]);
    let ptr = buffer.as_ptr();

    buffer.realloc(3, false);

    assert_eq!(buffer.size(), 3);
    assert_eq!(buffer.alloc_size(), 6);
    assert_eq!(buffer.as_ptr(), ptr);
    assert_eq!(buffer.as_slice(), &[1, 2, 3]);

    buffer.free();
}

#[test]
fn test_realloc_regrow_within_envelope_restores_bytes() {
    let mut buffer = filled(&[1, 2, 3, 4, 5, 6]);
    let ptr = buffer.as_ptr();

    buffer.realloc(1, false);
    buffer.realloc(6, false);

    assert_eq!(buffer.size(), 6);
    assert_eq!(buffer.alloc_size(), 6);
    assert_eq!(buffer.as_ptr(), ptr);
    assert_eq!(buffer.as_slice(), &[1, 2, 3, 4, 5, 6]);

    buffer.free();
}

#[test]
fn test_free_after_envelope_shrink_releases_full_block() {
    let mut buffer = filled(&[0xAB; 128]);
    buffer.realloc(1, false);

    buffer.free();

    assert_eq!(buffer.alloc_size(), 0);
    assert!(buffer.memory().is_none());
}
