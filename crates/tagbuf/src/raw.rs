// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Thin layer over the global allocator.
//!
//! Every block is a byte array with alignment 1, so a block obtained from
//! `Box<[u8]>` or `Vec<u8>` (with `len == capacity`) can be released here.

use std::alloc::{Layout, alloc, alloc_zeroed, dealloc, handle_alloc_error, realloc};
use std::ptr::NonNull;

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

#[inline(always)]
pub(crate) fn layout_for(size: usize) -> Layout {
    match Layout::array::<u8>(size) {
        Ok(layout) => layout,
        Err(_) => capacity_overflow(),
    }
}

#[inline(always)]
fn non_null(ptr: *mut u8, layout: Layout) -> NonNull<u8> {
    match NonNull::new(ptr) {
        Some(ptr) => ptr,
        None => handle_alloc_error(layout),
    }
}

/// Allocates `size` uncleared bytes. `size` must be non-zero.
pub(crate) fn allocate(size: usize) -> NonNull<u8> {
    debug_assert!(size > 0);
    let layout = layout_for(size);

    // SAFETY: layout has non-zero size.
    non_null(unsafe { alloc(layout) }, layout)
}

/// Allocates `size` zeroed bytes. `size` must be non-zero.
pub(crate) fn allocate_zeroed(size: usize) -> NonNull<u8> {
    debug_assert!(size > 0);
    let layout = layout_for(size);

    // SAFETY: layout has non-zero size.
    non_null(unsafe { alloc_zeroed(layout) }, layout)
}

/// Resizes a block from `old_size` to `new_size` bytes, both non-zero.
///
/// # Safety
///
/// `ptr` must come from this allocator with exactly `old_size` bytes.
pub(crate) unsafe fn reallocate(ptr: NonNull<u8>, old_size: usize, new_size: usize) -> NonNull<u8> {
    debug_assert!(old_size > 0 && new_size > 0);
    // Checked before touching the block.
    let new_layout = layout_for(new_size);

    // SAFETY (PRECONDITIONS ARE MET): caller guarantees ptr/old_size, new_size is
    // non-zero and fits isize.
    let new_ptr = unsafe { realloc(ptr.as_ptr(), layout_for(old_size), new_size) };

    non_null(new_ptr, new_layout)
}

/// Releases a block of `size` bytes.
///
/// # Safety
///
/// `ptr` must come from this allocator with exactly `size` bytes.
pub(crate) unsafe fn deallocate(ptr: NonNull<u8>, size: usize) {
    // SAFETY: guaranteed by caller.
    unsafe { dealloc(ptr.as_ptr(), layout_for(size)) }
}
