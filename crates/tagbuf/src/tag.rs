// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Validity tag carried by every initialized buffer.
//!
//! The checksum mixes the signature with the memory address and both sizes,
//! so it has to be resealed after every mutation of those fields. It is a
//! sanity check against garbage handles, not a tamper-proof guarantee.

use std::ptr::NonNull;

/// Marker every valid tag carries.
pub const MARKER: [u8; 8] = *b"TAGBUF\0\0";

/// Checksum a revoked tag carries.
pub(crate) const INVALID_CHECKSUM: u64 = 0;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValidityTag {
    signature: u64,
    checksum: u64,
    marker: [u8; 8],
}

#[inline(always)]
fn address_bits(memory: Option<NonNull<u8>>) -> u64 {
    memory.map_or(0, |ptr| ptr.as_ptr() as usize as u64)
}

#[inline(always)]
pub(crate) fn checksum(
    signature: u64,
    memory: Option<NonNull<u8>>,
    size: usize,
    alloc_size: usize,
) -> u64 {
    signature ^ address_bits(memory) ^ !(size as u64) ^ !(alloc_size as u64)
}

impl ValidityTag {
    pub(crate) fn seal(
        signature: u64,
        memory: Option<NonNull<u8>>,
        size: usize,
        alloc_size: usize,
    ) -> Self {
        Self {
            signature,
            checksum: checksum(signature, memory, size, alloc_size),
            marker: MARKER,
        }
    }

    #[inline(always)]
    pub(crate) fn reseal(&mut self, memory: Option<NonNull<u8>>, size: usize, alloc_size: usize) {
        self.checksum = checksum(self.signature, memory, size, alloc_size);
    }

    #[inline(always)]
    pub(crate) fn verify(&self, memory: Option<NonNull<u8>>, size: usize, alloc_size: usize) -> bool {
        self.marker == MARKER && self.checksum == checksum(self.signature, memory, size, alloc_size)
    }

    pub(crate) fn revoke(&mut self) {
        self.signature = 0;
        self.checksum = INVALID_CHECKSUM;
        self.marker = [0; 8];
    }

    #[cfg(test)]
    pub(crate) fn signature(&self) -> u64 {
        self.signature
    }

    #[cfg(test)]
    pub(crate) fn zeroed_for_test() -> Self {
        Self {
            signature: 0,
            checksum: 0,
            marker: [0; 8],
        }
    }

    #[cfg(test)]
    pub(crate) fn checksum_for_test(&self) -> u64 {
        self.checksum
    }
}
