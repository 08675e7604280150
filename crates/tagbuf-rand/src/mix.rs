// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! splitmix64 step shared by the signature sources.

/// Odd increment of the splitmix64 state (golden ratio).
pub(crate) const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed used when no entropy could be obtained.
pub(crate) const FALLBACK_SEED: u64 = 0x5441_4742_5546_2D31;

/// Finalizer of splitmix64. A bijection on `u64` with `mix(0) == 0`.
#[inline(always)]
pub(crate) fn mix(state: u64) -> u64 {
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Mixes a fallback seed out of an address, so that two fallback-seeded
/// sources at different addresses still diverge.
#[inline(always)]
pub(crate) fn fallback_seed(addr: usize) -> u64 {
    FALLBACK_SEED ^ (addr as u64).rotate_left(32)
}
