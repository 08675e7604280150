// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Direct OS entropy extraction for u64 seeds.
//!
//! Seeds are drawn once per signature source, so this goes straight to the
//! cheapest OS primitive available:
//!
//! - **Linux/Android**: `getrandom(2)` through libc
//! - **macOS/iOS**: `getentropy(3)`
//! - **Everything else**: the `getrandom` crate (Windows, WASI, wasm32 via JS)

use crate::error::EntropyError;

/// Returns one 64-bit seed from the operating system.
///
/// # Errors
///
/// Returns `EntropyError::EntropyNotAvailable` if entropy cannot be obtained.
///
/// # Example
///
/// ```rust
/// let seed = tagbuf_rand::u64_seed::generate().expect("Failed to generate seed");
/// # let _ = seed;
/// ```
pub fn generate() -> Result<u64, EntropyError> {
    let mut seed = [0u8; 8];
    fill(&mut seed)?;

    Ok(u64::from_le_bytes(seed))
}

#[inline(always)]
fn fill(dst: &mut [u8; 8]) -> Result<(), EntropyError> {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        let ret = unsafe { libc::getrandom(dst.as_mut_ptr() as *mut libc::c_void, dst.len(), 0) };

        if ret == dst.len() as isize {
            Ok(())
        } else {
            Err(EntropyError::EntropyNotAvailable)
        }
    }

    #[cfg(any(target_os = "macos", target_os = "ios"))]
    {
        let ret = unsafe { libc::getentropy(dst.as_mut_ptr() as *mut libc::c_void, dst.len()) };

        if ret == 0 {
            Ok(())
        } else {
            Err(EntropyError::EntropyNotAvailable)
        }
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios"
    )))]
    {
        getrandom::fill(dst).map_err(|_| EntropyError::EntropyNotAvailable)
    }
}
