// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Process-wide signature source.
//!
//! One splitmix64 state shared by the whole process, seeded lazily from the
//! OS on the first signature request. Lock-free so it stays usable in
//! `no_std` builds.

use core::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use crate::mix::{GAMMA, fallback_seed, mix};
use crate::traits::SignatureSource;
use crate::u64_seed;

const UNSEEDED: u8 = 0;
const SEEDING: u8 = 1;
const SEEDED: u8 = 2;

static STATE: AtomicU64 = AtomicU64::new(0);
static PHASE: AtomicU8 = AtomicU8::new(UNSEEDED);

/// Process-wide signature source.
///
/// A zero-sized handle onto one shared state. The state is seeded exactly once,
/// by whichever thread asks for a signature first; concurrent first callers
/// wait for that seed instead of drawing their own.
///
/// # Example
///
/// ```rust
/// use tagbuf_rand::{ProcessSignatures, SignatureSource};
///
/// let a = ProcessSignatures.next_signature();
/// let b = ProcessSignatures.next_signature();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSignatures;

impl ProcessSignatures {
    /// Returns `true` once the shared state has been seeded.
    pub fn is_seeded() -> bool {
        PHASE.load(Ordering::Acquire) == SEEDED
    }

    fn ensure_seeded() {
        if PHASE.load(Ordering::Acquire) == SEEDED {
            return;
        }

        match PHASE.compare_exchange(UNSEEDED, SEEDING, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => {
                let seed = match u64_seed::generate() {
                    Ok(seed) => seed,
                    Err(e) => {
                        log::warn!("process signatures fall back to address seed: {e}");
                        fallback_seed(&STATE as *const AtomicU64 as usize)
                    }
                };

                STATE.store(seed, Ordering::Release);
                PHASE.store(SEEDED, Ordering::Release);
            }
            Err(_) => {
                while PHASE.load(Ordering::Acquire) != SEEDED {
                    core::hint::spin_loop();
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn reset_for_test() {
        STATE.store(0, Ordering::Release);
        PHASE.store(UNSEEDED, Ordering::Release);
    }
}

impl SignatureSource for ProcessSignatures {
    fn next_signature(&mut self) -> u64 {
        Self::ensure_seeded();

        loop {
            let state = STATE.fetch_add(GAMMA, Ordering::Relaxed).wrapping_add(GAMMA);
            let signature = mix(state);

            if signature != 0 {
                return signature;
            }
        }
    }
}
