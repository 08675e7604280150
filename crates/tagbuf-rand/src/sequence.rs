// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::EntropyError;
use crate::mix::{GAMMA, fallback_seed, mix};
use crate::traits::{EntropySource, SignatureSource};

/// Explicitly threaded signature source.
///
/// The state is lazily seeded from the entropy source on first use and then
/// advanced as a splitmix64 sequence. Consecutive signatures never repeat
/// within the `2^64` period and are never `0`.
///
/// If the entropy source fails, the sequence is seeded from its own address
/// instead and a warning is logged. Signatures are a sanity check against
/// garbage handles, not a secret, so this keeps `next_signature` infallible.
///
/// # Example
///
/// ```rust
/// use tagbuf_rand::{SignatureSequence, SignatureSource, SystemEntropySource};
///
/// let mut sequence = SignatureSequence::new(SystemEntropySource {});
/// assert_ne!(sequence.next_signature(), sequence.next_signature());
/// ```
pub struct SignatureSequence<E: EntropySource> {
    entropy: E,
    state: u64,
    initialized: bool,
}

impl<E: EntropySource> SignatureSequence<E> {
    /// Creates a new, not yet seeded, signature sequence.
    pub fn new(entropy: E) -> Self {
        Self {
            entropy,
            state: 0,
            initialized: false,
        }
    }

    /// Returns `true` once the sequence has drawn its seed.
    pub fn is_seeded(&self) -> bool {
        self.initialized
    }

    /// Returns a reference to the underlying entropy source.
    pub fn entropy(&self) -> &E {
        &self.entropy
    }

    fn draw_seed(&self) -> Result<u64, EntropyError> {
        let mut seed = [0u8; 8];
        self.entropy.fill_bytes(&mut seed)?;

        Ok(u64::from_le_bytes(seed))
    }

    fn maybe_initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.state = match self.draw_seed() {
            Ok(seed) => seed,
            Err(e) => {
                log::warn!("signature sequence falls back to address seed: {e}");
                fallback_seed(self as *const Self as usize)
            }
        };
        self.initialized = true;
    }

    #[cfg(test)]
    pub(crate) fn set_state_for_test(&mut self, state: u64) {
        self.state = state;
        self.initialized = true;
    }
}

impl<E: EntropySource> SignatureSource for SignatureSequence<E> {
    fn next_signature(&mut self) -> u64 {
        self.maybe_initialize();

        loop {
            self.state = self.state.wrapping_add(GAMMA);
            let signature = mix(self.state);

            if signature != 0 {
                return signature;
            }
        }
    }
}

impl<E: EntropySource> core::fmt::Debug for SignatureSequence<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SignatureSequence")
            .field("state", &"REDACTED")
            .field("initialized", &self.initialized)
            .finish()
    }
}
