// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::EntropyError;

/// Trait for seed providers.
///
/// Implementations are typically backed by the OS CSPRNG. Signature sources
/// only draw from them to seed themselves, so they are called rarely.
pub trait EntropySource {
    /// Fills the destination buffer with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EntropyError::EntropyNotAvailable`] if the source is unavailable
    /// or fails to generate random data.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// Trait for validity signature providers.
///
/// Signatures are infallible: a source that cannot reach real entropy must
/// still hand out usable values.
pub trait SignatureSource {
    /// Returns the next signature. Never returns `0`.
    fn next_signature(&mut self) -> u64;
}

impl<S: SignatureSource + ?Sized> SignatureSource for &mut S {
    #[inline(always)]
    fn next_signature(&mut self) -> u64 {
        (**self).next_signature()
    }
}
