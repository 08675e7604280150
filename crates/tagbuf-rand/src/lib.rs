// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # tagbuf_rand
//!
//! Signature generation for `tagbuf` validity tags.
//!
//! Every initialized `tagbuf::Buffer` carries a random-looking 64-bit signature.
//! The signature is not a secret: it only has to make an all-zero or garbage
//! handle fail validation with overwhelming probability. This crate therefore
//! draws real entropy once (per process, or per explicitly threaded source) and
//! derives every further signature from a splitmix64 sequence.
//!
//! ## Core Types
//!
//! - [`SystemEntropySource`]: OS-level CSPRNG (via `getrandom`)
//! - [`SignatureSequence`]: explicitly threaded signature source, lazily seeded
//! - [`ProcessSignatures`]: process-wide signature source, seeded once on first use
//!
//! ## Traits
//!
//! - [`EntropySource`]: Interface for seed providers
//! - [`SignatureSource`]: Interface for signature providers
//!
//! ## Example
//!
//! ```rust
//! use tagbuf_rand::{ProcessSignatures, SignatureSequence, SignatureSource, SystemEntropySource};
//!
//! let mut sequence = SignatureSequence::new(SystemEntropySource {});
//! let a = sequence.next_signature();
//! let b = sequence.next_signature();
//! assert_ne!(a, b);
//! assert_ne!(a, 0);
//!
//! // Process-wide source, no state to carry around.
//! assert_ne!(ProcessSignatures.next_signature(), 0);
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod error;
mod mix;
mod process;
mod sequence;
mod support;
mod system;
mod traits;

pub mod u64_seed;

pub use error::EntropyError;
pub use process::ProcessSignatures;
pub use sequence::SignatureSequence;
pub use system::SystemEntropySource;
pub use traits::{EntropySource, SignatureSource};

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
