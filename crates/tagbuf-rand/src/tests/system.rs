// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::support::test_utils::{MockEntropySource, MockEntropySourceBehaviour};
use crate::traits::EntropySource;
use crate::{EntropyError, SystemEntropySource};

#[test]
fn test_system_fill_bytes() {
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];

    SystemEntropySource {}
        .fill_bytes(&mut a)
        .expect("Failed to fill_bytes(..)");
    SystemEntropySource {}
        .fill_bytes(&mut b)
        .expect("Failed to fill_bytes(..)");

    assert_ne!(a, b);
}

#[test]
fn test_mock_fail_at_nth() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::FailAtNthFillBytes(2));
    let mut dest = [0u8; 8];

    assert!(entropy.fill_bytes(&mut dest).is_ok());
    assert_eq!(entropy.fill_bytes(&mut dest), Err(EntropyError::EntropyNotAvailable));
    assert!(entropy.fill_bytes(&mut dest).is_ok());
    assert_eq!(entropy.call_count(), 3);
}

#[test]
fn test_mock_fixed_repeats_value() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::Fixed(0x0807_0605_0403_0201));
    let mut dest = [0u8; 10];

    entropy.fill_bytes(&mut dest).expect("Failed to fill_bytes(..)");

    assert_eq!(dest, [1, 2, 3, 4, 5, 6, 7, 8, 1, 2]);
}
