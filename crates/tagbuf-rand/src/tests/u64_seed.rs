// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::u64_seed::generate;

#[test]
fn test_generate() {
    let a = generate().expect("Failed to generate()");
    let b = generate().expect("Failed to generate()");

    assert_ne!(a, b);
}
