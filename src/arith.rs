// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modular arithmetic over a single 64-bit word.
//!
//! Products are never formed at double width. `mul_mod` walks the bits of the
//! multiplier and accumulates with [`add_mod`], so every intermediate value
//! stays strictly below the modulus.

/// (a + b) mod p for a, b < p.
///
/// Never overflows, even when `p` uses the top bit of the word.
#[inline]
pub fn add_mod(a: u64, b: u64, p: u64) -> u64 {
    debug_assert!(a < p && b < p, "add_mod operands must be reduced");

    let gap = p - b;
    if a >= gap { a - gap } else { a + b }
}

/// a · b mod p by binary double-and-add.
///
/// Iterates over the bits of `b`, doubling an accumulator modulo `p` at each
/// step and folding it into the result whenever the bit is set.
///
/// Operands must already be reduced (`a, b < p`). This is not checked in
/// release builds.
#[inline]
pub fn mul_mod(a: u64, mut b: u64, p: u64) -> u64 {
    debug_assert!(a < p && b < p, "mul_mod operands must be reduced");

    let mut doubled = a;
    let mut product = 0;

    while b > 0 {
        if b & 1 == 1 {
            product = add_mod(product, doubled, p);
        }
        doubled = add_mod(doubled, doubled, p);
        b >>= 1;
    }

    product
}

/// a^b mod p by square-and-multiply.
///
/// Performs O(log b) calls to [`mul_mod`]. `pow_mod(a, 0, p)` is 1 for any
/// modulus greater than one. The base is reduced first, so any `a` is
/// accepted.
pub fn pow_mod(a: u64, mut b: u64, p: u64) -> u64 {
    if p == 1 {
        return 0;
    }

    let mut base = a % p;
    let mut acc = 1;

    while b > 0 {
        if b & 1 == 1 {
            acc = mul_mod(acc, base, p);
        }
        base = mul_mod(base, base, p);
        b >>= 1;
    }

    acc
}
