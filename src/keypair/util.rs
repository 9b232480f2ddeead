// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use rand::RngCore;

use crate::arith::pow_mod;
use crate::prime::is_probably_prime;
use crate::util::RandomSource;
use crate::{Error, Result};

/// Find a safe prime p = 2q + 1 where q is a random odd `bits`-bit prime.
///
/// Returns the prime together with the number of candidates drawn. Gives up
/// with [`Error::GenerationExhausted`] after `max_attempts` candidates.
pub fn find_safe_prime<R: RngCore>(
    bits: u32,
    rng: &mut RandomSource<R>,
    max_attempts: u64,
) -> Result<(u64, u64)> {
    for attempt in 1..=max_attempts {
        let q = rng.random_bits(bits)? | 1;
        let Some(p) = q.checked_mul(2).and_then(|twice| twice.checked_add(1)) else {
            return Err(Error::InvalidBitCount(bits));
        };

        // q first: half the size, and most candidates fail there
        if is_probably_prime(q) && is_probably_prime(p) {
            return Ok((p, attempt));
        }
    }

    Err(Error::GenerationExhausted { stage: "safe prime", attempts: max_attempts })
}

/// Find a generator of the multiplicative group modulo a safe prime p = 2q + 1.
///
/// The group has order p - 1 = 2q, so the only possible element orders are
/// 1, 2, q and 2q. A candidate g in [1, p) with g^q ≠ 1 and g² ≠ 1 therefore
/// has order 2q and generates the whole group. About half of all candidates
/// qualify, so `max_attempts` is only reached with a bad modulus or a broken
/// random source.
pub fn find_generator<R: RngCore>(
    p: u64,
    rng: &mut RandomSource<R>,
    max_attempts: u64,
) -> Result<u64> {
    if p < 5 || p % 2 == 0 {
        return Err(Error::InvalidPublicKey);
    }
    let q = (p - 1) / 2;

    for _ in 0..max_attempts {
        let g = rng.range(1, p);
        if is_generator(g, q, p) {
            return Ok(g);
        }
    }

    Err(Error::GenerationExhausted { stage: "generator", attempts: max_attempts })
}

/// Whether `g` generates the full group modulo the safe prime p = 2q + 1.
#[inline]
pub fn is_generator(g: u64, q: u64, p: u64) -> bool {
    g != 0 && g < p && pow_mod(g, q, p) != 1 && pow_mod(g, 2, p) != 1
}
