// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trial division plus Miller-Rabin primality testing for 64-bit words.
//!
//! ## Error bound
//!
//! The test is probabilistic by construction: a composite that fools every
//! witness is reported prime. Each witness lets a composite through with
//! probability at most 1/4, and 168 witnesses are used. For 64-bit inputs the
//! first twelve prime bases are already known to give exact answers, so the
//! table is a wide margin, but callers should treat the result as
//! "probably prime" and not as a proof.

use crate::arith::{mul_mod, pow_mod};

/// The 168 primes below 1000, used both for trial division and as
/// Miller-Rabin witnesses.
pub const SMALL_PRIMES: [u64; 168] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541, 547,
    557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613, 617, 619, 631, 641, 643, 647, 653, 659,
    661, 673, 677, 683, 691, 701, 709, 719, 727, 733, 739, 743, 751, 757, 761, 769, 773, 787, 797,
    809, 811, 821, 823, 827, 829, 839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911, 919, 929,
    937, 941, 947, 953, 967, 971, 977, 983, 991, 997,
];

/// Returns `true` if `n` is probably prime and `false` if it is certainly
/// composite (or below 2).
///
/// 2 is reported prime; every other even number is rejected up front.
pub fn is_probably_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    // 2 is already handled
    for &small in &SMALL_PRIMES[1..] {
        if n == small {
            return true;
        }
        if n % small == 0 {
            return false;
        }
    }

    miller_rabin(n)
}

/// Miller-Rabin over the full witness table. `n` must be odd and larger than
/// every witness.
fn miller_rabin(n: u64) -> bool {
    let n_minus_1 = n - 1;
    let r = n_minus_1.trailing_zeros();
    let d = n_minus_1 >> r;

    SMALL_PRIMES.iter().all(|&witness| passes_witness(witness, d, r, n))
}

/// One Miller-Rabin round: `n - 1 = 2^r · d` with `d` odd.
fn passes_witness(witness: u64, d: u64, r: u32, n: u64) -> bool {
    let n_minus_1 = n - 1;
    let mut x = pow_mod(witness, d, n);

    if x == 1 || x == n_minus_1 {
        return true;
    }

    for _ in 1..r {
        x = mul_mod(x, x, n);
        if x == n_minus_1 {
            return true;
        }
        // 1 without passing through n - 1: nontrivial square root of unity
        if x == 1 {
            return false;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_primes_below_1000() {
        assert_eq!(SMALL_PRIMES.len(), 168);
        assert!(SMALL_PRIMES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(SMALL_PRIMES[167], 997);
    }

    #[test]
    fn accepts_table_entries() {
        for &p in &SMALL_PRIMES {
            assert!(is_probably_prime(p), "{p} is in the table");
        }
    }

    #[test]
    fn two_is_prime() {
        assert!(is_probably_prime(2));
    }

    #[test]
    fn rejects_trivial_values() {
        assert!(!is_probably_prime(0));
        assert!(!is_probably_prime(1));
        assert!(!is_probably_prime(4));
        assert!(!is_probably_prime(1_000_000));
    }

    #[test]
    fn accepts_primes_beyond_table() {
        for p in [1009, 1013, 1_000_003, 2_147_483_647, 4_294_967_291, u64::MAX - 58] {
            assert!(is_probably_prime(p), "{p} is prime");
        }
    }

    #[test]
    fn rejects_composites() {
        // 1001 = 7 · 11 · 13
        assert!(!is_probably_prime(1001));
        // 1009 · 1013, no factor in the table
        assert!(!is_probably_prime(1_022_117));
        assert!(!is_probably_prime(1_000_003 * 1_000_033));
        // 2^32 + 1 = 641 · 6700417
        assert!(!is_probably_prime(4_294_967_297));
    }

    #[test]
    fn rejects_carmichael_and_strong_pseudoprimes() {
        // Carmichael numbers
        for n in [561, 41_041, 825_265, 321_197_185] {
            assert!(!is_probably_prime(n), "{n} is a Carmichael number");
        }
        // strong pseudoprime to bases 2, 3, 5, 7
        assert!(!is_probably_prime(3_215_031_751));
    }

    #[test]
    fn agrees_with_trial_division_below_ten_thousand() {
        fn naive(n: u64) -> bool {
            n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
        }

        for n in 0..10_000 {
            assert_eq!(is_probably_prime(n), naive(n), "disagreement at {n}");
        }
    }

    #[test]
    fn recognises_safe_prime_pairs() {
        // (q, p = 2q + 1)
        for (q, p) in [(11, 23), (1019, 2039), (1_000_151, 2_000_303)] {
            assert!(is_probably_prime(q) && is_probably_prime(p), "{p} = 2·{q} + 1");
        }
    }
}
