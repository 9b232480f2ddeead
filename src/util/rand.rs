// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owned random source for key setup and ephemeral key draws.
//!
//! There is no process-wide generator. Every caller owns a [`RandomSource`],
//! and parallel workers either get their own entropy-seeded instance or a
//! child derived with [`RandomSource::fork`].

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::{Error, Result};

/// A pseudorandom bit and integer source backed by any [`RngCore`].
#[derive(Debug, Clone)]
pub struct RandomSource<R = StdRng> {
    rng: R,
}

impl RandomSource<StdRng> {
    /// Seed a new generator from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic generator, for reproducible setups and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform 0 or 1.
    #[inline]
    pub fn random_bit(&mut self) -> u64 {
        u64::from(self.rng.next_u32() & 1)
    }

    /// Uniform integer in `[2^(n-1), 2^n)`.
    ///
    /// The top bit is forced to one and the remaining `n - 1` bits are filled
    /// one at a time from [`random_bit`](Self::random_bit).
    pub fn random_bits(&mut self, n: u32) -> Result<u64> {
        if n == 0 || n > u64::BITS {
            return Err(Error::InvalidBitCount(n));
        }

        let mut value = 1u64;
        for _ in 1..n {
            value = (value << 1) | self.random_bit();
        }
        Ok(value)
    }

    /// Uniform integer in `[low, high)`.
    ///
    /// # Panics
    /// Panics if `low >= high`.
    #[inline]
    pub fn range(&mut self, low: u64, high: u64) -> u64 {
        self.rng.random_range(low..high)
    }

    /// Derive an independent generator for a worker thread.
    pub fn fork(&mut self) -> RandomSource<StdRng> {
        RandomSource::new(StdRng::from_rng(&mut self.rng))
    }
}
