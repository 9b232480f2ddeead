// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Encrypt, EncryptBytes};
use crate::arith::{mul_mod, pow_mod};
use crate::ciphertext::Ciphertext;
use crate::codec::BlockCodec;
use crate::error::{Error, Result};
use crate::keypair::PublicKey;
use crate::util::RandomSource;

use rand::RngCore;
use rayon::prelude::*;
use tracing::trace;
use zeroize::Zeroize;

impl Encrypt for PublicKey {
    fn encrypt(&self, blocks: &[u64]) -> Result<Ciphertext> {
        let mut masked = blocks.to_vec();
        let ephemeral = self.encrypt_blocks(&mut masked)?;

        Ciphertext::new(self.p, masked, ephemeral)
    }
}

impl EncryptBytes for PublicKey {
    fn encrypt_bytes<P: AsRef<[u8]>>(&self, data: P) -> Result<Ciphertext> {
        let data = data.as_ref();
        let codec = BlockCodec::for_modulus(self.p)?;

        let mut masked = codec.encode(data)?;
        let ephemeral = self.encrypt_blocks(&mut masked)?;

        Ok(Ciphertext::new(self.p, masked, ephemeral)?.with_message_len(data.len()))
    }
}

impl PublicKey {
    /// Encrypt `blocks` in place and return the ephemeral value of each block.
    ///
    /// Blocks are processed in parallel. Every worker owns an entropy-seeded
    /// generator, so no two blocks share a random stream.
    pub fn encrypt_blocks(&self, blocks: &mut [u64]) -> Result<Vec<u64>> {
        self.check_blocks(blocks)?;

        let mut ephemeral = vec![0; blocks.len()];
        blocks.par_iter_mut().zip(ephemeral.par_iter_mut()).for_each_init(
            RandomSource::from_entropy,
            |rng, (block, a)| {
                let mut y = self.draw_ephemeral(rng);
                (*a, *block) = self.mask(*block, y);
                y.zeroize();
            },
        );

        trace!(blocks = blocks.len(), "encrypted blocks");
        Ok(ephemeral)
    }

    /// Encrypt `blocks` in place drawing ephemeral keys from `rng`.
    ///
    /// The keys are drawn up front in block order, which makes the output
    /// reproducible for a seeded source; the exponentiations then run in
    /// parallel.
    pub fn encrypt_blocks_with<R: RngCore>(
        &self,
        blocks: &mut [u64],
        rng: &mut RandomSource<R>,
    ) -> Result<Vec<u64>> {
        self.check_blocks(blocks)?;

        let mut keys: Vec<u64> = blocks.iter().map(|_| self.draw_ephemeral(rng)).collect();
        let mut ephemeral = vec![0; blocks.len()];

        blocks.par_iter_mut().zip(ephemeral.par_iter_mut()).zip(keys.par_iter()).for_each(
            |((block, a), &y)| {
                (*a, *block) = self.mask(*block, y);
            },
        );
        keys.zeroize();

        Ok(ephemeral)
    }

    /// Encrypt one block `m` with the caller's ephemeral key `y`.
    ///
    /// Returns `(a, m')` with `a = g^y mod p` and `m' = m · h^y mod p`.
    pub fn encrypt_block(&self, m: u64, y: u64) -> Result<(u64, u64)> {
        if m >= self.p {
            return Err(Error::BlockOutOfRange { index: 0, value: m, modulus: self.p });
        }
        if y == 0 || y >= self.p - 1 {
            return Err(Error::InvalidEphemeral);
        }

        Ok(self.mask(m, y))
    }

    /// y in [1, p - 1); y = p - 1 would leave the block unmasked.
    #[inline]
    fn draw_ephemeral<R: RngCore>(&self, rng: &mut RandomSource<R>) -> u64 {
        rng.range(1, self.p - 1)
    }

    #[inline]
    fn mask(&self, m: u64, y: u64) -> (u64, u64) {
        let a = pow_mod(self.g, y, self.p);
        let s = pow_mod(self.h, y, self.p);
        (a, mul_mod(m, s, self.p))
    }

    fn check_blocks(&self, blocks: &[u64]) -> Result<()> {
        match blocks.iter().position(|&value| value >= self.p) {
            Some(index) => {
                Err(Error::BlockOutOfRange { index, value: blocks[index], modulus: self.p })
            }
            None => Ok(()),
        }
    }
}
