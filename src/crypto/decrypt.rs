// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Decrypt, DecryptBytes};
use crate::arith::{mul_mod, pow_mod};
use crate::ciphertext::Ciphertext;
use crate::codec::BlockCodec;
use crate::error::{Error, Result};
use crate::keypair::PrivateKey;

use rayon::prelude::*;
use tracing::trace;

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u64>> {
        // Ensure the ciphertext was produced for this key.
        if ciphertext.modulus() != self.public_key.p {
            return Err(Error::KeyMismatch);
        }

        let mut blocks = ciphertext.masked().to_vec();
        self.decrypt_blocks(&mut blocks, ciphertext.ephemeral())?;
        Ok(blocks)
    }
}

impl DecryptBytes for PrivateKey {
    fn decrypt_bytes(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
        let blocks = self.decrypt(ciphertext)?;
        let codec = BlockCodec::for_modulus(self.public_key.p)?;

        match ciphertext.message_len() {
            Some(len) => codec.decode(&blocks, len),
            None => codec.blocks_to_bytes(&blocks, blocks.len(), blocks.len() * codec.width()),
        }
    }
}

impl PrivateKey {
    /// Decrypt `masked` in place using the matching ephemeral values.
    ///
    /// Every input is validated before any block is modified, so a rejected
    /// ciphertext leaves `masked` untouched.
    pub fn decrypt_blocks(&self, masked: &mut [u64], ephemeral: &[u64]) -> Result<()> {
        if masked.len() != ephemeral.len() {
            return Err(Error::LengthMismatch { masked: masked.len(), ephemeral: ephemeral.len() });
        }

        let p = self.public_key.p;
        let in_range = |&v: &u64| v < p;
        if !masked.iter().all(in_range) || !ephemeral.iter().all(|&a| a != 0 && a < p) {
            return Err(Error::InvalidCiphertext);
        }

        masked.par_iter_mut().zip(ephemeral.par_iter()).for_each(|(block, &a)| {
            *block = self.unmask(*block, a);
        });

        trace!(blocks = masked.len(), "decrypted blocks");
        Ok(())
    }

    /// Decrypt one `(m', a)` pair.
    pub fn decrypt_block(&self, masked: u64, ephemeral: u64) -> Result<u64> {
        let p = self.public_key.p;
        if masked >= p || ephemeral == 0 || ephemeral >= p {
            return Err(Error::InvalidCiphertext);
        }

        Ok(self.unmask(masked, ephemeral))
    }

    /// m = m' · (a^x)^(p - 2) mod p, the inverse by Fermat's little theorem.
    #[inline]
    fn unmask(&self, masked: u64, a: u64) -> u64 {
        let p = self.public_key.p;
        let s = pow_mod(a, self.x, p);
        let s_inv = pow_mod(s, p - 2, p);
        mul_mod(masked, s_inv, p)
    }
}
