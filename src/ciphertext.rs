// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::{Error, Result};
use crate::present::{self, PresentedPair};

/// Block-wise ElGamal ciphertext.
///
/// Each plaintext block becomes a pair `(a, m')` with `a = g^y mod p` and
/// `m' = m · h^y mod p` for a fresh ephemeral `y`. The masked values and the
/// ephemeral values are stored as parallel arrays, as the engine produces
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    modulus: u64,
    masked: Vec<u64>,
    ephemeral: Vec<u64>,
    message_len: Option<usize>,
}

impl Ciphertext {
    /// Pair up masked blocks with their ephemeral values.
    pub fn new(modulus: u64, masked: Vec<u64>, ephemeral: Vec<u64>) -> Result<Self> {
        if masked.len() != ephemeral.len() {
            return Err(Error::LengthMismatch { masked: masked.len(), ephemeral: ephemeral.len() });
        }

        Ok(Self { modulus, masked, ephemeral, message_len: None })
    }

    /// Record the unpadded byte length of the encrypted message.
    pub fn with_message_len(mut self, len: usize) -> Self {
        self.message_len = Some(len);
        self
    }

    /// Modulus the ciphertext was produced under.
    #[inline]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// The masked blocks `m'`.
    #[inline]
    pub fn masked(&self) -> &[u64] {
        &self.masked
    }

    /// The ephemeral public values `a`.
    #[inline]
    pub fn ephemeral(&self) -> &[u64] {
        &self.ephemeral
    }

    /// Byte length of the original message, when encrypted from bytes.
    #[inline]
    pub fn message_len(&self) -> Option<usize> {
        self.message_len
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.masked.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.masked.is_empty()
    }

    /// Iterate over `(m', a)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.masked.iter().copied().zip(self.ephemeral.iter().copied())
    }

    /// Printable 16-bit debug encoding, see [`present::present_pairs`].
    pub fn present(&self) -> Result<Vec<u8>> {
        present::present_pairs(&self.masked, &self.ephemeral)
    }

    /// Pairs as [`PresentedPair`]s, if every value fits in 16 bits.
    pub fn presented_pairs(&self) -> Result<Vec<PresentedPair>> {
        self.pairs()
            .map(|(masked, ephemeral)| PresentedPair::try_from_words(masked, ephemeral))
            .collect()
    }
}
