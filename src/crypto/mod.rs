// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod decrypt;
mod encrypt;

use crate::ciphertext::Ciphertext;
use crate::error::Result;

/// Encrypts an array of plaintext blocks.
pub trait Encrypt {
    /// Encrypt every block under a fresh ephemeral key.
    ///
    /// Every block must be strictly smaller than the modulus `p`. For
    /// arbitrary bytes, use [`EncryptBytes::encrypt_bytes`].
    fn encrypt(&self, blocks: &[u64]) -> Result<Ciphertext>;
}

/// Encrypts arbitrary-length data by packing it into blocks first.
pub trait EncryptBytes {
    /// Pad and pack `data` with the widest codec the modulus allows, then
    /// encrypt the blocks. The message length is recorded in the ciphertext.
    fn encrypt_bytes<P: AsRef<[u8]>>(&self, data: P) -> Result<Ciphertext>;
}

/// Recovers plaintext blocks from a ciphertext.
pub trait Decrypt {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u64>>;
}

/// Recovers the original bytes of a ciphertext produced by [`EncryptBytes`].
///
/// Ciphertexts without a recorded message length fall back to stripping
/// trailing pad bytes.
pub trait DecryptBytes {
    fn decrypt_bytes(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>>;
}
