// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod util;

pub use util::{find_generator, find_safe_prime, is_generator};

use std::fmt;

use rand::RngCore;
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::arith::pow_mod;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::prime::is_probably_prime;
use crate::util::RandomSource;
use crate::{Decrypt, DecryptBytes, Encrypt, EncryptBytes};

/// Public parameters of the cryptosystem.
///
/// `p` is a safe prime `2q + 1`, `g` generates the full multiplicative group
/// modulo `p`, and `h = g^x mod p` for the holder's secret `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) p: u64,
    pub(crate) g: u64,
    pub(crate) h: u64,
}

impl PublicKey {
    /// Construct a public key from known values.
    ///
    /// `p` must be a safe prime, `g` a generator modulo `p`, and `h` a nonzero
    /// residue.
    pub fn new(p: u64, g: u64, h: u64) -> Result<Self> {
        if p < 5 || !is_probably_prime(p) || !is_probably_prime((p - 1) / 2) {
            return Err(Error::InvalidPublicKey);
        }
        if !is_generator(g, (p - 1) / 2, p) {
            return Err(Error::InvalidPublicKey);
        }
        if h == 0 || h >= p {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self { p, g, h })
    }

    /// The safe prime modulus `p`.
    #[inline]
    pub fn p(&self) -> u64 {
        self.p
    }

    /// The Sophie Germain prime `q = (p - 1) / 2`.
    #[inline]
    pub fn q(&self) -> u64 {
        (self.p - 1) / 2
    }

    /// The group generator `g`.
    #[inline]
    pub fn g(&self) -> u64 {
        self.g
    }

    /// The public value `h = g^x mod p`.
    #[inline]
    pub fn h(&self) -> u64 {
        self.h
    }

    /// Bit length of the modulus.
    #[inline]
    pub fn modulus_bits(&self) -> u32 {
        u64::BITS - self.p.leading_zeros()
    }
}

/// Secret key material. The exponent is zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub(crate) public_key: PublicKey,
    pub(crate) x: u64,
}

impl PrivateKey {
    /// Construct a private key from its public half and the secret exponent.
    ///
    /// Validates `x ∈ [1, p)` and that `h = g^x mod p`.
    pub fn new(public_key: PublicKey, x: u64) -> Result<Self> {
        if x == 0 || x >= public_key.p {
            return Err(Error::InvalidPrivateKey);
        }
        if pow_mod(public_key.g, x, public_key.p) != public_key.h {
            return Err(Error::InvalidPrivateKey);
        }

        Ok(Self { public_key, x })
    }

    /// Return a reference to the associated public key.
    #[inline]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The secret exponent `x`.
    #[inline]
    pub fn x(&self) -> u64 {
        self.x
    }
}

/// A complete key pair consisting of public and private components.
///
/// Secret material is zeroized when dropped.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    #[zeroize(skip)]
    public: PublicKey,
    secret: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair with default parameters.
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair whose `q` has `bit_length` bits.
    pub fn generate_with_size(bit_length: u32) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build()
    }

    /// Assemble a key pair from a validated private key.
    pub fn from_private_key(secret: PrivateKey) -> Self {
        Self { public: secret.public_key, secret }
    }

    /// Return the public key.
    #[inline]
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return the private key.
    #[inline]
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }

    /// Human-readable report of the full key material, secret included.
    pub fn summary(&self) -> SetupSummary<'_> {
        SetupSummary { key_pair: self }
    }
}

impl Encrypt for KeyPair {
    fn encrypt(&self, blocks: &[u64]) -> Result<Ciphertext> {
        self.public.encrypt(blocks)
    }
}

impl EncryptBytes for KeyPair {
    fn encrypt_bytes<P: AsRef<[u8]>>(&self, data: P) -> Result<Ciphertext> {
        self.public.encrypt_bytes(data)
    }
}

impl Decrypt for KeyPair {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u64>> {
        self.secret.decrypt(ciphertext)
    }
}

impl DecryptBytes for KeyPair {
    fn decrypt_bytes(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
        self.secret.decrypt_bytes(ciphertext)
    }
}

/// Display adapter printing `(p, g, x, h)`.
///
/// Intended for an explicit output sink such as a terminal. It is never
/// written to the log.
pub struct SetupSummary<'a> {
    key_pair: &'a KeyPair,
}

impl fmt::Display for SetupSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let PublicKey { p, g, h } = self.key_pair.public;

        writeln!(f, "ElGamal setup successful.")?;
        writeln!(f, "p = {p}")?;
        writeln!(f, "g = {g} is a generator of Z_{p}")?;
        writeln!(f, "secret key: x = {}", self.key_pair.secret.x)?;
        write!(f, "h = g^x = {h}")
    }
}

/// Builder for generating key pairs with configurable parameters.
///
/// The bit length applies to `q`; the modulus `p = 2q + 1` is one bit wider
/// and must fit a 64-bit word.
#[derive(Debug, Clone)]
pub struct KeyPairBuilder {
    bit_length: u32,
    max_prime_attempts: u64,
    max_generator_attempts: u64,
    seed: Option<u64>,
}

impl KeyPairBuilder {
    /// Smallest `q` that still leaves one full byte per block.
    pub const MIN_BITS: u32 = 8;

    /// Largest `q` for which `2q + 1` fits in a `u64`.
    pub const MAX_BITS: u32 = 63;

    pub const DEFAULT_BITS: u32 = 32;

    const DEFAULT_PRIME_ATTEMPTS: u64 = 1_000_000;
    const DEFAULT_GENERATOR_ATTEMPTS: u64 = 10_000;

    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self {
            bit_length: Self::DEFAULT_BITS,
            max_prime_attempts: Self::DEFAULT_PRIME_ATTEMPTS,
            max_generator_attempts: Self::DEFAULT_GENERATOR_ATTEMPTS,
            seed: None,
        }
    }

    /// Set the bit length of `q`.
    pub fn bit_length(mut self, bits: u32) -> Self {
        self.bit_length = bits;
        self
    }

    /// Cap on safe-prime candidates before giving up.
    pub fn max_prime_attempts(mut self, attempts: u64) -> Self {
        self.max_prime_attempts = attempts;
        self
    }

    /// Cap on generator candidates before giving up.
    pub fn max_generator_attempts(mut self, attempts: u64) -> Self {
        self.max_generator_attempts = attempts;
        self
    }

    /// Make setup deterministic.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generate the key pair.
    pub fn build(self) -> Result<KeyPair> {
        let mut rng = match self.seed {
            Some(seed) => RandomSource::seeded(seed),
            None => RandomSource::from_entropy(),
        };
        self.build_with(&mut rng)
    }

    /// Generate the key pair drawing from a caller-owned random source.
    pub fn build_with<R: RngCore>(self, rng: &mut RandomSource<R>) -> Result<KeyPair> {
        if !(Self::MIN_BITS..=Self::MAX_BITS).contains(&self.bit_length) {
            return Err(Error::InvalidKeySize {
                min: Self::MIN_BITS,
                max: Self::MAX_BITS,
                actual: self.bit_length,
            });
        }

        let (p, prime_attempts) = find_safe_prime(self.bit_length, rng, self.max_prime_attempts)?;
        debug!(p, prime_attempts, "found safe prime");

        let g = find_generator(p, rng, self.max_generator_attempts)?;

        // x = p - 1 would give h = 1
        let x = rng.range(1, p - 1);
        let h = pow_mod(g, x, p);

        let public = PublicKey::new(p, g, h)?;
        let secret = PrivateKey::new(public, x)?;

        info!(p, g, h, bits = self.bit_length, "ElGamal setup successful");

        Ok(KeyPair { public, secret })
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known_key() -> KeyPair {
        let public = PublicKey::new(23, 5, 8).unwrap();
        KeyPair::from_private_key(PrivateKey::new(public, 6).unwrap())
    }

    #[test]
    fn setup_satisfies_key_equation() {
        for seed in 0..8 {
            let keypair = KeyPairBuilder::new().bit_length(24).seed(seed).build().unwrap();
            let public = keypair.public_key();
            let x = keypair.private_key().x();

            assert!(x >= 1 && x < public.p());
            assert_eq!(pow_mod(public.g(), x, public.p()), public.h());
            assert!(is_probably_prime(public.p()));
            assert!(is_probably_prime(public.q()));
            assert!(is_generator(public.g(), public.q(), public.p()));
        }
    }

    #[test]
    fn setup_respects_bit_length() {
        for bits in [KeyPairBuilder::MIN_BITS, 20, KeyPairBuilder::MAX_BITS] {
            let keypair = KeyPairBuilder::new().bit_length(bits).seed(9).build().unwrap();
            assert_eq!(keypair.public_key().modulus_bits(), bits + 1);
        }
    }

    #[test]
    fn seeded_setup_is_reproducible() {
        let a = KeyPairBuilder::new().seed(77).build().unwrap();
        let b = KeyPairBuilder::new().seed(77).build().unwrap();
        assert!(a == b);
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        for bits in [0, 7, 64, 128] {
            let result = KeyPair::generate_with_size(bits);
            assert!(
                matches!(result, Err(Error::InvalidKeySize { actual, .. }) if actual == bits),
                "{bits} bits should be rejected"
            );
        }
    }

    #[test]
    fn exhausted_prime_budget_is_reported() {
        let result = KeyPairBuilder::new().max_prime_attempts(0).build();
        assert!(matches!(
            result,
            Err(Error::GenerationExhausted { stage: "safe prime", attempts: 0 })
        ));
    }

    #[test]
    fn exhausted_generator_budget_is_reported() {
        let result = KeyPairBuilder::new().seed(1).max_generator_attempts(0).build();
        assert!(matches!(
            result,
            Err(Error::GenerationExhausted { stage: "generator", .. })
        ));
    }

    #[test]
    fn public_key_validation() {
        assert!(PublicKey::new(23, 5, 8).is_ok());
        // 29 is prime but 14 is not
        assert_eq!(PublicKey::new(29, 2, 8), Err(Error::InvalidPublicKey));
        // 2 has order 11 modulo 23
        assert_eq!(PublicKey::new(23, 2, 8), Err(Error::InvalidPublicKey));
        assert_eq!(PublicKey::new(23, 5, 0), Err(Error::InvalidPublicKey));
        assert_eq!(PublicKey::new(23, 5, 23), Err(Error::InvalidPublicKey));
        assert_eq!(PublicKey::new(21, 5, 8), Err(Error::InvalidPublicKey));
    }

    #[test]
    fn private_key_validation() {
        let public = PublicKey::new(23, 5, 8).unwrap();
        assert!(PrivateKey::new(public, 6).is_ok());
        assert!(PrivateKey::new(public, 0).is_err());
        assert!(PrivateKey::new(public, 23).is_err());
        // 5^7 mod 23 = 17
        assert!(PrivateKey::new(public, 7).is_err());
    }

    #[test]
    fn summary_lists_key_material() {
        let summary = known_key().summary().to_string();

        assert!(summary.contains("p = 23"));
        assert!(summary.contains("g = 5 is a generator of Z_23"));
        assert!(summary.contains("x = 6"));
        assert!(summary.contains("h = g^x = 8"));
    }
}
