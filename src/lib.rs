// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # ElGamal over a machine word
//!
//! Public-key encryption in the multiplicative group modulo a safe prime
//! `p = 2q + 1` that fits in a `u64`. All arithmetic is done in place on 64-bit
//! words with overflow-free double-and-add reduction; there is no big-integer
//! dependency.
//!
//! Arbitrary bytes are padded and packed into blocks strictly below `p` by a
//! [`BlockCodec`], and every block is encrypted under its own ephemeral key.
//! Blocks are independent, so encryption and decryption run in parallel.
//!
//! ## Security
//!
//! A 64-bit modulus offers no real security and the arithmetic is not
//! constant-time. The crate is meant for teaching and experimentation. The
//! secret exponent is zeroized on drop via the `zeroize` crate.
//!
//! ## Example
//!
//! ```rust
//! use elgamal_blocks::{DecryptBytes, EncryptBytes, KeyPairBuilder};
//!
//! let keypair = KeyPairBuilder::new().bit_length(31).build().expect("key setup failed");
//! let message = "hello world";
//!
//! let ciphertext = keypair.encrypt_bytes(message).expect("encryption failed");
//! let decrypted = keypair.decrypt_bytes(&ciphertext).expect("decryption failed");
//! assert_eq!(message.as_bytes(), decrypted);
//! ```

pub mod arith;
mod ciphertext;
mod codec;
mod crypto;
mod error;
mod keypair;
pub mod present;
pub mod prime;
mod util;

pub use ciphertext::*;
pub use codec::*;
pub use crypto::*;
pub use error::*;
pub use keypair::*;
pub use present::PresentedPair;
pub use util::RandomSource;
