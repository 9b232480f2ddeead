// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::TryReserveError;

/// Errors that can occur during key setup, block coding and encryption.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key size: must be between {min} and {max} bits, got {actual}")]
    InvalidKeySize { min: u32, max: u32, actual: u32 },

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Ciphertext was produced under a different modulus")]
    KeyMismatch,

    #[error("{stage} search gave up after {attempts} attempts")]
    GenerationExhausted { stage: &'static str, attempts: u64 },

    #[error("Block width of {width} bytes cannot be packed below modulus {modulus}")]
    IncompatibleBlockWidth { width: usize, modulus: u64 },

    #[error("Buffer of {len} bytes does not split into {blocks} blocks of {width} bytes")]
    MisalignedBuffer { len: usize, width: usize, blocks: usize },

    #[error("Block {index} has value {value}, which is not below modulus {modulus}")]
    BlockOutOfRange { index: usize, value: u64, modulus: u64 },

    #[error("Block {index} has value {value}, which does not fit in {width} bytes")]
    BlockTooWide { index: usize, value: u64, width: usize },

    #[error("Ephemeral key must lie in [1, p - 1)")]
    InvalidEphemeral,

    #[error("Got {masked} masked blocks but {ephemeral} ephemeral values")]
    LengthMismatch { masked: usize, ephemeral: usize },

    #[error("Ciphertext is invalid or corrupted")]
    InvalidCiphertext,

    #[error("Cannot draw a {0}-bit integer into a 64-bit word")]
    InvalidBitCount(u32),

    #[error("Buffer allocation failed: {0}")]
    AllocationFailed(#[from] TryReserveError),

    #[error("Value {value} does not fit the 16-bit presentation format")]
    PresentationOverflow { value: u64 },

    #[error("Presented ciphertext length {len} is not a multiple of 4")]
    MalformedPresentation { len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
