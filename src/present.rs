// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Printable debug encoding of `(m', a)` ciphertext pairs.
//!
//! Every pair takes four bytes: the high and low byte of the masked value,
//! then the high and low byte of the ephemeral value. Each byte is offset by
//! `b'0'` with wrapping addition, so small values land in the printable ASCII
//! range.
//!
//! This is a display aid for toy moduli, not a serialization format. It only
//! covers values up to `u16::MAX`; anything wider is rejected with
//! [`Error::PresentationOverflow`] and never truncated.

use std::fmt;

use crate::error::{Error, Result};

const OFFSET: u8 = b'0';
const PAIR_LEN: usize = 4;

/// One decoded `(m', a)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentedPair {
    pub masked: u16,
    pub ephemeral: u16,
}

impl PresentedPair {
    /// Narrow a pair of words, rejecting values wider than 16 bits.
    pub fn try_from_words(masked: u64, ephemeral: u64) -> Result<Self> {
        Ok(Self { masked: narrow(masked)?, ephemeral: narrow(ephemeral)? })
    }

    fn encode_into(self, out: &mut Vec<u8>) {
        for word in [self.masked, self.ephemeral] {
            out.extend(word.to_be_bytes().map(|b| b.wrapping_add(OFFSET)));
        }
    }
}

impl fmt::Display for PresentedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(mhat, a) = ({}, {})", self.masked, self.ephemeral)
    }
}

fn narrow(value: u64) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::PresentationOverflow { value })
}

/// Encode parallel masked/ephemeral arrays.
pub fn present_pairs(masked: &[u64], ephemeral: &[u64]) -> Result<Vec<u8>> {
    if masked.len() != ephemeral.len() {
        return Err(Error::LengthMismatch { masked: masked.len(), ephemeral: ephemeral.len() });
    }

    let mut out = Vec::with_capacity(masked.len() * PAIR_LEN);
    for (&m, &a) in masked.iter().zip(ephemeral) {
        PresentedPair::try_from_words(m, a)?.encode_into(&mut out);
    }
    Ok(out)
}

/// Decode the output of [`present_pairs`].
pub fn parse_presented(encoded: &[u8]) -> Result<Vec<PresentedPair>> {
    if encoded.len() % PAIR_LEN != 0 {
        return Err(Error::MalformedPresentation { len: encoded.len() });
    }

    let word = |hi: u8, lo: u8| {
        u16::from_be_bytes([hi.wrapping_sub(OFFSET), lo.wrapping_sub(OFFSET)])
    };

    Ok(encoded
        .chunks_exact(PAIR_LEN)
        .map(|c| PresentedPair { masked: word(c[0], c[1]), ephemeral: word(c[2], c[3]) })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_ascii_offset() {
        let out = present_pairs(&[19], &[10]).unwrap();
        assert_eq!(out, vec![b'0', b'0' + 19, b'0', b'0' + 10]);
    }

    #[test]
    fn high_bytes_wrap() {
        let out = present_pairs(&[0xFFFF], &[0x0100]).unwrap();
        assert_eq!(out, vec![0x2F, 0x2F, b'1', b'0']);
    }

    #[test]
    fn parses_back() {
        let masked = [0, 1, 255, 256, 0xFFFF];
        let ephemeral = [0xFFFF, 12_345, 2, 300, 0];

        let decoded = parse_presented(&present_pairs(&masked, &ephemeral).unwrap()).unwrap();
        let expected: Vec<_> = masked
            .iter()
            .zip(&ephemeral)
            .map(|(&m, &a)| PresentedPair { masked: m as u16, ephemeral: a as u16 })
            .collect();

        assert_eq!(decoded, expected);
    }

    #[test]
    fn rejects_wide_values() {
        assert_eq!(
            present_pairs(&[1 << 16], &[0]),
            Err(Error::PresentationOverflow { value: 65_536 })
        );
        assert_eq!(
            present_pairs(&[0], &[u64::MAX]),
            Err(Error::PresentationOverflow { value: u64::MAX })
        );
    }

    #[test]
    fn rejects_uneven_input() {
        assert_eq!(
            present_pairs(&[1, 2], &[3]),
            Err(Error::LengthMismatch { masked: 2, ephemeral: 1 })
        );
        assert_eq!(parse_presented(b"00000"), Err(Error::MalformedPresentation { len: 5 }));
    }

    #[test]
    fn display_matches_debug_listing() {
        let pair = PresentedPair { masked: 19, ephemeral: 10 };
        assert_eq!(pair.to_string(), "(mhat, a) = (19, 10)");
    }

    #[test]
    fn empty_input() {
        assert!(present_pairs(&[], &[]).unwrap().is_empty());
        assert!(parse_presented(&[]).unwrap().is_empty());
    }
}
