// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Byte string ↔ integer block conversion.
//!
//! A message is padded to a multiple of the block width and every
//! `width`-byte chunk is packed most-significant-byte first into one `u64`.
//! The width is validated against the modulus up front so that every packed
//! value is strictly below `p`: with `256^width <= p` the largest packed value,
//! `256^width - 1`, can never reach the modulus.
//!
//! ## Padding
//!
//! The pad length is `(width - len % width) % width`. [`BlockCodec::blocks_to_bytes`]
//! strips the padding by dropping trailing pad bytes, so a payload that itself
//! ends in the pad byte loses those bytes on that path. [`BlockCodec::decode`]
//! truncates to a recorded length instead and round-trips every input.

use rayon::prelude::*;

use crate::error::{Error, Result};

/// Default pad byte.
pub const PAD_BYTE: u8 = 0x00;

/// Widest block that still fits a `u64`.
const MAX_WIDTH: usize = 8;

/// Packs bytes into blocks of a fixed width below a modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCodec {
    width: usize,
    pad_byte: u8,
}

impl BlockCodec {
    /// Codec with an explicit block width.
    ///
    /// Fails with [`Error::IncompatibleBlockWidth`] if `width` is zero, wider
    /// than a word, or so wide that a packed block could reach `modulus`.
    pub fn new(width: usize, modulus: u64) -> Result<Self> {
        if width == 0 || width > MAX_WIDTH || (1u128 << (8 * width)) > u128::from(modulus) {
            return Err(Error::IncompatibleBlockWidth { width, modulus });
        }

        Ok(Self { width, pad_byte: PAD_BYTE })
    }

    /// Codec with the widest block the modulus allows.
    pub fn for_modulus(modulus: u64) -> Result<Self> {
        let usable_bits = (u64::BITS - modulus.leading_zeros()).saturating_sub(1);
        Self::new(usable_bits as usize / 8, modulus)
    }

    /// Replace the pad byte.
    pub fn with_pad_byte(mut self, pad_byte: u8) -> Self {
        self.pad_byte = pad_byte;
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn pad_byte(&self) -> u8 {
        self.pad_byte
    }

    /// Length of `len` bytes after padding.
    #[inline]
    pub fn padded_len(&self, len: usize) -> usize {
        len + (self.width - len % self.width) % self.width
    }

    /// Number of blocks `len` bytes occupy after padding.
    #[inline]
    pub fn block_count(&self, len: usize) -> usize {
        self.padded_len(len) / self.width
    }

    /// Copy `bytes` into a buffer padded to a multiple of the block width.
    ///
    /// The buffer is reserved once at its final size.
    pub fn pad(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let padded_len = self.padded_len(bytes.len());

        let mut padded = Vec::new();
        padded.try_reserve_exact(padded_len)?;
        padded.extend_from_slice(bytes);
        padded.resize(padded_len, self.pad_byte);

        Ok(padded)
    }

    /// Pack a padded buffer into `block_count` blocks, MSB first.
    pub fn bytes_to_blocks(&self, padded: &[u8], block_count: usize) -> Result<Vec<u64>> {
        self.check_alignment(padded.len(), block_count)?;

        Ok(padded.par_chunks_exact(self.width).map(pack).collect())
    }

    /// Unpack `block_count` blocks into `total_len` bytes and strip trailing
    /// pad bytes.
    pub fn blocks_to_bytes(
        &self,
        blocks: &[u64],
        block_count: usize,
        total_len: usize,
    ) -> Result<Vec<u8>> {
        if blocks.len() != block_count {
            return Err(Error::MisalignedBuffer {
                len: total_len,
                width: self.width,
                blocks: blocks.len(),
            });
        }

        let mut bytes = self.unpack(blocks, total_len)?;
        let kept = bytes.iter().rposition(|&b| b != self.pad_byte).map_or(0, |last| last + 1);
        bytes.truncate(kept);

        Ok(bytes)
    }

    /// Pad and pack in one step.
    pub fn encode(&self, bytes: &[u8]) -> Result<Vec<u64>> {
        let padded = self.pad(bytes)?;
        self.bytes_to_blocks(&padded, padded.len() / self.width)
    }

    /// Unpack and truncate to the original `message_len`.
    ///
    /// Unlike [`blocks_to_bytes`](Self::blocks_to_bytes) this is exact for
    /// payloads that end in the pad byte.
    pub fn decode(&self, blocks: &[u64], message_len: usize) -> Result<Vec<u8>> {
        let total_len = blocks.len() * self.width;
        if self.padded_len(message_len) != total_len {
            return Err(Error::MisalignedBuffer {
                len: message_len,
                width: self.width,
                blocks: blocks.len(),
            });
        }

        let mut bytes = self.unpack(blocks, total_len)?;
        bytes.truncate(message_len);
        Ok(bytes)
    }

    fn check_alignment(&self, len: usize, block_count: usize) -> Result<()> {
        if block_count.checked_mul(self.width) != Some(len) {
            return Err(Error::MisalignedBuffer { len, width: self.width, blocks: block_count });
        }
        Ok(())
    }

    fn unpack(&self, blocks: &[u64], total_len: usize) -> Result<Vec<u8>> {
        self.check_alignment(total_len, blocks.len())?;

        let limit = 1u128 << (8 * self.width);
        if let Some((index, &value)) =
            blocks.iter().enumerate().find(|&(_, &value)| u128::from(value) >= limit)
        {
            return Err(Error::BlockTooWide { index, value, width: self.width });
        }

        let mut bytes = Vec::new();
        bytes.try_reserve_exact(total_len)?;
        bytes.resize(total_len, 0);

        let width = self.width;
        bytes.par_chunks_exact_mut(width).zip(blocks.par_iter()).for_each(|(chunk, &block)| {
            chunk.copy_from_slice(&block.to_be_bytes()[MAX_WIDTH - width..]);
        });

        Ok(bytes)
    }
}

/// Big-endian pack of up to eight bytes.
#[inline]
fn pack(chunk: &[u8]) -> u64 {
    chunk.iter().fold(0, |acc, &b| (acc << 8) | u64::from(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: u64 = 4_294_967_291; // 32-bit prime, three bytes per block

    fn codec() -> BlockCodec {
        BlockCodec::for_modulus(P).unwrap()
    }

    #[test]
    fn widest_width_for_modulus() {
        assert_eq!(codec().width(), 3);
        assert_eq!(
            BlockCodec::for_modulus(23),
            Err(Error::IncompatibleBlockWidth { width: 0, modulus: 23 })
        );
        assert_eq!(BlockCodec::for_modulus(257).unwrap().width(), 1);
        assert_eq!(BlockCodec::for_modulus(u64::MAX - 58).unwrap().width(), 7);
    }

    #[test]
    fn rejects_blocks_that_could_reach_modulus() {
        assert!(BlockCodec::new(4, P).is_err());
        assert!(BlockCodec::new(0, P).is_err());
        assert!(BlockCodec::new(9, u64::MAX).is_err());
        // 256 itself is not below 256
        assert!(BlockCodec::new(1, 256).is_ok());
        assert!(BlockCodec::new(1, 255).is_err());
    }

    #[test]
    fn pad_length_rule() {
        let codec = codec();
        for (len, padded) in [(0, 0), (1, 3), (2, 3), (3, 3), (4, 6), (7, 9)] {
            assert_eq!(codec.padded_len(len), padded, "len {len}");
            assert_eq!(codec.pad(&vec![b'a'; len]).unwrap().len(), padded);
        }
    }

    #[test]
    fn pad_appends_pad_byte() {
        let padded = codec().with_pad_byte(b' ').pad(b"hello").unwrap();
        assert_eq!(padded, b"hello ");
    }

    #[test]
    fn packs_msb_first() {
        let blocks = codec().bytes_to_blocks(b"abcdef", 2).unwrap();
        assert_eq!(blocks, vec![0x61_62_63, 0x64_65_66]);
        assert!(blocks.iter().all(|&b| b < P));
    }

    #[test]
    fn rejects_misaligned_buffers() {
        let codec = codec();
        assert_eq!(
            codec.bytes_to_blocks(b"abcd", 1),
            Err(Error::MisalignedBuffer { len: 4, width: 3, blocks: 1 })
        );
        assert!(codec.bytes_to_blocks(b"abcdef", 3).is_err());
        assert!(codec.blocks_to_bytes(&[1, 2], 2, 5).is_err());
        assert!(codec.blocks_to_bytes(&[1, 2], 3, 9).is_err());
    }

    #[test]
    fn rejects_blocks_wider_than_width() {
        let result = codec().blocks_to_bytes(&[1, 1 << 24], 2, 6);
        assert_eq!(result, Err(Error::BlockTooWide { index: 1, value: 1 << 24, width: 3 }));

        let result = codec().decode(&[1 << 30], 3);
        assert_eq!(result, Err(Error::BlockTooWide { index: 0, value: 1 << 30, width: 3 }));
    }

    #[test]
    fn round_trip_with_padding_stripped() {
        let codec = codec();

        let messages: [&[u8]; 5] = [b"", b"abc", b"abcdef", b"hello world", b"0123456789"];
        for message in messages {
            let padded = codec.pad(message).unwrap();
            let blocks = codec.bytes_to_blocks(&padded, padded.len() / codec.width()).unwrap();
            let recovered = codec.blocks_to_bytes(&blocks, blocks.len(), padded.len()).unwrap();
            assert_eq!(recovered, message);
        }
    }

    #[test]
    fn stripping_drops_trailing_pad_bytes_in_payload() {
        let codec = codec().with_pad_byte(b' ');
        let blocks = codec.encode(b"trailing  ").unwrap();

        let recovered = codec.blocks_to_bytes(&blocks, blocks.len(), blocks.len() * 3).unwrap();
        assert_eq!(recovered, b"trailing");
        assert_eq!(codec.decode(&blocks, 10).unwrap(), b"trailing  ");
    }

    #[test]
    fn decode_is_exact() {
        let codec = codec();
        let message = b"\x00binary\x00\x00";

        let blocks = codec.encode(message).unwrap();
        assert_eq!(codec.decode(&blocks, message.len()).unwrap(), message);
    }

    #[test]
    fn decode_rejects_inconsistent_length() {
        let codec = codec();
        let blocks = codec.encode(b"abcdef").unwrap();
        assert!(codec.decode(&blocks, 7).is_err());
        assert!(codec.decode(&blocks, 3).is_err());
    }

    #[test]
    fn large_buffer_round_trip() {
        let codec = BlockCodec::for_modulus(u64::MAX - 58).unwrap();
        let message: Vec<u8> = (0..10_000u32).map(|i| (i * 31 % 251) as u8).collect();

        let blocks = codec.encode(&message).unwrap();
        assert_eq!(blocks.len(), codec.block_count(message.len()));
        assert_eq!(codec.decode(&blocks, message.len()).unwrap(), message);
    }
}
