//! # BWT Block Decompression
//!
//! `bwtblock` is a safe, pure-Rust decoder for the two-stage compressed block
//! format found in recent Ultima Online client assets (the "BWT" blocks that
//! wrap, among other things, the localization files).
//!
//! A block is a 4-byte opaque tag and a 1-byte seed, followed by a payload
//! that was move-to-front recoded on top of a frequency-ranked run encoding.
//! Decoding undoes the two stages in sequence and yields an output whose
//! length is embedded in a 1024-byte frequency table inside the stream.
//!
//! ## Example
//!
//! ```rust
//! extern crate alloc;
//! use alloc::vec::Vec;
//! use bwtblock::decompress;
//!
//! // Build a block that decodes to "AAAA": a 1024-byte frequency table
//! // (counter for 'A' = 4), one rank-slot byte, and three zero schedule
//! // bytes, all re-coded through the outer move-to-front stage.
//! let mut intermediate = alloc::vec![0u8; 1024];
//! intermediate[b'A' as usize * 4] = 4; // little-endian counter
//! intermediate.extend_from_slice(&[0, 0, 0, 0]);
//!
//! let mut list: Vec<u8> = (0..=255).collect();
//! let mut ranks = Vec::new();
//! for &value in &intermediate {
//!     let rank = list.iter().position(|&v| v == value).unwrap();
//!     ranks.push(rank as u8);
//!     list.remove(rank);
//!     list.insert(0, value);
//! }
//!
//! let mut compressed = alloc::vec![0u8; 4]; // opaque tag
//! compressed.extend_from_slice(&ranks); // seed byte + payload
//!
//! assert_eq!(decompress(&compressed).unwrap(), b"AAAA");
//! ```

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod decompress;
pub mod error;

pub use decompress::decompress;
pub use error::DecompressionError;

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{DecompressionError, decompress};

    #[test]
    fn test_zero_frequency_stream() {
        // 4-byte tag, zero seed, and 1023 zero ranks recode to an all-zero
        // frequency table: a legitimately empty decode.
        let compressed = [0u8; 1028];
        assert_eq!(decompress(&compressed).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_truncated_envelope() {
        assert_eq!(decompress(&[]), Err(DecompressionError::UnexpectedEof));
        assert_eq!(
            decompress(&[0, 0, 0, 0]),
            Err(DecompressionError::UnexpectedEof)
        );
    }

    #[test]
    fn test_empty_payload() {
        // Tag and seed alone recode to a single byte, which cannot hold the
        // frequency table.
        assert_eq!(
            decompress(&[0, 0, 0, 0, 0x41]),
            Err(DecompressionError::InputTooShort)
        );
    }
}
