// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Bit string framing shared by every channel.
//!
//! A payload is carried as a length-prefixed bit string:
//!
//! ```text
//! [16 bits] payload length in bits (big-endian u16)
//! [L bits ] payload bytes, MSB first
//! ```
//!
//! Bits are stored one per `u8` (0 or 1). The prefix caps a payload at
//! 65,535 bits, so the largest payload is 8,191 bytes.

use crate::stego::error::StegoError;

/// Width of the length prefix in bits.
pub const LENGTH_PREFIX_BITS: usize = 16;

/// Largest payload length the prefix can declare.
pub const MAX_PAYLOAD_BITS: usize = u16::MAX as usize;

/// Largest whole-byte payload (65,535 / 8 rounded down).
pub const MAX_PAYLOAD_BYTES: usize = MAX_PAYLOAD_BITS / 8;

/// Frame a payload: 16-bit big-endian bit length followed by the payload bits.
///
/// # Errors
/// [`StegoError::PayloadTooLarge`] if the payload needs more than
/// [`MAX_PAYLOAD_BITS`] bits.
pub fn to_bits(payload: &[u8]) -> Result<Vec<u8>, StegoError> {
    let payload_bits = payload.len() * 8;
    if payload_bits > MAX_PAYLOAD_BITS {
        return Err(StegoError::PayloadTooLarge {
            bits: payload_bits,
            limit: MAX_PAYLOAD_BITS,
        });
    }

    let mut bits = Vec::with_capacity(LENGTH_PREFIX_BITS + payload_bits);
    bits.extend(bytes_to_bits(&(payload_bits as u16).to_be_bytes()));
    bits.extend(bytes_to_bits(payload));
    Ok(bits)
}

/// Read the payload length declared by the prefix, if 16 bits are present.
pub fn declared_len(bits: &[u8]) -> Option<usize> {
    let prefix = bits.get(..LENGTH_PREFIX_BITS)?;
    Some(prefix.iter().fold(0usize, |acc, &b| (acc << 1) | (b & 1) as usize))
}

/// Total frame length in bits implied by the prefix, if present.
pub fn frame_len(bits: &[u8]) -> Option<usize> {
    declared_len(bits).map(|len| LENGTH_PREFIX_BITS + len)
}

/// Unframe a bit string produced by [`to_bits`].
///
/// Bits beyond the declared length are ignored. A declared length that is not
/// a multiple of 8 zero-pads the final byte.
///
/// # Errors
/// [`StegoError::TruncatedData`] if fewer than `16 + L` bits are available.
pub fn from_bits(bits: &[u8]) -> Result<Vec<u8>, StegoError> {
    let declared = declared_len(bits).ok_or(StegoError::TruncatedData {
        declared: 0,
        available: bits.len(),
    })?;
    let available = bits.len() - LENGTH_PREFIX_BITS;
    if available < declared {
        return Err(StegoError::TruncatedData { declared, available });
    }
    Ok(bits_to_bytes(
        &bits[LENGTH_PREFIX_BITS..LENGTH_PREFIX_BITS + declared],
    ))
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len().div_ceil(8));
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn prefix_is_big_endian_bit_length() {
        let bits = to_bits(b"hi").unwrap();
        assert_eq!(bits.len(), 16 + 16);
        // 16 payload bits -> 0x0010.
        assert_eq!(&bits[..16], &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(declared_len(&bits), Some(16));
        assert_eq!(frame_len(&bits), Some(32));
    }

    #[test]
    fn empty_payload_roundtrip() {
        let bits = to_bits(&[]).unwrap();
        assert_eq!(bits, vec![0u8; 16]);
        assert_eq!(from_bits(&bits).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn trailing_bits_ignored() {
        let mut bits = to_bits(&[0xA5]).unwrap();
        bits.extend([1, 1, 1, 0, 1]);
        assert_eq!(from_bits(&bits).unwrap(), vec![0xA5]);
    }

    #[test]
    fn declared_length_beyond_data_is_truncated() {
        let mut bits = to_bits(&[1, 2, 3]).unwrap();
        bits.truncate(16 + 20);
        match from_bits(&bits) {
            Err(StegoError::TruncatedData { declared, available }) => {
                assert_eq!(declared, 24);
                assert_eq!(available, 20);
            }
            other => panic!("expected TruncatedData, got {other:?}"),
        }
    }

    #[test]
    fn missing_prefix_is_truncated() {
        assert!(matches!(from_bits(&[1, 0, 1]), Err(StegoError::TruncatedData { .. })));
        assert!(matches!(from_bits(&[]), Err(StegoError::TruncatedData { .. })));
    }

    #[test]
    fn non_byte_aligned_length_zero_pads() {
        // Declared length 5, bits 10110 -> 0xB0.
        let mut bits = bytes_to_bits(&5u16.to_be_bytes());
        bits.extend([1, 0, 1, 1, 0]);
        assert_eq!(from_bits(&bits).unwrap(), vec![0xB0]);
    }

    #[test]
    fn size_limit_boundary() {
        assert!(to_bits(&vec![0u8; MAX_PAYLOAD_BYTES]).is_ok());
        match to_bits(&vec![0u8; MAX_PAYLOAD_BYTES + 1]) {
            Err(StegoError::PayloadTooLarge { bits, limit }) => {
                assert_eq!(bits, 65_536);
                assert_eq!(limit, 65_535);
            }
            other => panic!("expected PayloadTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn bytes_bits_roundtrip() {
        let original = vec![0xDE, 0xAD, 0xBE, 0xEF];
        let bits = bytes_to_bits(&original);
        assert_eq!(bits.len(), 32);
        assert_eq!(bits_to_bytes(&bits), original);
    }

    proptest! {
        #[test]
        fn frame_roundtrip(payload in proptest::collection::vec(any::<u8>(), 0..512)) {
            let bits = to_bits(&payload).unwrap();
            prop_assert_eq!(from_bits(&bits).unwrap(), payload);
        }

        #[test]
        fn any_cut_inside_payload_is_rejected(
            payload in proptest::collection::vec(any::<u8>(), 1..64),
            cut in 0usize..512,
        ) {
            let bits = to_bits(&payload).unwrap();
            let cut = cut % bits.len();
            prop_assert!(from_bits(&bits[..cut]).is_err());
        }
    }
}
