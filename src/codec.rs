// ============================================
// src/codec.rs
// Fixed-width origin amount decoding

use cosmwasm_std::Uint128;
use thiserror::Error;

/// Widest origin encoding accepted (a 256-bit EVM word).
pub const MAX_ORIGIN_SIZE_IN_BYTE: u32 = 32;

const AMOUNT_WIDTH: usize = 16;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    #[error("unsupported amount width {0}")]
    UnsupportedWidth(u32),

    #[error("expected {expected} amount bytes, got {actual}")]
    LengthMismatch { expected: u32, actual: usize },

    #[error("amount does not fit in 128 bits")]
    Overflow,
}

/// Returns true when `size` is a width `decode_amount` can handle.
pub fn is_supported_width(size: u32) -> bool {
    (1..=MAX_ORIGIN_SIZE_IN_BYTE).contains(&size)
}

/// Decodes an unsigned integer of exactly `size` bytes.
///
/// Encodings wider than 16 bytes are accepted as long as every byte above
/// the low 128 bits is zero.
pub fn decode_amount(buffer: &[u8], size: u32, big_endian: bool) -> Result<Uint128, CodecError> {
    if !is_supported_width(size) {
        return Err(CodecError::UnsupportedWidth(size));
    }
    if buffer.len() != size as usize {
        return Err(CodecError::LengthMismatch {
            expected: size,
            actual: buffer.len(),
        });
    }

    // normalise to big-endian so the high bytes come first
    let mut be: Vec<u8> = buffer.to_vec();
    if !big_endian {
        be.reverse();
    }

    let split = be.len().saturating_sub(AMOUNT_WIDTH);
    let (high, low) = be.split_at(split);
    if high.iter().any(|b| *b != 0) {
        return Err(CodecError::Overflow);
    }

    let mut word = [0u8; AMOUNT_WIDTH];
    word[AMOUNT_WIDTH - low.len()..].copy_from_slice(low);
    Ok(Uint128::new(u128::from_be_bytes(word)))
}

/// Encodes `amount` into `size` bytes; the inverse of `decode_amount`.
/// Used off-chain by claim publishers.
pub fn encode_amount(amount: Uint128, size: u32, big_endian: bool) -> Result<Vec<u8>, CodecError> {
    if !is_supported_width(size) {
        return Err(CodecError::UnsupportedWidth(size));
    }
    let word = amount.u128().to_be_bytes();
    let size = size as usize;

    let mut out = vec![0u8; size];
    if size >= AMOUNT_WIDTH {
        out[size - AMOUNT_WIDTH..].copy_from_slice(&word);
    } else {
        let (high, low) = word.split_at(AMOUNT_WIDTH - size);
        if high.iter().any(|b| *b != 0) {
            return Err(CodecError::Overflow);
        }
        out.copy_from_slice(low);
    }

    if !big_endian {
        out.reverse();
    }
    Ok(out)
}
