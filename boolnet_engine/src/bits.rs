//! BoolNet Engine: Bit Codecs
//!
//! Text form: one char per node, '1' = true, '0' = false.
//! Packed form: LSB-first within each byte, trailing bits zero.

use crate::error::{EngineError, Result};

/// Render a boolean vector as a '0'/'1' string.
pub fn encode_bits(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Parse a '0'/'1' string. `row` is only used to label errors.
pub fn decode_bits(text: &str, row: usize) -> Result<Vec<bool>> {
    text.chars()
        .enumerate()
        .map(|(col, ch)| match ch {
            '1' => Ok(true),
            '0' => Ok(false),
            _ => Err(EngineError::InvalidBit { ch, row, col }),
        })
        .collect()
}

/// Pack booleans into bytes, eight per byte.
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let mut out = vec![0u8; bits.len().div_ceil(8)];
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            out[i / 8] |= 1 << (i % 8);
        }
    }
    out
}

/// Inverse of `pack_bits`.
///
/// Returns `None` when `bytes` is too short for `len` bits, carries
/// extra bytes, or has a set bit at or past `len`.
pub fn unpack_bits(bytes: &[u8], len: usize) -> Option<Vec<bool>> {
    if bytes.len() != len.div_ceil(8) {
        return None;
    }
    let tail = len % 8;
    if tail != 0 {
        let last = bytes[bytes.len() - 1];
        if last >> tail != 0 {
            return None;
        }
    }
    Some((0..len).map(|i| bytes[i / 8] & (1 << (i % 8)) != 0).collect())
}
