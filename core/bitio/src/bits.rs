//! Owned runs of bits, packed most-significant-bit first.

use crate::error::{BitioError, BitioResult};
use std::fmt;
use std::str::FromStr;

/// A run of bits packed MSB-first into bytes.
///
/// The unused low bits of a trailing partial byte are always zero, so
/// `as_bytes` is exactly what a `BitWriter` emits for the same bits
/// followed by `flush`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bits {
    bytes: Vec<u8>,
    len: usize,
}

impl Bits {
    /// Create an empty run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty run with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Number of bits in the run.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The packed bytes, zero-padded to a whole byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.len += 1;
    }

    /// The bit at `index` as 0 or 1.
    pub fn get(&self, index: usize) -> Option<u8> {
        if index >= self.len {
            return None;
        }
        Some((self.bytes[index / 8] >> (7 - index % 8)) & 1)
    }

    /// Iterate over the bits as 0 or 1.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len).map(move |i| (self.bytes[i / 8] >> (7 - i % 8)) & 1)
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Parses a string of `0`/`1` digits. Whitespace and `_` separators are skipped.
impl FromStr for Bits {
    type Err = BitioError;

    fn from_str(s: &str) -> BitioResult<Self> {
        let mut bits = Bits::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                '_' => {}
                c if c.is_whitespace() => {}
                c => return Err(BitioError::invalid_digit(c)),
            }
        }
        Ok(bits)
    }
}

impl FromIterator<bool> for Bits {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = Bits::new();
        for bit in iter {
            bits.push(bit);
        }
        bits
    }
}
