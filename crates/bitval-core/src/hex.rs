//! Hexadecimal text interchange.
//!
//! A vector serializes to big-endian hex: the most significant nibble comes
//! first and the last character is the least significant nibble. Nibble `i`
//! (counting from the least significant end) occupies bits `[4i, 4i + 4)`,
//! i.e. word `i >> 4`. Decoding a string of `n` characters always produces a
//! `4 * n` bit vector; encoding emits exactly `ceil(bit_len / 4)` lower-case
//! digits.

use std::fmt;
use std::str::FromStr;

use crate::bitvec::{BitVec, BitVecError};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

impl BitVec {
    /// Decodes a big-endian hex string into a `4 * s.len()` bit vector.
    ///
    /// Digits are case-insensitive. Any other character fails the whole
    /// parse with [`BitVecError::Decode`]; no partial vector is returned.
    pub fn from_hex(s: &str) -> Result<Self, BitVecError> {
        let mut bv = Self::zeros(4 * s.len())?;

        for (i, byte) in s.bytes().rev().enumerate() {
            let digit = (byte as char)
                .to_digit(16)
                .ok_or(BitVecError::Decode {
                    offset: s.len() - 1 - i,
                    byte,
                })? as u64;
            bv.words[i >> 4] |= digit << ((i & 0xf) * 4);
        }

        Ok(bv)
    }

    /// Encodes the vector as `ceil(bit_len / 4)` lower-case hex digits,
    /// most significant first.
    pub fn to_hex(&self) -> String {
        let len = self.bit_len / 4 + usize::from(self.bit_len % 4 != 0);
        let mut out = String::with_capacity(len);

        for i in (0..len).rev() {
            let nibble = (self.words[i >> 4] >> ((i & 0xf) * 4)) & 0xf;
            out.push(HEX_DIGITS[nibble as usize] as char);
        }

        out
    }
}

impl fmt::LowerHex for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_hex())
    }
}

impl FromStr for BitVec {
    type Err = BitVecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
