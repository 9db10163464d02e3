//! Arbitrary-width bit vectors.
//!
//! A [`BitVec`] is a sequence of `bit_len` bits packed into 64-bit words, low
//! word first: bit `i` lives in word `i >> 6` at position `i & 63`. The word
//! buffer always holds exactly [`words_for`]`(bit_len)` words, and any bits at
//! positions `>= bit_len` in the top word are zero. Every operation restores
//! this canonical padding before returning, so derived equality and hashing
//! are plain word-wise comparisons.
//!
//! Transforming operations come in pairs: an in-place form writing into the
//! receiver, and a copying form returning a fresh vector. Both produce
//! identical bit patterns. Failures are reported as [`BitVecError`] values
//! and never leave the receiver modified.

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};

/// Number of words backing a vector of `bit_len` bits.
///
/// A zero-width vector still occupies one (all-zero) word.
pub const fn words_for(bit_len: usize) -> usize {
    if bit_len == 0 {
        1
    } else {
        ((bit_len - 1) >> 6) + 1
    }
}

/// Mask selecting the significant bits of the top word of a `bit_len`-bit
/// vector.
const fn top_word_mask(bit_len: usize) -> u64 {
    if bit_len == 0 {
        0
    } else if bit_len & 63 == 0 {
        u64::MAX
    } else {
        (1u64 << (bit_len & 63)) - 1
    }
}

/// An arbitrary-width bit vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBitVec", into = "RawBitVec")]
pub struct BitVec {
    pub(crate) words: Vec<u64>,
    pub(crate) bit_len: usize,
}

impl Default for BitVec {
    fn default() -> Self {
        Self {
            words: vec![0],
            bit_len: 0,
        }
    }
}

impl BitVec {
    /// Creates an all-zero vector of `bit_len` bits.
    pub fn zeros(bit_len: usize) -> Result<Self, BitVecError> {
        let count = words_for(bit_len);
        let mut words = Vec::new();
        words.try_reserve_exact(count)?;
        words.resize(count, 0);

        Ok(Self { words, bit_len })
    }

    /// Returns the number of bits in the vector.
    pub fn len(&self) -> usize {
        self.bit_len
    }

    /// Returns `true` if the vector is zero bits wide.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Returns the backing words, low word first.
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    /// Returns the bit at `index`, or `None` if out of bounds.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.bit_len {
            return None;
        }

        Some((self.words[index >> 6] >> (index & 63)) & 1 == 1)
    }

    /// Zeroes every word in place, preserving the width.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Duplicates the vector, surfacing allocation failure.
    pub fn try_clone(&self) -> Result<Self, BitVecError> {
        let mut words = Vec::new();
        words.try_reserve_exact(self.words.len())?;
        words.extend_from_slice(&self.words);

        Ok(Self {
            words,
            bit_len: self.bit_len,
        })
    }

    /// Grows the vector to `new_bit_len` bits, zero-filling the new high
    /// bits.
    ///
    /// Shrinking is rejected with [`BitVecError::Range`] and leaves the
    /// vector unchanged.
    pub fn widen(&mut self, new_bit_len: usize) -> Result<(), BitVecError> {
        if new_bit_len < self.bit_len {
            return Err(BitVecError::Range {
                requested: new_bit_len,
                bit_len: self.bit_len,
            });
        }

        let count = words_for(new_bit_len);
        if count > self.words.len() {
            self.words.try_reserve_exact(count - self.words.len())?;
            self.words.resize(count, 0);
        }
        self.bit_len = new_bit_len;

        Ok(())
    }

    /// Truncates the vector to its low `n` bits in place.
    ///
    /// Rejects `n > self.len()` with [`BitVecError::Range`].
    pub fn truncate(&mut self, n: usize) -> Result<(), BitVecError> {
        if n > self.bit_len {
            return Err(BitVecError::Range {
                requested: n,
                bit_len: self.bit_len,
            });
        }

        self.words.truncate(words_for(n));
        self.bit_len = n;
        self.mask_top();

        Ok(())
    }

    /// Returns a new vector holding the low `n` bits.
    ///
    /// Rejects `n > self.len()` with [`BitVecError::Range`].
    pub fn take(&self, n: usize) -> Result<Self, BitVecError> {
        if n > self.bit_len {
            return Err(BitVecError::Range {
                requested: n,
                bit_len: self.bit_len,
            });
        }

        let count = words_for(n);
        let mut words = Vec::new();
        words.try_reserve_exact(count)?;
        words.extend_from_slice(&self.words[..count]);

        let mut out = Self { words, bit_len: n };
        out.mask_top();

        Ok(out)
    }

    /// Complements every bit in place.
    pub fn negate_assign(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
        self.mask_top();
    }

    /// Returns the bitwise complement.
    pub fn negate(&self) -> Result<Self, BitVecError> {
        let mut out = self.try_clone()?;
        out.negate_assign();
        Ok(out)
    }

    /// Concatenates `self` (high bits) with `low` (low bits).
    ///
    /// The result is `self.len() + low.len()` bits wide, with `low`
    /// occupying positions `[0, low.len())`.
    pub fn concat(&self, low: &Self) -> Result<Self, BitVecError> {
        let shift = low.bit_len & 63;
        let start = low.bit_len >> 6;

        let mut out = low.try_clone()?;
        out.widen(self.bit_len + low.bit_len)?;

        // Clear stray bits above `low` in its boundary word. A zero shift
        // means `low` ends exactly on a word boundary and there is nothing
        // to clear.
        if shift != 0 {
            out.words[start] &= (1u64 << shift) - 1;
        }

        for (i, &word) in self.words.iter().enumerate() {
            let dst = start + i;
            if dst >= out.words.len() {
                break;
            }
            out.words[dst] |= word << shift;
            // The cross-word carry is skipped entirely at shift 0: the
            // word fits whole, and `64 - shift` would be a full-width
            // shift.
            if shift != 0 && dst + 1 < out.words.len() {
                out.words[dst + 1] |= word >> (64 - shift);
            }
        }

        Ok(out)
    }

    /// Bitwise XOR with an equal-width vector, in place.
    pub fn xor_assign(&mut self, other: &Self) -> Result<(), BitVecError> {
        self.zip_assign(other, |a, b| a ^ b, false)
    }

    /// Bitwise XOR with an equal-width vector.
    pub fn xor(&self, other: &Self) -> Result<Self, BitVecError> {
        self.zip(other, |a, b| a ^ b, false)
    }

    /// Bitwise OR with an equal-width vector, in place.
    pub fn or_assign(&mut self, other: &Self) -> Result<(), BitVecError> {
        self.zip_assign(other, |a, b| a | b, false)
    }

    /// Bitwise OR with an equal-width vector.
    pub fn or(&self, other: &Self) -> Result<Self, BitVecError> {
        self.zip(other, |a, b| a | b, false)
    }

    /// Bitwise AND with an equal-width vector, in place.
    pub fn and_assign(&mut self, other: &Self) -> Result<(), BitVecError> {
        self.zip_assign(other, |a, b| a & b, false)
    }

    /// Bitwise AND with an equal-width vector.
    pub fn and(&self, other: &Self) -> Result<Self, BitVecError> {
        self.zip(other, |a, b| a & b, false)
    }

    /// Bitwise logical equivalence (XNOR) with an equal-width vector, in
    /// place.
    pub fn equ_assign(&mut self, other: &Self) -> Result<(), BitVecError> {
        self.zip_assign(other, |a, b| !(a ^ b), true)
    }

    /// Bitwise logical equivalence (XNOR) with an equal-width vector.
    pub fn equ(&self, other: &Self) -> Result<Self, BitVecError> {
        self.zip(other, |a, b| !(a ^ b), true)
    }

    /// Applies `op` word-by-word, writing into `self`.
    ///
    /// `mask` re-masks the top word afterwards, for operators which can set
    /// padding bits. XOR, OR and AND preserve zero padding on their own.
    fn zip_assign(
        &mut self,
        other: &Self,
        op: fn(u64, u64) -> u64,
        mask: bool,
    ) -> Result<(), BitVecError> {
        if self.bit_len != other.bit_len {
            return Err(BitVecError::SizeMismatch {
                lhs: self.bit_len,
                rhs: other.bit_len,
            });
        }

        for (a, &b) in self.words.iter_mut().zip(&other.words) {
            *a = op(*a, b);
        }
        if mask {
            self.mask_top();
        }

        Ok(())
    }

    fn zip(&self, other: &Self, op: fn(u64, u64) -> u64, mask: bool) -> Result<Self, BitVecError> {
        if self.bit_len != other.bit_len {
            return Err(BitVecError::SizeMismatch {
                lhs: self.bit_len,
                rhs: other.bit_len,
            });
        }

        let mut out = self.try_clone()?;
        out.zip_assign(other, op, mask)?;

        Ok(out)
    }

    /// Zeroes the padding bits of the top word.
    pub(crate) fn mask_top(&mut self) {
        let mask = top_word_mask(self.bit_len);
        if let Some(top) = self.words.last_mut() {
            *top &= mask;
        }
    }
}

/// Serialized layout of a [`BitVec`].
///
/// Deserialization goes through [`BitVec::try_from`] so that a hand-crafted
/// payload cannot smuggle in a word count or padding bits violating the
/// canonical layout.
#[derive(Serialize, Deserialize)]
struct RawBitVec {
    bit_len: usize,
    words: Vec<u64>,
}

impl From<BitVec> for RawBitVec {
    fn from(bv: BitVec) -> Self {
        Self {
            bit_len: bv.bit_len,
            words: bv.words,
        }
    }
}

impl TryFrom<RawBitVec> for BitVec {
    type Error = BitVecError;

    fn try_from(raw: RawBitVec) -> Result<Self, Self::Error> {
        if raw.words.len() != words_for(raw.bit_len) {
            return Err(BitVecError::NonCanonical);
        }

        let top = *raw.words.last().unwrap_or(&0);
        if top & !top_word_mask(raw.bit_len) != 0 {
            return Err(BitVecError::NonCanonical);
        }

        Ok(Self {
            words: raw.words,
            bit_len: raw.bit_len,
        })
    }
}

/// Error for [`BitVec`] operations.
#[derive(Debug, thiserror::Error)]
pub enum BitVecError {
    /// The backing word buffer could not be sized.
    #[error("allocation failure")]
    Alloc(#[from] TryReserveError),
    /// Operand widths differ for a binary operation.
    #[error("bit length mismatch: {lhs} != {rhs}")]
    SizeMismatch {
        /// Width of the receiver.
        lhs: usize,
        /// Width of the other operand.
        rhs: usize,
    },
    /// A width change outside the permitted range.
    #[error("cannot resize a bit vector of {bit_len} bits to {requested} bits")]
    Range {
        /// The requested width.
        requested: usize,
        /// The current width.
        bit_len: usize,
    },
    /// Malformed hex input.
    #[error("invalid hex digit {byte:#04x} at byte offset {offset}")]
    Decode {
        /// Byte offset of the offending character.
        offset: usize,
        /// The offending byte.
        byte: u8,
    },
    /// A serialized vector violating the canonical layout.
    #[error("serialized bit vector is not in canonical form")]
    NonCanonical,
}
