//! Bit-level iteration.
//!
//! Iteration yields bit 0 (the least significant bit) first. Collecting an
//! iterator of `bool`s builds a vector in the same order, so
//! `bv.iter().collect::<BitVec>()` reproduces `bv`.

use crate::bitvec::BitVec;

/// Iterator over the bits of a [`BitVec`], least significant first.
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    bv: &'a BitVec,
    index: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = self.bv.bit(self.index)?;
        self.index += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bv.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl BitVec {
    /// Returns an iterator over the bits, least significant first.
    pub fn iter(&self) -> Bits<'_> {
        Bits { bv: self, index: 0 }
    }
}

impl<'a> IntoIterator for &'a BitVec {
    type Item = bool;
    type IntoIter = Bits<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut words = Vec::new();
        let mut bit_len = 0;

        for bit in iter {
            if bit_len & 63 == 0 {
                words.push(0);
            }
            if bit {
                words[bit_len >> 6] |= 1u64 << (bit_len & 63);
            }
            bit_len += 1;
        }
        if words.is_empty() {
            words.push(0);
        }

        Self { words, bit_len }
    }
}
