//! Arbitrary-width bit vectors packed into 64-bit words.
//!
//! This crate provides [`BitVec`], a variable-length sequence of bits with
//! construction, resizing, bitwise algebra, concatenation, truncation and
//! hexadecimal text interchange. It is intended as a foundational value type
//! for bit-level computation engines which need compact binary values wider
//! than a machine word.
//!
//! Vectors are plain owned values: every transforming operation either
//! mutates its receiver in place or returns a fresh, independently owned
//! result. The type is `Send + Sync` but provides no internal locking; a
//! shared vector must be synchronized by the caller.
//!
//! ```
//! use bitval_core::BitVec;
//!
//! let high = BitVec::from_hex("1")?;
//! let low = BitVec::from_hex("0")?;
//! assert_eq!(high.concat(&low)?.to_hex(), "10");
//! # Ok::<(), bitval_core::BitVecError>(())
//! ```

pub mod bitvec;
mod hex;
mod iter;

pub use bitvec::{words_for, BitVec, BitVecError};
pub use iter::Bits;
