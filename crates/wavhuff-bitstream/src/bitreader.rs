//! Bitstream reader implementation

use bitvec::prelude::*;

/// A bitstream reader yielding the bits of a byte slice most-significant first
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bits: BitSlice::from_slice(bytes),
            position: 0,
        }
    }

    /// Read a single bit, or `None` once the stream is exhausted
    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.position).map(|bit| *bit)?;
        self.position += 1;
        Some(bit)
    }

    /// Number of bits consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
