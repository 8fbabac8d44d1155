//! Bitstream writer implementation

use bitvec::prelude::*;
use wavhuff_core::{WavHuffError, WavHuffResult};

/// A bitstream writer packing bits most-significant-bit first
#[derive(Debug, Default)]
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self {
            bits: BitVec::new(),
        }
    }

    pub fn with_capacity(num_bits: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(num_bits),
        }
    }

    /// Write the low `num_bits` of `value`, highest of those bits first
    pub fn write_bits(&mut self, value: u64, num_bits: usize) -> WavHuffResult<()> {
        if num_bits > 64 {
            return Err(WavHuffError::InvalidParameter(
                "Cannot write more than 64 bits at once".to_string(),
            ));
        }

        for shift in (0..num_bits).rev() {
            self.bits.push((value >> shift) & 1 == 1);
        }
        Ok(())
    }

    /// Write a single bit
    pub fn write_bit(&mut self, value: bool) {
        self.bits.push(value);
    }

    /// Append a whole code
    pub fn write_code(&mut self, code: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(code);
    }

    /// Number of bits written so far
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Align to byte boundary by writing zero bits
    pub fn align_to_byte(&mut self) {
        let pad = (8 - self.bits.len() % 8) % 8;
        self.bits.resize(self.bits.len() + pad, false);
    }

    /// Consume the writer, returning the bytes with the last one zero padded
    pub fn finish(mut self) -> Vec<u8> {
        self.bits.set_uninitialized(false);
        self.bits.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bits() {
        let mut writer = BitWriter::new();

        writer.write_bits(0b1010, 4).unwrap();
        writer.write_bits(0b1010, 4).unwrap();
        writer.write_bits(0b11001100, 8).unwrap();

        assert_eq!(writer.finish(), vec![0b10101010, 0b11001100]);
    }

    #[test]
    fn test_write_bit() {
        let mut writer = BitWriter::new();
        for i in 0..8 {
            writer.write_bit(i % 2 == 1);
        }
        assert_eq!(writer.bit_len(), 8);
        assert_eq!(writer.finish(), vec![0b01010101]);
    }

    #[test]
    fn test_partial_byte_is_zero_padded() {
        let mut writer = BitWriter::new();
        writer.write_code(bits![u8, Msb0; 1, 1, 1]);
        assert_eq!(writer.bit_len(), 3);
        assert_eq!(writer.finish(), vec![0b11100000]);
    }

    #[test]
    fn test_align_to_byte() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        writer.align_to_byte();
        writer.write_bit(true);
        assert_eq!(writer.bit_len(), 9);
        assert_eq!(writer.finish(), vec![0b10000000, 0b10000000]);
    }

    #[test]
    fn test_too_many_bits() {
        let mut writer = BitWriter::new();
        assert!(writer.write_bits(0, 65).is_err());
        assert!(BitWriter::new().finish().is_empty());
    }
}
