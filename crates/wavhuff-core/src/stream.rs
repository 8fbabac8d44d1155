//! Encoded form of one sample sequence

use crate::DType;

/// A compressed sample sequence with everything needed to decode it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedStream {
    /// Packed Huffman codes, zero padded to a whole byte
    pub payload: Vec<u8>,
    /// Tree in its line-oriented text form
    pub tree_text: String,
    pub dtype: DType,
    /// Number of symbols packed into `payload`
    pub count: usize,
}
