//! wavhuff decoder implementation

use tracing::{debug, warn};
use wavhuff_bitstream::{deserialize, unpack, HuffmanTree};
use wavhuff_core::*;

/// Recover `count` samples from a payload using the tree it was encoded with
pub fn decompress<S: Symbol>(payload: &[u8], tree: &HuffmanTree<S>, count: usize) -> WavHuffResult<Vec<S>> {
    if !tree.is_empty() && tree.total_freq() != count as u64 {
        warn!(
            tree_total = tree.total_freq(),
            count, "tree frequencies disagree with the declared sample count"
        );
    }

    let samples = unpack(payload, tree, count)?;
    debug!(samples = samples.len(), bytes = payload.len(), "decompressed payload");
    Ok(samples)
}

/// Decoder options
#[derive(Debug, Clone, Default)]
pub struct DecoderOptions {
    /// Reject streams whose dtype tag differs from this one
    pub expect_dtype: Option<DType>,
}

impl DecoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_dtype(mut self, dtype: DType) -> Self {
        self.expect_dtype = Some(dtype);
        self
    }
}

/// Decoder lifting [`decompress`] to tagged sample sequences
#[derive(Debug, Default)]
pub struct WavHuffDecoder {
    options: DecoderOptions,
}

impl WavHuffDecoder {
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    pub fn decode(&self, stream: &EncodedStream) -> WavHuffResult<Samples> {
        if let Some(expected) = self.options.expect_dtype {
            if expected != stream.dtype {
                return Err(WavHuffError::DTypeMismatch {
                    expected: expected.to_string(),
                    found: stream.dtype.to_string(),
                });
            }
        }

        Ok(match stream.dtype {
            DType::I16 => Samples::I16(decode_typed(stream)?),
            DType::I32 => Samples::I32(decode_typed(stream)?),
            DType::I64 => Samples::I64(decode_typed(stream)?),
            DType::Complex128 => Samples::Complex128(decode_typed(stream)?),
        })
    }

    /// Decode straight back to raw little-endian container bytes
    pub fn decode_bytes(&self, stream: &EncodedStream) -> WavHuffResult<Vec<u8>> {
        Ok(self.decode(stream)?.to_le_bytes())
    }
}

fn decode_typed<S: Sample>(stream: &EncodedStream) -> WavHuffResult<Vec<S>> {
    let tree = deserialize::<S>(&stream.tree_text)?;
    decompress(&stream.payload, &tree, stream.count)
}
