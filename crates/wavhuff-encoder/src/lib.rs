//! wavhuff encoder implementation

use tracing::debug;
use wavhuff_bitstream::{pack, serialize, CodeTable, FrequencyTable, HuffmanTree};
use wavhuff_core::*;

/// Result of compressing one sample sequence
#[derive(Debug, Clone)]
pub struct CompressedAudio<S> {
    pub payload: Vec<u8>,
    pub tree: HuffmanTree<S>,
    /// Number of input samples
    pub count: usize,
}

/// Huffman-compress `samples`: count frequencies, build the tree, assign
/// codes and pack them.
pub fn compress<S: Symbol>(samples: &[S]) -> WavHuffResult<CompressedAudio<S>> {
    let frequencies = FrequencyTable::from_symbols(samples);
    let tree = HuffmanTree::from_frequencies(&frequencies);
    let codes = CodeTable::from_tree(&tree);
    debug_assert!(codes.is_prefix_free());

    let payload = pack(samples, &codes)?;

    debug!(
        samples = samples.len(),
        distinct = frequencies.len(),
        bits = codes.total_bits(&frequencies),
        bytes = payload.len(),
        "compressed sample sequence"
    );

    Ok(CompressedAudio {
        payload,
        tree,
        count: samples.len(),
    })
}

/// Encoder options
#[derive(Debug, Clone, Default)]
pub struct EncoderOptions {
    /// Interpretation of raw bytes; sniffed from the data when unset
    pub dtype: Option<DType>,
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dtype(mut self, dtype: DType) -> Self {
        self.dtype = Some(dtype);
        self
    }
}

/// Encoder lifting [`compress`] to tagged sample sequences
#[derive(Debug, Default)]
pub struct WavHuffEncoder {
    options: EncoderOptions,
}

impl WavHuffEncoder {
    pub fn new(options: EncoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Choose the dtype for raw container bytes
    pub fn resolve_dtype(&self, raw: &[u8]) -> WavHuffResult<DType> {
        match self.options.dtype {
            Some(dtype) if dtype.accepts(raw) => Ok(dtype),
            Some(dtype) => Err(WavHuffError::InvalidParameter(format!(
                "{} raw bytes cannot be read as dtype {}",
                raw.len(),
                dtype
            ))),
            None => DType::sniff(raw),
        }
    }

    /// Interpret raw little-endian bytes and compress them
    pub fn encode_bytes(&self, raw: &[u8]) -> WavHuffResult<EncodedStream> {
        let dtype = self.resolve_dtype(raw)?;
        debug!(%dtype, bytes = raw.len(), "interpreting raw audio bytes");
        let samples = Samples::from_le_bytes(dtype, raw)?;
        self.encode(&samples)
    }

    pub fn encode(&self, samples: &Samples) -> WavHuffResult<EncodedStream> {
        match samples {
            Samples::I16(s) => encode_typed(s),
            Samples::I32(s) => encode_typed(s),
            Samples::I64(s) => encode_typed(s),
            Samples::Complex128(s) => encode_typed(s),
        }
    }
}

fn encode_typed<S: Sample>(samples: &[S]) -> WavHuffResult<EncodedStream> {
    let compressed = compress(samples)?;
    Ok(EncodedStream {
        payload: compressed.payload,
        tree_text: serialize(&compressed.tree)?,
        dtype: S::DTYPE,
        count: compressed.count,
    })
}
