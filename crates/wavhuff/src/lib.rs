//! # wavhuff
//!
//! Lossless Huffman compression of the sample stream inside WAV files.
//!
//! ## Quick Start
//!
//! ### In memory
//!
//! ```
//! use wavhuff::{compress, decompress};
//!
//! let samples = [1i16, 1, 1, 2, 2, 3];
//! let compressed = compress(&samples).unwrap();
//! let restored = decompress(&compressed.payload, &compressed.tree, compressed.count).unwrap();
//! assert_eq!(restored, samples);
//! ```
//!
//! ### Files
//!
//! ```no_run
//! use wavhuff::{decode_file, encode_file, Config};
//!
//! let config = Config::default();
//! encode_file("data/take1.wav", "data/take1.wav.brainwire", &config).unwrap();
//! decode_file("data/take1.wav.brainwire", "decoded/take1.wav", &config).unwrap();
//! ```
//!
//! Encoding writes the payload plus three sidecar files (tree, frame data
//! and signal type) that decoding reads back; see [`ArtifactPaths`].

pub mod artifacts;
pub mod pipeline;

// Re-export core types
pub use wavhuff_core::consts;
pub use wavhuff_core::{
    ComplexSample, DType, EncodedStream, FrameMetadata, Sample, Samples, Symbol, WavHuffError,
    WavHuffResult,
};

// Re-export codec
pub use wavhuff_bitstream::{CodeTable, FrequencyTable, HuffmanNode, HuffmanTree};
pub use wavhuff_decoder::{decompress, DecoderOptions, WavHuffDecoder};
pub use wavhuff_encoder::{compress, CompressedAudio, EncoderOptions, WavHuffEncoder};

pub use artifacts::{ArtifactPaths, SidecarLayout, Sidecars};
pub use pipeline::{decode_file, encode_file, Config, EncodeSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
