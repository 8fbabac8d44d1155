//! Error types for wavhuff operations

use thiserror::Error;

/// Result type for wavhuff operations
pub type WavHuffResult<T> = Result<T, WavHuffError>;

/// Errors that can occur during compression/decompression
#[derive(Error, Debug)]
pub enum WavHuffError {
    #[error("Malformed code table: {0}")]
    MalformedCodeTable(String),

    #[error("Truncated stream: decoded {decoded} of {expected} samples")]
    TruncatedStream { decoded: usize, expected: usize },

    #[error("Corrupt tree: {0}")]
    CorruptTree(String),

    #[error("Serialization mismatch: {0}")]
    SerializationMismatch(String),

    #[error("Invalid tree file (line {line}): {reason}")]
    InvalidTree { line: usize, reason: String },

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Unknown dtype tag: {0:?}")]
    UnknownDType(String),

    #[error("Cannot determine dtype of {len} raw bytes")]
    UndeterminedDType { len: usize },

    #[error("Dtype mismatch: expected {expected}, found {found}")]
    DTypeMismatch { expected: String, found: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Container error: {0}")]
    Container(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
