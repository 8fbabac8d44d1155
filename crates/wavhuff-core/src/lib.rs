//! Core types and utilities for wavhuff
//!
//! This crate provides the fundamental data structures shared by the codec
//! crates: the symbol abstraction over audio samples, the dtype tag that
//! records how raw bytes were interpreted, frame metadata and error types.

pub mod consts;
pub mod error;
pub mod metadata;
pub mod stream;
pub mod types;

pub use error::{WavHuffError, WavHuffResult};
pub use metadata::*;
pub use stream::EncodedStream;
pub use types::*;
