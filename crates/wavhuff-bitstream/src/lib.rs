//! Bitstream reading and writing for wavhuff
//!
//! This crate provides the Huffman codec proper: symbol frequency counting,
//! tree construction, code assignment, bit packing/unpacking and the
//! line-oriented tree file format.

pub mod bitreader;
pub mod bitwriter;
pub mod frequency;
pub mod huffman;
pub mod packing;
pub mod tree_text;

pub use bitreader::BitReader;
pub use bitwriter::BitWriter;
pub use frequency::FrequencyTable;
pub use huffman::{Code, CodeTable, HuffmanNode, HuffmanTree, NodeId};
pub use packing::{pack, unpack};
pub use tree_text::{deserialize, read_tree, serialize, write_tree};
