//! Bit packing of symbol sequences

use crate::bitreader::BitReader;
use crate::bitwriter::BitWriter;
use crate::huffman::{CodeTable, HuffmanNode, HuffmanTree};
use wavhuff_core::{Symbol, WavHuffError, WavHuffResult};

/// Concatenate the code of every symbol, zero padding the final byte
pub fn pack<S: Symbol>(symbols: &[S], codes: &CodeTable<S>) -> WavHuffResult<Vec<u8>> {
    let mut writer = BitWriter::with_capacity(symbols.len());

    for (index, symbol) in symbols.iter().enumerate() {
        let code = codes.get(symbol).ok_or_else(|| {
            WavHuffError::MalformedCodeTable(format!(
                "no code for symbol {:?} at position {}",
                symbol, index
            ))
        })?;
        writer.write_code(code);
    }

    Ok(writer.finish())
}

/// Decode exactly `count` symbols by walking `tree`; bits after the last
/// symbol are ignored.
pub fn unpack<S: Symbol>(payload: &[u8], tree: &HuffmanTree<S>, count: usize) -> WavHuffResult<Vec<S>> {
    // Every symbol takes at least one bit.
    let mut output = Vec::with_capacity(count.min(payload.len() * 8));
    if count == 0 {
        return Ok(output);
    }

    let root = tree.root().ok_or_else(|| {
        WavHuffError::CorruptTree(format!("empty tree cannot produce {} samples", count))
    })?;
    let truncated = |decoded: usize| WavHuffError::TruncatedStream {
        decoded,
        expected: count,
    };

    let mut reader = BitReader::new(payload);

    if let HuffmanNode::Leaf { symbol, .. } = tree.node(root) {
        while output.len() < count {
            match reader.read_bit() {
                Some(false) => output.push(*symbol),
                Some(true) => {
                    return Err(WavHuffError::CorruptTree(format!(
                        "single-symbol tree has no right branch (bit {})",
                        reader.position() - 1
                    )))
                }
                None => return Err(truncated(output.len())),
            }
        }
        return Ok(output);
    }

    let mut current = root;
    while output.len() < count {
        let bit = reader.read_bit().ok_or_else(|| truncated(output.len()))?;

        current = match tree.node(current) {
            HuffmanNode::Internal { left, right, .. } => {
                if bit {
                    *right
                } else {
                    *left
                }
            }
            HuffmanNode::Leaf { .. } => {
                return Err(WavHuffError::CorruptTree(format!(
                    "leaf has no children (bit {})",
                    reader.position() - 1
                )))
            }
        };

        if let HuffmanNode::Leaf { symbol, .. } = tree.node(current) {
            output.push(*symbol);
            current = root;
        }
    }

    Ok(output)
}
