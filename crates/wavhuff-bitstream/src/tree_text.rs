//! Line-oriented text form of a Huffman tree
//!
//! The tree is written in pre-order, one node per line:
//!
//! ```text
//! None,6      internal node and its frequency
//! 1,3         leaf: symbol token and frequency
//! N           missing node (every leaf is followed by two of these)
//! ```
//!
//! A symbol token that reads like a sentinel (`N`, `None`) or begins with
//! `\` is written with one extra leading `\`, so every line parses back to
//! the node it came from.

use crate::huffman::{HuffmanNode, HuffmanTree, NodeId};
use std::borrow::Cow;
use std::io::{BufRead, Read, Write};
use wavhuff_core::consts::{ESCAPE_PREFIX, INTERNAL_NODE_TOKEN, NULL_NODE_TOKEN};
use wavhuff_core::{Symbol, WavHuffError, WavHuffResult};

fn escape_token(token: &str) -> WavHuffResult<Cow<'_, str>> {
    if token.contains(['\n', '\r']) {
        return Err(WavHuffError::SerializationMismatch(format!(
            "symbol token {:?} spans several lines",
            token
        )));
    }

    if token == NULL_NODE_TOKEN || token == INTERNAL_NODE_TOKEN || token.starts_with(ESCAPE_PREFIX) {
        Ok(Cow::Owned(format!("{}{}", ESCAPE_PREFIX, token)))
    } else {
        Ok(Cow::Borrowed(token))
    }
}

/// Render the tree in its text form
pub fn serialize<S: Symbol>(tree: &HuffmanTree<S>) -> WavHuffResult<String> {
    let mut out = String::new();
    let mut pending: Vec<Option<NodeId>> = vec![tree.root()];

    while let Some(slot) = pending.pop() {
        let Some(id) = slot else {
            out.push_str(NULL_NODE_TOKEN);
            out.push('\n');
            continue;
        };

        match tree.node(id) {
            HuffmanNode::Leaf { symbol, freq } => {
                let token = symbol.to_token();
                let escaped = escape_token(&token)?;
                out.push_str(&format!("{},{}\n", escaped, freq));
                pending.push(None);
                pending.push(None);
            }
            HuffmanNode::Internal { freq, left, right } => {
                out.push_str(&format!("{},{}\n", INTERNAL_NODE_TOKEN, freq));
                pending.push(Some(*right));
                pending.push(Some(*left));
            }
        }
    }

    Ok(out)
}

/// Write the tree's text form to `writer`
pub fn write_tree<S: Symbol, W: Write>(tree: &HuffmanTree<S>, mut writer: W) -> WavHuffResult<()> {
    writer.write_all(serialize(tree)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

enum Line<S> {
    Null,
    Internal(u64),
    Leaf(S, u64),
}

fn invalid(line: usize, reason: impl Into<String>) -> WavHuffError {
    WavHuffError::InvalidTree {
        line,
        reason: reason.into(),
    }
}

fn parse_line<S: Symbol>(text: &str, line: usize) -> WavHuffResult<Line<S>> {
    if text == NULL_NODE_TOKEN {
        return Ok(Line::Null);
    }

    let (escaped, body) = match text.strip_prefix(ESCAPE_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (token, freq) = body
        .rsplit_once(',')
        .ok_or_else(|| invalid(line, format!("expected `symbol,frequency`, found {:?}", text)))?;
    let freq: u64 = freq
        .trim()
        .parse()
        .map_err(|_| invalid(line, format!("invalid frequency {:?}", freq)))?;

    if !escaped && token == INTERNAL_NODE_TOKEN {
        return Ok(Line::Internal(freq));
    }

    let symbol = S::from_token(token).map_err(|e| invalid(line, e.to_string()))?;
    Ok(Line::Leaf(symbol, freq))
}

struct PendingNode<S> {
    symbol: Option<S>,
    freq: u64,
    left: Option<NodeId>,
    right: Option<NodeId>,
    line: usize,
}

#[derive(Clone, Copy)]
enum Slot {
    Root,
    Left(NodeId),
    Right(NodeId),
}

/// Parse a tree from its text form
pub fn deserialize<S: Symbol>(text: &str) -> WavHuffResult<HuffmanTree<S>> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));
    let mut pending: Vec<PendingNode<S>> = Vec::new();
    let mut root = None;
    let mut slots = vec![Slot::Root];
    let mut last_line = 0;

    while let Some(slot) = slots.pop() {
        let (line, text) = lines
            .next()
            .ok_or_else(|| invalid(last_line + 1, "unexpected end of tree"))?;
        last_line = line;

        let id = match parse_line::<S>(text, line)? {
            Line::Null => None,
            Line::Internal(freq) => Some((None, freq)),
            Line::Leaf(symbol, freq) => Some((Some(symbol), freq)),
        }
        .map(|(symbol, freq)| {
            pending.push(PendingNode {
                symbol,
                freq,
                left: None,
                right: None,
                line,
            });
            pending.len() - 1
        });

        match slot {
            Slot::Root => root = id,
            Slot::Left(parent) => pending[parent].left = id,
            Slot::Right(parent) => pending[parent].right = id,
        }

        if let Some(id) = id {
            slots.push(Slot::Right(id));
            slots.push(Slot::Left(id));
        }
    }

    if let Some((line, text)) = lines.find(|(_, l)| !l.trim().is_empty()) {
        return Err(invalid(line, format!("trailing data after tree: {:?}", text)));
    }

    let nodes = pending
        .into_iter()
        .map(|node| match (node.symbol, node.left, node.right) {
            (Some(symbol), None, None) => Ok(HuffmanNode::Leaf {
                symbol,
                freq: node.freq,
            }),
            (Some(_), _, _) => Err(invalid(node.line, "leaf node has children")),
            (None, Some(left), Some(right)) => Ok(HuffmanNode::Internal {
                freq: node.freq,
                left,
                right,
            }),
            (None, _, _) => Err(invalid(node.line, "internal node is missing a child")),
        })
        .collect::<WavHuffResult<Vec<_>>>()?;

    Ok(HuffmanTree { nodes, root })
}

/// Read a tree from a reader holding its text form
pub fn read_tree<S: Symbol, R: BufRead>(mut reader: R) -> WavHuffResult<HuffmanTree<S>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    deserialize(&text)
}
