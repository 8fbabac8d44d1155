//! Huffman tree construction and code assignment

use crate::frequency::FrequencyTable;
use bitvec::prelude::*;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use wavhuff_core::Symbol;

/// Index of a node inside its tree's arena
pub type NodeId = usize;

/// A Huffman code, first bit first
pub type Code = BitVec<u8, Msb0>;

/// Huffman tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode<S> {
    Leaf { symbol: S, freq: u64 },
    Internal { freq: u64, left: NodeId, right: NodeId },
}

impl<S> HuffmanNode<S> {
    pub fn freq(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { freq, .. } | HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// Heap entry ordered by frequency, then by arena index.
///
/// Nodes enter the arena in insertion order (leaves in symbol discovery
/// order, then merged nodes in merge order), so on equal frequency the node
/// inserted earlier compares as smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    freq: u64,
    id: NodeId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.freq
            .cmp(&other.freq)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Huffman tree stored as an arena of nodes
///
/// A tree without a root is the tree of an empty input.
#[derive(Debug, Clone)]
pub struct HuffmanTree<S> {
    pub(crate) nodes: Vec<HuffmanNode<S>>,
    pub(crate) root: Option<NodeId>,
}

impl<S: Symbol> HuffmanTree<S> {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn from_symbols(symbols: &[S]) -> Self {
        Self::from_frequencies(&FrequencyTable::from_symbols(symbols))
    }

    /// Build the tree by repeatedly merging the two lowest-frequency nodes
    pub fn from_frequencies(frequencies: &FrequencyTable<S>) -> Self {
        let leaf_count = frequencies.len();
        let mut nodes = Vec::with_capacity((2 * leaf_count).saturating_sub(1));
        let mut heap = BinaryHeap::with_capacity(leaf_count);

        for (&symbol, freq) in frequencies.iter() {
            let id = nodes.len();
            nodes.push(HuffmanNode::Leaf { symbol, freq });
            heap.push(Reverse(QueueEntry { freq, id }));
        }

        let root = loop {
            let Some(Reverse(first)) = heap.pop() else {
                break None;
            };
            let Some(Reverse(second)) = heap.pop() else {
                break Some(first.id);
            };

            let freq = first.freq + second.freq;
            let id = nodes.len();
            nodes.push(HuffmanNode::Internal {
                freq,
                left: first.id,
                right: second.id,
            });
            heap.push(Reverse(QueueEntry { freq, id }));
        };

        Self { nodes, root }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffmanNode<S> {
        &self.nodes[id]
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Sum of all leaf frequencies, as recorded at the root
    pub fn total_freq(&self) -> u64 {
        self.root.map_or(0, |root| self.node(root).freq())
    }
}

/// Trees are equal when their shapes, symbols and frequencies match,
/// regardless of the arena layout.
impl<S: Symbol> PartialEq for HuffmanTree<S> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = match (self.root, other.root) {
            (None, None) => return true,
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };

        let mut pending = vec![(a, b)];
        while let Some((a, b)) = pending.pop() {
            match (self.node(a), other.node(b)) {
                (
                    HuffmanNode::Leaf { symbol: s1, freq: f1 },
                    HuffmanNode::Leaf { symbol: s2, freq: f2 },
                ) => {
                    if s1 != s2 || f1 != f2 {
                        return false;
                    }
                }
                (
                    HuffmanNode::Internal { freq: f1, left: l1, right: r1 },
                    HuffmanNode::Internal { freq: f2, left: l2, right: r2 },
                ) => {
                    if f1 != f2 {
                        return false;
                    }
                    pending.push((*l1, *l2));
                    pending.push((*r1, *r2));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<S: Symbol> Eq for HuffmanTree<S> {}

/// Code assigned to every leaf of a Huffman tree
#[derive(Debug, Clone)]
pub struct CodeTable<S: Symbol> {
    codes: HashMap<S, Code>,
}

impl<S: Symbol> CodeTable<S> {
    /// Derive codes by pre-order traversal, appending `0` for a left edge and
    /// `1` for a right edge. A root that is itself a leaf gets the code `0`.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let mut codes = HashMap::with_capacity(tree.leaf_count());

        let Some(root) = tree.root() else {
            return Self { codes };
        };

        if let HuffmanNode::Leaf { symbol, .. } = tree.node(root) {
            codes.insert(*symbol, bitvec![u8, Msb0; 0]);
            return Self { codes };
        }

        let mut pending = vec![(root, Code::new())];
        while let Some((id, code)) = pending.pop() {
            match tree.node(id) {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes.insert(*symbol, code);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_code = code.clone();
                    right_code.push(true);
                    pending.push((*right, right_code));

                    let mut left_code = code;
                    left_code.push(false);
                    pending.push((*left, left_code));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: &S) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &BitSlice<u8, Msb0>)> + '_ {
        self.codes.iter().map(|(symbol, code)| (symbol, code.as_bitslice()))
    }

    /// Length in bits of the packed payload for the given frequencies
    pub fn total_bits(&self, frequencies: &FrequencyTable<S>) -> u64 {
        frequencies
            .iter()
            .map(|(symbol, count)| count * self.codes.get(symbol).map_or(0, |c| c.len() as u64))
            .sum()
    }

    /// Check that no code is a prefix of another
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&BitSlice<u8, Msb0>> = self.codes.values().map(|c| c.as_bitslice()).collect();
        codes.sort();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn code_string<S: Symbol>(table: &CodeTable<S>, symbol: S) -> String {
        table
            .get(&symbol)
            .unwrap()
            .iter()
            .map(|bit| if *bit { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn test_shortest_code_for_most_frequent() {
        let tree = HuffmanTree::from_symbols(&[1i16, 1, 1, 2, 2, 3]);
        let codes = CodeTable::from_tree(&tree);

        assert_eq!(code_string(&codes, 1), "0");
        assert_eq!(code_string(&codes, 3), "10");
        assert_eq!(code_string(&codes, 2), "11");
        assert_eq!(tree.total_freq(), 6);
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn test_earlier_inserted_wins_ties() {
        // All frequencies equal: 10 and 20 merge first, then 30 with that.
        let tree = HuffmanTree::from_symbols(&[10i32, 20, 30]);
        let codes = CodeTable::from_tree(&tree);

        assert_eq!(code_string(&codes, 30), "0");
        assert_eq!(code_string(&codes, 10), "10");
        assert_eq!(code_string(&codes, 20), "11");

        match tree.node(tree.root().unwrap()) {
            HuffmanNode::Internal { left, .. } => assert!(tree.node(*left).is_leaf()),
            HuffmanNode::Leaf { .. } => panic!("root should be internal"),
        }
    }

    #[test]
    fn test_single_symbol_gets_one_bit_code() {
        let tree = HuffmanTree::from_symbols(&[5i64; 42]);
        assert_eq!(tree.len(), 1);

        let codes = CodeTable::from_tree(&tree);
        assert_eq!(codes.len(), 1);
        assert_eq!(code_string(&codes, 5), "0");
    }

    #[test]
    fn test_empty_input() {
        let tree = HuffmanTree::<i16>::from_symbols(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.total_freq(), 0);
        assert!(CodeTable::from_tree(&tree).is_empty());
        assert_eq!(tree, HuffmanTree::empty());
    }

    #[test]
    fn test_total_bits() {
        let symbols = [1i16, 1, 1, 2, 2, 3];
        let freqs = FrequencyTable::from_symbols(&symbols);
        let codes = CodeTable::from_tree(&HuffmanTree::from_frequencies(&freqs));
        assert_eq!(codes.total_bits(&freqs), 3 + 4 + 2);
    }

    #[test]
    fn test_structural_equality() {
        let a = HuffmanTree::from_symbols(&[1i16, 2, 2]);
        let b = HuffmanTree::from_symbols(&[2i16, 1, 2]);
        let c = HuffmanTree::from_symbols(&[1i16, 2, 2, 2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    proptest! {
        #[test]
        fn prop_codes_are_prefix_free(symbols in prop::collection::vec(-50i16..50, 1..500)) {
            let tree = HuffmanTree::from_symbols(&symbols);
            let codes = CodeTable::from_tree(&tree);
            prop_assert!(codes.is_prefix_free());
            prop_assert_eq!(codes.len(), FrequencyTable::from_symbols(&symbols).len());
        }

        #[test]
        fn prop_building_is_deterministic(symbols in prop::collection::vec(any::<i32>(), 0..300)) {
            let first = HuffmanTree::from_symbols(&symbols);
            let second = HuffmanTree::from_symbols(&symbols);
            prop_assert_eq!(first.nodes, second.nodes);
        }
    }
}
