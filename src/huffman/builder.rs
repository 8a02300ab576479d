use std::{cmp::Reverse, collections::BinaryHeap};

use log::debug;

use super::{
    tree::{HuffmanTree, Node, NodeId},
    FrequencyTable, PSEUDO_EOF,
};

/// Queue entry: ordered by weight, then by the order nodes entered the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HeapNode {
    weight: u64,
    seq: usize,
    id: NodeId,
}

/// Placeholder sibling of the end-of-stream leaf when it is the only symbol.
const SYNTHETIC_SYMBOL: u16 = 0;

impl HuffmanTree {
    /// Greedy Huffman construction over every symbol with a non-zero weight.
    ///
    /// The two lightest nodes are merged until one remains; on equal weights
    /// the node enqueued first is taken first, and the first node taken
    /// becomes the left child. Leaves are enqueued in ascending symbol order
    /// with the end-of-stream symbol last, so the result depends only on the
    /// counts.
    pub fn build(frequencies: &FrequencyTable) -> HuffmanTree {
        let mut tree = HuffmanTree { nodes: Vec::new(), root: 0 };
        let mut freq_tree = BinaryHeap::new();
        let mut seq = 0;

        for (symbol, weight) in frequencies.leaves() {
            let id = tree.push(Node::Leaf { symbol, weight });
            freq_tree.push(Reverse(HeapNode { weight, seq, id }));
            seq += 1;
        }

        if tree.nodes.len() == 1 {
            // Only the end-of-stream symbol: give it a sibling so its code is one bit long.
            let synthetic = tree.push(Node::Leaf { symbol: SYNTHETIC_SYMBOL, weight: 0 });
            tree.root = tree.push(Node::Internal { weight: 1, left: 0, right: synthetic });
            debug!("empty input, end-of-stream leaf paired with a synthetic sibling");
            return tree;
        }

        while let Some(Reverse(node1)) = freq_tree.pop() {
            let Some(Reverse(node2)) = freq_tree.pop() else {
                tree.root = node1.id;
                break;
            };

            let weight = node1.weight + node2.weight;
            let id = tree.push(Node::Internal { weight, left: node1.id, right: node2.id });

            freq_tree.push(Reverse(HeapNode { weight, seq, id }));
            seq += 1;
        }

        debug!(
            "built tree: {} leaves, {} nodes, depth {}, weight {}",
            tree.leaf_count(),
            tree.len(),
            tree.depth(),
            tree.weight()
        );
        debug_assert!(tree.nodes.iter().any(|n| matches!(n, Node::Leaf { symbol: PSEUDO_EOF, .. })));

        tree
    }
}
