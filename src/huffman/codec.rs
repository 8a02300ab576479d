//! Self-delimiting preorder serialization of a [`HuffmanTree`].
//!
//! Each node starts with a flag bit: `1` for a leaf, followed by its symbol in
//! [`SYMBOL_BITS`] bits, `0` for an internal node, followed by its left and
//! then its right subtree. Both directions use an explicit stack, so the depth
//! of the tree is bounded by memory rather than by the call stack.

use std::io::{Read, Write};

use crate::{
    bitstreams::{BinaryReader, BinaryWriter},
    error::{Error, Result},
};

use super::{
    tree::{HuffmanTree, Node, NodeId},
    PSEUDO_EOF, SYMBOL_BITS,
};

/// Writes `tree` and returns the number of bits it took.
pub fn write_tree<W: Write>(tree: &HuffmanTree, writer: &mut BinaryWriter<W>) -> std::io::Result<u64> {
    let mut written = 0;
    let mut stack = vec![tree.root()];

    while let Some(id) = stack.pop() {
        match *tree.node(id) {
            Node::Leaf { symbol, .. } => {
                written += writer.push_bit(true)?;
                written += writer.push_bits(symbol as u64, SYMBOL_BITS)?;
            }
            Node::Internal { left, right, .. } => {
                written += writer.push_bit(false)?;
                stack.push(right);
                stack.push(left);
            }
        }
    }

    Ok(written)
}

/// An internal node whose children are still being read.
struct Pending {
    id: NodeId,
    left: Option<NodeId>,
}

/// Rebuilds a tree written by [`write_tree`]. The root ends up at index 0 and
/// every leaf weighs 1.
pub fn read_tree<R: Read>(reader: &mut BinaryReader<R>) -> Result<HuffmanTree> {
    let mut tree = HuffmanTree { nodes: Vec::new(), root: 0 };
    let mut pending: Vec<Pending> = Vec::new();

    loop {
        let is_leaf = reader.read_bit()?.ok_or(Error::Truncated { decoded: 0 })?;

        if !is_leaf {
            // Children are patched in once both subtrees are complete.
            let id = tree.push(Node::Internal { weight: 0, left: 0, right: 0 });
            pending.push(Pending { id, left: None });
            continue;
        }

        let symbol = reader.read_int(SYMBOL_BITS)?.ok_or(Error::Truncated { decoded: 0 })? as u16;
        if symbol > PSEUDO_EOF {
            return Err(Error::InvalidSymbol(symbol));
        }
        if tree.nodes.is_empty() {
            return Err(Error::MalformedTree("root is a leaf"));
        }

        let mut finished = tree.push(Node::Leaf { symbol, weight: 1 });

        loop {
            let Some(parent) = pending.last_mut() else {
                return Ok(tree);
            };

            match parent.left {
                None => {
                    parent.left = Some(finished);
                    break;
                }
                Some(left) => {
                    let id = parent.id;
                    pending.pop();

                    let weight = tree.nodes[left].weight() + tree.nodes[finished].weight();
                    tree.nodes[id] = Node::Internal { weight, left, right: finished };
                    finished = id;
                }
            }
        }
    }
}
