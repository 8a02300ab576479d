use bitvec::prelude::*;

use super::{
    tree::{HuffmanTree, Node},
    Symbol, ALPHABET_SIZE,
};

pub type Code = BitVec<u8, Msb0>;

/// Root-to-leaf paths of every leaf: `0` for a left step, `1` for a right one.
#[derive(Clone, Debug, Default)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
    compressed_bits: u64,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = CodeTable {
            codes: vec![None; ALPHABET_SIZE + 1],
            compressed_bits: 0,
        };

        let mut stack = vec![(tree.root(), Code::new())];

        while let Some((id, path)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, weight } => {
                    table.compressed_bits += weight * path.len() as u64;
                    if let Some(slot) = table.codes.get_mut(symbol as usize) {
                        *slot = Some(path);
                    }
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right, right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left, left_path));
                }
            }
        }

        table
    }

    pub fn code(&self, symbol: Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(symbol as usize)?.as_deref()
    }

    /// Σ weight × code length over all leaves: the size of the encoded payload
    /// including the end-of-stream code.
    pub fn compressed_bits(&self) -> u64 {
        self.compressed_bits
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_deref().map(|c| (s as Symbol, c)))
    }
}
