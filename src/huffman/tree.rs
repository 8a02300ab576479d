use super::Symbol;

/// Index of a node inside a [`HuffmanTree`] arena.
pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }
}

/// Binary prefix-code tree stored as an arena of nodes.
///
/// Internal nodes always have two children, addressed by index; leaves carry
/// the symbols. Trees built from frequencies have their root last, trees read
/// back from a stream have it at index 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

impl HuffmanTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.nodes[id], Node::Leaf { .. })
    }

    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    /// The child reached from `id` on `bit` (`false` = left), `None` for leaves.
    #[inline(always)]
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
            Node::Leaf { .. } => None,
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0)];

        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => max_depth = max_depth.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }

        max_depth
    }

    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}
