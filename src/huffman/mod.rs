pub mod builder;
pub mod codec;
pub mod codes;
pub mod frequency;
pub mod tree;

/// A byte value in `0..256`, or [`PSEUDO_EOF`].
pub type Symbol = u16;

pub const ALPHABET_SIZE: usize = 256;
/// Reserved end-of-stream symbol; never produced by input bytes.
pub const PSEUDO_EOF: Symbol = ALPHABET_SIZE as Symbol;
pub const BITS_PER_WORD: u64 = 8;
pub const BITS_PER_INT: u64 = 32;
/// Width of a leaf symbol in the serialized tree, enough for `0..=PSEUDO_EOF`.
pub const SYMBOL_BITS: u64 = 9;
pub const MAGIC_NUMBER: u32 = 0xface8200;

pub use codes::CodeTable;
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, Node, NodeId};

#[cfg(test)]
mod tests;
