//! Huffman file compression with a self-describing stream format.
//!
//! A compressed stream is a 32-bit magic number, the code tree in preorder
//! (flag bit, 9-bit symbol for leaves), one code per input byte and a final
//! end-of-stream code, all packed most significant bit first.

pub mod bitstreams;
pub mod compressor;
pub mod decompressor;
pub mod error;
pub mod huffman;
pub mod properties;
pub mod viewer;

pub use compressor::{compress, compress_with_plan, preprocess, write_compressed, Preprocessed};
pub use decompressor::decompress;
pub use error::{Error, Result};
pub use properties::Properties;
pub use viewer::{LogViewer, Viewer};
