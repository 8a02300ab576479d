use std::io::{Read, Write};

use log::{debug, info};

use crate::{
    bitstreams::{BinaryReader, BinaryWriter},
    error::{Error, Result},
    huffman::{codec::read_tree, Node, BITS_PER_INT, BITS_PER_WORD, MAGIC_NUMBER, PSEUDO_EOF},
    viewer::Viewer,
};

/// Decodes a stream produced by [`compress`](crate::compressor::compress) and
/// returns the number of bytes written.
///
/// Nothing is written unless the magic number matches. If the bits run out
/// before the end-of-stream code, the bytes decoded so far stay in `output`.
pub fn decompress<R: Read, W: Write>(input: R, output: W, viewer: &mut dyn Viewer) -> Result<u64> {
    let mut reader = BinaryReader::new(input);

    let magic = match reader.read_int(BITS_PER_INT)? {
        Some(m) => m as u32,
        None => {
            viewer.show_error("stream too short to hold a magic number");
            return Err(Error::MissingMagic);
        }
    };
    if magic != MAGIC_NUMBER {
        let err = Error::MagicMismatch { expected: MAGIC_NUMBER, found: magic };
        viewer.show_error(&err.to_string());
        return Err(err);
    }

    let tree = read_tree(&mut reader)?;
    debug!("tree read: {} leaves, {} bits consumed", tree.leaf_count(), reader.read_bits);

    let mut writer = BinaryWriter::new(output);
    let mut decoded = 0u64;
    let mut node = tree.root();

    loop {
        let Some(bit) = reader.read_bit()? else {
            writer.close()?;
            let err = Error::Truncated { decoded };
            viewer.show_error(&err.to_string());
            return Err(err);
        };

        // read_tree rejects leaf roots and the walk restarts after each leaf.
        node = tree.child(node, bit).ok_or(Error::MalformedTree("step below a leaf"))?;

        if let Node::Leaf { symbol, .. } = *tree.node(node) {
            if symbol == PSEUDO_EOF {
                break;
            }
            writer.push_bits(symbol as u64, BITS_PER_WORD)?;
            decoded += 1;
            node = tree.root();
        }
    }

    writer.close()?;

    info!("decompressed {} bytes", decoded);
    viewer.update(&format!("decompressed {} bytes", decoded));

    Ok(decoded)
}
