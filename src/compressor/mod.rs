use std::io::{Read, Seek, SeekFrom, Write};

use log::{debug, info};

use crate::{
    bitstreams::BinaryWriter,
    error::{Error, Result},
    huffman::{
        codec::write_tree, CodeTable, FrequencyTable, HuffmanTree, BITS_PER_INT, BITS_PER_WORD,
        MAGIC_NUMBER, PSEUDO_EOF, SYMBOL_BITS,
    },
    properties::Properties,
    viewer::Viewer,
};

const CHUNK_SIZE: usize = 8 * 1024;

/// Everything learned from the counting pass, before any output is written.
#[derive(Clone, Debug)]
pub struct Preprocessed {
    pub frequencies: FrequencyTable,
    pub tree: HuffmanTree,
    pub codes: CodeTable,
}

impl Preprocessed {
    /// Bits the payload saves over eight bits per input byte; negative when
    /// the encoded payload (end-of-stream code included) is larger.
    pub fn bits_saved(&self) -> i64 {
        (BITS_PER_WORD * self.frequencies.total_bytes()) as i64 - self.codes.compressed_bits() as i64
    }

    /// Size of the serialized tree: one flag bit per node plus a symbol per leaf.
    pub fn tree_bits(&self) -> u64 {
        self.tree.len() as u64 + self.tree.leaf_count() as u64 * SYMBOL_BITS
    }

    pub fn properties(&self, force: bool) -> Properties {
        Properties {
            magic: MAGIC_NUMBER,
            original_bytes: self.frequencies.total_bytes(),
            distinct_bytes: self.frequencies.distinct_bytes(),
            tree_bits: self.tree_bits(),
            compressed_bits: self.codes.compressed_bits(),
            bits_saved: self.bits_saved(),
            force,
        }
    }
}

/// Counts `input`, builds the tree and its codes.
pub fn preprocess<R: Read>(input: R) -> Result<Preprocessed> {
    let frequencies = FrequencyTable::from_reader(input)?;
    let tree = HuffmanTree::build(&frequencies);
    let codes = CodeTable::from_tree(&tree);

    debug!(
        "preprocessed {} bytes, {} distinct, payload {} bits",
        frequencies.total_bytes(),
        frequencies.distinct_bytes(),
        codes.compressed_bits()
    );

    Ok(Preprocessed { frequencies, tree, codes })
}

/// Writes the framed stream for `input`: magic number, tree, one code per
/// byte and the end-of-stream code. Returns the bits written before padding.
///
/// `input` must yield the same bytes that `plan` was built from.
pub fn write_compressed<R: Read, W: Write>(plan: &Preprocessed, mut input: R, output: W) -> Result<u64> {
    let mut writer = BinaryWriter::new(output);

    writer.push_bits(MAGIC_NUMBER as u64, BITS_PER_INT)?;
    let tree_bits = write_tree(&plan.tree, &mut writer)?;
    debug!("tree written in {} bits", tree_bits);

    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = match input.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        for &b in &chunk[..n] {
            if plan.frequencies.count(b as u16) == 0 {
                return Err(Error::InvalidSymbol(b as u16));
            }
            let code = plan.codes.code(b as u16).ok_or(Error::InvalidSymbol(b as u16))?;
            for bit in code.iter().by_vals() {
                writer.push_bit(bit)?;
            }
        }
    }

    let eof = plan.codes.code(PSEUDO_EOF).ok_or(Error::InvalidSymbol(PSEUDO_EOF))?;
    for bit in eof.iter().by_vals() {
        writer.push_bit(bit)?;
    }

    let written = writer.written_bits;
    writer.close()?;

    Ok(written)
}

/// Compresses `input` into `output` and returns the bits saved.
///
/// `input` is read twice: once to count, then again from the same starting
/// position to encode. When the estimate is negative and `force` is not set,
/// the viewer is told and nothing is written to `output`.
pub fn compress<R, W>(input: &mut R, output: W, force: bool, viewer: &mut dyn Viewer) -> Result<i64>
where
    R: Read + Seek,
    W: Write,
{
    compress_with_plan(input, output, force, viewer).map(|plan| plan.bits_saved())
}

/// Same as [`compress`], handing back the counts, tree and codes it used.
pub fn compress_with_plan<R, W>(input: &mut R, output: W, force: bool, viewer: &mut dyn Viewer) -> Result<Preprocessed>
where
    R: Read + Seek,
    W: Write,
{
    let start = input.stream_position()?;
    let plan = preprocess(&mut *input)?;
    let bits_saved = plan.bits_saved();

    viewer.update(&format!(
        "counted {} bytes, {} distinct",
        plan.frequencies.total_bytes(),
        plan.frequencies.distinct_bytes()
    ));

    if bits_saved < 0 && !force {
        let err = Error::Unfavorable { bits_saved };
        viewer.show_error(&err.to_string());
        return Err(err);
    }

    input.seek(SeekFrom::Start(start))?;
    let written = write_compressed(&plan, &mut *input, output)?;

    info!("compressed {} bytes into {} bits", plan.frequencies.total_bytes(), written);
    viewer.update(&format!("saved {} bits", bits_saved));

    Ok(plan)
}
