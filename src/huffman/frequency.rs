use std::io::{self, Read};

use super::{Symbol, ALPHABET_SIZE, PSEUDO_EOF};

const CHUNK_SIZE: usize = 8 * 1024;

/// Occurrence counts of every byte value in one pass over an input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    total: u64,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; ALPHABET_SIZE], total: 0 }
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `reader` to its end, counting every byte once. The reader is not rewound.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut table = Self::new();
        let mut chunk = [0u8; CHUNK_SIZE];

        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            table.add_bytes(&chunk[..n]);
        }

        Ok(table)
    }

    pub fn add_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.counts[b as usize] += 1;
        }
        self.total += bytes.len() as u64;
    }

    /// The weight of `symbol`; the end-of-stream symbol always weighs 1.
    pub fn count(&self, symbol: Symbol) -> u64 {
        match symbol {
            PSEUDO_EOF => 1,
            s if (s as usize) < ALPHABET_SIZE => self.counts[s as usize],
            _ => 0,
        }
    }

    /// Number of input bytes counted, excluding the end-of-stream symbol.
    pub fn total_bytes(&self) -> u64 {
        self.total
    }

    pub fn distinct_bytes(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Every symbol with a non-zero weight in ascending order, the end-of-stream symbol last.
    pub fn leaves(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(s, &c)| (s as Symbol, c))
            .chain(std::iter::once((PSEUDO_EOF, 1)))
    }
}

impl From<&[u8]> for FrequencyTable {
    fn from(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        table.add_bytes(bytes);
        table
    }
}
