use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    huffman::MAGIC_NUMBER,
};

/// Description of a compressed stream, stored next to it as `<name>.properties`.
///
/// The same file format doubles as the configuration read by `compress --config`,
/// where only `force` is meaningful.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub magic: u32,
    pub original_bytes: u64,
    pub distinct_bytes: usize,
    pub tree_bits: u64,
    pub compressed_bits: u64,
    pub bits_saved: i64,
    pub force: bool,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            magic: MAGIC_NUMBER,
            original_bytes: 0,
            distinct_bytes: 0,
            tree_bits: 0,
            compressed_bits: 0,
            bits_saved: 0,
            force: false,
        }
    }
}

fn parse<T: FromStr>(value: &HashMap<String, String>, key: &str, default: T) -> Result<T> {
    match value.get(key) {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| Error::Properties(format!("malformed value for {}: {:?}", key, v))),
    }
}

impl TryFrom<HashMap<String, String>> for Properties {
    type Error = Error;

    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        let defaults = Properties::default();

        let magic = match value.get("magic") {
            None => defaults.magic,
            Some(m) => {
                let m = m.trim();
                let digits = m.strip_prefix("0x").unwrap_or(m);
                u32::from_str_radix(digits, 16)
                    .map_err(|_| Error::Properties(format!("malformed magic number {:?}", m)))?
            }
        };

        Ok(Properties {
            magic,
            original_bytes: parse(&value, "originalbytes", defaults.original_bytes)?,
            distinct_bytes: parse(&value, "distinctbytes", defaults.distinct_bytes)?,
            tree_bits: parse(&value, "treebits", defaults.tree_bits)?,
            compressed_bits: parse(&value, "compressedbits", defaults.compressed_bits)?,
            bits_saved: parse(&value, "bitssaved", defaults.bits_saved)?,
            force: parse(&value, "force", defaults.force)?,
        })
    }
}

impl From<&Properties> for HashMap<String, String> {
    fn from(val: &Properties) -> Self {
        let mut map = HashMap::new();

        map.insert("magic".to_owned(), format!("{:#010x}", val.magic));
        map.insert("originalbytes".to_owned(), val.original_bytes.to_string());
        map.insert("distinctbytes".to_owned(), val.distinct_bytes.to_string());
        map.insert("treebits".to_owned(), val.tree_bits.to_string());
        map.insert("compressedbits".to_owned(), val.compressed_bits.to_string());
        map.insert("bitssaved".to_owned(), val.bits_saved.to_string());
        map.insert("force".to_owned(), val.force.to_string());

        map
    }
}

impl Properties {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let map = java_properties::read(BufReader::new(file)).map_err(|e| Error::Properties(e.to_string()))?;
        Properties::try_from(map)
    }

    pub fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        java_properties::write(BufWriter::new(file), &HashMap::from(self))
            .map_err(|e| Error::Properties(e.to_string()))
    }

    /// Sidecar path for a compressed file: `<path>.properties`.
    pub fn sidecar(path: impl AsRef<Path>) -> std::path::PathBuf {
        let mut name = path.as_ref().as_os_str().to_owned();
        name.push(".properties");
        name.into()
    }
}
