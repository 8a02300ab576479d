use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stream too short to hold a magic number")]
    MissingMagic,

    #[error("magic number mismatch: expected {expected:#010x}, found {found:#010x}")]
    MagicMismatch { expected: u32, found: u32 },

    #[error("stream ended before the end-of-stream code ({decoded} bytes decoded)")]
    Truncated { decoded: u64 },

    #[error("symbol {0} is not part of the code")]
    InvalidSymbol(u16),

    #[error("malformed tree: {0}")]
    MalformedTree(&'static str),

    #[error("compression would grow the file by {} bits; use forced mode to proceed anyway", .bits_saved.unsigned_abs())]
    Unfavorable { bits_saved: i64 },

    #[error("properties: {0}")]
    Properties(String),
}

impl Error {
    /// True for errors raised before any decoding because the input is not in this format.
    pub fn is_format(&self) -> bool {
        matches!(self, Error::MissingMagic | Error::MagicMismatch { .. })
    }
}
