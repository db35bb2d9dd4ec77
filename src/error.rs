use std::io;
use thiserror::Error;

/// Why a descriptor file could not be read as a key/value record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {0}: key outside of any section")]
    MissingSectionHeader(usize),
    #[error("line {0}: expected `key=value`")]
    Malformed(usize),
    #[error("no [{0}] section")]
    MissingSection(String),
    #[error("`{key}` is not a boolean: {value:?}")]
    InvalidBool { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache i/o: {0}")]
    Io(#[from] io::Error),
    #[error("cache format: {0}")]
    Format(#[from] serde_json::Error),
}
