use std::io;
use thiserror::Error;

/// Structural problems found while decoding an ELF64 image.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("not an ELF file: bad magic {}", hex_bytes(.found))]
    BadMagic { found: [u8; 4] },

    #[error("{what} truncated at offset {offset:#x}: expected {expected} bytes, got {actual}")]
    Truncated {
        what: String,
        offset: u64,
        expected: u64,
        actual: u64,
    },

    #[error("{what} index {index} out of range ({len} entries)")]
    BadReference {
        what: &'static str,
        index: u64,
        len: u64,
    },

    #[error("unsupported ELF class {0} (only 64-bit objects are handled)")]
    UnsupportedClass(u8),

    #[error("unsupported data encoding {0}")]
    UnsupportedEncoding(u8),

    #[error("section header entry size is {actual} bytes, expected {expected}")]
    BadEntrySize { expected: u16, actual: u16 },
}

#[derive(Error, Debug)]
pub enum ElfError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl ElfError {
    pub(crate) fn truncated(what: impl Into<String>, offset: u64, expected: u64, actual: u64) -> Self {
        FormatError::Truncated {
            what: what.into(),
            offset,
            expected,
            actual,
        }
        .into()
    }
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub type Result<T, E = ElfError> = std::result::Result<T, E>;
