pub mod binary;
pub mod constants;
pub mod error;
pub mod header;
pub mod sections;
pub mod source;
pub mod strtab;

pub use binary::*;
pub use error::*;
pub use header::elf::{read_header, Elf64Ehdr, ELF64_EHDR_SIZE};
pub use header::Endian;
pub use sections::*;
pub use source::ByteSource;
pub use strtab::*;
