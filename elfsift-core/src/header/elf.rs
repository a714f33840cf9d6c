use crate::error::{ElfError, FormatError, Result};
use crate::header::{Endian, FieldReader};
use crate::source::ByteSource;
use goblin::elf::header::{
    EI_ABIVERSION, EI_CLASS, EI_DATA, EI_OSABI, EI_VERSION, ELFCLASS64, ELFMAG, ET_EXEC, SELFMAG,
};
use serde::Serialize;
use std::io::{Read, Seek};

/// Size of the on-disk ELF64 file header.
pub const ELF64_EHDR_SIZE: u64 = 64;

/// Represents the ELF (Executable and Linkable Format) header for a 64-bit object file.
///
/// This structure corresponds to the standard `Elf64_Ehdr` defined in the ELF specification.
/// It appears at the very beginning of every ELF file and contains metadata describing
/// the file's organization and layout. Scalar fields are decoded in the byte order the
/// file declares in `e_ident[EI_DATA]`.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Elf64Ehdr {
    /// ELF identification bytes.
    ///
    /// The first 4 bytes are `0x7F`, `'E'`, `'L'`, `'F'`, followed by class,
    /// data encoding, ident version, OS/ABI and ABI version.
    pub e_ident: [u8; 16],

    /// Object file type (relocatable, executable, shared, core).
    pub e_type: u16,

    /// Target architecture, e.g. `EM_X86_64` (62) or `EM_AARCH64` (183).
    pub e_machine: u16,

    /// Object file version (usually `EV_CURRENT` = 1).
    pub e_version: u32,

    /// Virtual address of the program entry point.
    pub e_entry: u64,

    /// File offset of the program header table.
    pub e_phoff: u64,

    /// File offset of the section header table.
    pub e_shoff: u64,

    /// Processor-specific flags.
    pub e_flags: u32,

    /// Size of this header (64 for ELF64).
    pub e_ehsize: u16,

    pub e_phentsize: u16,
    pub e_phnum: u16,

    /// Size of one section header table entry.
    pub e_shentsize: u16,

    /// Number of entries in the section header table.
    pub e_shnum: u16,

    /// Index of the section holding section names.
    pub e_shstrndx: u16,
}

impl Elf64Ehdr {
    pub fn magic(&self) -> [u8; 4] {
        [self.e_ident[0], self.e_ident[1], self.e_ident[2], self.e_ident[3]]
    }

    pub fn class(&self) -> u8 {
        self.e_ident[EI_CLASS]
    }

    pub fn data(&self) -> u8 {
        self.e_ident[EI_DATA]
    }

    pub fn ident_version(&self) -> u8 {
        self.e_ident[EI_VERSION]
    }

    pub fn osabi(&self) -> u8 {
        self.e_ident[EI_OSABI]
    }

    pub fn abi_version(&self) -> u8 {
        self.e_ident[EI_ABIVERSION]
    }

    pub fn endian(&self) -> Option<Endian> {
        Endian::from_ident(self.data())
    }

    pub fn entry_point(&self) -> u64 {
        self.e_entry
    }

    pub fn machine(&self) -> u16 {
        self.e_machine
    }

    pub fn is_executable(&self) -> bool {
        self.e_type == ET_EXEC
    }

    /// Decodes a header from exactly [`ELF64_EHDR_SIZE`] bytes.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() < ELF64_EHDR_SIZE as usize {
            return Err(FormatError::Truncated {
                what: "file header".into(),
                offset: 0,
                expected: ELF64_EHDR_SIZE,
                actual: buf.len() as u64,
            }
            .into());
        }

        let mut e_ident = [0u8; 16];
        e_ident.copy_from_slice(&buf[..16]);

        if &e_ident[..SELFMAG] != ELFMAG {
            let mut found = [0u8; 4];
            found.copy_from_slice(&e_ident[..SELFMAG]);
            return Err(FormatError::BadMagic { found }.into());
        }
        if e_ident[EI_CLASS] != ELFCLASS64 {
            return Err(FormatError::UnsupportedClass(e_ident[EI_CLASS]).into());
        }
        let endian = Endian::from_ident(e_ident[EI_DATA])
            .ok_or(FormatError::UnsupportedEncoding(e_ident[EI_DATA]))?;

        let mut cur = FieldReader::new(&buf[16..ELF64_EHDR_SIZE as usize], endian);
        Ok(Elf64Ehdr {
            e_ident,
            e_type: cur.u16()?,
            e_machine: cur.u16()?,
            e_version: cur.u32()?,
            e_entry: cur.u64()?,
            e_phoff: cur.u64()?,
            e_shoff: cur.u64()?,
            e_flags: cur.u32()?,
            e_ehsize: cur.u16()?,
            e_phentsize: cur.u16()?,
            e_phnum: cur.u16()?,
            e_shentsize: cur.u16()?,
            e_shnum: cur.u16()?,
            e_shstrndx: cur.u16()?,
        })
    }

    /// Checks that the program and section header tables, when declared,
    /// lie inside a file of `file_len` bytes.
    pub fn check_table_extents(&self, file_len: u64) -> Result<()> {
        if self.e_phnum != 0 {
            let len = u64::from(self.e_phnum) * u64::from(self.e_phentsize);
            check_extent("program header table", self.e_phoff, len, file_len)?;
        }
        if self.e_shoff != 0 {
            let len = u64::from(self.e_shnum) * u64::from(self.e_shentsize);
            check_extent("section header table", self.e_shoff, len, file_len)?;
        }
        Ok(())
    }
}

fn check_extent(what: &str, offset: u64, len: u64, file_len: u64) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= file_len => Ok(()),
        _ => Err(ElfError::truncated(
            what,
            offset,
            len,
            file_len.saturating_sub(offset),
        )),
    }
}

/// Reads and validates the file header at offset 0 of `source`.
pub fn read_header<R: Read + Seek>(source: &mut ByteSource<R>) -> Result<Elf64Ehdr> {
    let buf = source.read_at(0, ELF64_EHDR_SIZE, "file header")?;
    let header = Elf64Ehdr::parse(&buf)?;
    header.check_table_extents(source.len())?;
    log::debug!(
        "ELF header: type={} machine={} shoff={:#x} shnum={} shstrndx={}",
        header.e_type,
        header.e_machine,
        header.e_shoff,
        header.e_shnum,
        header.e_shstrndx
    );
    Ok(header)
}
