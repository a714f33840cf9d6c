use crate::error::{ElfError, FormatError, Result};
use crate::header::elf::Elf64Ehdr;
use crate::header::{Endian, FieldReader};
use crate::source::ByteSource;
use crate::strtab::StringTable;
use goblin::elf::section_header::{
    SHF_ALLOC, SHF_EXCLUDE, SHF_EXECINSTR, SHF_GROUP, SHF_INFO_LINK, SHF_LINK_ORDER, SHF_MERGE,
    SHF_OS_NONCONFORMING, SHF_STRINGS, SHF_TLS, SHF_WRITE, SHT_DYNAMIC, SHT_DYNSYM,
    SHT_FINI_ARRAY, SHT_GNU_HASH, SHT_GNU_VERDEF, SHT_GNU_VERNEED, SHT_GNU_VERSYM, SHT_GROUP,
    SHT_HASH, SHT_INIT_ARRAY, SHT_NOBITS, SHT_NOTE, SHT_NULL, SHT_PREINIT_ARRAY, SHT_PROGBITS,
    SHT_REL, SHT_RELA, SHT_SHLIB, SHT_STRTAB, SHT_SYMTAB, SHT_SYMTAB_SHNDX,
};
use serde::Serialize;
use std::io::{Read, Seek};

/// Size of one on-disk `Elf64_Shdr` record.
pub const ELF64_SHDR_SIZE: u16 = 64;

/// One entry of the section header table, decoded field by field.
///
/// `sh_link` and `sh_info` are plain indices into the section array. They are
/// not checked when the table is read; use [`Elf64Shdr::linked`] and
/// [`Elf64Shdr::info_section`] to dereference them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Elf64Shdr {
    /// Offset of the section name inside the section name string table.
    pub sh_name: u32,
    pub sh_type: u32,
    pub sh_flags: u64,
    /// Virtual address of the section in memory, 0 if not loaded.
    pub sh_addr: u64,
    pub sh_offset: u64,
    pub sh_size: u64,
    pub sh_link: u32,
    pub sh_info: u32,
    pub sh_addralign: u64,
    /// Size of each fixed-size entry, 0 if the section holds no table.
    pub sh_entsize: u64,
}

impl Elf64Shdr {
    fn decode(record: &[u8], endian: Endian) -> Result<Self> {
        let mut cur = FieldReader::new(record, endian);
        Ok(Elf64Shdr {
            sh_name: cur.u32()?,
            sh_type: cur.u32()?,
            sh_flags: cur.u64()?,
            sh_addr: cur.u64()?,
            sh_offset: cur.u64()?,
            sh_size: cur.u64()?,
            sh_link: cur.u32()?,
            sh_info: cur.u32()?,
            sh_addralign: cur.u64()?,
            sh_entsize: cur.u64()?,
        })
    }

    pub fn is_nobits(&self) -> bool {
        self.sh_type == SHT_NOBITS
    }

    pub fn linked<'a>(&self, sections: &'a [Elf64Shdr]) -> Option<&'a Elf64Shdr> {
        sections.get(self.sh_link as usize)
    }

    /// Only meaningful when `sh_info` holds a section index (see `SHF_INFO_LINK`).
    pub fn info_section<'a>(&self, sections: &'a [Elf64Shdr]) -> Option<&'a Elf64Shdr> {
        sections.get(self.sh_info as usize)
    }

    pub fn type_label(&self) -> &'static str {
        section_type_label(self.sh_type)
    }

    pub fn flags_string(&self) -> String {
        section_flags_string(self.sh_flags)
    }
}

pub fn section_type_label(sh_type: u32) -> &'static str {
    match sh_type {
        SHT_NULL => "NULL",
        SHT_PROGBITS => "PROGBITS",
        SHT_SYMTAB => "SYMTAB",
        SHT_STRTAB => "STRTAB",
        SHT_RELA => "RELA",
        SHT_HASH => "HASH",
        SHT_DYNAMIC => "DYNAMIC",
        SHT_NOTE => "NOTE",
        SHT_NOBITS => "NOBITS",
        SHT_REL => "REL",
        SHT_SHLIB => "SHLIB",
        SHT_DYNSYM => "DYNSYM",
        SHT_INIT_ARRAY => "INIT_ARRAY",
        SHT_FINI_ARRAY => "FINI_ARRAY",
        SHT_PREINIT_ARRAY => "PREINIT_ARRAY",
        SHT_GROUP => "GROUP",
        SHT_SYMTAB_SHNDX => "SYMTAB_SHNDX",
        SHT_GNU_HASH => "GNU_HASH",
        SHT_GNU_VERDEF => "GNU_verdef",
        SHT_GNU_VERNEED => "GNU_verneed",
        SHT_GNU_VERSYM => "GNU_versym",
        _ => crate::constants::UNKNOWN,
    }
}

/// readelf-style flag letters.
pub fn section_flags_string(flags: u64) -> String {
    const LETTERS: [(u32, char); 11] = [
        (SHF_WRITE, 'W'),
        (SHF_ALLOC, 'A'),
        (SHF_EXECINSTR, 'X'),
        (SHF_MERGE, 'M'),
        (SHF_STRINGS, 'S'),
        (SHF_INFO_LINK, 'I'),
        (SHF_LINK_ORDER, 'L'),
        (SHF_OS_NONCONFORMING, 'O'),
        (SHF_GROUP, 'G'),
        (SHF_TLS, 'T'),
        (SHF_EXCLUDE, 'E'),
    ];
    LETTERS
        .iter()
        .filter(|(bit, _)| flags & u64::from(*bit) != 0)
        .map(|(_, c)| *c)
        .collect()
}

/// Reads `e_shnum` section header records starting at `e_shoff`.
///
/// Every section that occupies file space must lie inside the source; a
/// `NOBITS` section is exempt since its size describes memory only.
pub fn read_sections<R: Read + Seek>(
    source: &mut ByteSource<R>,
    header: &Elf64Ehdr,
) -> Result<Vec<Elf64Shdr>> {
    if header.e_shnum == 0 {
        log::info!("No section headers declared");
        return Ok(Vec::new());
    }
    if header.e_shentsize != ELF64_SHDR_SIZE {
        return Err(FormatError::BadEntrySize {
            expected: ELF64_SHDR_SIZE,
            actual: header.e_shentsize,
        }
        .into());
    }
    let endian = header
        .endian()
        .ok_or(FormatError::UnsupportedEncoding(header.data()))?;

    let table_len = u64::from(header.e_shnum) * u64::from(ELF64_SHDR_SIZE);
    let raw = source.read_at(header.e_shoff, table_len, "section header table")?;

    let mut sections = Vec::with_capacity(header.e_shnum as usize);
    for (index, record) in raw.chunks_exact(ELF64_SHDR_SIZE as usize).enumerate() {
        let sh = Elf64Shdr::decode(record, endian)?;
        if sh.is_nobits() {
            if sh.sh_offset > source.len() {
                log::warn!("NOBITS section {index} offset {:#x} lies past EOF", sh.sh_offset);
            }
        } else {
            check_extent(&sh, index, source.len())?;
        }
        sections.push(sh);
    }

    log::info!("Read {} section headers", sections.len());
    Ok(sections)
}

fn check_extent(sh: &Elf64Shdr, index: usize, file_len: u64) -> Result<()> {
    let fits = sh
        .sh_offset
        .checked_add(sh.sh_size)
        .is_some_and(|end| end <= file_len);
    if fits {
        Ok(())
    } else {
        Err(ElfError::truncated(
            format!("section {index}"),
            sh.sh_offset,
            sh.sh_size,
            file_len.saturating_sub(sh.sh_offset),
        ))
    }
}

/// A section header paired with its resolved name and display labels.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSection {
    pub index: usize,
    pub name: String,
    pub kind: &'static str,
    pub vma: u64,
    pub size: u64,
    pub file_offset: u64,
    pub flags: String,
    pub link: u32,
    pub info: u32,
    pub align: u64,
    pub entsize: u64,
}

impl ResolvedSection {
    pub fn from_shdr(index: usize, sh: &Elf64Shdr, strtab: &StringTable) -> Self {
        let name = strtab.resolve_name(sh.sh_name);
        if name.is_empty() && sh.sh_name as usize >= strtab.len() {
            log::warn!(
                "Section {index}: name offset {} outside string table ({} bytes)",
                sh.sh_name,
                strtab.len()
            );
        }

        ResolvedSection {
            index,
            name,
            kind: sh.type_label(),
            vma: sh.sh_addr,
            size: sh.sh_size,
            file_offset: sh.sh_offset,
            flags: sh.flags_string(),
            link: sh.sh_link,
            info: sh.sh_info,
            align: sh.sh_addralign,
            entsize: sh.sh_entsize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn shdr(sh_type: u32, offset: u64, size: u64) -> Elf64Shdr {
        Elf64Shdr {
            sh_name: 0,
            sh_type,
            sh_flags: 0,
            sh_addr: 0,
            sh_offset: offset,
            sh_size: size,
            sh_link: 0,
            sh_info: 0,
            sh_addralign: 1,
            sh_entsize: 0,
        }
    }

    #[test]
    fn type_labels() {
        assert_eq!(section_type_label(SHT_PROGBITS), "PROGBITS");
        assert_eq!(section_type_label(SHT_STRTAB), "STRTAB");
        assert_eq!(section_type_label(SHT_NOBITS), "NOBITS");
        assert_eq!(section_type_label(SHT_GNU_VERDEF), "GNU_verdef");
        assert_eq!(section_type_label(SHT_GNU_VERNEED), "GNU_verneed");
        assert_eq!(section_type_label(SHT_GNU_VERSYM), "GNU_versym");
        assert_eq!(section_type_label(0x1234), "Unknown");
    }

    #[test]
    fn flag_letters() {
        assert_eq!(section_flags_string(0), "");
        assert_eq!(
            section_flags_string(u64::from(SHF_ALLOC | SHF_EXECINSTR)),
            "AX"
        );
        assert_eq!(
            section_flags_string(u64::from(SHF_WRITE | SHF_ALLOC | SHF_TLS)),
            "WAT"
        );
    }

    #[test]
    fn link_resolution_is_lazy_and_fallible() {
        let mut symtab = shdr(SHT_SYMTAB, 0, 0);
        symtab.sh_link = 2;
        symtab.sh_info = 9;
        let sections = vec![shdr(SHT_NULL, 0, 0), symtab, shdr(SHT_STRTAB, 0, 4)];

        assert_eq!(sections[1].linked(&sections).map(|s| s.sh_type), Some(SHT_STRTAB));
        assert!(sections[1].info_section(&sections).is_none());
    }

    #[test]
    fn zero_sections_is_empty() {
        let hdr = Elf64Ehdr {
            e_ident: *b"\x7fELF\x02\x01\x01\0\0\0\0\0\0\0\0\0",
            e_type: 1,
            e_machine: 62,
            e_version: 1,
            e_entry: 0,
            e_phoff: 0,
            e_shoff: 0,
            e_flags: 0,
            e_ehsize: 64,
            e_phentsize: 0,
            e_phnum: 0,
            e_shentsize: 0,
            e_shnum: 0,
            e_shstrndx: 0,
        };
        let mut src = ByteSource::new(Cursor::new(vec![0u8; 64])).unwrap();
        assert!(read_sections(&mut src, &hdr).unwrap().is_empty());
    }

    #[test]
    fn extent_past_eof_is_rejected() {
        assert!(check_extent(&shdr(SHT_PROGBITS, 0x10, 0x20), 1, 0x30).is_ok());
        assert!(check_extent(&shdr(SHT_PROGBITS, 0x10, 0x21), 1, 0x30).is_err());
        assert!(check_extent(&shdr(SHT_PROGBITS, u64::MAX, 2), 1, 0x30).is_err());
    }
}
