use crate::error::{FormatError, Result};
use crate::header::elf::Elf64Ehdr;
use crate::sections::Elf64Shdr;
use crate::source::ByteSource;
use std::io::{Read, Seek};

/// Raw contents of a string table section: NUL-terminated names addressed by
/// byte offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable(Vec<u8>);

impl StringTable {
    pub fn new(bytes: Vec<u8>) -> Self {
        StringTable(bytes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the NUL-terminated run starting at `offset`, or an empty
    /// string when `offset` is outside the table. A run that reaches the end
    /// of the buffer without a terminator ends there.
    pub fn resolve_name(&self, offset: u32) -> String {
        let Some(tail) = self.0.get(offset as usize..) else {
            return String::new();
        };
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        String::from_utf8_lossy(&tail[..end]).into_owned()
    }
}

/// Loads the section named by `e_shstrndx`.
pub fn load_string_table<R: Read + Seek>(
    source: &mut ByteSource<R>,
    header: &Elf64Ehdr,
    sections: &[Elf64Shdr],
) -> Result<StringTable> {
    let index = header.e_shstrndx as usize;
    let sh = sections.get(index).ok_or(FormatError::BadReference {
        what: "section name string table",
        index: index as u64,
        len: sections.len() as u64,
    })?;

    let bytes = source.read_at(sh.sh_offset, sh.sh_size, "section name string table")?;
    log::debug!(
        "Loaded section name string table from section {index} ({} bytes)",
        bytes.len()
    );
    Ok(StringTable(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_by_offset() {
        let table = StringTable::new(b"\0.text\0.data\0".to_vec());
        assert_eq!(table.resolve_name(0), "");
        assert_eq!(table.resolve_name(1), ".text");
        assert_eq!(table.resolve_name(7), ".data");
        // suffix sharing, as linkers do for .rela.text / .text
        assert_eq!(table.resolve_name(2), "text");
    }

    #[test]
    fn out_of_range_offset_is_placeholder() {
        let table = StringTable::new(b"\0.text\0".to_vec());
        assert_eq!(table.resolve_name(table.len() as u32), "");
        assert_eq!(table.resolve_name(u32::MAX), "");
        assert_eq!(StringTable::default().resolve_name(0), "");
    }

    #[test]
    fn unterminated_run_stops_at_end() {
        let table = StringTable::new(b"\0.bss".to_vec());
        assert_eq!(table.resolve_name(1), ".bss");
    }

    #[test]
    fn invalid_utf8_is_lossy() {
        let table = StringTable::new(vec![0, b'.', 0xff, b'x', 0]);
        assert_eq!(table.resolve_name(1), ".\u{fffd}x");
    }
}
