use crate::error::Result;
use crate::header::elf::{read_header, Elf64Ehdr};
use crate::sections::{read_sections, Elf64Shdr, ResolvedSection};
use crate::source::ByteSource;
use crate::strtab::load_string_table;
use serde::Serialize;
use std::io::{Read, Seek};
use std::path::Path;

/// Everything one analysis run learns about a file.
#[derive(Debug, Serialize)]
pub struct Binary {
    pub path: String,
    pub header: Elf64Ehdr,
    #[serde(skip)]
    pub section_headers: Vec<Elf64Shdr>,
    pub sections: Vec<ResolvedSection>,
}

impl Binary {
    /// Opens `path` read-only and runs the full analysis. The file handle is
    /// released when this returns, on success or failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(&path)?;
        Self::from_reader(file, path.as_ref().display().to_string())
    }

    pub fn from_reader<R: Read + Seek>(reader: R, path: impl Into<String>) -> Result<Self> {
        let mut source = ByteSource::new(reader)?;
        log::info!("Analyzing {} bytes", source.len());

        let header = read_header(&mut source)?;
        let section_headers = read_sections(&mut source, &header)?;
        let strtab = load_string_table(&mut source, &header, &section_headers)?;

        let sections = section_headers
            .iter()
            .enumerate()
            .map(|(index, sh)| ResolvedSection::from_shdr(index, sh, &strtab))
            .collect();

        Ok(Self {
            path: path.into(),
            header,
            section_headers,
            sections,
        })
    }
}
