pub mod elf;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use goblin::elf::header::{ELFDATA2LSB, ELFDATA2MSB};
use serde::Serialize;
use std::io::{self, Cursor};

/// Byte order declared by `e_ident[EI_DATA]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    pub fn from_ident(data: u8) -> Option<Self> {
        match data {
            ELFDATA2LSB => Some(Endian::Little),
            ELFDATA2MSB => Some(Endian::Big),
            _ => None,
        }
    }
}

/// Field-by-field decoder over an in-memory record, honoring the file's
/// declared byte order rather than the host's.
pub(crate) struct FieldReader<'a> {
    cur: Cursor<&'a [u8]>,
    endian: Endian,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(data: &'a [u8], endian: Endian) -> Self {
        Self {
            cur: Cursor::new(data),
            endian,
        }
    }

    pub(crate) fn u16(&mut self) -> io::Result<u16> {
        match self.endian {
            Endian::Little => self.cur.read_u16::<LittleEndian>(),
            Endian::Big => self.cur.read_u16::<BigEndian>(),
        }
    }

    pub(crate) fn u32(&mut self) -> io::Result<u32> {
        match self.endian {
            Endian::Little => self.cur.read_u32::<LittleEndian>(),
            Endian::Big => self.cur.read_u32::<BigEndian>(),
        }
    }

    pub(crate) fn u64(&mut self) -> io::Result<u64> {
        match self.endian {
            Endian::Little => self.cur.read_u64::<LittleEndian>(),
            Endian::Big => self.cur.read_u64::<BigEndian>(),
        }
    }
}
