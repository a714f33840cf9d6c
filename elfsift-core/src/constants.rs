//! Human-readable labels for the small enumerations found in the ELF header.
//!
//! Every function is total: codes outside the documented set, including
//! negative values and values wider than the on-disk field, map to
//! [`UNKNOWN`].

use goblin::elf::header::{
    EM_386, EM_68K, EM_860, EM_88K, EM_AARCH64, EM_ARM, EM_IA_64, EM_M32, EM_MIPS, EM_NONE,
    EM_PARISC, EM_PPC, EM_PPC64, EM_RISCV, EM_S390, EM_SH, EM_SPARC, EM_SPARC32PLUS, EM_SPARCV9,
    EM_VAX, EM_X86_64, ELFCLASS32, ELFCLASS64, ELFCLASSNONE, ELFDATA2LSB, ELFDATA2MSB,
    ELFDATANONE, ELFOSABI_AIX, ELFOSABI_ARM, ELFOSABI_FREEBSD, ELFOSABI_HPUX, ELFOSABI_IRIX,
    ELFOSABI_LINUX, ELFOSABI_MODESTO, ELFOSABI_NETBSD, ELFOSABI_NONE, ELFOSABI_OPENBSD,
    ELFOSABI_SOLARIS, ELFOSABI_STANDALONE, ELFOSABI_TRU64, ET_CORE, ET_DYN, ET_EXEC, ET_NONE,
    ET_REL,
};

pub const UNKNOWN: &str = "Unknown";

const EV_NONE: u8 = 0;
const EV_CURRENT: u8 = 1;

/// `EI_CLASS`: 32- or 64-bit objects.
pub fn class_label(code: i64) -> &'static str {
    match u8::try_from(code) {
        Ok(ELFCLASSNONE) => "ELFCLASSNONE",
        Ok(ELFCLASS32) => "32-bit objects",
        Ok(ELFCLASS64) => "64-bit objects",
        _ => UNKNOWN,
    }
}

/// `EI_DATA`: byte order of processor-specific data.
pub fn data_label(code: i64) -> &'static str {
    match u8::try_from(code) {
        Ok(ELFDATANONE) => "ELFDATANONE",
        Ok(ELFDATA2LSB) => "2's complement, little-endian",
        Ok(ELFDATA2MSB) => "2's complement, big-endian",
        _ => UNKNOWN,
    }
}

/// `EI_VERSION` (and `e_version`, which shares the encoding).
pub fn version_label(code: i64) -> &'static str {
    match u8::try_from(code) {
        Ok(EV_NONE) => "EV_NONE",
        Ok(EV_CURRENT) => "Current version",
        _ => UNKNOWN,
    }
}

/// `EI_OSABI`
pub fn osabi_label(code: i64) -> &'static str {
    match u8::try_from(code) {
        Ok(ELFOSABI_NONE) => "ELFOSABI_NONE",
        Ok(ELFOSABI_HPUX) => "HP-UX",
        Ok(ELFOSABI_NETBSD) => "NetBSD",
        Ok(ELFOSABI_LINUX) => "Linux",
        Ok(ELFOSABI_SOLARIS) => "Sun Solaris",
        Ok(ELFOSABI_AIX) => "AIX",
        Ok(ELFOSABI_IRIX) => "IRIX",
        Ok(ELFOSABI_FREEBSD) => "FreeBSD",
        Ok(ELFOSABI_TRU64) => "TRU64 UNIX",
        Ok(ELFOSABI_MODESTO) => "Novell Modesto",
        Ok(ELFOSABI_OPENBSD) => "OpenBSD",
        Ok(ELFOSABI_ARM) => "ARM",
        Ok(ELFOSABI_STANDALONE) => "Standalone (embedded) application",
        _ => UNKNOWN,
    }
}

/// `e_type`: object file type.
pub fn type_label(code: i64) -> &'static str {
    match u16::try_from(code) {
        Ok(ET_NONE) => "ET_NONE",
        Ok(ET_REL) => "Relocatable file",
        Ok(ET_EXEC) => "Executable file",
        Ok(ET_DYN) => "Shared object file",
        Ok(ET_CORE) => "Core file",
        _ => UNKNOWN,
    }
}

/// `e_machine`: target instruction set.
pub fn machine_label(code: i64) -> &'static str {
    match u16::try_from(code) {
        Ok(EM_NONE) => "EM_NONE",
        Ok(EM_M32) => "AT&T WE 32100",
        Ok(EM_SPARC) => "SPARC",
        Ok(EM_386) => "Intel 80386",
        Ok(EM_68K) => "Motorola 68000",
        Ok(EM_88K) => "Motorola 88000",
        Ok(EM_860) => "Intel 80860",
        Ok(EM_MIPS) => "MIPS R3000",
        Ok(EM_PARISC) => "HP/PA",
        Ok(EM_SPARC32PLUS) => "SPARC with enhanced instruction set",
        Ok(EM_PPC) => "PowerPC",
        Ok(EM_PPC64) => "PowerPC 64-bit",
        Ok(EM_S390) => "IBM S/390",
        Ok(EM_ARM) => "ARM",
        Ok(EM_SH) => "Renesas SuperH",
        Ok(EM_SPARCV9) => "SPARC v9 64-bit",
        Ok(EM_IA_64) => "Intel Itanium",
        Ok(EM_X86_64) => "AMD x86-64",
        Ok(EM_VAX) => "DEC Vax",
        Ok(EM_AARCH64) => "ARM AArch64",
        Ok(EM_RISCV) => "RISC-V",
        _ => UNKNOWN,
    }
}
