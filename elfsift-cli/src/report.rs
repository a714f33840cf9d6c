use colored::Colorize;
use elfsift_core::constants::{
    class_label, data_label, machine_label, osabi_label, type_label, version_label,
};
use elfsift_core::{Binary, Elf64Ehdr, ResolvedSection};
use tabled::settings::Style;
use tabled::{Table, Tabled};

const LABEL_WIDTH: usize = 35;

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "[Nr]")]
    index: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Size")]
    size: u64,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Offset")]
    offset: String,
    #[tabled(rename = "Flags")]
    flags: String,
}

impl From<&ResolvedSection> for SectionRow {
    fn from(s: &ResolvedSection) -> Self {
        SectionRow {
            index: format!("[{:>2}]", s.index),
            name: s.name.clone(),
            kind: s.kind,
            size: s.size,
            address: format!("{:016x}", s.vma),
            offset: format!("{:016x}", s.file_offset),
            flags: s.flags.clone(),
        }
    }
}

fn field(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let label = format!("{:<LABEL_WIDTH$}", format!("{label}:"));
    out.push_str(&format!("  {}{value}\n", label.cyan()));
}

fn labeled(code: u64, label: &str) -> String {
    format!("{code} ({label})")
}

pub fn render_header(hdr: &Elf64Ehdr) -> String {
    let mut out = format!("{}\n", "ELF Header:".bold());

    let magic: Vec<String> = hdr.e_ident.iter().map(|b| format!("{b:02x}")).collect();
    out.push_str(&format!("  {}   {}\n", "Magic:".cyan(), magic.join(" ")));

    field(&mut out, "Class", labeled(hdr.class().into(), class_label(hdr.class().into())));
    field(&mut out, "Data", labeled(hdr.data().into(), data_label(hdr.data().into())));
    field(
        &mut out,
        "Version",
        labeled(hdr.ident_version().into(), version_label(hdr.ident_version().into())),
    );
    field(&mut out, "OS/ABI", labeled(hdr.osabi().into(), osabi_label(hdr.osabi().into())));
    field(&mut out, "ABI Version", hdr.abi_version());
    field(&mut out, "Type", labeled(hdr.e_type.into(), type_label(hdr.e_type.into())));
    field(
        &mut out,
        "Machine",
        labeled(hdr.e_machine.into(), machine_label(hdr.e_machine.into())),
    );
    field(
        &mut out,
        "Version",
        format!("{:#x} ({})", hdr.e_version, version_label(hdr.e_version.into())),
    );
    field(&mut out, "Entry point address", format!("{:#x}", hdr.e_entry));
    field(
        &mut out,
        "Start of program headers",
        format!("{} (bytes into file)", hdr.e_phoff),
    );
    field(
        &mut out,
        "Start of section headers",
        format!("{} (bytes into file)", hdr.e_shoff),
    );
    field(&mut out, "Flags", format!("{:#x}", hdr.e_flags));
    field(&mut out, "Size of this header", format!("{} (bytes)", hdr.e_ehsize));
    field(
        &mut out,
        "Size of program headers",
        format!("{} (bytes)", hdr.e_phentsize),
    );
    field(&mut out, "Number of program headers", hdr.e_phnum);
    field(
        &mut out,
        "Size of section headers",
        format!("{} (bytes)", hdr.e_shentsize),
    );
    field(&mut out, "Number of section headers", hdr.e_shnum);
    field(&mut out, "Section header string table index", hdr.e_shstrndx);
    out
}

pub fn render_sections(sections: &[ResolvedSection]) -> String {
    if sections.is_empty() {
        return "There are no sections in this file.\n".to_string();
    }

    let rows: Vec<SectionRow> = sections.iter().map(SectionRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::blank());

    format!(
        "{}\n{table}\n\
         Key to Flags:\n  W (write), A (alloc), X (execute), M (merge), S (strings), I (info),\n  \
         L (link order), O (extra OS processing required), G (group), T (TLS), E (exclude)\n",
        "Section Headers:".bold()
    )
}

pub fn render_report(bin: &Binary) -> String {
    let mut out = format!("{} {}\n\n", "[+] Analyzing ELF file:".green(), bin.path);
    out.push_str(&render_header(&bin.header));
    out.push('\n');
    out.push_str(&render_sections(&bin.sections));
    out
}
