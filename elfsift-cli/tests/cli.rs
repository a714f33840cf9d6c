use std::path::PathBuf;
use std::process::{Command, Output};

fn write_temp(name: &str, bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("elfsift-{}-{name}", std::process::id()));
    std::fs::write(&path, bytes).unwrap();
    path
}

fn elfsift(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_elfsift"))
        .args(args)
        .arg("--no-color")
        .output()
        .unwrap()
}

/// Header, `.text` and `.data` payloads, the name table, then three section records.
fn text_data_elf() -> Vec<u8> {
    let strtab = b"\0.text\0.data\0";
    let payload_len = 16 + 8 + strtab.len() as u64;
    let shoff = 64 + payload_len;

    let mut out = Vec::new();
    out.extend_from_slice(b"\x7fELF\x02\x01\x01\0\0\0\0\0\0\0\0\0");
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&62u16.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&0x401000u64.to_le_bytes());
    out.extend_from_slice(&0u64.to_le_bytes());
    out.extend_from_slice(&shoff.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for v in [64u16, 0, 0, 64, 3, 2] {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out.extend_from_slice(&[0x90; 16]);
    out.extend_from_slice(&[0xaa; 8]);
    out.extend_from_slice(strtab);

    let records: [(u32, u32, u64, u64, u64); 3] = [
        (1, 1, 0x401000, 64, 16),
        (7, 1, 0x402000, 80, 8),
        (0, 3, 0, 88, strtab.len() as u64),
    ];
    for (name, sh_type, addr, offset, size) in records {
        out.extend_from_slice(&name.to_le_bytes());
        out.extend_from_slice(&sh_type.to_le_bytes());
        out.extend_from_slice(&0u64.to_le_bytes());
        out.extend_from_slice(&addr.to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&1u64.to_le_bytes());
        out.extend_from_slice(&0u64.to_le_bytes());
    }
    out
}

#[test]
fn reports_sections_in_order() {
    let path = write_temp("text-data", &text_data_elf());
    let out = elfsift(&[path.to_str().unwrap()]);
    std::fs::remove_file(&path).ok();

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("ELF Header:"));
    assert!(stdout.contains("Magic:   7f 45 4c 46 02 01 01 00"));
    assert!(stdout.contains("62 (AMD x86-64)"));
    assert!(stdout.contains("0x401000"));
    let text = stdout.find(".text").unwrap();
    let data = stdout.find(".data").unwrap();
    assert!(text < data);
    assert!(stdout.contains("0000000000401000"));
    assert!(stdout.contains("0000000000402000"));
    assert!(stdout.contains("0000000000000050"));
}

#[test]
fn sections_subcommand_as_json() {
    let path = write_temp("json", &text_data_elf());
    let out = elfsift(&["--format", "json", path.to_str().unwrap(), "sections"]);
    std::fs::remove_file(&path).ok();

    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, [".text", ".data", ""]);
    assert_eq!(json[1]["size"], 8);
    assert_eq!(json[1]["vma"], 0x402000);
}

#[test]
fn ten_zero_bytes_fail_with_one_diagnostic() {
    let path = write_temp("tiny", &[0u8; 10]);
    let out = elfsift(&[path.to_str().unwrap()]);
    std::fs::remove_file(&path).ok();

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.contains("file header truncated"));
    assert!(stderr.contains("expected 64 bytes, got 10"));
}

#[test]
fn missing_file_fails() {
    let out = elfsift(&["/nonexistent/elfsift/input"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("error: cannot analyze"));
}

#[test]
fn missing_argument_is_usage_error() {
    let out = Command::new(env!("CARGO_BIN_EXE_elfsift")).output().unwrap();
    assert!(!out.status.success());
}

#[test]
fn bad_magic_is_reported() {
    let mut bytes = text_data_elf();
    bytes[0] = 0x00;
    let path = write_temp("badmagic", &bytes);
    let out = elfsift(&[path.to_str().unwrap()]);
    std::fs::remove_file(&path).ok();

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad magic 00 45 4c 46"));
}
