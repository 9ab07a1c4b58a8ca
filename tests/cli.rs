use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

//===========================================================================//

fn ozpex(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ozpex"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn bios() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut image = vec![0xeau8; 0x2000];
    image[0x1ffc] = 0x00;
    image[0x1ffd] = 0xe0;
    file.write_all(&image).unwrap();
    file
}

//===========================================================================//

#[test]
fn unknown_device_type_exits_nonzero() {
    let bios = bios();
    let bios_path = bios.path().to_str().unwrap();
    let output = ozpex(&["--bios", bios_path, "-D", "1=foo:bar"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"foo\""), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_bios_exits_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("monitor.bin");
    let output = ozpex(&["--bios", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("ozpex: failed to read"), "stderr: {stderr}");
}

#[test]
fn duplicate_slot_exits_with_status_one() {
    let bios = bios();
    let bios_path = bios.path().to_str().unwrap();
    let output = ozpex(&["--bios", bios_path, "-D", "4=xmem", "-D", "4=xmem"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("slot 4"), "stderr: {stderr}");
}

#[test]
fn assembled_machine_reports_devices() {
    let bios = bios();
    let bios_path = bios.path().to_str().unwrap();
    let output = ozpex(&["--bios", bios_path, "--seed", "7", "-D", "7=xmem"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("reset vector: $e000"), "stdout: {stdout}");
    assert!(
        stdout.contains("slot   7: 7=xmem (status $20: extended memory)"),
        "stdout: {stdout}"
    );
}

//===========================================================================//
