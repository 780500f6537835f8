//! Process-level tests: exit status, stdout diagnostics and written artifacts.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

const MARKER: &str = "ARC_REGISTER_DRIVER";

fn create_temp_dir(name: &str) -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir()
        .join("dridefs_cli_process")
        .join(format!("{}_{}_{}", name, std::process::id(), id));
    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(dir.join("src")).unwrap();
    dir
}

fn create_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn run(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dridefs"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_missing_arguments_is_usage_error() {
    let dir = create_temp_dir("usage");
    let header = dir.join("out/dri_defs.h");

    let output = run(&[Path::new(MARKER), &dir.join("src"), &header]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "diagnostic not on stdout: {stdout}");
    assert!(!header.exists());
    assert!(!dir.join("out").exists());
}

#[test]
fn test_clean_tree_exits_zero() {
    let dir = create_temp_dir("clean");
    create_file(&dir.join("src/rtc.c"), "ARC_REGISTER_DRIVER(3, rtc,) = {};\n");
    let header = dir.join("out/dri_defs.h");
    let source = dir.join("out/dri_defs.c");

    let output = run(&[Path::new(MARKER), &dir.join("src"), &header, &source]);

    assert_eq!(output.status.code(), Some(0));
    assert!(fs::read_to_string(&header).unwrap().contains("#define ARC_DRIDEF_COUNT 1\n"));
    assert!(fs::read_to_string(&source).unwrap().contains("\t[0] = &__driver_rtc_,\n"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Collision Counter: 0"));
}

#[test]
fn test_collision_sets_exit_status() {
    let dir = create_temp_dir("collision");
    create_file(&dir.join("src/rtc.c"), "ARC_REGISTER_DRIVER(3, rtc,) = {};\n");
    create_file(&dir.join("src/x.c"), "ARC_REGISTER_DRIVER(4, rtc,) = {};\n");
    let header = dir.join("dri_defs.h");
    let source = dir.join("dri_defs.c");

    let output = run(&[Path::new(MARKER), &dir.join("src"), &header, &source]);

    assert_eq!(output.status.code(), Some(1));
    assert!(header.exists(), "artifacts are written despite collisions");
    assert!(source.exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("found driver definition"));
    assert!(stderr.contains("group collision"));
}

#[test]
fn test_extra_arguments_are_ignored() {
    let dir = create_temp_dir("extra");
    create_file(&dir.join("src/uart.c"), "ARC_REGISTER_DRIVER(3, uart, tx) = {};\n");
    let header = dir.join("dri_defs.h");
    let source = dir.join("dri_defs.c");

    let output = run(&[
        Path::new(MARKER),
        &dir.join("src"),
        &header,
        &source,
        Path::new("extra"),
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert!(fs::read_to_string(&header).unwrap().contains("ARC_DRIDEF_UART_TX 0"));
}

#[test]
fn test_malformed_marker_is_fatal() {
    let dir = create_temp_dir("malformed");
    create_file(&dir.join("src/nvme.c"), "ARC_REGISTER_DRIVER(3, nvme_driver) = {};\n");
    let header = dir.join("dri_defs.h");
    let source = dir.join("dri_defs.c");

    let output = run(&[Path::new(MARKER), &dir.join("src"), &header, &source]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!header.exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nvme.c:1"));
}
