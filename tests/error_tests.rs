//! Error scenario integration tests

use std::process::Command;

use tempfile::TempDir;

fn media_shelf_bin(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_media-shelf"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("MEDIA_SHELF_DATA_DIR", home.path().join("data"));
    cmd
}

#[test]
fn config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    let output = media_shelf_bin(&home)
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_platform() {
    let home = TempDir::new().unwrap();
    let output = media_shelf_bin(&home)
        .args(["config", "set", "platform", "symbian"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn invalid_record_duration() {
    let home = TempDir::new().unwrap();
    let output = media_shelf_bin(&home)
        .args(["audio", "record", "--duration", "invalid"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--duration"),
        "Expected error about invalid duration, got: {}",
        stderr
    );
}

#[test]
fn unknown_platform_flag() {
    let home = TempDir::new().unwrap();
    let output = media_shelf_bin(&home)
        .args(["--platform", "symbian", "files", "list"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn play_unknown_clip() {
    let home = TempDir::new().unwrap();
    let output = media_shelf_bin(&home)
        .args(["audio", "play", "Audio_9.flac"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No clip matches"));
}

#[test]
fn open_unknown_file() {
    let home = TempDir::new().unwrap();
    let output = media_shelf_bin(&home)
        .args(["files", "open", "missing.pdf"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No file matches"));
}

#[test]
fn import_missing_path() {
    let home = TempDir::new().unwrap();
    let output = media_shelf_bin(&home)
        .args(["files", "import"])
        .arg(home.path().join("nope.pdf"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Import error"));
}

#[test]
fn corrupt_store_starts_empty() {
    let home = TempDir::new().unwrap();
    let store = home.path().join("data").join("store");
    std::fs::create_dir_all(&store).unwrap();
    std::fs::write(store.join("storedFiles.json"), "{not json").unwrap();

    let output = media_shelf_bin(&home)
        .args(["files", "list"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No files yet"));
}
