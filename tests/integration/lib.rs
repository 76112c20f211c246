//! Shared helpers for Herald integration tests.

use std::path::PathBuf;
use std::process::Command;

/// Locate the compiled `herald` binary in the workspace target directory.
///
/// Cargo sets `CARGO_MANIFEST_DIR` to the manifest directory of the package
/// being tested. We navigate up to the workspace root and look inside
/// `target/debug/`.
pub fn herald_bin() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> workspace root
    let workspace_root = manifest_dir
        .parent()
        .expect("tests/ parent")
        .parent()
        .expect("workspace root");
    let bin = workspace_root.join("target").join("debug").join("herald");
    assert!(
        bin.exists(),
        "herald binary not found at {}; run `cargo build -p herald-cli` first",
        bin.display()
    );
    bin
}

/// A `herald` command with inherited bot credentials stripped, so tests are
/// deterministic regardless of the developer's environment.
pub fn herald_cmd() -> Command {
    let mut cmd = Command::new(herald_bin());
    cmd.env_remove("BOT_TOKEN")
        .env_remove("OPENAI_API_KEY")
        .env_remove("HERALD_CHANNELS_FILE")
        .env_remove("PORT");
    cmd
}
