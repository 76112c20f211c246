//! CLI binary integration tests.
//!
//! These tests exercise the compiled `herald` binary to verify top-level
//! command routing, the channel registry lifecycle, and error handling.

use herald_integration_tests::herald_cmd;
use tempfile::TempDir;

#[test]
fn test_cli_version() {
    let output = herald_cmd()
        .arg("version")
        .output()
        .expect("failed to run herald");
    assert!(output.status.success(), "version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("herald"),
        "version output should contain 'herald', got: {}",
        stdout
    );
}

#[test]
fn test_cli_help() {
    let output = herald_cmd()
        .arg("--help")
        .output()
        .expect("failed to run herald");
    assert!(output.status.success(), "--help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["serve", "bot", "channels", "send", "rewrite"] {
        assert!(
            stdout.contains(command),
            "help output should mention '{}', got: {}",
            command,
            stdout
        );
    }
}

#[test]
fn test_cli_unknown_command() {
    let output = herald_cmd()
        .arg("nonexistent-command")
        .output()
        .expect("failed to run herald");
    assert!(
        !output.status.success(),
        "unknown command should return non-zero exit code"
    );
}

#[test]
fn test_cli_channels_lifecycle() {
    let dir = TempDir::new().unwrap();
    let registry = dir.path().join("channels.json");
    let registry_env = registry.to_str().unwrap();

    // Empty registry
    let output = herald_cmd()
        .args(["channels", "list"])
        .env("HERALD_CHANNELS_FILE", registry_env)
        .current_dir(dir.path())
        .output()
        .expect("failed to run herald channels list");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No channels registered"));

    // Add a channel
    let output = herald_cmd()
        .args(["channels", "add", "-1001234567890", "--name", "Evening News"])
        .env("HERALD_CHANNELS_FILE", registry_env)
        .current_dir(dir.path())
        .output()
        .expect("failed to run herald channels add");
    assert!(
        output.status.success(),
        "add should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // It shows up in the list
    let output = herald_cmd()
        .args(["channels", "list"])
        .env("HERALD_CHANNELS_FILE", registry_env)
        .current_dir(dir.path())
        .output()
        .expect("failed to run herald channels list");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-1001234567890"));
    assert!(stdout.contains("Evening News"));

    // Adding the same id again fails
    let output = herald_cmd()
        .args(["channels", "add", "-1001234567890"])
        .env("HERALD_CHANNELS_FILE", registry_env)
        .current_dir(dir.path())
        .output()
        .expect("failed to run herald channels add");
    assert!(!output.status.success(), "duplicate add should fail");

    // Remove it
    let output = herald_cmd()
        .args(["channels", "remove", "-1001234567890"])
        .env("HERALD_CHANNELS_FILE", registry_env)
        .current_dir(dir.path())
        .output()
        .expect("failed to run herald channels remove");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Removed channel"));
}

#[test]
fn test_cli_channels_add_rejects_bad_id() {
    let dir = TempDir::new().unwrap();
    let registry = dir.path().join("channels.json");
    let output = herald_cmd()
        .args(["channels", "add", "@my_channel"])
        .env("HERALD_CHANNELS_FILE", registry.to_str().unwrap())
        .current_dir(dir.path())
        .output()
        .expect("failed to run herald channels add");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid channel id"));
}

#[test]
fn test_cli_send_requires_bot_token() {
    let dir = TempDir::new().unwrap();
    let output = herald_cmd()
        .args(["send", "some article text"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run herald send");
    assert!(
        !output.status.success(),
        "send without BOT_TOKEN should fail"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("BOT_TOKEN"));
}

#[test]
fn test_cli_rewrite_requires_backend() {
    let dir = TempDir::new().unwrap();
    let output = herald_cmd()
        .args(["rewrite", "some article text"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run herald rewrite");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("OPENAI_API_KEY"));
}

#[test]
fn test_cli_rewrite_rejects_unknown_style() {
    let dir = TempDir::new().unwrap();
    let output = herald_cmd()
        .args(["rewrite", "some article text", "--style", "formal"])
        .env("OPENAI_API_KEY", "test-key")
        .current_dir(dir.path())
        .output()
        .expect("failed to run herald rewrite");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown rewrite style"));
}
