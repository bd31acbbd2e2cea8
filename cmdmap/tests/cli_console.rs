//! CLI tests for `cmdmap console`, `cmdmap list`, and `cmdmap init`.
//!
//! Spawns the cmdmap binary in a temp directory and checks what reaches
//! stdout along with the exit code.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use cmdmap::exit_codes;

fn cmdmap(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cmdmap"));
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("CMDMAP_LOG");
    cmd
}

#[test]
fn console_dispatches_each_line_and_survives_errors() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("cmdmap.toml"), "prompt = \"\"\n").expect("write config");

    let mut child = cmdmap(temp.path())
        .arg("console")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn cmdmap console");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"/say hello\nwhoami\n\nmissing\nversion\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "hello");
    assert_eq!(lines[1], "Run this command in-game.");
    assert_eq!(lines[2], "No command specified.");
    assert_eq!(lines[3], "Unknown command: missing");
    assert!(lines[4].starts_with("cmdmap "), "{stdout}");
}

#[test]
fn list_prints_handbook_with_config_aliases() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("cmdmap.toml"),
        "disabled = [\"version\"]\n\n[aliases]\necho = [\"print\"]\n",
    )
    .expect("write config");

    let output = cmdmap(temp.path()).arg("list").output().expect("list");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("echo (print, say) [scope: any]"), "{stdout}");
    assert!(stdout.contains("perm (permcheck) [scope: any, permission: cmdmap.perm]"));
    assert!(stdout.contains("whoami [scope: actor]"));
    assert!(!stdout.contains("version"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let temp = tempfile::tempdir().expect("tempdir");

    let first = cmdmap(temp.path()).arg("init").status().expect("init");
    assert_eq!(first.code(), Some(exit_codes::OK));
    assert!(temp.path().join("cmdmap.toml").exists());

    let second = cmdmap(temp.path()).arg("init").status().expect("init again");
    assert_eq!(second.code(), Some(exit_codes::INVALID));

    let forced = cmdmap(temp.path())
        .args(["init", "--force"])
        .status()
        .expect("init --force");
    assert_eq!(forced.code(), Some(exit_codes::OK));
}

#[test]
fn invalid_config_exits_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("cmdmap.toml"), "disabled = [\"\"]\n").expect("write config");

    let output = cmdmap(temp.path()).arg("list").output().expect("list");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("not a valid label"), "{stderr}");
}
