//! The daemon's command-line surface, exercised through the built binary.

use std::fs;
use std::process::{Command, Output};

fn pistord(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pistord"))
        .args(args)
        .output()
        .expect("pistord should start")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_usage(args: &[&str]) {
    let output = pistord(args);
    assert!(output.status.success(), "{args:?}: {:?}", output.status);
    let text = stdout(&output);
    assert!(text.contains("usage: pistord <options>"), "{args:?}: {text}");
    assert!(text.contains("SHUTDOWN"));
    assert!(text.contains("DEBUG"));
}

#[test]
fn version_in_any_case() {
    for token in ["VERSION", "version", "Version"] {
        let output = pistord(&[token]);
        assert!(output.status.success());
        assert_eq!(stdout(&output).trim(), "Version: 1.0");
    }
}

#[test]
fn extra_tokens_are_ignored() {
    let output = pistord(&["VERSION", "extra"]);
    assert!(output.status.success(), "{:?}", output.status);
    assert_eq!(stdout(&output).trim(), "Version: 1.0");
}

#[test]
fn missing_or_unknown_token_prints_usage() {
    assert_usage(&[]);
    assert_usage(&["bogus"]);
    assert_usage(&["-x"]);
    assert_usage(&["bogus", "VERSION"]);
}

#[test]
fn shutdown_exits_cleanly_without_a_fan() {
    let dir = std::env::temp_dir().join("pistord_cli");
    fs::create_dir_all(&dir).unwrap();
    let log = dir.join("shutdown.log");
    let _ = fs::remove_file(&log);

    let output = pistord(&["--log-file", log.to_str().unwrap(), "shutdown"]);
    assert!(output.status.success(), "{:?}", output.status);
    assert!(stdout(&output).is_empty());

    let logged = fs::read_to_string(&log).unwrap();
    assert!(logged.contains("piStor Fan Service stopping..."), "{logged}");
}
