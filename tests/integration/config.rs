//! Configuration integration tests

use std::fs;

use cel_repl::util::config::{load_config_from, ConfigError};
use cel_repl::Repl;
use tempfile::TempDir;

#[test]
fn test_load_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[repl]\nhistory_size = 5\ncheck = false\nprompt = \"cel> \"\nformat_indent = 4\n",
    )
    .unwrap();

    let config = load_config_from(&path).unwrap().repl;
    assert_eq!(config.history_size, 5);
    assert!(!config.check);
    assert!(config.macros);
    assert_eq!(config.prompt, "cel> ");
    assert_eq!(config.format_indent, 4);

    let mut repl = Repl::new(&config, Vec::new()).unwrap();
    assert_eq!(repl.prompt(), "(1)cel> ");
    repl.submit("y").unwrap();
    let out = String::from_utf8(repl.into_output()).unwrap();
    // check = false: the undeclared variable only fails at evaluation
    assert_eq!(out, "(2)cel> no such attribute: y\n");
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let err = load_config_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[repl]\nhistory_size = \"many\"\n").unwrap();
    assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
}
