//! Integration tests for layered Settings loading.
//!
//! These tests pass the global layer explicitly to `Settings::load_from`, so a
//! config file in the developer's home directory never leaks in.

use std::fs;

use tempfile::TempDir;

use postree::config::{Order, Settings};

#[test]
fn given_global_config_when_loading_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("postree.toml");
    fs::write(&global, "order = \"breadth-first\"\n").unwrap();

    let settings = Settings::load_from(Some(&global), None).expect("load settings");

    assert_eq!(settings.order, Order::BreadthFirst);
    assert!(settings.trim_input, "unset keys keep their defaults");
}

#[test]
fn given_global_and_explicit_config_when_loading_then_explicit_wins() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    let explicit = dir.path().join("explicit.toml");
    fs::write(&global, "order = \"preorder\"\ntrim_input = false\n").unwrap();
    fs::write(&explicit, "order = \"postorder\"\n").unwrap();

    let settings = Settings::load_from(Some(&global), Some(&explicit)).expect("load settings");

    assert_eq!(settings.order, Order::Postorder);
    assert!(!settings.trim_input, "global value survives when explicit is silent");
}

#[test]
fn given_missing_explicit_config_when_loading_then_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = Settings::load_from(None, Some(&missing));

    assert!(result.is_err(), "explicit config must exist");
}

#[test]
fn given_unknown_order_when_loading_then_error() {
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("bad.toml");
    fs::write(&explicit, "order = \"sideways\"\n").unwrap();

    let err = Settings::load_from(None, Some(&explicit)).unwrap_err();

    assert!(err.to_string().starts_with("config error:"), "{}", err);
}
