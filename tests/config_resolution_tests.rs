//! Integration tests for layered configuration resolution
//!
//! These tests load real `config.toml` files from temporary directories and
//! check the value, the answering tier and the deferred messages of each
//! lookup.

use std::fs;
use std::path::PathBuf;
use sublime_debugger::config::{
    ConfigStore, LogFormat, MapEnv, Settings, Source, MODULE_NAME,
};
use sublime_debugger::SublimeDebuggerError;
use tempfile::TempDir;

fn config_dir(contents: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), contents).unwrap();
    dir
}

#[test]
fn test_missing_file_is_recorded_not_fatal() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::load_with_env(dir.path(), "demo", MapEnv::new()).unwrap();

    assert!(store.config_file().is_none());
    assert_eq!(store.deferred().len(), 1);
    assert!(store.deferred().messages()[0].starts_with("Config file not found at"));
}

#[test]
fn test_found_file_is_recorded() {
    let dir = config_dir("[demo]\nfoo = \"bar\"\n");
    let store = ConfigStore::load_with_env(dir.path(), "demo", MapEnv::new()).unwrap();

    assert!(store.config_file().is_some());
    assert!(store.deferred().messages()[0].starts_with("Config file found at"));
}

#[test]
fn test_trailing_slash_in_dir_is_accepted() {
    let dir = config_dir("[demo]\nfoo = \"bar\"\n");
    let with_slash = format!("{}/", dir.path().display());

    let mut store = ConfigStore::load_with_env(with_slash, "demo", MapEnv::new()).unwrap();

    assert_eq!(store.resolve_or("foo", String::new()).unwrap(), "bar");
}

#[test]
fn test_malformed_file_is_fatal() {
    let dir = config_dir("[demo\nfoo = ");
    let err = ConfigStore::load_with_env(dir.path(), "demo", MapEnv::new()).unwrap_err();

    assert!(matches!(err, SublimeDebuggerError::ConfigParse { .. }));
}

#[test]
fn test_file_scenario() {
    let dir = config_dir("[demo]\nfoo = \"bar\"\n\n[demo.sec]\nfoo = \"baz\"\n");
    let mut store = ConfigStore::load_with_env(dir.path(), "demo", MapEnv::new()).unwrap();
    store.reset_deferred();

    assert_eq!(
        store.resolve("foo", None),
        Some(toml::Value::String("bar".into()))
    );
    assert_eq!(store.deferred().len(), 1);
    assert!(store.deferred().messages()[0].contains("found in config"));

    assert_eq!(store.resolve_or("sec.foo", String::new()).unwrap(), "baz");

    let missing = store.resolve("sec.missing", Some(toml::Value::String("d".into())));
    assert_eq!(missing, Some(toml::Value::String("d".into())));
    assert_eq!(store.deferred().len(), 3);
    assert!(store.deferred().messages()[2].contains("not found"));
}

#[test]
fn test_env_scenario_casts_to_integer() {
    let dir = TempDir::new().unwrap();
    let env = MapEnv::new().with("MODULE_DEMO_FOO", "42");
    let mut store = ConfigStore::load_with_env(dir.path(), "module", env).unwrap();
    let before = store.deferred().len();

    let value: Option<i64> = store.resolve_as("demo.foo", None).unwrap();

    assert_eq!(value, Some(42));
    assert_eq!(store.source_of("demo.foo"), Source::Env);
    assert_eq!(store.deferred().len(), before + 1);
    assert!(store.deferred().messages()[before].contains("found in an environment variable"));
}

#[test]
fn test_default_is_returned_uncast() {
    let mut store = ConfigStore::from_table("demo", None, MapEnv::new());

    // a default of the wrong shape for the key is passed through untouched
    let value = store.resolve("count", Some(toml::Value::String("not a number".into())));

    assert_eq!(value, Some(toml::Value::String("not a number".into())));
    assert_eq!(store.source_of("count"), Source::Default);
}

#[test]
fn test_each_resolution_defers_exactly_one_message() {
    let dir = config_dir("[demo.sec]\na = 1\n");
    let env = MapEnv::new().with("DEMO_SEC_B", "2");
    let mut store = ConfigStore::load_with_env(dir.path(), "demo", env).unwrap();
    let before = store.deferred().len();

    for key in ["sec.a", "sec.b", "sec.c", "sec.a", "sec.b"] {
        store.resolve_as::<i64>(key, Some(0)).unwrap();
    }

    assert_eq!(store.deferred().len(), before + 5);
}

#[test]
fn test_flush_emits_in_order_then_empties() {
    let dir = config_dir("[demo]\na = 1\n");
    let mut store = ConfigStore::load_with_env(dir.path(), "demo", MapEnv::new()).unwrap();
    store.resolve("a", None);
    store.resolve("b", None);

    let mut emitted = Vec::new();
    store.flush_deferred(|msg| emitted.push(msg.to_string()));

    assert_eq!(emitted.len(), 3);
    assert!(emitted[0].starts_with("Config file found at"));
    assert_eq!(emitted[1], "DEMO_A found in config.toml");
    assert_eq!(emitted[2], "DEMO_B not found, falling back to default none");
    assert!(store.deferred().is_empty());

    let mut again = 0;
    store.flush_deferred(|_| again += 1);
    assert_eq!(again, 0);
}

#[test]
fn test_settings_from_file_and_env() {
    let dir = config_dir(
        r#"
        [sublime_debugger.logging]
        format = "compact"
        level = "debug"

        [sublime_debugger.sublime]
        project_file = "/work/app.sublime-project"
        "#,
    );
    let env = MapEnv::new().with("SUBLIME_DEBUGGER_SUBLIME_VIRTUALENV", "/work/.venv");
    let mut store = ConfigStore::load_with_env(dir.path(), MODULE_NAME, env).unwrap();

    let settings = Settings::resolve(&mut store, &MapEnv::new()).unwrap();

    assert_eq!(settings.logging.format, LogFormat::Compact);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.logging.path, None);
    assert_eq!(
        settings.sublime.project_file,
        Some(PathBuf::from("/work/app.sublime-project"))
    );
    assert_eq!(settings.sublime.virtualenv, Some(PathBuf::from("/work/.venv")));
}

#[test]
fn test_integer_setting_from_file_string() {
    let dir = config_dir(
        "[sublime_debugger.logging]\npath = \"/tmp/sd\"\nrotate_bytes = \"2048\"\n",
    );
    let mut store = ConfigStore::load_with_env(dir.path(), MODULE_NAME, MapEnv::new()).unwrap();

    let settings = Settings::resolve(&mut store, &MapEnv::new()).unwrap();

    assert_eq!(settings.logging.rotate_bytes, 2048);
    assert_eq!(settings.logging.backup_count, 3);
}
