mod common;

use std::path::{Path, PathBuf};

use common::write_file;
use siterun::args::{ContentType, Mode, PlacementTable};
use siterun::config::{Config, ConfigError, PROJECT_CONFIG_FILE};
use tempfile::TempDir;

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.preprocessor.command, "src/build/preprocess.mjs");
    assert_eq!(config.preprocessor.preprocess_action, "preprocess");
    assert_eq!(config.preprocessor.watch_action, "watch");

    assert_eq!(config.generator.name, "gridsome");
    assert_eq!(config.generator.modules_dir, PathBuf::from("node_modules"));
    assert_eq!(config.generator.module_names, vec!["gridsome", "@gridsome"]);
    assert_eq!(config.generator.interpreter.as_deref(), Some("node"));

    // Both modes copy everything by default.
    for mode in Mode::ALL {
        assert_eq!(config.placement.for_mode(mode), &PlacementTable::uniform("copy"));
    }

    assert_eq!(config.assets.source_dir, PathBuf::from("content"));
    assert_eq!(config.assets.dest_dir, PathBuf::from("dist"));
    assert!(config.assets.await_copy);
    assert!(config.validate().is_ok());
}

/// Test that Config::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("siterun/config.toml"));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("siterun.toml");
    write_file(
        &path,
        r#"
[preprocessor]
command = "bin/prep"

[assets]
copy_file_exts = ["png"]
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.preprocessor.command, "bin/prep");
    assert_eq!(config.preprocessor.watch_action, "watch");
    assert_eq!(config.assets.copy_file_exts, vec!["png"]);
    assert_eq!(config.generator.name, "gridsome");
}

#[test]
fn test_placement_tables_keep_file_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("siterun.toml");
    write_file(
        &path,
        r#"
[[placement.develop]]
content_type = "resource"
strategy = "link"

[[placement.develop]]
content_type = "md"
strategy = "copy"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    let develop = config.placement.for_mode(Mode::Develop);
    assert_eq!(
        develop.content_types(),
        vec![ContentType::Resource, ContentType::Md]
    );
    assert_eq!(develop.to_flags(), vec!["--resource", "link", "--md", "copy"]);
    // Untouched mode keeps its default.
    assert_eq!(config.placement.build, PlacementTable::uniform("copy"));
}

#[test]
fn test_duplicate_placement_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("siterun.toml");
    write_file(
        &path,
        r#"
[[placement.build]]
content_type = "md"
strategy = "copy"

[[placement.build]]
content_type = "md"
strategy = "link"
"#,
    );

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_unknown_content_type_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("siterun.toml");
    write_file(
        &path,
        r#"
[[placement.build]]
content_type = "video"
strategy = "copy"
"#,
    );

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_validation_rejects_empty_command() {
    let mut config = Config::default();
    config.preprocessor.command = "  ".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("preprocessor.command"));
}

#[test]
fn test_validation_rejects_dotted_extension() {
    let mut config = Config::default();
    config.assets.copy_file_exts = vec![".png".to_string()];
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_read_error_for_directory() {
    let dir = TempDir::new().unwrap();
    let result = Config::load_from(dir.path());
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

// -- discovery ----------------------------------------------------------------

#[test]
fn test_discover_prefers_explicit() {
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("custom.toml");
    write_file(&explicit, "");
    write_file(&dir.path().join(PROJECT_CONFIG_FILE), "");

    let found = Config::discover(Some(explicit.as_path()), dir.path(), Path::new("/nonexistent")).unwrap();
    assert_eq!(found, Some(explicit));
}

#[test]
fn test_discover_missing_explicit_is_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    let result = Config::discover(Some(missing.as_path()), dir.path(), Path::new("/nonexistent"));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn test_discover_project_before_user() {
    let dir = TempDir::new().unwrap();
    let user = dir.path().join("user.toml");
    write_file(&user, "");
    let project = dir.path().join(PROJECT_CONFIG_FILE);

    assert_eq!(
        Config::discover(None, dir.path(), &user).unwrap(),
        Some(user.clone())
    );

    write_file(&project, "");
    assert_eq!(
        Config::discover(None, dir.path(), &user).unwrap(),
        Some(project)
    );
}

#[test]
fn test_discover_nothing_means_defaults() {
    let dir = TempDir::new().unwrap();
    let found = Config::discover(None, dir.path(), &dir.path().join("nope.toml")).unwrap();
    assert_eq!(found, None);
}

#[test]
fn test_load_uses_project_file() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir.path().join(PROJECT_CONFIG_FILE),
        "[generator]\nname = \"eleventy\"\n",
    );
    let config = Config::load(None, dir.path()).unwrap();
    assert_eq!(config.generator.name, "eleventy");
}
