use std::path::PathBuf;
use tunebox::cli::Args;
use tunebox::config::{Config, FileConfig};

fn make_args(port: Option<u16>, media_dir: Option<PathBuf>) -> Args {
    Args {
        media_dir,
        port,
        max_upload_mb: None,
        config: None,
        localhost: false,
    }
}

fn file_config(port: Option<u16>) -> FileConfig {
    FileConfig {
        port,
        ..FileConfig::default()
    }
}

#[test]
fn test_defaults_when_nothing_set() {
    let config = Config::resolve(None, &make_args(None, None));
    assert_eq!(config.port, 3000);
    assert_eq!(config.media_dir, PathBuf::from("uploads"));
    assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
    assert!(!config.localhost);
}

#[test]
fn test_cli_flag_overrides_default() {
    let config = Config::resolve(None, &make_args(Some(9000), None));
    assert_eq!(config.port, 9000);
}

#[test]
fn test_toml_overrides_default() {
    let config = Config::resolve(Some(file_config(Some(7777))), &make_args(None, None));
    assert_eq!(config.port, 7777);
}

#[test]
fn test_cli_overrides_toml() {
    let config = Config::resolve(Some(file_config(Some(7777))), &make_args(Some(9000), None));
    assert_eq!(config.port, 9000); // CLI wins
}

#[test]
fn test_media_dir_precedence() {
    let file = FileConfig {
        media_dir: Some(PathBuf::from("/srv/music")),
        ..FileConfig::default()
    };
    let config = Config::resolve(Some(file), &make_args(None, Some(PathBuf::from("/tmp/songs"))));
    assert_eq!(config.media_dir, PathBuf::from("/tmp/songs"));
}

#[test]
fn test_toml_parse() {
    let toml_str = "port = 9000\nmedia_dir = \"/srv/music\"\nmax_upload_mb = 8\n";
    let parsed: FileConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(parsed.port, Some(9000));
    assert_eq!(parsed.media_dir, Some(PathBuf::from("/srv/music")));

    let config = Config::resolve(Some(parsed), &make_args(None, None));
    assert_eq!(config.max_upload_bytes, 8 * 1024 * 1024);
}

#[test]
fn test_toml_unknown_fields_ignored() {
    // Future keys must not break parsing
    let toml_str = "port = 9000\nunknown_future_key = true\n";
    let parsed: Result<FileConfig, _> = toml::from_str(toml_str);
    assert!(parsed.is_ok());
}

#[test]
fn test_localhost_from_toml() {
    let file = FileConfig {
        localhost: Some(true),
        ..FileConfig::default()
    };
    let config = Config::resolve(Some(file), &make_args(None, None));
    assert!(config.localhost);
}
