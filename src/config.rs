use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MEDIA_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_MB: usize = 50;

#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub media_dir: Option<PathBuf>,
    pub localhost: Option<bool>,
    pub max_upload_mb: Option<usize>,
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub media_dir: PathBuf,
    pub localhost: bool,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Merge CLI flags over the config file over built-in defaults.
    pub fn resolve(file: Option<FileConfig>, args: &crate::cli::Args) -> Self {
        let file = file.unwrap_or_default();
        let max_upload_mb = args
            .max_upload_mb
            .or(file.max_upload_mb)
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB);
        Config {
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            media_dir: args
                .media_dir
                .clone()
                .or(file.media_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MEDIA_DIR)),
            localhost: args.localhost || file.localhost.unwrap_or(false),
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
        }
    }
}

pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    let cwd_config = PathBuf::from("tunebox.toml");
    if cwd_config.exists() {
        return Some(cwd_config);
    }
    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("tunebox").join("config.toml");
        if xdg_config.exists() {
            return Some(xdg_config);
        }
    }
    None
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}
