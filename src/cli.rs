use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tunebox",
    about = "Small media-library backend: upload MP3s, list them, keep favorites",
    long_about = None,
    version,
)]
pub struct Args {
    /// Directory holding uploaded songs; favorites live in its favorites/ sub-directory [default: ./uploads]
    #[arg(short = 'd', long, value_name = "DIR")]
    pub media_dir: Option<PathBuf>,

    /// HTTP port to listen on [default: 3000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Largest accepted request body in MiB [default: 50]
    #[arg(long, value_name = "MIB")]
    pub max_upload_mb: Option<usize>,

    /// Path to TOML config file (overrides default search: ./tunebox.toml, ~/.config/tunebox/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bind to localhost only (127.0.0.1) instead of all interfaces (0.0.0.0 + :::)
    #[arg(long)]
    pub localhost: bool,
}
