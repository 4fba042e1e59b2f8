pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "docreader")]
#[command(about = "Convert Word, Excel, PowerPoint, PDF, HTML, CSV and ZIP files to Markdown")]
pub struct CliConfig {
    /// Files to convert, processed in the order given
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory for the converted .md/.txt downloads [default: ./converted]
    #[arg(long)]
    pub output_path: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for temporary copies of the uploads [default: system temp dir]
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,

    /// Show at most this many characters of each preview
    #[arg(long)]
    pub preview_chars: Option<usize>,

    /// Do not write the .md/.txt downloads
    #[arg(long)]
    pub no_downloads: bool,

    /// Write a JSON summary of the batch to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory after each file")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}
