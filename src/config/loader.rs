//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Where and how artifacts are fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    /// Staging directory that receives the finished files.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Scratch directory for in-flight transfers.
    #[serde(default)]
    pub temporary_directory: Option<PathBuf>,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Seconds allowed to establish a connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_directory: None,
            temporary_directory: None,
            user_agent: default_user_agent(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

/// Operator-facing output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Suppress all progress lines.
    #[serde(default)]
    pub quiet: bool,

    /// Use ANSI escapes to overwrite the in-progress line.
    #[serde(default = "default_true")]
    pub ansi: bool,

    /// Fixed width of every progress line.
    #[serde(default = "default_line_width")]
    pub line_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            ansi: true,
            line_width: default_line_width(),
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_line_width() -> usize {
    80
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective output directory.
    ///
    /// Falls back to the user's download directory, then the working directory.
    pub fn output_directory(&self) -> PathBuf {
        if let Some(dir) = &self.download.output_directory {
            return dir.clone();
        }

        directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Get the effective scratch directory for in-flight transfers.
    pub fn temporary_directory(&self) -> PathBuf {
        self.download
            .temporary_directory
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}
