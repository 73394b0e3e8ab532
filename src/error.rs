//! Error types for pkgfetch.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Batch errors
    #[error("Nothing to download: the batch is empty")]
    EmptyBatch,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Download of {locator} failed: {message}")]
    Transport { locator: String, message: String },

    #[error("Unexpected response for {locator}: HTTP {status}")]
    UnexpectedResponse { locator: String, status: u16 },

    #[error("Unable to move download to {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Invalid file names derived from locators
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const FILESYSTEM_ERROR: i32 = 5;
}
