//! Configuration module for pkgfetch.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{Config, DownloadConfig, OutputConfig};
pub use validation::validate_config;
