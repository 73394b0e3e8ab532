//! Filesystem module.
//!
//! Provides:
//! - File names derived from locators
//! - Destination paths and atomic relocation

pub mod naming;
pub mod paths;

pub use naming::{locator_basename, sanitize_filename};
pub use paths::{destination_path, ensure_dir, relocate};
