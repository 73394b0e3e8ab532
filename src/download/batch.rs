//! Batches of locators and their results.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::fs::locator_basename;

/// An ordered list of locators fetched as one operation.
///
/// Order is execution order and determines each job's position indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    locators: Vec<String>,
}

impl Batch {
    pub fn new<I, S>(locators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locators: locators.into_iter().map(Into::into).collect(),
        }
    }

    /// A package collection: the manifest first, then packages sorted by locator.
    pub fn for_packages<I, S>(manifest: impl Into<String>, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut packages: Vec<String> = packages.into_iter().map(Into::into).collect();
        packages.sort();

        let mut locators = Vec::with_capacity(packages.len() + 1);
        locators.push(manifest.into());
        locators.extend(packages);
        Self { locators }
    }

    pub fn locators(&self) -> &[String] {
        &self.locators
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }
}

impl From<Vec<String>> for Batch {
    fn from(locators: Vec<String>) -> Self {
        Self { locators }
    }
}

/// Parse a locator into a downloadable URL.
///
/// The locator must be an absolute http(s) URL with a host and a last path
/// segment usable as a file name.
pub fn parse_locator(locator: &str) -> Result<Url> {
    let invalid = || Error::InvalidUrl(locator.to_string());

    let url = Url::parse(locator.trim()).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid());
    }

    locator_basename(&url).map_err(|_| invalid())?;

    Ok(url)
}

/// A file delivered by a successful job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub locator: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Result of a successful batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Delivered files, in batch order.
    pub files: Vec<DownloadedFile>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }
}
