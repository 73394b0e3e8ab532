//! File names derived from locators.

use url::Url;

use crate::error::{Error, Result};

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename is a relative directory reference (`.` or
/// `..`) or contains a path separator. Dots elsewhere in the name are fine.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name == "." || name == ".." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// The file name a locator is stored under: its last path segment, percent-decoded.
///
/// The decoded segment goes through [`sanitize_filename`], so characters that
/// are not portable in file names (`:`, `*`, `?`, `"`, `<`, `>`, `|` and
/// control characters) become `_`. `https://h/a%3Ab.pkg` is therefore stored as
/// `a_b.pkg`, not `a:b.pkg`.
pub fn locator_basename(url: &Url) -> Result<String> {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    let decoded = urlencoding::decode(segment)
        .map_err(|_| Error::InvalidFilename(format!("Not valid UTF-8: '{}'", segment)))?;

    sanitize_filename(&decoded)
}
