//! Application name resolution
//!
//! Turns a raw user-supplied display name into the pair of derived names the
//! rest of the pipeline works with: a display name safe to interpolate into
//! the generated `.env` file, and a filesystem/database-safe slug.

use crate::error::InstallError;
use deunicode::deunicode;
use std::path::Path;

/// The two derived names for an installation, computed once and then passed
/// by reference to every later stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationIdentity {
    /// User-facing name, wrapped in double quotes when it contains anything
    /// beyond ASCII alphanumerics.
    pub display_name: String,
    /// Lowercase `[a-z0-9]` identifier used as the project directory and
    /// database name.
    pub slug: String,
}

/// Resolve a raw name into an [`ApplicationIdentity`].
///
/// Fails with [`InstallError::InvalidName`] when the name does not start
/// with a letter (checked before touching the filesystem) and with
/// [`InstallError::DirectoryExists`] when `parent/slug` already exists.
pub fn resolve(raw: &str, parent: &Path) -> Result<ApplicationIdentity, InstallError> {
    match raw.chars().next() {
        Some(first) if first.is_alphabetic() => {}
        _ => return Err(InstallError::InvalidName(raw.to_string())),
    }

    let display_name = if raw.chars().all(|c| c.is_ascii_alphanumeric()) {
        raw.to_string()
    } else {
        // Spaces, apostrophes and non-ASCII letters all need quoting before
        // the name lands in the generated env file.
        format!("\"{raw}\"")
    };

    let slug: String = deunicode(raw)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    if slug.is_empty() {
        return Err(InstallError::InvalidName(raw.to_string()));
    }

    if parent.join(&slug).exists() {
        return Err(InstallError::DirectoryExists(slug));
    }

    Ok(ApplicationIdentity { display_name, slug })
}
