//! Literal text patching of generated files
//!
//! Patches are plain search/replace substitutions against known anchor text
//! in files the project generator wrote. A patch applied to an empty or
//! missing file writes its replacement verbatim, so a patch step can double
//! as an initializer. Whether a patch stays re-applicable depends on whether
//! its replacement preserves the anchor; that is a per-patch authoring
//! decision, not something enforced here.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One search/replace substitution against a project-relative file.
#[derive(Debug, Clone)]
pub struct PatchOperation {
    pub target: PathBuf,
    pub search: String,
    pub replacement: String,
}

/// Apply `op` against an explicit project root.
pub fn apply(root: &Path, op: &PatchOperation) -> Result<()> {
    patch_file(&root.join(&op.target), &op.search, &op.replacement)
}

/// Replace every literal occurrence of `search` in the file with
/// `replacement`, rewriting the whole file. An empty or missing file ends up
/// containing `replacement` as its entire content.
pub fn patch_file(path: &Path, search: &str, replacement: &str) -> Result<()> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", path.display()))
        }
    };

    let patched = if content.is_empty() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        replacement.to_string()
    } else {
        content.replace(search, replacement)
    };

    fs::write(path, patched).with_context(|| format!("Failed to write {}", path.display()))
}
