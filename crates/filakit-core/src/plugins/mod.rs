//! Plugin selection and installation
//!
//! The catalog is data (see [`catalog`]); this module walks it in catalog
//! order, filtered by the user's selection, and executes each plugin's step
//! sequence. External commands are best-effort here: a failed `composer
//! require` is reported but does not abort the plugin's remaining steps.

pub mod catalog;

use crate::exec::CommandRunner;
use crate::patch;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

pub use catalog::{catalog, InstallStep, PluginDefinition, NONE_CHOICE, PANEL_PROVIDER};

/// The user's plugin choice from the multiselect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginSelection {
    /// The "none" sentinel: skip plugin installation entirely.
    None,
    /// Selected catalog ids. Ids not present in the catalog are skipped.
    Chosen(Vec<&'static str>),
}

/// Install every selected plugin, in catalog order.
pub async fn install<R: CommandRunner>(
    runner: &mut R,
    project_root: &Path,
    selection: &PluginSelection,
) -> Result<()> {
    let selected = match selection {
        PluginSelection::None => return Ok(()),
        PluginSelection::Chosen(ids) if ids.is_empty() => return Ok(()),
        PluginSelection::Chosen(ids) => ids,
    };

    // Every registration patch targets the `->plugins([` anchor, which the
    // generator's default panel provider does not emit. Seed it exactly
    // once, before any plugin's steps run.
    ensure_plugins_anchor(project_root)?;

    for plugin in catalog() {
        if !selected.contains(&plugin.id) {
            continue;
        }

        println!(
            "{}",
            format!("Installing {}...", plugin.display_name).cyan().bold()
        );

        for step in &plugin.steps {
            match step {
                InstallStep::RunCommand { command } => {
                    let code = runner.stream(project_root, command).await?;
                    if code != 0 {
                        eprintln!(
                            "{} '{}' exited with code {}",
                            "Warning:".yellow(),
                            command,
                            code
                        );
                    }
                }
                InstallStep::PatchFile(op) => patch::apply(project_root, op)?,
            }
        }
    }

    Ok(())
}

/// Make sure the panel provider contains a `->plugins([...])` block for the
/// registration patches to hang off.
fn ensure_plugins_anchor(project_root: &Path) -> Result<()> {
    let path = project_root.join(PANEL_PROVIDER);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if content.contains(catalog::PLUGINS_ANCHOR) {
        return Ok(());
    }

    patch::apply(project_root, &catalog::plugins_anchor_patch())
}
