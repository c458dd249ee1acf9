//! Filakit Core - library for the Filament installation orchestrator
//!
//! This library drives an external project generator and package manager to
//! produce a working Laravel + Filament skeleton, then wires in optional
//! plugins by literal text-patching the generated sources. The heavy lifting
//! (creating the project, installing packages, migrating the database) is
//! delegated to external tools; this crate sequences those steps, fails fast
//! on incompatible options, and keeps the derived naming state consistent
//! across every stage.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Leaves** - [`naming`] (identity derivation), [`patch`] (literal file
//!   substitution), [`exec`] (the external-command boundary)
//! - **Orchestration** - [`database`] provisioning, the [`plugins`] catalog
//!   and installer, and the linear [`pipeline`] state machine
//! - **CLI/TUI Interface** - optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt module

pub mod database;
pub mod error;
pub mod exec;
pub mod naming;
pub mod patch;
pub mod pipeline;
pub mod plugins;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use database::DatabaseMode;
pub use error::InstallError;
pub use exec::{CommandRunner, CommandOutput, ShellRunner};
pub use naming::ApplicationIdentity;
pub use patch::PatchOperation;
pub use pipeline::{FrameworkVersion, InstallOptions};
pub use plugins::{InstallStep, PluginDefinition, PluginSelection};

#[cfg(feature = "tui")]
pub use tui::{run, InstallArgs};
