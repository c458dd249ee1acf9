//! Typed failures for the installation pipeline
//!
//! User-input and precondition errors abort the run immediately with exit
//! code 1. Delegate failures from foundational stages surface as
//! `CommandFailed`; plugin commands stay best-effort and never reach here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    /// The application name did not start with a letter.
    #[error("invalid application name '{0}': the name must start with a letter")]
    InvalidName(String),

    /// A filesystem entry with the derived directory name already exists.
    #[error("a directory named '{0}' already exists here")]
    DirectoryExists(String),

    /// The external server already has a database with the derived name.
    #[error("a database named '{0}' already exists on the server")]
    DatabaseExists(String),

    /// `--mysql` with `--laravel-version previous` is redundant and rejected.
    #[error("--mysql cannot be combined with --laravel-version previous: that template already ships with a MySQL connection")]
    IncompatibleOptions,

    /// A fail-fast external command exited non-zero.
    #[error("command '{command}' failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },
}
