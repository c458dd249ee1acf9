//! Database provisioning for the generated project
//!
//! The current Laravel template ships a ready-to-use sqlite database, so the
//! sqlite mode has nothing to do. External mode rewrites the generated `.env`
//! connection block with placeholder MySQL settings, refuses to reuse an
//! existing database, runs the migrations and drops the now-unused sqlite
//! artifact.

use crate::error::InstallError;
use crate::exec::{self, CommandRunner};
use crate::naming::ApplicationIdentity;
use crate::patch;
use crate::pipeline::FrameworkVersion;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::io;
use std::path::Path;

/// Where the application's data lives. Decided once from the install
/// options (or forced by the previous framework version) and never
/// re-derived afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseMode {
    Sqlite,
    External,
}

impl DatabaseMode {
    /// The previous framework template hard-wires an external connection,
    /// so that version always selects external mode.
    pub fn select(use_external_db: bool, version: FrameworkVersion) -> Self {
        if use_external_db || matches!(version, FrameworkVersion::Previous) {
            DatabaseMode::External
        } else {
            DatabaseMode::Sqlite
        }
    }
}

const ENV_FILE: &str = ".env";
const SQLITE_ARTIFACT: &str = "database/database.sqlite";

/// Commented-out connection defaults in the current template's `.env`.
const SQLITE_ENV_BLOCK: &str = "DB_CONNECTION=sqlite\n\
    # DB_HOST=127.0.0.1\n\
    # DB_PORT=3306\n\
    # DB_DATABASE=laravel\n\
    # DB_USERNAME=root\n\
    # DB_PASSWORD=";

/// The previous template ships an active MySQL block; only the database
/// name placeholder needs rewriting.
const PREVIOUS_DB_ANCHOR: &str = "DB_DATABASE=laravel";

fn mysql_env_block(slug: &str) -> String {
    format!(
        "DB_CONNECTION=mysql\n\
         DB_HOST=127.0.0.1\n\
         DB_PORT=3306\n\
         DB_DATABASE={slug}\n\
         DB_USERNAME=root\n\
         DB_PASSWORD="
    )
}

/// Provision the database for the generated project. Any failure here is
/// fatal to the run; nothing is retried.
pub async fn provision<R: CommandRunner>(
    runner: &mut R,
    project_root: &Path,
    identity: &ApplicationIdentity,
    mode: DatabaseMode,
    version: FrameworkVersion,
) -> Result<()> {
    if mode == DatabaseMode::Sqlite {
        // The default template already provisions sqlite.
        return Ok(());
    }

    println!(
        "{}",
        format!("Configuring MySQL database '{}'...", identity.slug)
            .cyan()
            .bold()
    );

    let env_path = project_root.join(ENV_FILE);
    match version {
        FrameworkVersion::Current => {
            patch::patch_file(&env_path, SQLITE_ENV_BLOCK, &mysql_env_block(&identity.slug))?
        }
        FrameworkVersion::Previous => patch::patch_file(
            &env_path,
            PREVIOUS_DB_ANCHOR,
            &format!("DB_DATABASE={}", identity.slug),
        )?,
    }

    ensure_database_absent(runner, project_root, &identity.slug).await?;

    exec::run_fatal(runner, project_root, "php artisan config:cache").await?;
    exec::run_fatal(runner, project_root, "php artisan migrate --force").await?;

    remove_sqlite_artifact(project_root)?;

    Ok(())
}

/// Query the server for a database with the derived name and refuse to
/// continue if one exists.
async fn ensure_database_absent<R: CommandRunner>(
    runner: &mut R,
    project_root: &Path,
    slug: &str,
) -> Result<()> {
    let query = format!(
        "mysql --user=root --batch --skip-column-names --execute=\"SHOW DATABASES LIKE '{slug}'\""
    );
    let output = runner.capture(project_root, &query).await?;

    if output.code != 0 {
        // Could not reach the server with the placeholder credentials; the
        // migration step will fail loudly if it is truly unreachable.
        eprintln!(
            "{} could not check for an existing database (mysql exited with code {})",
            "Warning:".yellow(),
            output.code
        );
        return Ok(());
    }

    if !output.stdout.trim().is_empty() {
        return Err(InstallError::DatabaseExists(slug.to_string()).into());
    }

    Ok(())
}

/// The external database replaces the template's sqlite file; a missing
/// artifact is fine.
fn remove_sqlite_artifact(project_root: &Path) -> Result<()> {
    let path = project_root.join(SQLITE_ARTIFACT);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("Failed to remove {}", path.display())),
    }
}
