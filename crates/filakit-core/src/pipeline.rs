//! The installation pipeline
//!
//! Strictly linear sequencing of the delegated steps:
//! name resolution -> project generation -> database provisioning ->
//! Filament install -> plugin installation -> optional user creation ->
//! optional dev server. Optional stages are skipped when their option is
//! unset; the order never changes and nothing is rolled back on failure.

use crate::database::{self, DatabaseMode};
use crate::error::InstallError;
use crate::exec::{self, CommandRunner};
use crate::naming;
use crate::patch::{self, PatchOperation};
use crate::plugins::{self, PluginSelection, PANEL_PROVIDER};
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Which Laravel template generation to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameworkVersion {
    /// Latest `laravel/laravel` template; database mode follows the
    /// explicit option.
    #[default]
    Current,
    /// Pinned older template. Ships with a hard-wired MySQL connection,
    /// so external-database mode is forced and `--mysql` is rejected.
    Previous,
}

/// Immutable configuration resolved from CLI input before the pipeline
/// runs. Owned by the entry point and passed in read-only.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub raw_name: String,
    pub create_user: bool,
    pub filament_url: String,
    pub framework_version: FrameworkVersion,
    pub use_external_db: bool,
    pub auto_serve: bool,
    pub selected_plugins: PluginSelection,
}

/// Default panel path segment emitted by `filament:install --panels`.
const DEFAULT_PANEL_PATH: &str = "admin";

/// Reject incompatible option combinations before any prompt or external
/// command runs.
pub fn validate(version: FrameworkVersion, use_external_db: bool) -> Result<(), InstallError> {
    if matches!(version, FrameworkVersion::Previous) && use_external_db {
        return Err(InstallError::IncompatibleOptions);
    }
    Ok(())
}

/// Run the full installation in `parent_dir`. The generated project lives
/// at `parent_dir/<slug>`; that root is threaded explicitly into every
/// stage that touches files, the working directory is never changed.
pub async fn run<R: CommandRunner>(
    runner: &mut R,
    parent_dir: &Path,
    options: &InstallOptions,
) -> Result<()> {
    validate(options.framework_version, options.use_external_db)?;

    let identity = naming::resolve(&options.raw_name, parent_dir)?;
    let mode = DatabaseMode::select(options.use_external_db, options.framework_version);

    // Stage: project generation. A failed generator leaves nothing worth
    // continuing into, so this is fail-fast.
    println!(
        "{}",
        format!("Creating Laravel project '{}'...", identity.display_name)
            .cyan()
            .bold()
    );
    let generate = match options.framework_version {
        FrameworkVersion::Current => {
            format!("composer create-project laravel/laravel {}", identity.slug)
        }
        FrameworkVersion::Previous => format!(
            "composer create-project laravel/laravel:^10.0 {}",
            identity.slug
        ),
    };
    exec::run_fatal(runner, parent_dir, &generate).await?;

    let project_root = parent_dir.join(&identity.slug);

    // The display name is already quoted when it needs to be.
    patch::patch_file(
        &project_root.join(".env"),
        "APP_NAME=Laravel",
        &format!("APP_NAME={}", identity.display_name),
    )?;

    database::provision(
        runner,
        &project_root,
        &identity,
        mode,
        options.framework_version,
    )
    .await?;

    // Stage: Filament panel install.
    println!("{}", "Installing Filament...".cyan().bold());
    exec::run_fatal(
        runner,
        &project_root,
        "composer require filament/filament:^3.2 -W",
    )
    .await?;
    exec::run_fatal(
        runner,
        &project_root,
        "php artisan filament:install --panels --no-interaction",
    )
    .await?;

    if options.filament_url != DEFAULT_PANEL_PATH {
        patch::apply(&project_root, &panel_path_patch(&options.filament_url))?;
    }

    plugins::install(runner, &project_root, &options.selected_plugins).await?;

    if options.create_user {
        println!("{}", "Creating a Filament user...".cyan().bold());
        // The delegate prompts on inherited stdio; a non-zero exit (e.g.
        // the user backing out) is not fatal this late in the run.
        let code = runner
            .stream(&project_root, "php artisan make:filament-user")
            .await?;
        if code != 0 {
            eprintln!(
                "{} user creation exited with code {}",
                "Warning:".yellow(),
                code
            );
        }
    }

    if options.auto_serve {
        println!("{}", "Starting the integrated server...".cyan().bold());
        runner.stream(&project_root, "php artisan serve").await?;
    }

    Ok(())
}

fn panel_path_patch(segment: &str) -> PatchOperation {
    PatchOperation {
        target: PathBuf::from(PANEL_PROVIDER),
        search: format!("->path('{DEFAULT_PANEL_PATH}')"),
        replacement: format!("->path('{segment}')"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::RecordingRunner;
    use std::fs;

    fn options(name: &str) -> InstallOptions {
        InstallOptions {
            raw_name: name.to_string(),
            create_user: false,
            filament_url: DEFAULT_PANEL_PATH.to_string(),
            framework_version: FrameworkVersion::Current,
            use_external_db: false,
            auto_serve: false,
            selected_plugins: PluginSelection::None,
        }
    }

    #[test]
    fn test_previous_version_with_mysql_is_rejected() {
        let err = validate(FrameworkVersion::Previous, true).unwrap_err();
        assert!(matches!(err, InstallError::IncompatibleOptions));
        validate(FrameworkVersion::Previous, false).unwrap();
        validate(FrameworkVersion::Current, true).unwrap();
    }

    // Scenario: name "Acme Shop", no flags. Sqlite mode, current version,
    // no plugins, no user, no serve.
    #[tokio::test]
    async fn test_default_run_generates_and_installs_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = RecordingRunner::new();

        run(&mut runner, dir.path(), &options("Acme Shop")).await.unwrap();

        assert_eq!(
            runner.commands,
            vec![
                "composer create-project laravel/laravel acmeshop",
                "composer require filament/filament:^3.2 -W",
                "php artisan filament:install --panels --no-interaction",
            ]
        );

        let env = fs::read_to_string(dir.path().join("acmeshop/.env")).unwrap();
        assert!(env.contains("APP_NAME=\"Acme Shop\""));
    }

    // Scenario: name "demo", --mysql --create-user. External mode, env
    // rewritten, migrations run, sqlite artifact removal attempted, user
    // creation invoked after the Filament install.
    #[tokio::test]
    async fn test_mysql_run_provisions_then_creates_user() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options("demo");
        opts.use_external_db = true;
        opts.create_user = true;

        let mut runner = RecordingRunner::new();
        run(&mut runner, dir.path(), &opts).await.unwrap();

        assert_eq!(runner.commands[0], "composer create-project laravel/laravel demo");
        assert!(runner.commands[1].contains("SHOW DATABASES LIKE 'demo'"));
        assert_eq!(runner.commands[2], "php artisan config:cache");
        assert_eq!(runner.commands[3], "php artisan migrate --force");
        assert_eq!(runner.commands[4], "composer require filament/filament:^3.2 -W");
        assert_eq!(
            runner.commands[5],
            "php artisan filament:install --panels --no-interaction"
        );
        assert_eq!(runner.commands[6], "php artisan make:filament-user");
        assert_eq!(runner.commands.len(), 7);

        let env = fs::read_to_string(dir.path().join("demo/.env")).unwrap();
        assert!(env.contains("APP_NAME=demo"));
    }

    // Scenario: incompatible flags fail before any command runs.
    #[tokio::test]
    async fn test_incompatible_flags_fail_before_any_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options("x");
        opts.framework_version = FrameworkVersion::Previous;
        opts.use_external_db = true;

        let mut runner = RecordingRunner::new();
        let err = run(&mut runner, dir.path(), &opts).await.unwrap_err();

        let err = err.downcast::<InstallError>().unwrap();
        assert!(matches!(err, InstallError::IncompatibleOptions));
        assert!(runner.commands.is_empty());
    }

    #[tokio::test]
    async fn test_existing_directory_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("demo")).unwrap();

        let mut runner = RecordingRunner::new();
        let err = run(&mut runner, dir.path(), &options("demo")).await.unwrap_err();

        let err = err.downcast::<InstallError>().unwrap();
        assert!(matches!(err, InstallError::DirectoryExists(_)));
        assert!(runner.commands.is_empty());
    }

    #[tokio::test]
    async fn test_failed_generation_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = RecordingRunner::new();
        runner.exit_code = 1;

        let err = run(&mut runner, dir.path(), &options("demo")).await.unwrap_err();

        let err = err.downcast::<InstallError>().unwrap();
        assert!(matches!(err, InstallError::CommandFailed { .. }));
        assert_eq!(runner.commands.len(), 1);
    }

    #[tokio::test]
    async fn test_previous_version_pins_template_and_forces_mysql() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options("legacy");
        opts.framework_version = FrameworkVersion::Previous;

        let mut runner = RecordingRunner::new();
        run(&mut runner, dir.path(), &opts).await.unwrap();

        assert_eq!(
            runner.commands[0],
            "composer create-project laravel/laravel:^10.0 legacy"
        );
        // External mode is forced: the existence probe and migration ran.
        assert!(runner.commands.iter().any(|c| c.contains("SHOW DATABASES")));
        assert!(runner.commands.iter().any(|c| c == "php artisan migrate --force"));
    }

    #[tokio::test]
    async fn test_custom_panel_path_is_patched() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options("demo");
        opts.filament_url = "backoffice".to_string();

        let mut runner = RecordingRunner::new();
        run(&mut runner, dir.path(), &opts).await.unwrap();

        // No real generator ran, so the patch initialized the provider
        // file with its replacement text.
        let provider = dir.path().join("demo").join(PANEL_PROVIDER);
        let content = fs::read_to_string(&provider).unwrap();
        assert!(content.contains("->path('backoffice')"));
        assert!(!content.contains("->path('admin')"));
    }

    #[tokio::test]
    async fn test_serve_runs_last() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options("demo");
        opts.auto_serve = true;

        let mut runner = RecordingRunner::new();
        run(&mut runner, dir.path(), &opts).await.unwrap();

        assert_eq!(runner.commands.last().unwrap(), "php artisan serve");
    }
}
