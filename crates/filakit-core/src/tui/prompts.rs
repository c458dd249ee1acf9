//! Interactive installation flow using cliclack

use crate::exec::ShellRunner;
use crate::pipeline::{self, FrameworkVersion, InstallOptions};
use crate::plugins::{self, PluginSelection, NONE_CHOICE};
use anyhow::{Context, Result};

/// CLI arguments for the install command
#[derive(Debug, Clone)]
pub struct InstallArgs {
    /// Application name; prompted for when absent
    pub name: Option<String>,

    /// Create a Filament admin user after installation
    pub create_user: bool,

    /// Path segment for the Filament panel
    pub filament_url: String,

    /// Which Laravel template generation to install
    pub laravel_version: FrameworkVersion,

    /// Use an external MySQL server instead of the bundled sqlite database
    pub mysql: bool,

    /// Start the integrated dev server once installation finishes
    pub serve: bool,
}

impl Default for InstallArgs {
    fn default() -> Self {
        Self {
            name: None,
            create_user: false,
            filament_url: "admin".to_string(),
            laravel_version: FrameworkVersion::Current,
            mysql: false,
            serve: false,
        }
    }
}

/// Run the installer with interactive prompts
pub async fn run(args: InstallArgs) -> Result<()> {
    cliclack::intro("Filament Installer")?;

    // Incompatible flags abort before any prompt or external command.
    if let Err(err) = pipeline::validate(args.laravel_version, args.mysql) {
        cliclack::log::error(err.to_string())?;
        return Err(err.into());
    }

    let raw_name = match args.name {
        Some(name) => name,
        None => cliclack::input("Application name")
            .validate(|input: &String| {
                if input.is_empty() {
                    Err("Please enter a name")
                } else {
                    Ok(())
                }
            })
            .interact()?,
    };

    let selected_plugins = select_plugins()?;

    let options = InstallOptions {
        raw_name,
        create_user: args.create_user,
        filament_url: args.filament_url,
        framework_version: args.laravel_version,
        use_external_db: args.mysql,
        auto_serve: args.serve,
        selected_plugins,
    };

    let parent_dir = std::env::current_dir().context("Failed to resolve current directory")?;

    pipeline::run(&mut ShellRunner, &parent_dir, &options).await?;

    cliclack::outro("Installation done!")?;

    Ok(())
}

/// Multi-select over the fixed catalog, with a pre-selected "None" sentinel.
fn select_plugins() -> Result<PluginSelection> {
    let mut multi = cliclack::multiselect("Select Filament plugins to install");
    multi = multi.item(NONE_CHOICE, "None", "skip plugin installation");

    for plugin in plugins::catalog() {
        multi = multi.item(plugin.id, plugin.display_name, "");
    }

    let chosen: Vec<&'static str> = multi
        .initial_values(vec![NONE_CHOICE])
        .required(false)
        .interact()?;

    if chosen.is_empty() || chosen.contains(&NONE_CHOICE) {
        Ok(PluginSelection::None)
    } else {
        Ok(PluginSelection::Chosen(chosen))
    }
}
