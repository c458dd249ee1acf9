//! Filakit CLI - install Laravel and Filament with optional plugins

use anyhow::Result;
use clap::{Parser, ValueEnum};
use filakit_core::tui::InstallArgs;
use filakit_core::FrameworkVersion;

#[derive(Parser, Debug)]
#[command(name = "filakit")]
#[command(about = "Install Laravel and Filament, with optional plugins")]
#[command(version)]
pub struct Args {
    /// Application name (prompted for when omitted)
    pub name: Option<String>,

    /// Create a Filament admin user after installation
    #[arg(long = "create-user")]
    pub create_user: bool,

    /// Path segment for the Filament admin panel
    #[arg(long = "filament-url", default_value = "admin")]
    pub filament_url: String,

    /// Laravel template generation to install
    #[arg(long = "laravel-version", value_enum, default_value_t = LaravelVersion::Current)]
    pub laravel_version: LaravelVersion,

    /// Use an external MySQL server instead of the bundled sqlite database
    #[arg(long)]
    pub mysql: bool,

    /// Start the integrated dev server once installation finishes
    #[arg(long)]
    pub serve: bool,
}

// `previous --mysql` is rejected by the installer itself (exit code 1)
// rather than by a clap conflict, so the error can explain why.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LaravelVersion {
    Current,
    Previous,
}

impl From<LaravelVersion> for FrameworkVersion {
    fn from(version: LaravelVersion) -> Self {
        match version {
            LaravelVersion::Current => FrameworkVersion::Current,
            LaravelVersion::Previous => FrameworkVersion::Previous,
        }
    }
}

impl From<Args> for InstallArgs {
    fn from(args: Args) -> Self {
        InstallArgs {
            name: args.name,
            create_user: args.create_user,
            filament_url: args.filament_url,
            laravel_version: args.laravel_version.into(),
            mysql: args.mysql,
            serve: args.serve,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let result = filakit_core::run(args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
