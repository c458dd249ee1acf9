//! Declarative registry of installable Filament plugins
//!
//! Each entry maps a plugin id to an ordered list of install steps. Adding
//! or removing a plugin means editing this table, not the installer. Every
//! registration patch keeps the `->plugins([` anchor in its replacement so
//! later plugins can still find it.

use crate::patch::PatchOperation;
use std::path::PathBuf;

/// Sentinel multiselect choice that short-circuits plugin installation.
pub const NONE_CHOICE: &str = "none";

/// Panel configuration file generated by `filament:install --panels`.
pub const PANEL_PROVIDER: &str = "app/Providers/Filament/AdminPanelProvider.php";

/// Anchor every registration patch hangs off.
pub const PLUGINS_ANCHOR: &str = "->plugins([";

/// Tail of the default panel builder chain; used to insert an empty
/// `->plugins([])` block when the generator did not emit one.
const AUTH_MIDDLEWARE_TAIL: &str = "->authMiddleware([\n                Authenticate::class,\n            ])";

/// One install step. Steps execute strictly in declared order.
#[derive(Debug, Clone)]
pub enum InstallStep {
    /// Invoke an external command (best-effort; a failure does not abort
    /// the plugin's remaining steps).
    RunCommand { command: String },
    /// Rewrite a generated file by literal substitution.
    PatchFile(PatchOperation),
}

/// A plugin the user can pick from the multiselect.
#[derive(Debug)]
pub struct PluginDefinition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub steps: Vec<InstallStep>,
}

fn require(package: &str) -> InstallStep {
    InstallStep::RunCommand {
        command: format!("composer require {package}"),
    }
}

fn artisan(args: &str) -> InstallStep {
    InstallStep::RunCommand {
        command: format!("php artisan {args}"),
    }
}

/// Register a panel plugin class inside the `->plugins([...])` block.
fn register(class: &str) -> InstallStep {
    InstallStep::PatchFile(PatchOperation {
        target: PathBuf::from(PANEL_PROVIDER),
        search: PLUGINS_ANCHOR.to_string(),
        replacement: format!("{PLUGINS_ANCHOR}\n                {class}::make(),"),
    })
}

/// Patch that seeds an empty plugins block right before the end of the
/// default panel builder chain.
pub fn plugins_anchor_patch() -> PatchOperation {
    PatchOperation {
        target: PathBuf::from(PANEL_PROVIDER),
        search: AUTH_MIDDLEWARE_TAIL.to_string(),
        replacement: format!(
            "{AUTH_MIDDLEWARE_TAIL}\n            ->plugins([\n            ])"
        ),
    }
}

/// The fixed plugin table, in installation order.
pub fn catalog() -> Vec<PluginDefinition> {
    vec![
        PluginDefinition {
            id: "shield",
            display_name: "Filament Shield (roles & permissions)",
            steps: vec![
                require("bezhansalleh/filament-shield"),
                artisan("vendor:publish --tag=filament-shield-config"),
                register("\\BezhanSalleh\\FilamentShield\\FilamentShieldPlugin"),
            ],
        },
        PluginDefinition {
            id: "breezy",
            display_name: "Filament Breezy (profile & 2FA)",
            steps: vec![
                require("jeffgreco13/filament-breezy"),
                register("\\Jeffgreco13\\FilamentBreezy\\BreezyCore"),
            ],
        },
        PluginDefinition {
            id: "spotlight",
            display_name: "Filament Spotlight (command palette)",
            steps: vec![
                require("pxlrbt/filament-spotlight"),
                register("\\pxlrbt\\FilamentSpotlight\\SpotlightPlugin"),
            ],
        },
        PluginDefinition {
            id: "curator",
            display_name: "Curator (media picker)",
            steps: vec![
                require("awcodes/filament-curator"),
                artisan("vendor:publish --tag=curator-migrations"),
                artisan("migrate --force"),
                register("\\Awcodes\\Curator\\CuratorPlugin"),
            ],
        },
        PluginDefinition {
            id: "media-library",
            display_name: "Spatie Media Library integration",
            steps: vec![
                require("filament/spatie-laravel-media-library-plugin"),
                artisan(
                    "vendor:publish --provider=\"Spatie\\MediaLibrary\\MediaLibraryServiceProvider\" --tag=medialibrary-migrations",
                ),
                artisan("migrate --force"),
            ],
        },
        PluginDefinition {
            id: "backgrounds",
            display_name: "Filament Backgrounds (login images)",
            steps: vec![
                require("swisnl/filament-backgrounds"),
                artisan("vendor:publish --tag=filament-backgrounds-images"),
                register("\\Swis\\Filament\\Backgrounds\\FilamentBackgroundsPlugin"),
            ],
        },
    ]
}
