//! Everything that talks to, or decodes output of, the legendary CLI.

mod commands;
mod decode;
mod library;
mod models;
mod paths;
mod runner;
#[cfg(test)]
mod testutil;
mod user;

pub use commands::{
    AuthCommandOptions, BaseCommandOptions, ImportCommandOptions, InfoCommandOptions,
    LegendaryCommand, ListCommandOptions,
};
pub use decode::from_json;
pub use library::{GameRecord, Library};
pub use models::*;
pub use paths::LegendaryPaths;
pub use runner::{CommandOutput, LegendaryRunner};
pub use user::{User, UserAccount};

use crate::settings::Settings;

/// Derive the path layout and a matching runner from settings. The
/// runner always pins `LEGENDARY_CONFIG_PATH` to the same root the
/// readers use, so the tool and this library never disagree about
/// where state lives.
pub(crate) fn configured_stack(settings: &Settings) -> (LegendaryPaths, LegendaryRunner) {
    let paths = match settings.legendary.config_path.as_deref() {
        Some(root) => LegendaryPaths::from_root(root),
        None => LegendaryPaths::new(),
    };
    let executable = settings
        .legendary
        .executable
        .clone()
        .unwrap_or_else(|| "legendary".to_string());
    let runner = LegendaryRunner::with_executable(executable).config_path(paths.root());
    (paths, runner)
}
