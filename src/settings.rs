use crate::config::get_config_file;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub debug: bool,
    pub legendary: LegendarySettings,
    pub refresh: RefreshSettings,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct LegendarySettings {
    /// Path or name of the legendary executable; PATH lookup of
    /// `legendary` when unset.
    pub executable: Option<String>,
    /// Config directory handed to the tool via `LEGENDARY_CONFIG_PATH`.
    pub config_path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RefreshSettings {
    /// How often a failed library refresh is attempted before giving
    /// up. Clamped to at least one attempt.
    pub attempts: u32,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        RefreshSettings { attempts: 1 }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let default_str = include_str!("defaultconfig.toml");
        let config_file = get_config_file();
        let config_file = config_file.to_string_lossy();

        let config = Config::builder()
            // Start off with the built-in defaults
            .add_source(File::from_str(default_str, config::FileFormat::Toml))
            // Merge the user's configuration file if there is one
            .add_source(File::with_name(config_file.as_ref()).required(false))
            // Settings from the environment (with a prefix of SMITE)
            // Eg.. `SMITE-DEBUG=1 ./target/app` would set the `debug` key
            .add_source(Environment::with_prefix("smite").separator("-"))
            .build()?;
        config.try_deserialize::<Settings>()
    }

    pub fn to_toml_string(&self) -> String {
        toml::to_string(self).unwrap_or_default()
    }
}
