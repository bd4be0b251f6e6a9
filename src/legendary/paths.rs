use std::path::{Path, PathBuf};

use crate::config::get_config_folder;

/// Layout of the files legendary maintains inside its config
/// directory. The default root honors `LEGENDARY_CONFIG_PATH` and
/// otherwise lives under the application config folder; tests point
/// the root at scratch directories instead.
#[derive(Debug, Clone)]
pub struct LegendaryPaths {
    root: PathBuf,
}

impl LegendaryPaths {
    pub fn new() -> Self {
        let root = match std::env::var("LEGENDARY_CONFIG_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => get_config_folder().join("legendary"),
        };
        LegendaryPaths { root }
    }

    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        LegendaryPaths {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Session file, present while a user is logged in.
    pub fn user_json(&self) -> PathBuf {
        self.root.join("user.json")
    }

    /// Name-keyed map of installed games.
    pub fn installed_json(&self) -> PathBuf {
        self.root.join("installed.json")
    }

    /// One catalog document per app, named `<app_name>.json`.
    pub fn metadata_dir(&self) -> PathBuf {
        self.root.join("metadata")
    }
}

impl Default for LegendaryPaths {
    fn default() -> Self {
        LegendaryPaths::new()
    }
}
