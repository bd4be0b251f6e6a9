use std::path::{Path, PathBuf};

#[cfg(target_family = "unix")]
pub fn get_config_folder() -> PathBuf {
    let config_home = std::env::var("XDG_CONFIG_HOME");
    let home = std::env::var("HOME");
    match (config_home, home) {
        (Ok(p), _) => Path::new(&p).join("smite"),
        (Err(_), Ok(home)) => Path::new(&home).join(".config").join("smite"),
        _ => Path::new("").to_path_buf(),
    }
}

#[cfg(windows)]
pub fn get_config_folder() -> PathBuf {
    let config_home = std::env::var("APPDATA");
    match config_home {
        Ok(p) => Path::new(&p).join("smite"),
        Err(_) => Path::new("").to_path_buf(),
    }
}

pub fn get_config_file() -> PathBuf {
    get_config_folder().join("config.toml")
}
