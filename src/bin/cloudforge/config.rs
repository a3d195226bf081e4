use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use cloudforge::config::{read_config, Config};
use cloudforge::logger::log_location;

use crate::CFG_FILE_NAME;

/// First existing config among the executable dir, the current dir and the
/// user config dir.
fn find_config_path(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

fn candidate_dirs() -> Vec<PathBuf> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    [exe_dir, env::current_dir().ok(), dirs::config_dir()]
        .into_iter()
        .flatten()
        .collect()
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path {
        Some(path) => path,
        None => find_config_path(&candidate_dirs())
            .ok_or_else(|| anyhow!("Could not find {} in the executable, current or user config directory", CFG_FILE_NAME))?,
    };

    eprintln!("Reading config from {}", config_path.display());
    let config = read_config(&config_path).with_context(|| format!("Opening {}", config_path.display()))?;

    match config.log {
        Some(ref log) => eprintln!("Log enabled. Files will be written in {}", log_location(log).display()),
        None => eprintln!("Log disabled. Using stdout"),
    }

    Ok(config)
}
