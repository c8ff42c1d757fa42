//! Locating and reading `config.toml`.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use treehopper::{TreehopperError, config::AppConfig};

const FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

impl From<ConfigError> for TreehopperError {
    fn from(err: ConfigError) -> Self {
        TreehopperError::Io(io::Error::other(err))
    }
}

/// Places searched when no `--config` is given, most specific first.
fn candidates() -> Vec<PathBuf> {
    let mut paths = vec![Path::new("treehopper").join(FILE_NAME)];
    match ProjectDirs::from("com", "treehopper", "treehopper") {
        Some(dirs) => paths.push(dirs.config_dir().join(FILE_NAME)),
        None => debug!("No platform configuration directory"),
    }
    paths
}

/// Loads the CLI configuration.
///
/// An explicit path must exist. Otherwise the first existing file among
/// `./treehopper/config.toml` and the platform config directory wins, and
/// built-in defaults apply when neither exists.
///
/// # Errors
///
/// Fails when the explicit file is missing. A chosen file that cannot be
/// read, or is not valid TOML for [`AppConfig`], is an error as well.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TreehopperError> {
    let chosen = match explicit_path {
        Some(path) => Some(path.as_ref().to_path_buf()),
        None => candidates().into_iter().find(|path| {
            let found = path.is_file();
            debug!(path = path.display().to_string(), found; "Checked configuration candidate");
            found
        }),
    };

    match chosen {
        Some(path) => {
            info!(path = path.display().to_string(); "Loading configuration");
            Ok(read_config(&path)?)
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_owned()),
        _ => ConfigError::Read {
            path: path.to_owned(),
            source,
        },
    })?;
    Ok(toml::from_str(&text)?)
}
