//! Locating and parsing YAML configuration files.
//!
//! Three layers exist, each with a fixed precedence: the user file in the
//! data directory, the shared project file, and the private project file
//! next to it. Project files are found by walking up from the working
//! directory to the nearest ancestor holding either of them.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project configuration file name.
pub const PROJECT_FILE: &str = "pathreg.yaml";
/// Private (uncommitted) project configuration file name.
pub const LOCAL_FILE: &str = "pathreg.local.yaml";
/// User configuration file name inside the data directory.
pub const USER_FILE: &str = "config.yaml";

const USER_PRECEDENCE: u8 = 1;
const PROJECT_LAYERS: [(&str, u8); 2] = [(PROJECT_FILE, 2), (LOCAL_FILE, 3)];

/// One parsed file and where it sits in the merge order.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// File the settings came from.
    pub path: PathBuf,
    /// Merge rank; a larger value overrides a smaller one.
    pub precedence: u8,
    /// The file's contents.
    pub config: Config,
}

impl ConfigSource {
    fn read(path: PathBuf, precedence: u8) -> Result<Self> {
        let config = ConfigLoader::load_file(&path)?;
        Ok(Self {
            path,
            precedence,
            config,
        })
    }
}

/// `~/.pathreg`, where the user file lives unless a data dir is given.
///
/// # Errors
///
/// [`Error::Validation`] when no home directory is known.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "data_dir".into(),
        message: "cannot determine home directory".into(),
    })?;
    Ok(home.join(".pathreg"))
}

/// Finds and reads configuration files.
///
/// ```no_run
/// use pathreg::config::ConfigLoader;
/// use std::path::Path;
///
/// for source in ConfigLoader::load_all(Path::new("."), None)? {
///     println!("{} (rank {})", source.path.display(), source.precedence);
/// }
/// # Ok::<(), pathreg::Error>(())
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Every existing layer, ordered from lowest to highest precedence.
    ///
    /// The user file is read from `data_dir` when given, otherwise from
    /// [`default_data_dir`].
    ///
    /// # Errors
    ///
    /// Propagates read and parse failures of any file that exists.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let user_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_data_dir()?,
        };
        let user_file = user_dir.join(USER_FILE);

        let mut layers = Vec::with_capacity(3);
        if user_file.is_file() {
            layers.push(ConfigSource::read(user_file, USER_PRECEDENCE)?);
        }
        layers.append(&mut Self::discover_project_configs(working_dir)?);
        layers.sort_by_key(|layer| layer.precedence);
        Ok(layers)
    }

    /// The project layers of the nearest ancestor of `start_dir` (itself
    /// included) that holds [`PROJECT_FILE`] or [`LOCAL_FILE`].
    ///
    /// Returns an empty list when no ancestor has either file.
    ///
    /// # Errors
    ///
    /// Propagates read and parse failures of the files found.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let Some(dir) = start_dir.ancestors().find(|dir| {
            PROJECT_LAYERS
                .iter()
                .any(|(file, _)| dir.join(file).is_file())
        }) else {
            return Ok(Vec::new());
        };

        PROJECT_LAYERS
            .iter()
            .map(|&(file, precedence)| (dir.join(file), precedence))
            .filter(|(path, _)| path.is_file())
            .map(|(path, precedence)| ConfigSource::read(path, precedence))
            .collect()
    }

    /// Reads one file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if it cannot be read, [`Error::Configuration`] naming
    /// the file if it is not a valid configuration document.
    pub fn load_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)?;
        serde_yaml::from_str(&text).map_err(|source| Error::Configuration {
            path: path.to_path_buf(),
            source,
        })
    }
}
