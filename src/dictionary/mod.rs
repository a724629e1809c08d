//! The dictionary that templates are rendered against
//!
//! The dictionary is built once per run from an optional config file and
//! any number of environment variables, then handed to the engine read-only.

use crate::error::StemplateError;
use error_stack::{Report, Result};
use std::path::PathBuf;

mod config_file;
pub use config_file::{load_config_file, ConfigFormat};
mod env;
pub use env::EnvKind;

/// Mapping from string keys to values
pub type Dictionary = serde_json::Map<String, serde_json::Value>;

/// Where the dictionary comes from
///
/// The config file is read first. Environment variables are applied on top of it,
/// strings first, then lists, then maps, so later sources override earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictionarySource {
    /// Base directory for a relative config file path. Empty means the current directory
    pub base_dir: PathBuf,
    /// Config file in JSON, TOML, YAML, dotenv or properties format
    pub file: Option<PathBuf>,
    /// Environment variables imported as strings
    pub strings: Vec<String>,
    /// Environment variables imported as comma separated lists
    pub lists: Vec<String>,
    /// Environment variables imported as comma separated `key=value` maps
    pub maps: Vec<String>,
}

impl DictionarySource {
    /// If no source is configured at all. Empty names and an empty path do not count
    pub fn is_empty(&self) -> bool {
        let no_names = |names: &[String]| names.iter().all(|n| n.is_empty());
        self.config_path().is_none()
            && no_names(&self.strings)
            && no_names(&self.lists)
            && no_names(&self.maps)
    }

    /// The config file resolved against the base directory
    pub fn config_path(&self) -> Option<PathBuf> {
        self.file
            .as_ref()
            .filter(|f| !f.as_os_str().is_empty())
            .map(|f| self.base_dir.join(f))
    }

    /// Check that there is at least one source and the config file exists
    pub fn validate(&self) -> Result<(), StemplateError> {
        if self.is_empty() {
            return Err(Report::new(StemplateError::Validation).attach_printable(
                "at least one of --file, --string, --list or --map is required",
            ));
        }
        if let Some(file) = self.config_path() {
            if !file.exists() {
                return Err(Report::new(StemplateError::Validation)
                    .attach_printable(format!("config file `{}` does not exist", file.display())));
            }
        }
        Ok(())
    }

    /// Load the dictionary from the config file and the process environment
    pub fn load(&self) -> Result<Dictionary, StemplateError> {
        self.load_with(|name| std::env::var(name).ok())
    }

    /// Load the dictionary, resolving environment variables with `lookup`
    pub fn load_with<F>(&self, lookup: F) -> Result<Dictionary, StemplateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut dictionary = match self.config_path() {
            Some(file) => load_config_file(&file)?,
            None => Dictionary::new(),
        };
        env::import(&mut dictionary, &self.strings, EnvKind::String, &lookup)?;
        env::import(&mut dictionary, &self.lists, EnvKind::List, &lookup)?;
        env::import(&mut dictionary, &self.maps, EnvKind::Map, &lookup)?;
        log::debug!("dictionary has {} key(s)", dictionary.len());
        Ok(dictionary)
    }
}
