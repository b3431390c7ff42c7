use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

use super::DeserializeConfigError;
use super::PreSaveConfig;
use super::deserialize_config;
use crate::environment::Environment;

#[derive(Debug, Error)]
pub enum ConfigurationError {
  #[error("Could not find a presave-format.json or presave-format.jsonc file in {} or any of its ancestor directories.", search_dir.display())]
  NotFound { search_dir: PathBuf },
  #[error("Could not read configuration file {}. {message}", file_path.display())]
  Read { file_path: PathBuf, message: String },
  #[error("Invalid configuration file {}. {error}", file_path.display())]
  Deserialize { file_path: PathBuf, error: DeserializeConfigError },
}

/// Loads the configuration file from storage.
///
/// This is called on every save so that edits to the file are picked up
/// without restarting. Nothing is cached.
pub fn load_config(file_path: &Path, environment: &impl Environment) -> Result<PreSaveConfig, ConfigurationError> {
  let file_text = environment.read_file(file_path).map_err(|err| ConfigurationError::Read {
    file_path: file_path.to_path_buf(),
    message: format!("{:#}", err),
  })?;
  deserialize_config(&file_text).map_err(|error| ConfigurationError::Deserialize {
    file_path: file_path.to_path_buf(),
    error,
  })
}
