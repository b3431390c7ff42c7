use std::path::Path;
use std::path::PathBuf;

use super::ConfigurationError;
use crate::environment::Environment;

pub const CONFIG_FILE_NAMES: [&str; 2] = ["presave-format.json", "presave-format.jsonc"];

/// Where the configuration file should be loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLocation {
  /// Path provided by the user, ex. `--config`.
  pub explicit_path: Option<PathBuf>,
}

/// Resolves the configuration file for a document.
///
/// An explicit path always wins. Otherwise the document's directory and its
/// ancestors are searched, then the current working directory and its ancestors.
pub fn resolve_config_path(location: &ConfigLocation, document_path: Option<&Path>, environment: &impl Environment) -> Result<PathBuf, ConfigurationError> {
  if let Some(explicit_path) = &location.explicit_path {
    return Ok(if explicit_path.is_absolute() {
      explicit_path.clone()
    } else {
      environment.cwd().join(explicit_path)
    });
  }

  let cwd = environment.cwd();
  let document_dir = document_path.and_then(|p| p.parent());
  for start_dir in document_dir.into_iter().chain(std::iter::once(cwd.as_path())) {
    if let Some(config_path) = find_config_file_in_ancestors(start_dir, environment) {
      log_verbose!(environment, "Resolved configuration file: {}", config_path.display());
      return Ok(config_path);
    }
  }

  Err(ConfigurationError::NotFound {
    search_dir: document_dir.map(|p| p.to_path_buf()).unwrap_or(cwd),
  })
}

fn find_config_file_in_ancestors(start_dir: &Path, environment: &impl Environment) -> Option<PathBuf> {
  for dir in start_dir.ancestors() {
    for file_name in CONFIG_FILE_NAMES {
      let file_path = dir.join(file_name);
      if environment.path_exists(&file_path) {
        return Some(file_path);
      }
    }
  }
  None
}
