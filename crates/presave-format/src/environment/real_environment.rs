use anyhow::Context;
use anyhow::Result;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use super::Environment;
use crate::utils::Logger;
use crate::utils::LoggerOptions;

pub struct RealEnvironmentOptions {
  pub is_verbose: bool,
  /// Whether stdout will be read by a program.
  pub is_stdout_machine_readable: bool,
}

#[derive(Clone)]
pub struct RealEnvironment {
  logger: Logger,
}

impl RealEnvironment {
  pub fn new(options: &RealEnvironmentOptions) -> RealEnvironment {
    let logger = Logger::new(&LoggerOptions {
      initial_context_name: "presave-format".to_string(),
      is_stdout_machine_readable: options.is_stdout_machine_readable,
      is_verbose: options.is_verbose,
    });
    RealEnvironment { logger }
  }
}

impl Environment for RealEnvironment {
  fn read_file(&self, file_path: impl AsRef<Path>) -> Result<String> {
    let file_path = file_path.as_ref();
    log_verbose!(self, "Reading file: {}", file_path.display());
    fs::read_to_string(file_path).with_context(|| format!("Error reading file {}", file_path.display()))
  }

  fn write_file(&self, file_path: impl AsRef<Path>, file_text: &str) -> Result<()> {
    let file_path = file_path.as_ref();
    log_verbose!(self, "Writing file: {}", file_path.display());
    fs::write(file_path, file_text).with_context(|| format!("Error writing file {}", file_path.display()))
  }

  fn path_exists(&self, file_path: impl AsRef<Path>) -> bool {
    file_path.as_ref().exists()
  }

  fn canonicalize(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    // use dunce to avoid UNC paths on Windows, which formatters often don't understand
    dunce::canonicalize(path).with_context(|| format!("Error canonicalizing path {}", path.display()))
  }

  fn cwd(&self) -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
  }

  fn log(&self, text: &str) {
    self.logger.log(text, "presave-format");
  }

  fn log_machine_readable(&self, text: &str) {
    self.logger.log_machine_readable(text);
  }

  fn log_stderr_with_context(&self, text: &str, context_name: &str) {
    self.logger.log_stderr_with_context(text, context_name);
  }

  fn show_status(&self, text: &str) {
    self.logger.log_stderr(text);
  }

  fn show_error_dialog(&self, text: &str) {
    self.logger.log_stderr(&format!("error: {}", text));
  }

  #[inline]
  fn is_verbose(&self) -> bool {
    self.logger.is_verbose()
  }
}
