use anyhow::Result;
use anyhow::bail;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use super::Environment;

#[derive(Clone, Default)]
pub struct TestEnvironment {
  is_verbose: Arc<Mutex<bool>>,
  cwd: Arc<Mutex<Option<PathBuf>>>,
  files: Arc<Mutex<HashMap<PathBuf, String>>>,
  stdout_messages: Arc<Mutex<Vec<String>>>,
  stderr_messages: Arc<Mutex<Vec<String>>>,
  status_messages: Arc<Mutex<Vec<String>>>,
  dialog_messages: Arc<Mutex<Vec<String>>>,
  machine_readable_output: Arc<Mutex<String>>,
  write_count: Arc<Mutex<usize>>,
}

impl TestEnvironment {
  pub fn new() -> TestEnvironment {
    Default::default()
  }

  pub fn set_verbose(&self, value: bool) {
    *self.is_verbose.lock() = value;
  }

  pub fn set_cwd(&self, path: &str) {
    *self.cwd.lock() = Some(PathBuf::from(path));
  }

  pub fn take_stdout_messages(&self) -> Vec<String> {
    std::mem::take(&mut *self.stdout_messages.lock())
  }

  pub fn take_stderr_messages(&self) -> Vec<String> {
    std::mem::take(&mut *self.stderr_messages.lock())
  }

  pub fn take_status_messages(&self) -> Vec<String> {
    std::mem::take(&mut *self.status_messages.lock())
  }

  pub fn take_dialog_messages(&self) -> Vec<String> {
    std::mem::take(&mut *self.dialog_messages.lock())
  }

  pub fn take_machine_readable_output(&self) -> String {
    std::mem::take(&mut *self.machine_readable_output.lock())
  }

  /// Number of times `write_file` was called.
  pub fn write_count(&self) -> usize {
    *self.write_count.lock()
  }

  pub fn add_file(&self, file_path: impl AsRef<Path>, file_text: &str) {
    self.files.lock().insert(file_path.as_ref().to_path_buf(), file_text.to_string());
  }
}

impl Environment for TestEnvironment {
  fn read_file(&self, file_path: impl AsRef<Path>) -> Result<String> {
    let file_path = file_path.as_ref();
    match self.files.lock().get(file_path) {
      Some(text) => Ok(text.clone()),
      None => bail!("Could not find file at path {}", file_path.display()),
    }
  }

  fn write_file(&self, file_path: impl AsRef<Path>, file_text: &str) -> Result<()> {
    *self.write_count.lock() += 1;
    self.add_file(file_path, file_text);
    Ok(())
  }

  fn path_exists(&self, file_path: impl AsRef<Path>) -> bool {
    let file_path = file_path.as_ref();
    let files = self.files.lock();
    files.keys().any(|path| path == file_path || path.starts_with(file_path))
  }

  fn canonicalize(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() { Ok(path.to_path_buf()) } else { Ok(self.cwd().join(path)) }
  }

  fn cwd(&self) -> PathBuf {
    self.cwd.lock().clone().unwrap_or_else(|| PathBuf::from("/"))
  }

  fn log(&self, text: &str) {
    self.stdout_messages.lock().push(text.to_string());
  }

  fn log_machine_readable(&self, text: &str) {
    self.machine_readable_output.lock().push_str(text);
  }

  fn log_stderr_with_context(&self, text: &str, _: &str) {
    self.stderr_messages.lock().push(text.to_string());
  }

  fn show_status(&self, text: &str) {
    self.status_messages.lock().push(text.to_string());
  }

  fn show_error_dialog(&self, text: &str) {
    self.dialog_messages.lock().push(text.to_string());
  }

  fn is_verbose(&self) -> bool {
    *self.is_verbose.lock()
  }
}
