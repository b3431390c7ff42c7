use anyhow::Result;
use std::path::Path;
use std::path::PathBuf;

pub trait Environment: Clone + Send + Sync + 'static {
  fn read_file(&self, file_path: impl AsRef<Path>) -> Result<String>;
  /// Replaces the file's contents in a single write.
  fn write_file(&self, file_path: impl AsRef<Path>, file_text: &str) -> Result<()>;
  fn path_exists(&self, file_path: impl AsRef<Path>) -> bool;
  fn canonicalize(&self, path: impl AsRef<Path>) -> Result<PathBuf>;
  fn cwd(&self) -> PathBuf;
  fn log(&self, text: &str);
  /// Writes text to stdout as-is. Used when stdout is read by another program.
  fn log_machine_readable(&self, text: &str);
  fn log_stderr(&self, text: &str) {
    self.log_stderr_with_context(text, "presave-format");
  }
  /// Logs an error to the console providing the context name.
  /// This will cause the logger to output the context name when appropriate.
  /// Ex. Will log the name of the formatter command that failed.
  fn log_stderr_with_context(&self, text: &str, context_name: &str);
  /// Short, non-modal notice for the user. Never blocks.
  fn show_status(&self, text: &str);
  /// Blocking error report. Used for configuration problems.
  fn show_error_dialog(&self, text: &str);
  fn is_verbose(&self) -> bool;
}

// use a macro here so the expression provided is only evaluated when in verbose mode
macro_rules! log_verbose {
    ($environment:expr, $($arg:tt)*) => {
        if $environment.is_verbose() {
            let mut text = String::from("[VERBOSE]: ");
            text.push_str(&format!($($arg)*));
            $environment.log_stderr(&text);
        }
    }
}
