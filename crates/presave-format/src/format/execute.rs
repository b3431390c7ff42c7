use thiserror::Error;

use super::RunCommandError;
use super::SkipReason;
use super::build_command_args;
use super::clean_stderr;
use super::get_skip_reason;
use super::run_command_with_stdin;
use crate::configuration::FormatStep;
use crate::environment::Environment;

#[derive(Debug)]
pub enum ExecutionResult {
  /// The step didn't apply. The text passes through unchanged.
  Skip(SkipReason),
  Replacement(String),
  Failure(FormatStepError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  ProcessSpawn,
  ProcessFailed,
  EmptyOutput,
  InvalidOutputEncoding,
}

#[derive(Debug, Error)]
pub enum FormatStepError {
  #[error("Could not start '{command}'. Make sure it's installed and can be found on the PATH. {source}")]
  ProcessSpawn {
    command: String,
    #[source]
    source: std::io::Error,
  },
  #[error("'{command}' failed{}.", describe_exit_code(.exit_code))]
  ProcessFailed {
    command: String,
    exit_code: Option<i32>,
    /// Stderr without color codes and surrounding whitespace.
    stderr: String,
  },
  #[error("'{command}' produced no output despite exiting successfully.")]
  EmptyOutput { command: String },
  #[error("'{command}' produced output that was not valid UTF-8.")]
  InvalidOutputEncoding { command: String },
}

fn describe_exit_code(exit_code: &Option<i32>) -> String {
  match exit_code {
    Some(code) => format!(" with exit code {}", code),
    None => String::new(),
  }
}

impl FormatStepError {
  pub fn kind(&self) -> FailureKind {
    match self {
      FormatStepError::ProcessSpawn { .. } => FailureKind::ProcessSpawn,
      FormatStepError::ProcessFailed { .. } => FailureKind::ProcessFailed,
      FormatStepError::EmptyOutput { .. } => FailureKind::EmptyOutput,
      FormatStepError::InvalidOutputEncoding { .. } => FailureKind::InvalidOutputEncoding,
    }
  }

  /// The program that was run.
  pub fn command(&self) -> &str {
    match self {
      FormatStepError::ProcessSpawn { command, .. }
      | FormatStepError::ProcessFailed { command, .. }
      | FormatStepError::EmptyOutput { command }
      | FormatStepError::InvalidOutputEncoding { command } => command,
    }
  }

  pub fn stderr(&self) -> Option<&str> {
    match self {
      FormatStepError::ProcessFailed { stderr, .. } if !stderr.is_empty() => Some(stderr),
      _ => None,
    }
  }
}

/// Runs a single step on the text if its filters allow it.
pub fn execute_step(step: &FormatStep, file_path: Option<&str>, file_text: &str, environment: &impl Environment) -> ExecutionResult {
  if let Some(reason) = get_skip_reason(step, file_path) {
    return ExecutionResult::Skip(reason);
  }
  // a step can only apply to a document with a path
  let file_path = file_path.unwrap_or_default();
  let command_name = step.program_name().to_string();
  let args = build_command_args(step, file_path);

  log_verbose!(environment, "Running {:?} fed with content of {}", args, file_path);
  let output = match run_command_with_stdin(&args, file_text.as_bytes().to_vec()) {
    Ok(output) => output,
    Err(RunCommandError::Spawn(source)) => {
      return ExecutionResult::Failure(FormatStepError::ProcessSpawn { command: command_name, source });
    }
    Err(RunCommandError::Communicate(err)) => {
      return ExecutionResult::Failure(FormatStepError::ProcessFailed {
        command: command_name,
        exit_code: None,
        stderr: format!("Error communicating with the process. {}", err),
      });
    }
  };

  let stderr = clean_stderr(&String::from_utf8_lossy(&output.stderr));
  if !output.status.success() {
    return ExecutionResult::Failure(FormatStepError::ProcessFailed {
      command: command_name,
      exit_code: output.status.code(),
      stderr,
    });
  }
  if !stderr.is_empty() {
    log_verbose!(environment, "'{}' exited successfully with stderr: {}", command_name, stderr);
  }

  let Ok(stdout) = String::from_utf8(output.stdout) else {
    return ExecutionResult::Failure(FormatStepError::InvalidOutputEncoding { command: command_name });
  };
  // an empty result from non-empty text means the formatter misbehaved, never truncate the document
  if stdout.is_empty() && !file_text.is_empty() {
    return ExecutionResult::Failure(FormatStepError::EmptyOutput { command: command_name });
  }

  ExecutionResult::Replacement(stdout)
}
