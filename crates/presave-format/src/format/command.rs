use std::io::ErrorKind;
use std::io::Write;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use thiserror::Error;

use crate::configuration::FormatStep;

#[derive(Debug, Error)]
pub enum RunCommandError {
  #[error("{0}")]
  Spawn(#[source] std::io::Error),
  #[error("{0}")]
  Communicate(#[source] std::io::Error),
}

pub struct CommandOutput {
  pub status: ExitStatus,
  pub stdout: Vec<u8>,
  pub stderr: Vec<u8>,
}

/// Gets the arguments to run for a step, with the program first.
pub fn build_command_args(step: &FormatStep, file_path: &str) -> Vec<String> {
  let mut args = step.command.iter().map(|token| token.as_arg().to_string()).collect::<Vec<_>>();
  if step.append_file_path {
    args.push(file_path.to_string());
  }
  args
}

/// Runs the command feeding it the provided bytes on stdin.
///
/// Stdin is written from its own thread and closed once everything is written,
/// while stdout and stderr are drained concurrently until the process exits.
/// A formatter may fill either output pipe before it has read all its input,
/// so none of these can wait on another.
pub fn run_command_with_stdin(args: &[String], stdin_bytes: Vec<u8>) -> Result<CommandOutput, RunCommandError> {
  let Some((program, args)) = args.split_first() else {
    return Err(RunCommandError::Spawn(std::io::Error::new(ErrorKind::InvalidInput, "Found zero arguments.")));
  };

  let mut command = Command::new(program);
  command.args(args).stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped());
  hide_console_window(&mut command);
  let mut child = command.spawn().map_err(RunCommandError::Spawn)?;

  let stdin_writer = child.stdin.take().map(|mut stdin| {
    std::thread::spawn(move || {
      let result = stdin.write_all(&stdin_bytes);
      drop(stdin); // signals end of input
      match result {
        // the process exited or closed stdin early; its exit status will tell what happened
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        result => result,
      }
    })
  });

  let output = child.wait_with_output().map_err(RunCommandError::Communicate)?;

  if let Some(stdin_writer) = stdin_writer {
    let write_result = stdin_writer
      .join()
      .unwrap_or_else(|_| Err(std::io::Error::other("Thread writing to stdin panicked.")));
    if let Err(err) = write_result
      && output.status.success()
    {
      return Err(RunCommandError::Communicate(err));
    }
  }

  Ok(CommandOutput {
    status: output.status,
    stdout: output.stdout,
    stderr: output.stderr,
  })
}

#[cfg(windows)]
fn hide_console_window(command: &mut Command) {
  use std::os::windows::process::CommandExt;

  // prevents a console window from flashing when started from a gui process
  const CREATE_NO_WINDOW: u32 = 0x08000000;
  command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_command: &mut Command) {}
