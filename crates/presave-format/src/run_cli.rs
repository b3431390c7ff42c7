use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::arg_parser::CliArgs;
use crate::arg_parser::FmtSubCommand;
use crate::arg_parser::OutputResolvedStepsSubCommand;
use crate::arg_parser::ParseArgsError;
use crate::arg_parser::StdInFmtSubCommand;
use crate::arg_parser::SubCommand;
use crate::configuration::ConfigLocation;
use crate::configuration::ConfigurationError;
use crate::configuration::load_config;
use crate::configuration::resolve_config_path;
use crate::configuration::resolve_steps;
use crate::document::Document;
use crate::document::FileDocument;
use crate::document::StdInDocument;
use crate::environment::Environment;
use crate::pre_save::PreSaveOutcome;
use crate::pre_save::on_pre_save;

const CONFIGURATION_ERROR_EXIT_CODE: i32 = 10;

#[derive(Debug, Error)]
#[error("{inner:#}")]
pub struct AppError {
  pub inner: anyhow::Error,
  pub exit_code: i32,
}

impl AppError {
  /// An error that was already shown to the user.
  fn already_reported(exit_code: i32) -> Self {
    AppError {
      inner: anyhow::Error::msg(""),
      exit_code,
    }
  }
}

impl From<anyhow::Error> for AppError {
  fn from(inner: anyhow::Error) -> Self {
    AppError { inner, exit_code: 1 }
  }
}

impl From<ParseArgsError> for AppError {
  fn from(inner: ParseArgsError) -> Self {
    AppError {
      inner: inner.into(),
      exit_code: 1,
    }
  }
}

impl From<ConfigurationError> for AppError {
  fn from(inner: ConfigurationError) -> Self {
    AppError {
      inner: inner.into(),
      exit_code: CONFIGURATION_ERROR_EXIT_CODE,
    }
  }
}

pub fn run_cli(args: &CliArgs, environment: &impl Environment) -> Result<(), AppError> {
  let config_location = ConfigLocation {
    explicit_path: args.config.as_ref().map(PathBuf::from),
  };
  match &args.sub_command {
    SubCommand::Help(help_text) => {
      environment.log(help_text);
      Ok(())
    }
    SubCommand::Version => {
      environment.log(&format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")));
      Ok(())
    }
    SubCommand::Fmt(cmd) => format_file(cmd, &config_location, environment),
    SubCommand::StdInFmt(cmd) => format_stdin(cmd, &config_location, environment),
    SubCommand::OutputResolvedSteps(cmd) => output_resolved_steps(cmd, &config_location, environment),
  }
}

fn format_file(cmd: &FmtSubCommand, config_location: &ConfigLocation, environment: &impl Environment) -> Result<(), AppError> {
  let file_path = environment.canonicalize(&cmd.file_path)?;
  let mut document = FileDocument::open(file_path.clone(), cmd.language.clone(), environment)?;
  let outcome = on_pre_save(&mut document, config_location, environment);
  // the save goes ahead even when a step failed so that earlier steps in the chain still apply
  if document.save(environment)? {
    log_verbose!(environment, "Formatted {}", file_path.display());
  }
  check_outcome(outcome)
}

fn format_stdin(cmd: &StdInFmtSubCommand, config_location: &ConfigLocation, environment: &impl Environment) -> Result<(), AppError> {
  let file_path = cmd.file_path.as_ref().map(|file_path| {
    let file_path = PathBuf::from(file_path);
    if file_path.is_absolute() { file_path } else { environment.cwd().join(file_path) }
  });
  let mut document = StdInDocument {
    language_id: cmd.language.clone(),
    file_path,
    text: cmd.file_text.clone(),
  };
  let outcome = on_pre_save(&mut document, config_location, environment);
  // always output the text so the editor can save it
  environment.log_machine_readable(document.text());
  check_outcome(outcome)
}

fn check_outcome(outcome: PreSaveOutcome) -> Result<(), AppError> {
  match outcome {
    PreSaveOutcome::ConfigurationFailed(_) => Err(AppError::already_reported(CONFIGURATION_ERROR_EXIT_CODE)),
    // formatting is best effort, failures were reported and don't fail the save
    PreSaveOutcome::NotApplicable | PreSaveOutcome::Unchanged | PreSaveOutcome::Formatted | PreSaveOutcome::StepFailed => Ok(()),
  }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedStepOutput<'a> {
  command: Vec<&'a str>,
  append_file_path: bool,
  enabled: bool,
  includes: Vec<&'a str>,
  excludes: Vec<&'a str>,
}

fn output_resolved_steps(cmd: &OutputResolvedStepsSubCommand, config_location: &ConfigLocation, environment: &impl Environment) -> Result<(), AppError> {
  let config_path = resolve_config_path(config_location, None, environment)?;
  let config = load_config(&config_path, environment)?;
  let steps = resolve_steps(&config, &cmd.language)
    .iter()
    .map(|step| ResolvedStepOutput {
      command: step.command.iter().map(|token| token.as_arg()).collect(),
      append_file_path: step.append_file_path,
      enabled: step.enabled,
      includes: step.includes().collect(),
      excludes: step.excludes().collect(),
    })
    .collect::<Vec<_>>();
  let text = serde_json::to_string_pretty(&steps).context("Error serializing the resolved steps.")?;
  environment.log_machine_readable(&text);
  environment.log_machine_readable("\n");
  Ok(())
}
