use crate::configuration::ConfigLocation;
use crate::configuration::ConfigurationError;
use crate::configuration::load_config;
use crate::configuration::resolve_config_path;
use crate::configuration::resolve_steps;
use crate::document::Document;
use crate::environment::Environment;
use crate::format::report_failure;
use crate::format::run_pipeline;

#[derive(Debug)]
pub enum PreSaveOutcome {
  /// No language or no steps bound to the language.
  NotApplicable,
  Unchanged,
  Formatted,
  /// A step failed. Earlier replacements in the chain may have been applied.
  StepFailed,
  ConfigurationFailed(ConfigurationError),
}

/// Handles the host's "before save" notification for a document.
///
/// Configuration is loaded fresh on each call. Every problem is reported to
/// the user and swallowed here, so the save itself always goes ahead.
pub fn on_pre_save(document: &mut impl Document, location: &ConfigLocation, environment: &impl Environment) -> PreSaveOutcome {
  let Some(language_id) = document.language_id().map(ToOwned::to_owned) else {
    return PreSaveOutcome::NotApplicable;
  };
  let file_path = document.file_path().map(|p| p.to_path_buf());

  let config = match resolve_config_path(location, file_path.as_deref(), environment).and_then(|config_path| load_config(&config_path, environment)) {
    Ok(config) => config,
    Err(err) => {
      environment.show_error_dialog(&err.to_string());
      return PreSaveOutcome::ConfigurationFailed(err);
    }
  };

  let steps = resolve_steps(&config, &language_id);
  if steps.is_empty() {
    log_verbose!(environment, "No formatting steps for language '{}'.", language_id);
    return PreSaveOutcome::NotApplicable;
  }

  let file_path_text = file_path.as_ref().map(|p| p.to_string_lossy().to_string());
  let result = run_pipeline(steps, file_path_text.as_deref(), document.text(), environment);
  let was_formatted = match result.formatted_text {
    Some(text) => {
      document.replace_text(text);
      true
    }
    None => false,
  };

  match result.failure {
    Some(err) => {
      report_failure(&err, environment);
      PreSaveOutcome::StepFailed
    }
    None if was_formatted => PreSaveOutcome::Formatted,
    None => PreSaveOutcome::Unchanged,
  }
}
