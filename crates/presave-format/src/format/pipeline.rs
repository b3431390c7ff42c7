use super::ExecutionResult;
use super::FormatStepError;
use super::execute_step;
use crate::configuration::FormatStep;
use crate::environment::Environment;

#[derive(Debug)]
pub struct PipelineResult {
  /// Text to replace the document with. `None` when nothing changed.
  pub formatted_text: Option<String>,
  /// The step failure that stopped the chain.
  pub failure: Option<FormatStepError>,
}

/// Runs the steps in order, each one receiving the output of the last step
/// that produced a replacement.
///
/// The chain stops at the first failure. The failed step contributes nothing,
/// but replacements made by earlier steps are kept.
pub fn run_pipeline(steps: &[FormatStep], file_path: Option<&str>, file_text: &str, environment: &impl Environment) -> PipelineResult {
  let mut current_text: Option<String> = None;
  let mut failure = None;

  for step in steps {
    let input_text = current_text.as_deref().unwrap_or(file_text);
    match execute_step(step, file_path, input_text, environment) {
      ExecutionResult::Skip(reason) => {
        log_verbose!(environment, "Skipped '{}': {}", step.program_name(), reason);
      }
      ExecutionResult::Replacement(text) => {
        current_text = Some(text);
      }
      ExecutionResult::Failure(err) => {
        log_verbose!(environment, "Stopping the chain after a {:?} failure of '{}'.", err.kind(), err.command());
        failure = Some(err);
        break;
      }
    }
  }

  PipelineResult {
    formatted_text: current_text.filter(|text| text != file_text),
    failure,
  }
}

/// Writes the details to the console and shows a short notice.
pub fn report_failure(err: &FormatStepError, environment: &impl Environment) {
  let mut text = err.to_string();
  if let Some(stderr) = err.stderr() {
    text.push_str("\n\n");
    text.push_str(stderr);
  }
  environment.log_stderr_with_context(&text, err.command());
  environment.show_status(&format!("{} failed - see console", err.command()).to_uppercase());
}
