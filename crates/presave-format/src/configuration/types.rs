use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A token of a formatter command line as written in the configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandToken {
  Text(String),
  /// A json number, kept in the textual form it was written in.
  Number(String),
}

impl CommandToken {
  pub fn as_arg(&self) -> &str {
    match self {
      CommandToken::Text(text) | CommandToken::Number(text) => text.as_str(),
    }
  }
}

impl fmt::Display for CommandToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_arg())
  }
}

/// One external formatter invocation bound to a language.
///
/// Steps are immutable once loaded. The `extend_*` lists are only combined
/// with their base lists when a decision is made (see [`FormatStep::includes`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatStep {
  /// Never empty. The first token is the program.
  pub command: Vec<CommandToken>,
  pub append_file_path: bool,
  pub enabled: bool,
  pub include: Vec<String>,
  pub exclude: Vec<String>,
  pub extend_include: Vec<String>,
  pub extend_exclude: Vec<String>,
}

impl FormatStep {
  /// Name of the program, used when reporting on this step.
  pub fn program_name(&self) -> &str {
    self.command.first().map(|token| token.as_arg()).unwrap_or_default()
  }

  /// `include ++ extend_include`
  pub fn includes(&self) -> impl Iterator<Item = &str> {
    self.include.iter().chain(self.extend_include.iter()).map(|s| s.as_str())
  }

  /// `exclude ++ extend_exclude`
  pub fn excludes(&self) -> impl Iterator<Item = &str> {
    self.exclude.iter().chain(self.extend_exclude.iter()).map(|s| s.as_str())
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LanguageBinding {
  Single(FormatStep),
  /// Steps run as a chain in declaration order.
  Chain(Vec<FormatStep>),
}

impl LanguageBinding {
  pub fn steps(&self) -> &[FormatStep] {
    match self {
      LanguageBinding::Single(step) => std::slice::from_ref(step),
      LanguageBinding::Chain(steps) => steps,
    }
  }
}

/// Language identifier to formatting steps, in the order declared in the file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreSaveConfig {
  pub languages: IndexMap<String, LanguageBinding>,
}
