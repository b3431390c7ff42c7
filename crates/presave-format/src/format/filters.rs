use std::fmt;

use crate::configuration::FormatStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  Disabled,
  /// The document was never saved, so there's nothing to match against.
  NoFilePath,
  NotIncluded,
  Excluded,
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      SkipReason::Disabled => "step is disabled",
      SkipReason::NoFilePath => "document has no file path",
      SkipReason::NotIncluded => "file path matched no include fragment",
      SkipReason::Excluded => "file path matched an exclude fragment",
    })
  }
}

/// Decides whether a step applies to the file path.
///
/// Fragments are matched as case-sensitive substrings. An exclude hit always
/// wins and an empty include list never matches.
pub fn get_skip_reason(step: &FormatStep, file_path: Option<&str>) -> Option<SkipReason> {
  if !step.enabled {
    return Some(SkipReason::Disabled);
  }
  let Some(file_path) = file_path else {
    return Some(SkipReason::NoFilePath);
  };
  if step.excludes().any(|fragment| file_path.contains(fragment)) {
    return Some(SkipReason::Excluded);
  }
  if !step.includes().any(|fragment| file_path.contains(fragment)) {
    return Some(SkipReason::NotIncluded);
  }
  None
}
