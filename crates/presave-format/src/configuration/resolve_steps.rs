use super::FormatStep;
use super::PreSaveConfig;

/// Gets the steps bound to a language, in execution order.
///
/// No path filtering happens here. The same steps are evaluated against each
/// document when it's saved.
pub fn resolve_steps<'a>(config: &'a PreSaveConfig, language_id: &str) -> &'a [FormatStep] {
  config.languages.get(language_id).map(|binding| binding.steps()).unwrap_or_default()
}

#[cfg(test)]
mod test {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::configuration::deserialize_config;

  fn get_config() -> PreSaveConfig {
    deserialize_config(
      r#"{
        "defaults": { "include": ["/"], "exclude": [] },
        "languages": {
          "elm": { "command": ["elm-format", "--stdin"] },
          "python": [{ "command": ["isort", "-"] }, { "command": ["black", "-"] }]
        }
      }"#,
    )
    .unwrap()
  }

  #[test]
  fn should_resolve_nothing_for_unbound_language() {
    assert!(resolve_steps(&get_config(), "rust").is_empty());
  }

  #[test]
  fn should_resolve_single_step() {
    let config = get_config();
    let steps = resolve_steps(&config, "elm");
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].program_name(), "elm-format");
  }

  #[test]
  fn should_resolve_chain_in_declaration_order() {
    let config = get_config();
    let names = resolve_steps(&config, "python").iter().map(|s| s.program_name()).collect::<Vec<_>>();
    assert_eq!(names, vec!["isort", "black"]);
  }

  #[test]
  fn should_match_language_case_sensitively() {
    assert!(resolve_steps(&get_config(), "Elm").is_empty());
  }
}
