use indexmap::IndexMap;
use jsonc_parser::JsonArray;
use jsonc_parser::JsonObject;
use jsonc_parser::JsonValue;
use thiserror::Error;

use super::CommandToken;
use super::FormatStep;
use super::LanguageBinding;
use super::PreSaveConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeserializeConfigError {
  #[error("{0}")]
  Parse(String),
  #[error("{key}: {message}")]
  Invalid { key: String, message: String },
}

fn invalid(key: impl Into<String>, message: impl Into<String>) -> DeserializeConfigError {
  DeserializeConfigError::Invalid {
    key: key.into(),
    message: message.into(),
  }
}

/// Step values as written in the file, before `defaults` are applied.
struct RawFormatStep {
  key: String,
  command: Vec<CommandToken>,
  append_file_path: Option<bool>,
  enabled: Option<bool>,
  include: Option<Vec<String>>,
  exclude: Option<Vec<String>>,
  extend_include: Vec<String>,
  extend_exclude: Vec<String>,
}

#[derive(Default)]
struct StepDefaults {
  append_file_path: Option<bool>,
  enabled: Option<bool>,
  include: Option<Vec<String>>,
  exclude: Option<Vec<String>>,
}

enum RawLanguageBinding {
  Single(RawFormatStep),
  Chain(Vec<RawFormatStep>),
}

/// Deserializes and validates the text of a configuration file.
///
/// All structural problems are reported here so that nothing downstream
/// needs to deal with a partially valid configuration.
pub fn deserialize_config(config_file_text: &str) -> Result<PreSaveConfig, DeserializeConfigError> {
  let value = jsonc_parser::parse_to_value(config_file_text, &Default::default()).map_err(|err| DeserializeConfigError::Parse(err.to_string()))?;

  let root_object = match value {
    Some(JsonValue::Object(obj)) => obj,
    _ => return Err(invalid("(root)", "Expected a root object in the json.")),
  };

  let mut defaults = StepDefaults::default();
  let mut raw_languages = None;
  for (key, value) in root_object.into_iter() {
    match key.as_str() {
      "defaults" => defaults = parse_defaults(value)?,
      "languages" => raw_languages = Some(parse_languages(value)?),
      _ => return Err(invalid(key, "Unknown property.")),
    }
  }

  let Some(raw_languages) = raw_languages else {
    return Err(invalid("languages", "Missing required property."));
  };

  let mut languages = IndexMap::with_capacity(raw_languages.len());
  for (language_id, raw_binding) in raw_languages {
    let binding = match raw_binding {
      RawLanguageBinding::Single(raw_step) => LanguageBinding::Single(resolve_step(raw_step, &defaults)?),
      RawLanguageBinding::Chain(raw_steps) => LanguageBinding::Chain(
        raw_steps
          .into_iter()
          .map(|raw_step| resolve_step(raw_step, &defaults))
          .collect::<Result<Vec<_>, _>>()?,
      ),
    };
    languages.insert(language_id, binding);
  }

  Ok(PreSaveConfig { languages })
}

fn resolve_step(raw_step: RawFormatStep, defaults: &StepDefaults) -> Result<FormatStep, DeserializeConfigError> {
  let Some(include) = raw_step.include.or_else(|| defaults.include.clone()) else {
    return Err(invalid(
      format!("{} -> include", raw_step.key),
      "Expected an array of path fragments on the step or in \"defaults\".",
    ));
  };
  let Some(exclude) = raw_step.exclude.or_else(|| defaults.exclude.clone()) else {
    return Err(invalid(
      format!("{} -> exclude", raw_step.key),
      "Expected an array of path fragments on the step or in \"defaults\".",
    ));
  };
  Ok(FormatStep {
    command: raw_step.command,
    append_file_path: raw_step.append_file_path.or(defaults.append_file_path).unwrap_or(false),
    enabled: raw_step.enabled.or(defaults.enabled).unwrap_or(true),
    include,
    exclude,
    extend_include: raw_step.extend_include,
    extend_exclude: raw_step.extend_exclude,
  })
}

fn parse_defaults(value: JsonValue) -> Result<StepDefaults, DeserializeConfigError> {
  let obj = expect_object("defaults", value)?;
  let mut defaults = StepDefaults::default();
  for (key, value) in obj.into_iter() {
    let key_path = format!("defaults -> {}", key);
    match key.as_str() {
      "appendFilePath" => defaults.append_file_path = Some(expect_bool(&key_path, value)?),
      "enabled" => defaults.enabled = Some(expect_bool(&key_path, value)?),
      "include" => defaults.include = Some(expect_string_array(&key_path, value)?),
      "exclude" => defaults.exclude = Some(expect_string_array(&key_path, value)?),
      _ => return Err(invalid(key_path, "Unknown property.")),
    }
  }
  Ok(defaults)
}

fn parse_languages(value: JsonValue) -> Result<Vec<(String, RawLanguageBinding)>, DeserializeConfigError> {
  let obj = expect_object("languages", value)?;
  let mut languages = Vec::new();
  for (language_id, value) in obj.into_iter() {
    let key_path = format!("languages -> {}", language_id);
    let binding = match value {
      JsonValue::Object(obj) => RawLanguageBinding::Single(parse_step(key_path, obj)?),
      JsonValue::Array(array) => RawLanguageBinding::Chain(parse_step_array(&key_path, array)?),
      _ => return Err(invalid(key_path, "Expected a step object or an array of step objects.")),
    };
    languages.push((language_id, binding));
  }
  Ok(languages)
}

fn parse_step_array(key_path: &str, array: JsonArray) -> Result<Vec<RawFormatStep>, DeserializeConfigError> {
  let mut steps = Vec::new();
  for (i, value) in array.into_iter().enumerate() {
    let step_key_path = format!("{}[{}]", key_path, i);
    match value {
      JsonValue::Object(obj) => steps.push(parse_step(step_key_path, obj)?),
      _ => return Err(invalid(step_key_path, "Expected a step object.")),
    }
  }
  if steps.is_empty() {
    return Err(invalid(key_path, "Expected at least one step."));
  }
  Ok(steps)
}

fn parse_step(key_path: String, obj: JsonObject) -> Result<RawFormatStep, DeserializeConfigError> {
  let mut command = None;
  let mut step = RawFormatStep {
    key: key_path,
    command: Vec::new(),
    append_file_path: None,
    enabled: None,
    include: None,
    exclude: None,
    extend_include: Vec::new(),
    extend_exclude: Vec::new(),
  };
  for (key, value) in obj.into_iter() {
    let property_key_path = format!("{} -> {}", step.key, key);
    match key.as_str() {
      "command" => command = Some(parse_command(&property_key_path, value)?),
      "appendFilePath" => step.append_file_path = Some(expect_bool(&property_key_path, value)?),
      "enabled" => step.enabled = Some(expect_bool(&property_key_path, value)?),
      "include" => step.include = Some(expect_string_array(&property_key_path, value)?),
      "exclude" => step.exclude = Some(expect_string_array(&property_key_path, value)?),
      "extendInclude" => step.extend_include = expect_string_array(&property_key_path, value)?,
      "extendExclude" => step.extend_exclude = expect_string_array(&property_key_path, value)?,
      _ => return Err(invalid(property_key_path, "Unknown property.")),
    }
  }
  match command {
    Some(command) => step.command = command,
    None => return Err(invalid(format!("{} -> command", step.key), "Missing required property.")),
  }
  Ok(step)
}

fn parse_command(key_path: &str, value: JsonValue) -> Result<Vec<CommandToken>, DeserializeConfigError> {
  let JsonValue::Array(array) = value else {
    return Err(invalid(key_path, "Expected a non-empty array of strings or numbers."));
  };
  let mut tokens = Vec::new();
  for element in array.into_iter() {
    let token = match element {
      JsonValue::String(text) => CommandToken::Text(text.into_owned()),
      JsonValue::Number(text) => CommandToken::Number(text.to_string()),
      _ => return Err(invalid(key_path, "Expected only strings or numbers in the command.")),
    };
    tokens.push(token);
  }
  match tokens.first() {
    None => Err(invalid(key_path, "Expected a non-empty array of strings or numbers.")),
    Some(program) if program.as_arg().trim().is_empty() => Err(invalid(key_path, "The program name must not be empty.")),
    Some(_) => Ok(tokens),
  }
}

fn expect_object<'a>(key_path: &str, value: JsonValue<'a>) -> Result<JsonObject<'a>, DeserializeConfigError> {
  match value {
    JsonValue::Object(obj) => Ok(obj),
    _ => Err(invalid(key_path, "Expected an object.")),
  }
}

fn expect_bool(key_path: &str, value: JsonValue) -> Result<bool, DeserializeConfigError> {
  match value {
    JsonValue::Boolean(value) => Ok(value),
    _ => Err(invalid(key_path, "Expected a boolean.")),
  }
}

fn expect_string_array(key_path: &str, value: JsonValue) -> Result<Vec<String>, DeserializeConfigError> {
  let JsonValue::Array(array) = value else {
    return Err(invalid(key_path, "Expected an array of strings."));
  };
  array
    .into_iter()
    .map(|element| match element {
      JsonValue::String(text) => Ok(text.into_owned()),
      _ => Err(invalid(key_path, "Expected an array of strings.")),
    })
    .collect()
}

#[cfg(test)]
mod test {
  use pretty_assertions::assert_eq;

  use super::*;

  fn text_tokens(values: &[&str]) -> Vec<CommandToken> {
    values.iter().map(|v| CommandToken::Text(v.to_string())).collect()
  }

  #[test]
  fn should_error_when_there_is_a_parser_error() {
    let err = deserialize_config("{prop}").err().unwrap();
    assert!(matches!(err, DeserializeConfigError::Parse(_)));
  }

  #[test]
  fn should_error_when_no_object_in_root() {
    assert_error("[]", "(root): Expected a root object in the json.");
    assert_error("", "(root): Expected a root object in the json.");
  }

  #[test]
  fn should_error_when_languages_missing() {
    assert_error("{}", "languages: Missing required property.");
  }

  #[test]
  fn should_error_for_unknown_root_property() {
    assert_error(r#"{ "languages": {}, "lineWidth": 80 }"#, "lineWidth: Unknown property.");
  }

  #[test]
  fn should_deserialize_single_step_with_comments() {
    let config = deserialize_config(
      r#"{
        // elm
        "languages": {
          "elm": {
            "command": ["elm-format", "--stdin", "--yes"],
            "include": ["/src/"],
            "exclude": [],
          },
        },
      }"#,
    )
    .unwrap();
    assert_eq!(
      config.languages.get("elm").unwrap(),
      &LanguageBinding::Single(FormatStep {
        command: text_tokens(&["elm-format", "--stdin", "--yes"]),
        append_file_path: false,
        enabled: true,
        include: vec!["/src/".to_string()],
        exclude: vec![],
        extend_include: vec![],
        extend_exclude: vec![],
      })
    );
  }

  #[test]
  fn should_keep_numbers_in_command_as_written() {
    let config = deserialize_config(r#"{ "languages": { "py": { "command": ["black", "-l", 100], "include": ["/"], "exclude": [] } } }"#).unwrap();
    let steps = config.languages.get("py").unwrap().steps();
    assert_eq!(
      steps[0].command,
      vec![
        CommandToken::Text("black".to_string()),
        CommandToken::Text("-l".to_string()),
        CommandToken::Number("100".to_string()),
      ]
    );
  }

  #[test]
  fn should_apply_defaults_and_keep_declaration_order() {
    let config = deserialize_config(
      r#"{
        "languages": {
          "python": [
            { "command": ["isort", "-"], "extendExclude": ["/migrations/"] },
            { "command": ["black", "-"], "include": ["/app/"], "enabled": false }
          ],
          "elm": { "command": ["elm-format", "--stdin"] }
        },
        "defaults": { "include": ["/"], "exclude": ["/node_modules/"], "appendFilePath": true }
      }"#,
    )
    .unwrap();
    assert_eq!(config.languages.keys().collect::<Vec<_>>(), vec!["python", "elm"]);
    let steps = config.languages.get("python").unwrap().steps();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].program_name(), "isort");
    assert_eq!(steps[0].include, vec!["/"]);
    assert_eq!(steps[0].exclude, vec!["/node_modules/"]);
    assert_eq!(steps[0].extend_exclude, vec!["/migrations/"]);
    assert!(steps[0].append_file_path);
    assert!(steps[0].enabled);
    assert_eq!(steps[1].include, vec!["/app/"]);
    assert!(!steps[1].enabled);
  }

  #[test]
  fn should_error_when_filter_lists_missing() {
    assert_error(
      r#"{ "languages": { "elm": { "command": ["elm-format"], "exclude": [] } } }"#,
      "languages -> elm -> include: Expected an array of path fragments on the step or in \"defaults\".",
    );
    assert_error(
      r#"{ "languages": { "elm": [{ "command": ["elm-format"], "include": [] }] } }"#,
      "languages -> elm[0] -> exclude: Expected an array of path fragments on the step or in \"defaults\".",
    );
  }

  #[test]
  fn should_error_for_bad_commands() {
    assert_error(
      r#"{ "languages": { "elm": { "include": [], "exclude": [] } } }"#,
      "languages -> elm -> command: Missing required property.",
    );
    assert_error(
      r#"{ "languages": { "elm": { "command": [], "include": [], "exclude": [] } } }"#,
      "languages -> elm -> command: Expected a non-empty array of strings or numbers.",
    );
    assert_error(
      r#"{ "languages": { "elm": { "command": "elm-format", "include": [], "exclude": [] } } }"#,
      "languages -> elm -> command: Expected a non-empty array of strings or numbers.",
    );
    assert_error(
      r#"{ "languages": { "elm": { "command": ["elm-format", true], "include": [], "exclude": [] } } }"#,
      "languages -> elm -> command: Expected only strings or numbers in the command.",
    );
    assert_error(
      r#"{ "languages": { "elm": { "command": [" "], "include": [], "exclude": [] } } }"#,
      "languages -> elm -> command: The program name must not be empty.",
    );
  }

  #[test]
  fn should_error_for_malformed_filters_and_steps() {
    assert_error(
      r#"{ "languages": { "elm": { "command": ["a"], "include": "/src/", "exclude": [] } } }"#,
      "languages -> elm -> include: Expected an array of strings.",
    );
    assert_error(
      r#"{ "languages": { "elm": { "command": ["a"], "include": [], "exclude": [], "extendInclude": [1] } } }"#,
      "languages -> elm -> extendInclude: Expected an array of strings.",
    );
    assert_error(r#"{ "languages": { "elm": [] } }"#, "languages -> elm: Expected at least one step.");
    assert_error(r#"{ "languages": { "elm": ["a"] } }"#, "languages -> elm[0]: Expected a step object.");
    assert_error(r#"{ "languages": { "elm": true } }"#, "languages -> elm: Expected a step object or an array of step objects.");
    assert_error(
      r#"{ "languages": { "elm": { "command": ["a"], "include": [], "exclude": [], "includes": [] } } }"#,
      "languages -> elm -> includes: Unknown property.",
    );
    assert_error(r#"{ "languages": {}, "defaults": { "enabled": "yes" } }"#, "defaults -> enabled: Expected a boolean.");
  }

  #[track_caller]
  fn assert_error(text: &str, expected_message: &str) {
    match deserialize_config(text) {
      Ok(_) => panic!("Expected an error."),
      Err(err) => assert_eq!(err.to_string(), expected_message),
    }
  }
}
