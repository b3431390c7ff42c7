use indexmap::IndexMap;

use super::TestEnvironment;

pub struct TestConfigFileBuilder {
  enabled: Option<bool>,
  default_includes: Option<Vec<String>>,
  default_excludes: Option<Vec<String>>,
  languages: IndexMap<String, String>,
}

impl TestConfigFileBuilder {
  fn new() -> Self {
    TestConfigFileBuilder {
      enabled: None,
      default_includes: None,
      default_excludes: None,
      languages: IndexMap::new(),
    }
  }

  pub fn to_string(&self) -> String {
    let mut parts = Vec::new();
    let mut default_parts = Vec::new();
    if let Some(enabled) = self.enabled {
      default_parts.push(format!("\"enabled\": {}", enabled));
    }
    if let Some(includes) = self.default_includes.as_ref() {
      default_parts.push(format!("\"include\": {}", string_array_text(includes)));
    }
    if let Some(excludes) = self.default_excludes.as_ref() {
      default_parts.push(format!("\"exclude\": {}", string_array_text(excludes)));
    }
    if !default_parts.is_empty() {
      parts.push(format!("\"defaults\": {{\n{}\n}}", default_parts.join(",\n")));
    }
    let language_parts = self
      .languages
      .iter()
      .map(|(key, value)| format!("\"{}\": {}", key, value))
      .collect::<Vec<_>>();
    parts.push(format!("\"languages\": {{\n{}\n}}", language_parts.join(",\n")));
    format!("{{\n{}\n}}", parts.join(",\n"))
  }

  /// Sets `defaults.enabled`.
  pub fn set_default_enabled(&mut self, value: bool) -> &mut Self {
    self.enabled = Some(value);
    self
  }

  pub fn add_default_include(&mut self, fragment: &str) -> &mut Self {
    self.default_includes.get_or_insert_with(Vec::new).push(fragment.to_string());
    self
  }

  pub fn add_default_exclude(&mut self, fragment: &str) -> &mut Self {
    self.default_excludes.get_or_insert_with(Vec::new).push(fragment.to_string());
    self
  }

  /// Adds a language binding. The text is the raw json for a step or a list of steps.
  pub fn add_language(&mut self, language_id: &str, text: &str) -> &mut Self {
    self.languages.insert(language_id.to_string(), text.to_string());
    self
  }
}

fn string_array_text(values: &[String]) -> String {
  let items = values.iter().map(|v| format!("\"{}\"", v)).collect::<Vec<_>>().join(", ");
  format!("[{}]", items)
}

pub struct TestEnvironmentBuilder {
  environment: TestEnvironment,
  config_files: IndexMap<String, TestConfigFileBuilder>,
}

impl TestEnvironmentBuilder {
  pub fn new() -> Self {
    Self {
      environment: TestEnvironment::new(),
      config_files: IndexMap::new(),
    }
  }

  pub fn with_default_config(&mut self, func: impl FnMut(&mut TestConfigFileBuilder)) -> &mut Self {
    self.with_config_file("/presave-format.json", func)
  }

  pub fn with_config_file(&mut self, file_path: &str, mut func: impl FnMut(&mut TestConfigFileBuilder)) -> &mut Self {
    let config_file = self.config_files.entry(file_path.to_string()).or_insert_with(TestConfigFileBuilder::new);
    func(config_file);
    self
  }

  pub fn write_file(&mut self, file_path: &str, text: &str) -> &mut Self {
    self.environment.add_file(file_path, text);
    self
  }

  pub fn set_cwd(&mut self, dir_path: &str) -> &mut Self {
    self.environment.set_cwd(dir_path);
    self
  }

  pub fn build(&mut self) -> TestEnvironment {
    for (file_path, config_file) in self.config_files.iter() {
      self.environment.add_file(file_path, &config_file.to_string());
    }
    self.environment.clone()
  }
}
