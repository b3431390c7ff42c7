use anyhow::Result;
use std::path::Path;
use std::path::PathBuf;

use crate::environment::Environment;

/// A document owned by the host that is about to be saved.
pub trait Document {
  /// Language identifier the host resolved for the document, ex. `elm`.
  fn language_id(&self) -> Option<&str>;
  /// `None` for a document that was never saved.
  fn file_path(&self) -> Option<&Path>;
  fn text(&self) -> &str;
  /// Replaces the whole text in one edit.
  fn replace_text(&mut self, new_text: String);
}

/// A file on the file system that is formatted as if it was being saved.
pub struct FileDocument {
  file_path: PathBuf,
  language_id: Option<String>,
  text: String,
  is_dirty: bool,
}

impl FileDocument {
  pub fn open(file_path: PathBuf, language_id: Option<String>, environment: &impl Environment) -> Result<Self> {
    let text = environment.read_file(&file_path)?;
    let language_id = language_id.or_else(|| language_id_from_extension(&file_path));
    Ok(FileDocument {
      file_path,
      language_id,
      text,
      is_dirty: false,
    })
  }

  /// Writes the text back when it was replaced.
  ///
  /// Returns whether the file was written.
  pub fn save(&mut self, environment: &impl Environment) -> Result<bool> {
    if !self.is_dirty {
      return Ok(false);
    }
    environment.write_file(&self.file_path, &self.text)?;
    self.is_dirty = false;
    Ok(true)
  }
}

fn language_id_from_extension(file_path: &Path) -> Option<String> {
  file_path.extension().map(|ext| ext.to_string_lossy().to_string())
}

impl Document for FileDocument {
  fn language_id(&self) -> Option<&str> {
    self.language_id.as_deref()
  }

  fn file_path(&self) -> Option<&Path> {
    Some(&self.file_path)
  }

  fn text(&self) -> &str {
    &self.text
  }

  fn replace_text(&mut self, new_text: String) {
    self.text = new_text;
    self.is_dirty = true;
  }
}

/// Text provided by an editor over stdin.
pub struct StdInDocument {
  pub language_id: String,
  pub file_path: Option<PathBuf>,
  pub text: String,
}

impl Document for StdInDocument {
  fn language_id(&self) -> Option<&str> {
    Some(&self.language_id)
  }

  fn file_path(&self) -> Option<&Path> {
    self.file_path.as_deref()
  }

  fn text(&self) -> &str {
    &self.text
  }

  fn replace_text(&mut self, new_text: String) {
    self.text = new_text;
  }
}
