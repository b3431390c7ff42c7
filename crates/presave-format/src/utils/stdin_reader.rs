use anyhow::Context;
use anyhow::Result;
use std::io::Read;
use std::io::{self};

#[cfg(test)]
pub use tests::TestStdInReader;

pub trait StdInReader: Clone + Send + Sync {
  /// Reads all of stdin, which is expected to be UTF-8 text.
  fn read(&self) -> Result<String>;
}

#[derive(Default, Clone, Copy)]
pub struct RealStdInReader;

impl StdInReader for RealStdInReader {
  fn read(&self) -> Result<String> {
    let mut text = String::new();
    io::stdin()
      .read_to_string(&mut text)
      .context("Error reading stdin. Expected UTF-8 text.")?;
    Ok(text)
  }
}
