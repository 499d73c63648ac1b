use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ExerciseError;

/// An integer counter persisted as the full text content of one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCounter {
  path: PathBuf,
  counter: i64,
}

impl SessionCounter {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      counter: 0,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn get(&self) -> i64 {
    self.counter
  }

  pub fn set(&mut self, value: i64) {
    self.counter = value;
  }

  /// Adds one, wrapping from `i64::MAX` to `i64::MIN`.
  pub fn increment(&mut self) -> i64 {
    self.counter = self.counter.wrapping_add(1);
    self.counter
  }

  /// Writes the counter, creating missing parent directories.
  pub fn save(&self) -> Result<(), ExerciseError> {
    if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(|error| ExerciseError::io(self.path_text(), &error))?;
    }
    fs::write(&self.path, self.counter.to_string()).map_err(|error| ExerciseError::io(self.path_text(), &error))?;
    info!(path = %self.path.display(), counter = self.counter, "saved counter");
    Ok(())
  }

  /// Reads the counter back. Content that is not an integer loads as 0.
  ///
  /// Surrounding whitespace is trimmed first, so a trailing newline such as
  /// `"3\n"` still loads as 3.
  pub fn load(&mut self) -> Result<i64, ExerciseError> {
    let text_value = fs::read_to_string(&self.path).map_err(|error| ExerciseError::io(self.path_text(), &error))?;
    self.counter = text_value.trim().parse::<i64>().unwrap_or(0);
    info!(path = %self.path.display(), counter = self.counter, "loaded counter");
    Ok(self.counter)
  }

  fn path_text(&self) -> String {
    self.path.display().to_string()
  }
}

impl fmt::Display for SessionCounter {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(formatter, "SessionStorage(file='{}', counter={})", self.path.display(), self.counter)
  }
}
