/// Errors produced by the exercises, the pipeline engine and its configuration layer.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ExerciseError {
  /// Indexed removal targeted a position the list does not have.
  #[error("index {index} is out of range for a list of length {len}")]
  OutOfRange { index: usize, len: usize },

  #[error("unknown action: {0}")]
  UnknownAction(String),

  #[error("invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("i/o error on '{path}': {message}")]
  Io { path: String, message: String },

  /// A pipeline step failed without a typed cause, for example because it panicked.
  #[error("step {action} failed: {message}")]
  StepFailed { action: String, message: String },
}

impl ExerciseError {
  pub fn io(path: impl Into<String>, error: &std::io::Error) -> Self {
    ExerciseError::Io {
      path: path.into(),
      message: error.to_string(),
    }
  }
}
