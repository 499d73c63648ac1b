use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::json_loader::PipelineJsonLoader;
use crate::core::pipeline::Pipeline;
use crate::core::registry::PipelineRegistry;
use crate::error::ExerciseError;
use crate::exercises::list_transform::{default_names, ListTransformConfig};
use crate::exercises::palindrome::default_normalizer;

fn default_palindromes() -> Vec<String> {
  ["madam", "Race car", "Hello", "A man a plan a canal Panama"]
    .iter()
    .map(|sample| sample.to_string())
    .collect()
}

/// Inputs for both exercises. Every field is optional in JSON.
///
/// ```json
/// {
///   "names": ["Alice", "Brian", "Carol", "Daisy", "Eve"],
///   "listTransform": {"removeIndex": 1, "appended": "Frank", "minLength": 5},
///   "palindromes": ["madam", "kotlin"],
///   "normalizer": {"pipeline": "n", "steps": [{"$local": "lowercase"}]},
///   "counterFile": "build/tmp/session.txt"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExerciseConfig {
  pub names: Vec<String>,
  pub list_transform: ListTransformConfig,
  pub palindromes: Vec<String>,
  pub normalizer: Option<Value>,
  pub counter_file: Option<String>,
}

impl Default for ExerciseConfig {
  fn default() -> Self {
    Self {
      names: default_names(),
      list_transform: ListTransformConfig::default(),
      palindromes: default_palindromes(),
      normalizer: None,
      counter_file: None,
    }
  }
}

impl ExerciseConfig {
  pub fn from_json_str(json_text: &str) -> Result<Self, ExerciseError> {
    serde_json::from_str(json_text)
      .map_err(|error| ExerciseError::InvalidConfig(format!("invalid exercise config: {error}")))
  }

  pub fn from_file(file_path: &str) -> Result<Self, ExerciseError> {
    let text_value = std::fs::read_to_string(file_path).map_err(|error| ExerciseError::io(file_path, &error))?;
    Self::from_json_str(&text_value)
  }

  /// The configured normalizer pipeline, or the default one when none is given.
  pub fn build_normalizer(&self, registry: &PipelineRegistry<String>) -> Result<Pipeline<String>, ExerciseError> {
    match &self.normalizer {
      Some(spec) => PipelineJsonLoader::new().build_from_spec(spec, registry),
      None => Ok(default_normalizer()),
    }
  }
}
