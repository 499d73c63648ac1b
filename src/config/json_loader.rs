use serde_json::{Map, Value};
use tracing::debug;

use crate::core::pipeline::Pipeline;
use crate::core::registry::PipelineRegistry;
use crate::error::ExerciseError;

/// Builds text pipelines from JSON specs whose steps reference registered actions.
///
/// ```json
/// {
///   "pipeline": "palindrome_normalizer",
///   "type": "unary",
///   "shortCircuitOnException": false,
///   "steps": [{"$local": "lowercase"}, {"$local": "remove_spaces", "name": "spaces"}]
/// }
/// ```
pub struct PipelineJsonLoader;

impl PipelineJsonLoader {
  pub fn new() -> Self {
    Self
  }

  pub fn load_str(&self, json_text: &str, registry: &PipelineRegistry<String>) -> Result<Pipeline<String>, ExerciseError> {
    let spec: Value =
      serde_json::from_str(json_text).map_err(|error| ExerciseError::InvalidConfig(format!("invalid JSON: {error}")))?;
    self.build_from_spec(&spec, registry)
  }

  pub fn load_file(&self, file_path: &str, registry: &PipelineRegistry<String>) -> Result<Pipeline<String>, ExerciseError> {
    let text_value = std::fs::read_to_string(file_path).map_err(|error| ExerciseError::io(file_path, &error))?;
    self.load_str(&text_value, registry)
  }

  pub fn build_from_spec(&self, spec: &Value, registry: &PipelineRegistry<String>) -> Result<Pipeline<String>, ExerciseError> {
    let spec_object = spec
      .as_object()
      .ok_or_else(|| ExerciseError::InvalidConfig("pipeline spec must be a JSON object".to_string()))?;

    let pipeline_name = spec_object
      .get("pipeline")
      .and_then(|value| value.as_str())
      .unwrap_or("pipeline")
      .to_string();

    let pipeline_type = spec_object.get("type").and_then(|value| value.as_str()).unwrap_or("unary");
    if pipeline_type != "unary" {
      return Err(ExerciseError::InvalidConfig(format!(
        "unsupported pipeline type '{pipeline_type}', only 'unary' is supported"
      )));
    }

    let short_circuit_on_exception = parse_short_circuit_on_exception(spec_object);
    let mut pipeline = Pipeline::new(pipeline_name, short_circuit_on_exception);

    add_section(spec_object, "pre", "pre", &mut pipeline, registry)?;
    if spec_object.get("actions").is_some() {
      add_section(spec_object, "actions", "main", &mut pipeline, registry)?;
    } else {
      add_section(spec_object, "steps", "main", &mut pipeline, registry)?;
    }
    add_section(spec_object, "post", "post", &mut pipeline, registry)?;

    debug!(pipeline = %pipeline.name, steps = pipeline.len(), "loaded pipeline from JSON");
    Ok(pipeline)
  }
}

impl Default for PipelineJsonLoader {
  fn default() -> Self {
    Self::new()
  }
}

fn parse_short_circuit_on_exception(spec_object: &Map<String, Value>) -> bool {
  if let Some(value) = spec_object.get("shortCircuitOnException") {
    return value.as_bool().unwrap_or(true);
  }
  if let Some(value) = spec_object.get("shortCircuit") {
    return value.as_bool().unwrap_or(true);
  }
  true
}

fn add_section(
  spec_object: &Map<String, Value>,
  section_name: &str,
  phase: &str,
  pipeline: &mut Pipeline<String>,
  registry: &PipelineRegistry<String>,
) -> Result<(), ExerciseError> {
  let nodes = match spec_object.get(section_name) {
    Some(Value::Array(nodes)) => nodes,
    Some(_) => {
      return Err(ExerciseError::InvalidConfig(format!("'{section_name}' must be an array")));
    }
    None => return Ok(()),
  };

  for node in nodes {
    add_step(node, phase, pipeline, registry)?;
  }
  Ok(())
}

fn add_step(
  node: &Value,
  phase: &str,
  pipeline: &mut Pipeline<String>,
  registry: &PipelineRegistry<String>,
) -> Result<(), ExerciseError> {
  let node_object = node
    .as_object()
    .ok_or_else(|| ExerciseError::InvalidConfig("each action must be a JSON object".to_string()))?;

  let display_name = node_object
    .get("name")
    .and_then(|value| value.as_str())
    .or_else(|| node_object.get("label").and_then(|value| value.as_str()))
    .unwrap_or("")
    .to_string();

  if let Some(local_ref_value) = node_object.get("$local") {
    let local_ref = local_ref_value
      .as_str()
      .ok_or_else(|| ExerciseError::InvalidConfig("$local must be a string".to_string()))?;
    let kind = registry.resolve(local_ref)?;
    pipeline.push_registered(phase, display_name, kind);
    return Ok(());
  }

  if node_object.contains_key("$remote") {
    return Err(ExerciseError::InvalidConfig("$remote actions are not supported".to_string()));
  }

  Err(ExerciseError::InvalidConfig("unsupported action: expected '$local'".to_string()))
}
