use exercise_pipelines::{is_palindrome_with, text_step_registry, PipelineJsonLoader};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), exercise_pipelines::ExerciseError> {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  let json_text = r#"
{
  "pipeline": "loose_normalizer",
  "type": "unary",
  "shortCircuitOnException": false,
  "steps": [
    {"$local": "lowercase"},
    {"$local": "normalize_whitespace", "name": "collapse"},
    {"$local": "remove_spaces"}
  ],
  "post": [{"$local": "metrics"}]
}
"#;

  let normalizer = PipelineJsonLoader::new().load_str(json_text, &text_step_registry())?;
  for input in ["Never\todd or even", "Step on\nno pets", "Hello"] {
    println!("{input:?} -> {}", is_palindrome_with(&normalizer, input));
  }
  Ok(())
}
