use exercise_pipelines::exercises::list_transform::default_names;
use exercise_pipelines::ListTransformPipeline;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), exercise_pipelines::ExerciseError> {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  let pipeline = ListTransformPipeline::default();
  for snapshot in pipeline.trace(default_names())? {
    println!("{snapshot}");
  }

  let mut names = default_names();
  let outcome = pipeline.run(&mut names)?;
  println!("\nFinal summary:");
  println!("Original mutable list: [{}]", names.join(", "));
  println!("Derived uppercase list: [{}]", outcome.uppercase_names.join(", "));
  println!("Derived filtered list: [{}]", outcome.long_names.join(", "));

  let mut too_short = vec!["Alice".to_string()];
  if let Err(error) = pipeline.run(&mut too_short) {
    println!("\nOne-name list fails: {error}");
  }
  Ok(())
}
