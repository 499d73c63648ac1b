use exercise_pipelines::exercises::palindrome::check;
use exercise_pipelines::{
  is_palindrome_with, text_step_registry, ExerciseConfig, ExerciseError, ListTransformPipeline, SessionCounter,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ExerciseError> {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  let config_path = std::env::args().nth(1).unwrap_or_else(|| "demos/exercises.json".to_string());
  let config = ExerciseConfig::from_file(&config_path)?;

  let normalizer = config.build_normalizer(&text_step_registry())?;
  for sample in &config.palindromes {
    println!("{} (configured normalizer: {})", check(sample), is_palindrome_with(&normalizer, sample));
  }

  let pipeline = ListTransformPipeline::new(config.list_transform.clone());
  let mut names = config.names.clone();
  let outcome = pipeline.run(&mut names)?;
  println!("removed={} names={names:?}", outcome.removed);
  println!("uppercase={:?} long={:?}", outcome.uppercase_names, outcome.long_names);

  if let Some(counter_file) = &config.counter_file {
    let mut counter = SessionCounter::new(counter_file);
    if counter.load().is_err() {
      counter.set(0);
    }
    counter.increment();
    counter.save()?;
    println!("{counter}");
  }
  Ok(())
}
