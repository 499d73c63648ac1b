use exercise_pipelines::SessionCounter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), exercise_pipelines::ExerciseError> {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  let mut storage = SessionCounter::new("target/tmp/session.txt");
  println!("Initial counter = {}", storage.get());
  storage.set(3);
  storage.save()?;

  storage.set(0);
  println!("After reset (in memory) counter = {}", storage.get());

  storage.load()?;
  println!("After load() counter = {}", storage.get());
  println!("{storage}");
  Ok(())
}
