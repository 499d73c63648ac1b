use exercise_pipelines::exercises::palindrome::check;
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  println!("{}", check("madam"));

  println!("\nMore examples:");
  for input in ["Race car", "Hello", "A man a plan a canal Panama"] {
    let verdict = check(input);
    println!("\"{input}\" is a palindrome: {}", verdict.is_palindrome);
  }
}
