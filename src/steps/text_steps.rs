use crate::core::metrics_actions::log_metrics;
use crate::core::registry::PipelineRegistry;

pub fn strip(text_value: String) -> String {
  text_value.trim().to_string()
}

pub fn normalize_whitespace(text_value: String) -> String {
  text_value.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Locale-independent Unicode lowercase.
pub fn lowercase(text_value: String) -> String {
  text_value.to_lowercase()
}

pub fn uppercase(text_value: String) -> String {
  text_value.to_uppercase()
}

/// Removes every U+0020 space. Tabs, newlines and other whitespace are kept.
pub fn remove_spaces(text_value: String) -> String {
  if !text_value.contains(' ') {
    return text_value;
  }
  text_value.replace(' ', "")
}

/// Reverses by Unicode scalar value, not by grapheme.
pub fn reverse_chars(text_value: String) -> String {
  text_value.chars().rev().collect()
}

/// Registers every text step under its function name, plus `metrics`.
pub fn register_text_steps(registry: &mut PipelineRegistry<String>) {
  registry.register_unary("strip", strip);
  registry.register_unary("normalize_whitespace", normalize_whitespace);
  registry.register_unary("lowercase", lowercase);
  registry.register_unary("uppercase", uppercase);
  registry.register_unary("remove_spaces", remove_spaces);
  registry.register_unary("reverse_chars", reverse_chars);
  registry.register_action("metrics", log_metrics::<String>);
}

pub fn text_step_registry() -> PipelineRegistry<String> {
  let mut registry = PipelineRegistry::new();
  register_text_steps(&mut registry);
  registry
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn remove_spaces_keeps_tabs_and_newlines() {
    assert_eq!(remove_spaces("a b\tc\nd ".to_string()), "ab\tc\nd");
  }

  #[test]
  fn reverse_chars_handles_multibyte_text() {
    assert_eq!(reverse_chars("añb".to_string()), "bña");
  }

  #[test]
  fn registry_knows_every_step() {
    let registry = text_step_registry();
    for name in ["strip", "normalize_whitespace", "lowercase", "uppercase", "remove_spaces", "reverse_chars", "metrics"] {
      assert!(registry.contains(name), "missing {name}");
    }
  }
}
