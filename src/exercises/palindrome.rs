//! Palindrome checking over normalized text.
//!
//! Normalization lowercases with locale-independent Unicode case mapping and
//! drops every literal space (U+0020). Other whitespace is significant.

use std::fmt;

use tracing::debug;

use crate::core::pipeline::Pipeline;
use crate::steps::text_steps::{lowercase, remove_spaces};

pub fn normalize(input: &str) -> String {
  remove_spaces(lowercase(input.to_string()))
}

fn reads_same_both_ways(normalized: &str) -> bool {
  normalized.chars().eq(normalized.chars().rev())
}

/// Returns whether `input` reads the same forwards and backwards after normalization.
///
/// Never fails: empty and space-only inputs are palindromes.
pub fn is_palindrome(input: &str) -> bool {
  reads_same_both_ways(&normalize(input))
}

/// Same comparison as [`is_palindrome`], normalizing with a caller-supplied pipeline.
pub fn is_palindrome_with(normalizer: &Pipeline<String>, input: &str) -> bool {
  let normalized = normalizer.run(input.to_string());
  reads_same_both_ways(&normalized)
}

/// Pipeline equivalent of [`normalize`].
pub fn default_normalizer() -> Pipeline<String> {
  let mut pipeline = Pipeline::new("palindrome_normalizer", false);
  pipeline.add_action_named("lowercase", lowercase);
  pipeline.add_action_named("remove_spaces", remove_spaces);
  pipeline
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PalindromeVerdict {
  pub input: String,
  pub normalized: String,
  pub is_palindrome: bool,
}

pub fn check(input: &str) -> PalindromeVerdict {
  let normalized = normalize(input);
  let is_palindrome = reads_same_both_ways(&normalized);
  debug!(input, normalized = %normalized, is_palindrome, "palindrome check");
  PalindromeVerdict {
    input: input.to_string(),
    normalized,
    is_palindrome,
  }
}

impl fmt::Display for PalindromeVerdict {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_palindrome {
      write!(formatter, "\"{}\" is a palindrome ✅", self.input)
    } else {
      write!(formatter, "\"{}\" is NOT a palindrome ❌", self.input)
    }
  }
}
