//! The list-transformation exercise: remove, append, uppercase, filter.
//!
//! Structural edits happen in place on the caller's list. The uppercase and
//! filtered lists are new allocations that never alias the source.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::pipeline::Pipeline;
use crate::core::runtime_pipeline::RuntimePipeline;
use crate::error::ExerciseError;

pub const DEFAULT_NAMES: [&str; 5] = ["Alice", "Brian", "Carol", "Daisy", "Eve"];

pub fn default_names() -> Vec<String> {
  DEFAULT_NAMES.iter().map(|name| name.to_string()).collect()
}

/// Removes and returns the element at `index`.
///
/// The index is bounds-checked: a missing position yields
/// [`ExerciseError::OutOfRange`] and leaves the list untouched.
pub fn remove_at(list: &mut Vec<String>, index: usize) -> Result<String, ExerciseError> {
  if index >= list.len() {
    return Err(ExerciseError::OutOfRange { index, len: list.len() });
  }
  Ok(list.remove(index))
}

pub fn append(list: &mut Vec<String>, value: impl Into<String>) {
  list.push(value.into());
}

pub fn map_to_uppercase(list: &[String]) -> Vec<String> {
  list.iter().map(|name| name.to_uppercase()).collect()
}

/// Keeps names with at least `min_length` characters (Unicode scalar values).
pub fn filter_by_min_length(list: &[String], min_length: usize) -> Vec<String> {
  list
    .iter()
    .filter(|name| name.chars().count() >= min_length)
    .cloned()
    .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListTransformConfig {
  pub remove_index: usize,
  pub appended: String,
  pub min_length: usize,
}

impl Default for ListTransformConfig {
  fn default() -> Self {
    Self {
      remove_index: 1,
      appended: "Frank".to_string(),
      min_length: 5,
    }
  }
}

/// Pipeline context threaded through the four steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameListContext {
  pub names: Vec<String>,
  pub removed: Option<String>,
  pub uppercase_names: Vec<String>,
  pub long_names: Vec<String>,
}

impl NameListContext {
  pub fn new(names: Vec<String>) -> Self {
    Self {
      names,
      ..Self::default()
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListTransformOutcome {
  pub removed: String,
  pub uppercase_names: Vec<String>,
  pub long_names: Vec<String>,
}

/// One labelled intermediate state of [`ListTransformPipeline::trace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepSnapshot {
  pub step: usize,
  pub label: String,
  pub values: Vec<String>,
  /// Renders `values` as a bracketed list; otherwise they are joined bare.
  pub is_list: bool,
}

impl StepSnapshot {
  fn new(step: usize, label: impl Into<String>, values: Vec<String>) -> Self {
    Self {
      step,
      label: label.into(),
      values,
      is_list: true,
    }
  }

  fn single(step: usize, label: impl Into<String>, value: String) -> Self {
    Self {
      is_list: false,
      ..Self::new(step, label, vec![value])
    }
  }
}

impl fmt::Display for StepSnapshot {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_list {
      write!(formatter, "Step {} - {}: [{}]", self.step, self.label, self.values.join(", "))
    } else {
      write!(formatter, "Step {} - {}: {}", self.step, self.label, self.values.join(", "))
    }
  }
}

fn removal_step(index: usize) -> impl Fn(NameListContext) -> Result<NameListContext, ExerciseError> + Send + Sync {
  move |mut ctx: NameListContext| {
    let removed = remove_at(&mut ctx.names, index)?;
    debug!(index, removed = %removed, "removed name");
    ctx.removed = Some(removed);
    Ok(ctx)
  }
}

fn append_step(value: String) -> impl Fn(NameListContext) -> NameListContext + Send + Sync {
  move |mut ctx: NameListContext| {
    append(&mut ctx.names, value.clone());
    ctx
  }
}

fn uppercase_step(mut ctx: NameListContext) -> NameListContext {
  ctx.uppercase_names = map_to_uppercase(&ctx.names);
  ctx
}

fn filter_step(min_length: usize) -> impl Fn(NameListContext) -> NameListContext + Send + Sync {
  move |mut ctx: NameListContext| {
    ctx.long_names = filter_by_min_length(&ctx.names, min_length);
    ctx
  }
}

/// Runs remove-at, append, uppercase and filter, in that order.
///
/// The first failure stops the run and is returned to the caller as is.
pub struct ListTransformPipeline {
  config: ListTransformConfig,
  pipeline: Pipeline<NameListContext>,
}

impl ListTransformPipeline {
  pub fn new(config: ListTransformConfig) -> Self {
    let mut pipeline = Pipeline::new("list_transform", true);
    pipeline.add_fallible_action_named("remove_at", removal_step(config.remove_index));
    pipeline.add_action_named("append", append_step(config.appended.clone()));
    pipeline.add_action_named("map_to_uppercase", uppercase_step);
    pipeline.add_action_named("filter_by_min_length", filter_step(config.min_length));
    Self { config, pipeline }
  }

  pub fn config(&self) -> &ListTransformConfig {
    &self.config
  }

  pub fn run(&self, names: &mut Vec<String>) -> Result<ListTransformOutcome, ExerciseError> {
    let result = self.pipeline.execute(NameListContext::new(std::mem::take(names)));
    let first_error = result.errors.first().cloned();
    let context = result.context;
    *names = context.names;

    if let Some(pipeline_error) = first_error {
      return Err(pipeline_error.into_exercise_error());
    }

    Ok(ListTransformOutcome {
      removed: context.removed.unwrap_or_default(),
      uppercase_names: context.uppercase_names,
      long_names: context.long_names,
    })
  }

  /// Runs the same steps one at a time and records the list after each of them.
  pub fn trace(&self, names: Vec<String>) -> Result<Vec<StepSnapshot>, ExerciseError> {
    let mut snapshots = vec![StepSnapshot::new(1, "initial names", names.clone())];
    let mut runtime = RuntimePipeline::new("list_transform_trace", true, NameListContext::new(names));

    runtime.add_fallible_action_named("remove_at", removal_step(self.config.remove_index));
    if let Some(error) = runtime.first_error() {
      return Err(error);
    }
    if let Some(ctx) = runtime.value() {
      snapshots.push(StepSnapshot::single(2, "removed", ctx.removed.clone().unwrap_or_default()));
      snapshots.push(StepSnapshot::new(2, "names now", ctx.names.clone()));
    }

    if let Some(ctx) = runtime.add_action_named("append", append_step(self.config.appended.clone())) {
      let label = format!("after adding '{}'", self.config.appended);
      snapshots.push(StepSnapshot::new(3, label, ctx.names.clone()));
    }

    if let Some(ctx) = runtime.add_action_named("map_to_uppercase", uppercase_step) {
      snapshots.push(StepSnapshot::new(4, "uppercaseNames (new list)", ctx.uppercase_names.clone()));
    }

    if let Some(ctx) = runtime.add_action_named("filter_by_min_length", filter_step(self.config.min_length)) {
      snapshots.push(StepSnapshot::new(5, "longNames (new list)", ctx.long_names.clone()));
    }

    Ok(snapshots)
  }
}

impl Default for ListTransformPipeline {
  fn default() -> Self {
    Self::new(ListTransformConfig::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn failed_run_leaves_caller_list_untouched() {
    let pipeline = ListTransformPipeline::default();
    let mut names = vec!["Solo".to_string()];
    let result = pipeline.run(&mut names);
    assert_eq!(result, Err(ExerciseError::OutOfRange { index: 1, len: 1 }));
    assert_eq!(names, vec!["Solo".to_string()]);
  }

  #[test]
  fn snapshot_display_matches_exercise_output() {
    let snapshot = StepSnapshot::new(3, "after adding 'Frank'", vec!["Alice".to_string(), "Frank".to_string()]);
    assert_eq!(snapshot.to_string(), "Step 3 - after adding 'Frank': [Alice, Frank]");
  }

  #[test]
  fn single_value_snapshot_has_no_brackets() {
    let snapshot = StepSnapshot::single(2, "removed", "Brian".to_string());
    assert_eq!(snapshot.to_string(), "Step 2 - removed: Brian");
  }
}
