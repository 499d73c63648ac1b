use std::collections::HashMap;
use std::sync::Arc;

use crate::core::pipeline::{FallibleOperator, RegisteredActionKind, StepAction, StepControl, UnaryOperator};
use crate::error::ExerciseError;

/// Named actions that configuration files can reference with `$local`.
pub struct PipelineRegistry<ContextType> {
  unary_actions: HashMap<String, UnaryOperator<ContextType>>,
  fallible_actions: HashMap<String, FallibleOperator<ContextType>>,
  step_actions: HashMap<String, StepAction<ContextType>>,
}

impl<ContextType> PipelineRegistry<ContextType> {
  pub fn new() -> Self {
    Self {
      unary_actions: HashMap::new(),
      fallible_actions: HashMap::new(),
      step_actions: HashMap::new(),
    }
  }

  pub fn register_unary<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn)
  where
    ActionFn: Fn(ContextType) -> ContextType + Send + Sync + 'static,
  {
    self.unary_actions.insert(name.into(), Arc::new(action));
  }

  pub fn register_fallible<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn)
  where
    ActionFn: Fn(ContextType) -> Result<ContextType, ExerciseError> + Send + Sync + 'static,
  {
    self.fallible_actions.insert(name.into(), Arc::new(action));
  }

  pub fn register_action<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn)
  where
    ActionFn: Fn(ContextType, &mut StepControl<ContextType>) -> ContextType + Send + Sync + 'static,
  {
    self.step_actions.insert(name.into(), Arc::new(action));
  }

  pub fn contains(&self, name: &str) -> bool {
    self.unary_actions.contains_key(name)
      || self.fallible_actions.contains_key(name)
      || self.step_actions.contains_key(name)
  }

  /// Resolves `name` to whichever kind of action it was registered as.
  pub fn resolve(&self, name: &str) -> Result<RegisteredActionKind<ContextType>, ExerciseError> {
    if let Some(action) = self.unary_actions.get(name) {
      return Ok(RegisteredActionKind::Unary(action.clone()));
    }
    if let Some(action) = self.fallible_actions.get(name) {
      return Ok(RegisteredActionKind::Fallible(action.clone()));
    }
    if let Some(action) = self.step_actions.get(name) {
      return Ok(RegisteredActionKind::StepAction(action.clone()));
    }
    Err(ExerciseError::UnknownAction(name.to_string()))
  }
}

impl<ContextType> Default for PipelineRegistry<ContextType> {
  fn default() -> Self {
    Self::new()
  }
}
