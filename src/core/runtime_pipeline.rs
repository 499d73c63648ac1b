use std::sync::Arc;

use crate::core::pipeline::{
  call_action, default_on_error, format_action_name, OnErrorFn, Pipeline, PipelineError, RegisteredAction,
  RegisteredActionKind, StepControl,
};
use crate::error::ExerciseError;

/// An eager pipeline: every added step is applied to the current value at once.
///
/// Steps added after a short-circuit are recorded (so [`RuntimePipeline::freeze`]
/// still sees them) but no longer applied.
pub struct RuntimePipeline<ContextType> {
  pub name: String,
  pub short_circuit_on_exception: bool,
  pub on_error: OnErrorFn<ContextType>,

  ended: bool,
  current: Option<ContextType>,

  actions: Vec<RegisteredAction<ContextType>>,
  control: StepControl<ContextType>,
}

impl<ContextType> RuntimePipeline<ContextType>
where
  ContextType: Clone + 'static,
{
  pub fn new(name: impl Into<String>, short_circuit_on_exception: bool, initial: ContextType) -> Self {
    let name_value = name.into();
    let on_error: OnErrorFn<ContextType> = Arc::new(default_on_error);
    let control = StepControl::new(name_value.clone(), on_error.clone());

    Self {
      name: name_value,
      short_circuit_on_exception,
      on_error,
      ended: false,
      current: Some(initial),
      actions: Vec::new(),
      control,
    }
  }

  pub fn value(&self) -> Option<&ContextType> {
    self.current.as_ref()
  }

  pub fn is_ended(&self) -> bool {
    self.ended
  }

  pub fn errors(&self) -> &[PipelineError] {
    &self.control.errors
  }

  /// The first recorded failure as a typed error, if any step failed.
  pub fn first_error(&self) -> Option<ExerciseError> {
    self.control.errors.first().cloned().map(PipelineError::into_exercise_error)
  }

  pub fn reset(&mut self, value: ContextType) {
    self.current = Some(value);
    self.ended = false;
    self.control.reset();
  }

  pub fn on_error_handler<ErrorHandler>(&mut self, handler: ErrorHandler)
  where
    ErrorHandler: Fn(ContextType, PipelineError) -> ContextType + Send + Sync + 'static,
  {
    self.on_error = Arc::new(handler);
    self.control.on_error = self.on_error.clone();
  }

  pub fn add_action_named<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn) -> Option<&ContextType>
  where
    ActionFn: Fn(ContextType) -> ContextType + Send + Sync + 'static,
  {
    self.push_and_apply(name.into(), RegisteredActionKind::Unary(Arc::new(action)))
  }

  pub fn add_fallible_action_named<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn) -> Option<&ContextType>
  where
    ActionFn: Fn(ContextType) -> Result<ContextType, ExerciseError> + Send + Sync + 'static,
  {
    self.push_and_apply(name.into(), RegisteredActionKind::Fallible(Arc::new(action)))
  }

  pub fn add_action_control_named<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn) -> Option<&ContextType>
  where
    ActionFn: Fn(ContextType, &mut StepControl<ContextType>) -> ContextType + Send + Sync + 'static,
  {
    self.push_and_apply(name.into(), RegisteredActionKind::StepAction(Arc::new(action)))
  }

  pub fn freeze(&self) -> Pipeline<ContextType> {
    let mut pipeline = Pipeline::new(self.name.clone(), self.short_circuit_on_exception);
    pipeline.on_error = self.on_error.clone();
    pipeline.actions = self.actions.clone();
    pipeline
  }

  fn push_and_apply(&mut self, name: String, kind: RegisteredActionKind<ContextType>) -> Option<&ContextType> {
    let index = self.actions.len();
    let registered_action = RegisteredAction { name, kind };
    self.actions.push(registered_action.clone());
    self.apply_action(&registered_action, index)
  }

  fn apply_action(&mut self, registered_action: &RegisteredAction<ContextType>, index: usize) -> Option<&ContextType> {
    if self.ended {
      return self.current.as_ref();
    }

    let current_value = self.current.take()?;

    let step_name = format_action_name("main", index, &registered_action.name);
    self.control.begin_step("main", index, step_name);

    let ctx_before_step = current_value.clone();
    match call_action(&registered_action.kind, current_value, &mut self.control) {
      Ok(output_value) => {
        self.current = Some(output_value);
      }
      Err(failure) => {
        let updated = self.control.record_failure(ctx_before_step, failure.message, failure.cause);
        self.current = Some(updated);
        if self.short_circuit_on_exception {
          self.control.short_circuit();
        }
      }
    }

    if self.control.is_short_circuited() {
      self.ended = true;
    }

    self.current.as_ref()
  }
}
