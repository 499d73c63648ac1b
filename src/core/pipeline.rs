use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::ExerciseError;

pub type UnaryOperator<ContextType> = Arc<dyn Fn(ContextType) -> ContextType + Send + Sync + 'static>;
pub type FallibleOperator<ContextType> =
  Arc<dyn Fn(ContextType) -> Result<ContextType, ExerciseError> + Send + Sync + 'static>;
pub type StepAction<ContextType> =
  Arc<dyn Fn(ContextType, &mut StepControl<ContextType>) -> ContextType + Send + Sync + 'static>;
pub type OnErrorFn<ContextType> = Arc<dyn Fn(ContextType, PipelineError) -> ContextType + Send + Sync + 'static>;

/// A failed step, located by pipeline, phase and index.
///
/// `cause` carries the typed error when the step returned one; it is `None`
/// when the step panicked or reported the failure through [`StepControl::record_error`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineError {
  pub pipeline: String,
  pub phase: String,
  pub index: usize,
  pub action_name: String,
  pub message: String,
  pub cause: Option<ExerciseError>,
}

impl PipelineError {
  pub fn into_exercise_error(self) -> ExerciseError {
    match self.cause {
      Some(cause) => cause,
      None => ExerciseError::StepFailed {
        action: self.action_name,
        message: self.message,
      },
    }
  }
}

impl fmt::Display for PipelineError {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(formatter, "{}/{}: {}", self.pipeline, self.action_name, self.message)
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionTiming {
  pub phase: String,
  pub index: usize,
  pub action_name: String,
  pub elapsed_nanos: u128,
  pub success: bool,
}

pub fn default_on_error<ContextType>(ctx: ContextType, error: PipelineError) -> ContextType {
  drop(error);
  ctx
}

pub struct StepControl<ContextType> {
  pub pipeline_name: String,
  pub on_error: OnErrorFn<ContextType>,
  pub errors: Vec<PipelineError>,
  pub timings: Vec<ActionTiming>,
  pub short_circuited: bool,

  pub phase: String,
  pub index: usize,
  pub action_name: String,

  pub run_start_instant: Option<Instant>,
}

impl<ContextType> StepControl<ContextType> {
  pub fn new(pipeline_name: impl Into<String>, on_error: OnErrorFn<ContextType>) -> Self {
    Self {
      pipeline_name: pipeline_name.into(),
      on_error,
      errors: Vec::new(),
      timings: Vec::new(),
      short_circuited: false,
      phase: "main".to_string(),
      index: 0,
      action_name: "?".to_string(),
      run_start_instant: None,
    }
  }

  pub fn begin_step(&mut self, phase: impl Into<String>, index: usize, action_name: impl Into<String>) {
    self.phase = phase.into();
    self.index = index;
    self.action_name = action_name.into();
  }

  pub fn begin_run(&mut self) {
    self.run_start_instant = Some(Instant::now());
  }

  pub fn reset(&mut self) {
    self.short_circuited = false;
    self.errors.clear();
    self.timings.clear();
    self.phase = "main".to_string();
    self.index = 0;
    self.action_name = "?".to_string();
    self.run_start_instant = None;
  }

  pub fn short_circuit(&mut self) {
    self.short_circuited = true;
  }

  pub fn is_short_circuited(&self) -> bool {
    self.short_circuited
  }

  pub fn record_error(&mut self, ctx: ContextType, message: impl Into<String>) -> ContextType {
    self.record_failure(ctx, message.into(), None)
  }

  pub(crate) fn record_failure(
    &mut self,
    ctx: ContextType,
    message: String,
    cause: Option<ExerciseError>,
  ) -> ContextType {
    let pipeline_error = PipelineError {
      pipeline: self.pipeline_name.clone(),
      phase: self.phase.clone(),
      index: self.index,
      action_name: self.action_name.clone(),
      message,
      cause,
    };
    warn!(
      pipeline = %pipeline_error.pipeline,
      action = %pipeline_error.action_name,
      message = %pipeline_error.message,
      "pipeline step failed"
    );
    self.errors.push(pipeline_error.clone());
    (self.on_error)(ctx, pipeline_error)
  }

  pub fn record_timing(&mut self, elapsed_nanos: u128, success: bool) {
    let timing = ActionTiming {
      phase: self.phase.clone(),
      index: self.index,
      action_name: self.action_name.clone(),
      elapsed_nanos,
      success,
    };
    self.timings.push(timing);
  }

  pub fn run_elapsed_nanos(&self) -> u128 {
    match self.run_start_instant {
      Some(run_start_instant) => run_start_instant.elapsed().as_nanos(),
      None => 0,
    }
  }
}

#[derive(Clone, Debug)]
pub struct PipelineResult<ContextType> {
  pub context: ContextType,
  pub short_circuited: bool,
  pub errors: Vec<PipelineError>,
  pub timings: Vec<ActionTiming>,
  pub total_nanos: u128,
}

impl<ContextType> PipelineResult<ContextType> {
  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  /// Collapses the run into the context, or the first recorded failure.
  pub fn into_result(self) -> Result<ContextType, ExerciseError> {
    let PipelineResult { context, errors, .. } = self;
    match errors.into_iter().next() {
      Some(first_error) => Err(first_error.into_exercise_error()),
      None => Ok(context),
    }
  }
}

#[derive(Clone)]
pub enum RegisteredActionKind<ContextType> {
  Unary(UnaryOperator<ContextType>),
  Fallible(FallibleOperator<ContextType>),
  StepAction(StepAction<ContextType>),
}

#[derive(Clone)]
pub struct RegisteredAction<ContextType> {
  pub name: String,
  pub kind: RegisteredActionKind<ContextType>,
}

pub(crate) struct StepFailure {
  pub message: String,
  pub cause: Option<ExerciseError>,
}

/// Invokes one action, turning both returned errors and panics into a [`StepFailure`].
pub(crate) fn call_action<ContextType>(
  kind: &RegisteredActionKind<ContextType>,
  ctx: ContextType,
  control: &mut StepControl<ContextType>,
) -> Result<ContextType, StepFailure> {
  let call_result: std::thread::Result<Result<ContextType, ExerciseError>> = match kind {
    RegisteredActionKind::Unary(unary_action) => {
      std::panic::catch_unwind(AssertUnwindSafe(|| Ok((unary_action)(ctx))))
    }
    RegisteredActionKind::Fallible(fallible_action) => {
      std::panic::catch_unwind(AssertUnwindSafe(|| (fallible_action)(ctx)))
    }
    RegisteredActionKind::StepAction(step_action) => {
      std::panic::catch_unwind(AssertUnwindSafe(|| Ok((step_action)(ctx, control))))
    }
  };

  match call_result {
    Ok(Ok(output_ctx)) => Ok(output_ctx),
    Ok(Err(error)) => Err(StepFailure {
      message: error.to_string(),
      cause: Some(error),
    }),
    Err(payload) => Err(StepFailure {
      message: safe_panic_to_string(payload),
      cause: None,
    }),
  }
}

pub fn format_action_name(phase: &str, index: usize, name: &str) -> String {
  let prefix = match phase {
    "pre" => "pre",
    "post" => "post",
    _ => "s",
  };

  if name.is_empty() {
    return format!("{prefix}{index}");
  }
  format!("{prefix}{index}:{name}")
}

pub fn safe_panic_to_string(payload: Box<dyn Any + Send>) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    return message.to_string();
  }
  if let Some(message) = payload.downcast_ref::<String>() {
    return message.clone();
  }
  "panic".to_string()
}

/// An ordered set of named actions run in three phases: `pre`, `main`, `post`.
///
/// `main` stops early when the run is short-circuited; `post` always runs.
pub struct Pipeline<ContextType> {
  pub name: String,
  pub short_circuit_on_exception: bool,
  pub on_error: OnErrorFn<ContextType>,

  pub pre_actions: Vec<RegisteredAction<ContextType>>,
  pub actions: Vec<RegisteredAction<ContextType>>,
  pub post_actions: Vec<RegisteredAction<ContextType>>,
}

impl<ContextType> Pipeline<ContextType>
where
  ContextType: 'static,
{
  pub fn new(name: impl Into<String>, short_circuit_on_exception: bool) -> Self {
    Self {
      name: name.into(),
      short_circuit_on_exception,
      on_error: Arc::new(default_on_error),
      pre_actions: Vec::new(),
      actions: Vec::new(),
      post_actions: Vec::new(),
    }
  }

  pub fn on_error_handler<ErrorHandler>(&mut self, handler: ErrorHandler) -> &mut Self
  where
    ErrorHandler: Fn(ContextType, PipelineError) -> ContextType + Send + Sync + 'static,
  {
    self.on_error = Arc::new(handler);
    self
  }

  pub fn len(&self) -> usize {
    self.pre_actions.len() + self.actions.len() + self.post_actions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn add_pre_action<ActionFn>(&mut self, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType) -> ContextType + Send + Sync + 'static,
  {
    self.add_pre_action_named("", action)
  }

  pub fn add_pre_action_named<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType) -> ContextType + Send + Sync + 'static,
  {
    self.push_registered("pre", name.into(), RegisteredActionKind::Unary(Arc::new(action)))
  }

  pub fn add_pre_action_control_named<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType, &mut StepControl<ContextType>) -> ContextType + Send + Sync + 'static,
  {
    self.push_registered("pre", name.into(), RegisteredActionKind::StepAction(Arc::new(action)))
  }

  pub fn add_action<ActionFn>(&mut self, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType) -> ContextType + Send + Sync + 'static,
  {
    self.add_action_named("", action)
  }

  pub fn add_action_named<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType) -> ContextType + Send + Sync + 'static,
  {
    self.push_registered("main", name.into(), RegisteredActionKind::Unary(Arc::new(action)))
  }

  pub fn add_fallible_action_named<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType) -> Result<ContextType, ExerciseError> + Send + Sync + 'static,
  {
    self.push_registered("main", name.into(), RegisteredActionKind::Fallible(Arc::new(action)))
  }

  pub fn add_action_control<ActionFn>(&mut self, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType, &mut StepControl<ContextType>) -> ContextType + Send + Sync + 'static,
  {
    self.add_action_control_named("", action)
  }

  pub fn add_action_control_named<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType, &mut StepControl<ContextType>) -> ContextType + Send + Sync + 'static,
  {
    self.push_registered("main", name.into(), RegisteredActionKind::StepAction(Arc::new(action)))
  }

  pub fn add_post_action<ActionFn>(&mut self, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType) -> ContextType + Send + Sync + 'static,
  {
    self.add_post_action_named("", action)
  }

  pub fn add_post_action_named<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType) -> ContextType + Send + Sync + 'static,
  {
    self.push_registered("post", name.into(), RegisteredActionKind::Unary(Arc::new(action)))
  }

  pub fn add_post_action_control<ActionFn>(&mut self, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType, &mut StepControl<ContextType>) -> ContextType + Send + Sync + 'static,
  {
    self.add_post_action_control_named("", action)
  }

  pub fn add_post_action_control_named<ActionFn>(&mut self, name: impl Into<String>, action: ActionFn) -> &mut Self
  where
    ActionFn: Fn(ContextType, &mut StepControl<ContextType>) -> ContextType + Send + Sync + 'static,
  {
    self.push_registered("post", name.into(), RegisteredActionKind::StepAction(Arc::new(action)))
  }

  /// Appends an already-wrapped action to the named phase (`pre`, `post`, anything else is `main`).
  pub fn push_registered(&mut self, phase: &str, name: String, kind: RegisteredActionKind<ContextType>) -> &mut Self {
    let registered_action = RegisteredAction { name, kind };
    match phase {
      "pre" => self.pre_actions.push(registered_action),
      "post" => self.post_actions.push(registered_action),
      _ => self.actions.push(registered_action),
    }
    self
  }
}

impl<ContextType> Pipeline<ContextType>
where
  ContextType: Clone + 'static,
{
  pub fn run(&self, input_value: ContextType) -> ContextType {
    self.execute(input_value).context
  }

  pub fn execute(&self, input_value: ContextType) -> PipelineResult<ContextType> {
    let mut ctx = input_value;
    let mut control = StepControl::new(self.name.clone(), self.on_error.clone());
    control.begin_run();

    ctx = self.run_phase("pre", ctx, &self.pre_actions, &mut control, false);
    if !control.is_short_circuited() {
      ctx = self.run_phase("main", ctx, &self.actions, &mut control, true);
    }
    ctx = self.run_phase("post", ctx, &self.post_actions, &mut control, false);

    let total_nanos = control.run_elapsed_nanos();
    debug!(
      pipeline = %self.name,
      errors = control.errors.len(),
      short_circuited = control.is_short_circuited(),
      total_nanos,
      "pipeline run finished"
    );
    PipelineResult {
      context: ctx,
      short_circuited: control.is_short_circuited(),
      errors: std::mem::take(&mut control.errors),
      timings: std::mem::take(&mut control.timings),
      total_nanos,
    }
  }

  fn run_phase(
    &self,
    phase: &str,
    start_ctx: ContextType,
    actions: &[RegisteredAction<ContextType>],
    control: &mut StepControl<ContextType>,
    stop_on_short_circuit: bool,
  ) -> ContextType {
    let mut ctx = start_ctx;
    for (step_index, registered_action) in actions.iter().enumerate() {
      let action_name = format_action_name(phase, step_index, &registered_action.name);
      control.begin_step(phase, step_index, action_name);

      let step_start_instant = Instant::now();
      let ctx_before_step = ctx.clone();
      let step_succeeded = match call_action(&registered_action.kind, ctx, control) {
        Ok(output_ctx) => {
          ctx = output_ctx;
          true
        }
        Err(failure) => {
          ctx = control.record_failure(ctx_before_step, failure.message, failure.cause);
          if self.short_circuit_on_exception {
            control.short_circuit();
          }
          false
        }
      };

      let step_elapsed_nanos = step_start_instant.elapsed().as_nanos();
      debug!(action = %control.action_name, elapsed_nanos = step_elapsed_nanos, step_succeeded, "step finished");
      control.record_timing(step_elapsed_nanos, step_succeeded);

      if stop_on_short_circuit && control.is_short_circuited() {
        break;
      }
    }
    ctx
  }
}
