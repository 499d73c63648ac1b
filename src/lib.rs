pub mod config;
pub mod core;
pub mod error;
pub mod exercises;
pub mod steps;

pub use crate::config::exercise_config::ExerciseConfig;
pub use crate::config::json_loader::PipelineJsonLoader;
pub use crate::core::metrics_actions::{log_metrics, metrics_snapshot};
pub use crate::core::pipeline::{
  ActionTiming, Pipeline, PipelineError, PipelineResult, StepAction, StepControl, UnaryOperator,
};
pub use crate::core::registry::PipelineRegistry;
pub use crate::core::runtime_pipeline::RuntimePipeline;
pub use crate::error::ExerciseError;
pub use crate::exercises::list_transform::{
  append, filter_by_min_length, map_to_uppercase, remove_at, ListTransformConfig, ListTransformOutcome,
  ListTransformPipeline,
};
pub use crate::exercises::palindrome::{is_palindrome, is_palindrome_with, normalize, PalindromeVerdict};
pub use crate::exercises::session_counter::SessionCounter;
pub use crate::steps::text_steps::text_step_registry;
