pub mod metrics_actions;
pub mod pipeline;
pub mod registry;
pub mod runtime_pipeline;
