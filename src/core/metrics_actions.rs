use std::collections::BTreeMap;

use serde_json::{Number, Value};
use tracing::info;

use crate::core::pipeline::StepControl;

fn millis_value(nanos: u128) -> Value {
  let millis = (nanos as f64) / 1_000_000.0;
  Number::from_f64(millis).map(Value::Number).unwrap_or_else(|| Value::from(0))
}

/// Builds the JSON summary of the run so far: name, error count, short-circuit flag and latencies.
pub fn metrics_snapshot<ContextType>(control: &StepControl<ContextType>) -> Value {
  let mut metrics_map: BTreeMap<String, Value> = BTreeMap::new();

  metrics_map.insert("pipeline".to_string(), Value::String(control.pipeline_name.clone()));
  metrics_map.insert("shortCircuited".to_string(), Value::Bool(control.is_short_circuited()));
  metrics_map.insert("errorCount".to_string(), Value::from(control.errors.len()));
  metrics_map.insert("pipelineLatencyMs".to_string(), millis_value(control.run_elapsed_nanos()));

  let mut action_latency_ms: BTreeMap<String, Value> = BTreeMap::new();
  for timing in &control.timings {
    action_latency_ms.insert(timing.action_name.clone(), millis_value(timing.elapsed_nanos));
  }
  metrics_map.insert(
    "actionLatencyMs".to_string(),
    serde_json::to_value(action_latency_ms).unwrap_or_default(),
  );

  serde_json::to_value(metrics_map).unwrap_or_default()
}

/// Control action that logs [`metrics_snapshot`] and passes the context through unchanged.
pub fn log_metrics<ContextType>(ctx: ContextType, control: &mut StepControl<ContextType>) -> ContextType {
  let snapshot = metrics_snapshot(control);
  info!(pipeline = %control.pipeline_name, metrics = %snapshot, "pipeline metrics");
  ctx
}
