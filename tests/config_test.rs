use exercise_pipelines::{ExerciseConfig, ExerciseError, ListTransformConfig};
use tempfile::tempdir;

#[test]
fn exercise_config_defaults_match_the_exercise() {
  let config = ExerciseConfig::from_json_str("{}").expect("config failed");
  assert_eq!(config, ExerciseConfig::default());
  assert_eq!(config.names.len(), 5);
  assert_eq!(config.list_transform, ListTransformConfig::default());
  assert!(config.normalizer.is_none());
}

#[test]
fn exercise_config_reads_camel_case_file() {
  let dir = tempdir().expect("tempdir failed");
  let path = dir.path().join("exercises.json");
  std::fs::write(
    &path,
    r#"{"names": ["Ann", "Bea"], "listTransform": {"minLength": 3}, "counterFile": "c.txt"}"#,
  )
  .expect("write failed");

  let config = ExerciseConfig::from_file(path.to_str().expect("utf-8 path")).expect("config failed");
  assert_eq!(config.names, vec!["Ann".to_string(), "Bea".to_string()]);
  assert_eq!(config.list_transform.min_length, 3);
  assert_eq!(config.list_transform.remove_index, 1);
  assert_eq!(config.list_transform.appended, "Frank");
  assert_eq!(config.counter_file.as_deref(), Some("c.txt"));
}

#[test]
fn exercise_config_rejects_wrong_types() {
  let result = ExerciseConfig::from_json_str(r#"{"names": "Alice"}"#);
  assert!(matches!(result, Err(ExerciseError::InvalidConfig(_))));
}
