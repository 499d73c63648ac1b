use exercise_pipelines::exercises::list_transform::default_names;
use exercise_pipelines::{
  append, filter_by_min_length, map_to_uppercase, remove_at, ExerciseError, ListTransformConfig, ListTransformPipeline,
};
use proptest::prelude::*;
use test_case::test_case;

fn owned(values: &[&str]) -> Vec<String> {
  values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn individual_steps_follow_the_exercise() {
  let mut names = default_names();

  let removed = remove_at(&mut names, 1).expect("remove failed");
  assert_eq!(removed, "Brian");
  assert_eq!(names, owned(&["Alice", "Carol", "Daisy", "Eve"]));

  append(&mut names, "Frank");
  assert_eq!(names, owned(&["Alice", "Carol", "Daisy", "Eve", "Frank"]));

  let uppercase_names = map_to_uppercase(&names);
  assert_eq!(uppercase_names, owned(&["ALICE", "CAROL", "DAISY", "EVE", "FRANK"]));
  assert_eq!(names, owned(&["Alice", "Carol", "Daisy", "Eve", "Frank"]));

  let long_names = filter_by_min_length(&names, 5);
  assert_eq!(long_names, owned(&["Alice", "Carol", "Daisy", "Frank"]));
  assert_eq!(names.len(), 5);
}

#[test]
fn pipeline_run_edits_in_place_and_derives_lists() {
  let pipeline = ListTransformPipeline::default();
  let mut names = default_names();

  let outcome = pipeline.run(&mut names).expect("run failed");
  assert_eq!(outcome.removed, "Brian");
  assert_eq!(names, owned(&["Alice", "Carol", "Daisy", "Eve", "Frank"]));
  assert_eq!(outcome.uppercase_names, owned(&["ALICE", "CAROL", "DAISY", "EVE", "FRANK"]));
  assert_eq!(outcome.long_names, owned(&["Alice", "Carol", "Daisy", "Frank"]));
}

#[test]
fn derived_lists_are_snapshots() {
  let pipeline = ListTransformPipeline::default();
  let mut names = default_names();
  let outcome = pipeline.run(&mut names).expect("run failed");

  names.clear();
  names.push("Zed".to_string());

  assert_eq!(outcome.uppercase_names.len(), 5);
  assert_eq!(outcome.long_names.len(), 4);
}

#[test]
fn uppercase_is_idempotent_on_unchanged_source() {
  let names = default_names();
  let first = map_to_uppercase(&names);
  let second = map_to_uppercase(&names);
  assert_eq!(first, second);
  assert_eq!(names, default_names());
}

#[test_case(&[]; "empty list")]
#[test_case(&["Alice"]; "single name")]
fn removal_from_short_list_is_out_of_range(values: &[&str]) {
  let mut names = owned(values);
  let error = remove_at(&mut names, 1).unwrap_err();
  assert_eq!(error, ExerciseError::OutOfRange { index: 1, len: values.len() });
  assert_eq!(names, owned(values));
}

#[test]
fn pipeline_propagates_out_of_range() {
  let pipeline = ListTransformPipeline::default();
  let mut names = owned(&["Alice"]);
  let result = pipeline.run(&mut names);
  assert_eq!(result, Err(ExerciseError::OutOfRange { index: 1, len: 1 }));
  assert_eq!(names, owned(&["Alice"]));
}

#[test]
fn custom_config_changes_every_parameter() {
  let config = ListTransformConfig {
    remove_index: 0,
    appended: "Zoë".to_string(),
    min_length: 3,
  };
  let pipeline = ListTransformPipeline::new(config);
  let mut names = owned(&["Al", "Bo", "Cyd"]);

  let outcome = pipeline.run(&mut names).expect("run failed");
  assert_eq!(outcome.removed, "Al");
  assert_eq!(names, owned(&["Bo", "Cyd", "Zoë"]));
  assert_eq!(outcome.uppercase_names, owned(&["BO", "CYD", "ZOË"]));
  assert_eq!(outcome.long_names, owned(&["Cyd", "Zoë"]));
}

#[test]
fn length_counts_characters_not_bytes() {
  let names = owned(&["Zoë", "Renée", "Bob"]);
  assert_eq!(filter_by_min_length(&names, 4), owned(&["Renée"]));
}

#[test]
fn trace_reports_every_step() {
  let pipeline = ListTransformPipeline::default();
  let lines: Vec<String> = pipeline
    .trace(default_names())
    .expect("trace failed")
    .iter()
    .map(|snapshot| snapshot.to_string())
    .collect();

  assert_eq!(
    lines,
    vec![
      "Step 1 - initial names: [Alice, Brian, Carol, Daisy, Eve]",
      "Step 2 - removed: Brian",
      "Step 2 - names now: [Alice, Carol, Daisy, Eve]",
      "Step 3 - after adding 'Frank': [Alice, Carol, Daisy, Eve, Frank]",
      "Step 4 - uppercaseNames (new list): [ALICE, CAROL, DAISY, EVE, FRANK]",
      "Step 5 - longNames (new list): [Alice, Carol, Daisy, Frank]",
    ]
  );
}

#[test]
fn trace_fails_like_run() {
  let pipeline = ListTransformPipeline::default();
  let error = pipeline.trace(owned(&["Alice"])).unwrap_err();
  assert_eq!(error, ExerciseError::OutOfRange { index: 1, len: 1 });
}

proptest! {
  #[test]
  fn prop_derivations_preserve_order_and_source(values in prop::collection::vec("[A-Za-z]{1,8}", 0..12), min_length in 0usize..9) {
    let before = values.clone();

    let uppercase_names = map_to_uppercase(&values);
    prop_assert_eq!(uppercase_names.len(), values.len());

    let long_names = filter_by_min_length(&values, min_length);
    let expected: Vec<String> = values.iter().filter(|value| value.len() >= min_length).cloned().collect();
    prop_assert_eq!(long_names, expected);
    prop_assert_eq!(values, before);
  }

  #[test]
  fn prop_run_grows_by_zero_net_length(values in prop::collection::vec("[A-Za-z]{1,8}", 2..12)) {
    let pipeline = ListTransformPipeline::default();
    let mut names = values.clone();
    let outcome = pipeline.run(&mut names).expect("run failed");

    prop_assert_eq!(names.len(), values.len());
    prop_assert_eq!(&outcome.removed, &values[1]);
    prop_assert_eq!(names.last().cloned(), Some("Frank".to_string()));
  }
}
