use exercise_pipelines::{ExerciseError, SessionCounter};
use tempfile::tempdir;

#[test]
fn save_then_load_restores_counter() {
  let dir = tempdir().expect("tempdir failed");
  let mut storage = SessionCounter::new(dir.path().join("session.txt"));
  assert_eq!(storage.get(), 0);

  storage.set(3);
  storage.save().expect("save failed");

  storage.set(0);
  assert_eq!(storage.get(), 0);

  assert_eq!(storage.load().expect("load failed"), 3);
  assert_eq!(storage.get(), 3);
}

#[test]
fn save_creates_parent_directories() {
  let dir = tempdir().expect("tempdir failed");
  let path = dir.path().join("build").join("tmp").join("session-a.txt");
  let mut storage = SessionCounter::new(&path);
  storage.increment();
  storage.increment();
  storage.save().expect("save failed");

  assert_eq!(std::fs::read_to_string(&path).expect("read failed"), "2");
}

#[test]
fn garbage_content_loads_as_zero() {
  let dir = tempdir().expect("tempdir failed");
  let path = dir.path().join("session.txt");
  std::fs::write(&path, "not-a-number").expect("write failed");

  let mut storage = SessionCounter::new(&path);
  storage.set(9);
  assert_eq!(storage.load().expect("load failed"), 0);
}

#[test]
fn missing_file_is_an_io_error() {
  let dir = tempdir().expect("tempdir failed");
  let mut storage = SessionCounter::new(dir.path().join("absent.txt"));
  assert!(matches!(storage.load(), Err(ExerciseError::Io { .. })));
}

#[test]
fn display_mirrors_storage_description() {
  let mut storage = SessionCounter::new("session.txt");
  storage.set(4);
  assert_eq!(storage.to_string(), "SessionStorage(file='session.txt', counter=4)");
}

#[test]
fn increment_wraps_at_max() {
  let dir = tempdir().expect("tempdir failed");
  let path = dir.path().join("session.txt");
  std::fs::write(&path, i64::MAX.to_string()).expect("write failed");

  let mut storage = SessionCounter::new(&path);
  assert_eq!(storage.load().expect("load failed"), i64::MAX);
  assert_eq!(storage.increment(), i64::MIN);
}

#[test]
fn load_trims_surrounding_whitespace() {
  let dir = tempdir().expect("tempdir failed");
  let path = dir.path().join("session.txt");
  std::fs::write(&path, " 3\n").expect("write failed");

  let mut storage = SessionCounter::new(&path);
  assert_eq!(storage.load().expect("load failed"), 3);
}
