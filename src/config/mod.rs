pub mod exercise_config;
pub mod json_loader;
