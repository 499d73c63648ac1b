pub mod text_steps;
