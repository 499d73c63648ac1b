pub mod list_transform;
pub mod palindrome;
pub mod session_counter;
