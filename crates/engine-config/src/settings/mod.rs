pub mod ariel;
pub mod error;
