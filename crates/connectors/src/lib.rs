pub mod ariel;
pub mod error;
pub mod fetcher;
