pub mod error;
pub mod pagination;
pub mod records;
pub mod search;
