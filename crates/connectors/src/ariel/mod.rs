pub mod client;
pub mod results;
pub mod status;
