pub mod error;
pub mod metrics;
pub mod scroller;
pub mod settings;
