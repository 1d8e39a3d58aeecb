pub mod bootstrap;
pub mod common;
pub mod operations;
pub mod utils;
pub mod workflow;

pub use common::errors::StampError;
pub use workflow::{RunSummary, annotate_directory};
