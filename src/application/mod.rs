//! Application layer: command handlers and their error taxonomy.

mod error;
pub mod handlers;

pub use error::DecisionError;
