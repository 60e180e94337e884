//! Command handlers for the generation call sites.
//!
//! Each operation is an explicit command consumed by its handler; the HTTP
//! layer stays a thin translation over these.

mod clarify;
mod ping;
mod produce;

pub use clarify::{ClarifyCommand, ClarifyHandler};
pub use ping::DiagnosticPingHandler;
pub use produce::{ProduceCommand, ProduceHandler};

/// Minimum trimmed problem length accepted by clarify and produce.
pub const MIN_PROBLEM_CHARS: usize = 10;
