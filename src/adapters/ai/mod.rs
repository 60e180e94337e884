//! Generation provider adapters.

mod gemini_provider;
mod mock_provider;
mod retry;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockGenerationProvider, MockOutcome};
pub use retry::RetryingGenerationProvider;
