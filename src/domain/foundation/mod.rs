//! Foundation value objects shared across the domain.

mod ids;
mod timestamp;

pub use ids::ProjectId;
pub use timestamp::Timestamp;
