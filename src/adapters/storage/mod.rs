//! Project store adapters.
//!
//! Both adapters implement the ProjectRepository port: the file store is the
//! durable embedded engine, the in-memory store backs tests.

mod file_project_store;
mod in_memory_project_store;

pub use file_project_store::FileProjectStore;
pub use in_memory_project_store::InMemoryProjectStore;
