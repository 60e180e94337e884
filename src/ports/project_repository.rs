//! Project Repository Port - Interface for the embedded project store.
//!
//! Keeps the rest of the system storage-engine-agnostic: the durable
//! adapter persists one record per project id, and tests swap in an
//! in-memory fake.

use async_trait::async_trait;

use crate::domain::decision::Project;
use crate::domain::foundation::ProjectId;

/// Errors that can occur during project store operations
#[derive(Debug, thiserror::Error)]
pub enum ProjectStoreError {
    #[error("Failed to serialize project: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize project: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and loading saved projects
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// List every stored project, most recently updated first.
    ///
    /// Ties on `updatedAt` break deterministically by id.
    async fn list_all(&self) -> Result<Vec<Project>, ProjectStoreError>;

    /// Load one project by id.
    async fn get(&self, id: &ProjectId) -> Result<Option<Project>, ProjectStoreError>;

    /// Upsert by id. The store stamps `updatedAt` to the moment of the
    /// call, regardless of what the caller supplied, and preserves the
    /// caller's `createdAt`. Returns the record as stored.
    async fn save(&self, project: &Project) -> Result<Project, ProjectStoreError>;

    /// Delete by id. Idempotent: deleting a nonexistent id is not an error.
    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectStoreError>;
}
