//! In-Memory Project Store Adapter
//!
//! Stores projects in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::decision::Project;
use crate::domain::foundation::{ProjectId, Timestamp};
use crate::ports::{ProjectRepository, ProjectStoreError};

/// In-memory storage for saved projects
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectStore {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.projects.write().await.clear();
    }

    /// Get the number of stored projects
    pub async fn count(&self) -> usize {
        self.projects.read().await.len()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectStore {
    async fn list_all(&self) -> Result<Vec<Project>, ProjectStoreError> {
        let projects = self.projects.read().await;
        let mut all: Vec<Project> = projects.values().cloned().collect();

        all.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(all)
    }

    async fn get(&self, id: &ProjectId) -> Result<Option<Project>, ProjectStoreError> {
        let projects = self.projects.read().await;
        Ok(projects.get(id).cloned())
    }

    async fn save(&self, project: &Project) -> Result<Project, ProjectStoreError> {
        let mut stored = project.clone();
        stored.updated_at = Timestamp::now();

        let mut projects = self.projects.write().await;
        projects.insert(stored.id.clone(), stored.clone());

        Ok(stored)
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectStoreError> {
        self.projects.write().await.remove(id);
        Ok(())
    }
}
