//! File-based Project Store Adapter
//!
//! Stores each project as one pretty-printed JSON document named by its id
//! under a base directory. This is the durable, embedded store backing
//! saved sessions.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::decision::Project;
use crate::domain::foundation::{ProjectId, Timestamp};
use crate::ports::{ProjectRepository, ProjectStoreError};

/// File-based storage for saved projects
#[derive(Debug, Clone)]
pub struct FileProjectStore {
    base_path: PathBuf,
}

impl FileProjectStore {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileProjectStore::new("./data/projects");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a specific project
    fn project_file_path(&self, id: &ProjectId) -> PathBuf {
        self.base_path.join(format!("{}.json", id))
    }

    /// Ensure the base directory exists
    async fn ensure_base_dir(&self) -> Result<(), ProjectStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| ProjectStoreError::IoError(e.to_string()))
    }

    /// Ids become file names, so path separators are not allowed.
    fn check_id(id: &ProjectId) -> Result<(), ProjectStoreError> {
        let raw = id.as_str();
        if raw.is_empty() || raw.contains('/') || raw.contains('\\') || raw.contains("..") {
            return Err(ProjectStoreError::IoError(format!(
                "project id not usable as a file name: {:?}",
                raw
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for FileProjectStore {
    async fn list_all(&self) -> Result<Vec<Project>, ProjectStoreError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| ProjectStoreError::IoError(e.to_string()))?;

        let mut projects = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ProjectStoreError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let json = fs::read_to_string(&path)
                .await
                .map_err(|e| ProjectStoreError::IoError(e.to_string()))?;
            let project: Project = serde_json::from_str(&json)
                .map_err(|e| ProjectStoreError::DeserializationFailed(e.to_string()))?;
            projects.push(project);
        }

        // Most recently updated first; ties break by id for determinism.
        projects.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(projects)
    }

    async fn get(&self, id: &ProjectId) -> Result<Option<Project>, ProjectStoreError> {
        Self::check_id(id)?;
        let path = self.project_file_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)
            .await
            .map_err(|e| ProjectStoreError::IoError(e.to_string()))?;
        let project = serde_json::from_str(&json)
            .map_err(|e| ProjectStoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(project))
    }

    async fn save(&self, project: &Project) -> Result<Project, ProjectStoreError> {
        Self::check_id(&project.id)?;
        self.ensure_base_dir().await?;

        let mut stored = project.clone();
        stored.updated_at = Timestamp::now();

        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| ProjectStoreError::SerializationFailed(e.to_string()))?;

        fs::write(self.project_file_path(&stored.id), json)
            .await
            .map_err(|e| ProjectStoreError::IoError(e.to_string()))?;

        Ok(stored)
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectStoreError> {
        Self::check_id(id)?;
        let path = self.project_file_path(id);

        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| ProjectStoreError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::Constraints;
    use tempfile::TempDir;

    fn test_project(problem: &str) -> Project {
        Project::new("Test", problem, Constraints::default())
    }

    #[tokio::test]
    async fn save_and_get_roundtrips() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProjectStore::new(temp_dir.path());

        let project = test_project("Should we expand?");
        let stored = store.save(&project).await.unwrap();

        let loaded = store.get(&project.id).await.unwrap().unwrap();
        assert_eq!(loaded.problem, "Should we expand?");
        assert_eq!(loaded.updated_at, stored.updated_at);
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProjectStore::new(temp_dir.path());

        let found = store.get(&ProjectId::from("proj_missing")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn save_stamps_updated_at_and_preserves_created_at() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProjectStore::new(temp_dir.path());

        let project = test_project("problem one");
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let first = store.save(&project).await.unwrap();
        assert!(first.updated_at > project.updated_at);

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let second = store.save(&first).await.unwrap();

        assert_eq!(second.created_at, project.created_at);
        assert!(second.updated_at > first.updated_at);
    }

    #[tokio::test]
    async fn list_all_sorts_by_recency() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProjectStore::new(temp_dir.path());

        let older = test_project("older");
        let newer = test_project("newer");

        store.save(&older).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        store.save(&newer).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].problem, "newer");
        assert_eq!(all[1].problem, "older");
    }

    #[tokio::test]
    async fn list_all_on_missing_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProjectStore::new(temp_dir.path().join("never-created"));

        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProjectStore::new(temp_dir.path());

        let project = test_project("to delete");
        store.save(&project).await.unwrap();

        store.delete(&project.id).await.unwrap();
        assert!(store.get(&project.id).await.unwrap().is_none());

        // Second delete of the same id is not an error.
        store.delete(&project.id).await.unwrap();
    }

    #[tokio::test]
    async fn save_is_upsert_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProjectStore::new(temp_dir.path());

        let mut project = test_project("v1");
        store.save(&project).await.unwrap();

        project.problem = "v2".to_string();
        store.save(&project).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].problem, "v2");
    }

    #[tokio::test]
    async fn hostile_id_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProjectStore::new(temp_dir.path());

        let mut project = test_project("x");
        project.id = ProjectId::from("../escape");
        assert!(store.save(&project).await.is_err());
    }
}
