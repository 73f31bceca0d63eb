use crate::models::{DataFile, Project, Sentiment};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store has no projects")]
    NoProjects,
    #[error("unknown project: {0}")]
    UnknownProject(String),
    #[error("project id already taken: {0}")]
    DuplicateProject(String),
    #[error("file id already taken: {0}")]
    DuplicateFile(String),
}

/// Owns every project and the pointer to the one currently open.
///
/// Single writer: all mutation goes through `&mut self`, so derived views
/// always recompute against the latest state.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    projects: Vec<Project>,
    current: String,
}

impl ProjectStore {
    pub fn new(projects: Vec<Project>) -> Result<Self, StoreError> {
        let current = projects.first().ok_or(StoreError::NoProjects)?.id.clone();
        Ok(Self { projects, current })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Project, StoreError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::UnknownProject(id.to_string()))
    }

    pub fn current_id(&self) -> &str {
        &self.current
    }

    pub fn current(&self) -> &Project {
        // `current` always names a stored project; fall back to the head anyway.
        self.get(&self.current).unwrap_or(&self.projects[0])
    }

    pub fn select(&mut self, id: &str) -> Result<&Project, StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::UnknownProject(id.to_string()));
        }
        debug!(project = id, "selected project");
        self.current = id.to_string();
        Ok(self.current())
    }

    /// Adds a project at the head of the list and opens it. Ids are never
    /// shared between projects.
    pub fn insert(&mut self, project: Project) -> Result<&Project, StoreError> {
        if self.get(&project.id).is_some() {
            warn!(project = %project.id, "project id already taken");
            return Err(StoreError::DuplicateProject(project.id));
        }
        info!(project = %project.id, title = %project.title, "created project");
        self.current = project.id.clone();
        self.projects.insert(0, project);
        Ok(&self.projects[0])
    }

    pub fn rename(&mut self, id: &str, title: &str) -> Result<(), StoreError> {
        let project = self.get_mut(id)?;
        project.title = title.to_string();
        info!(project = id, title, "renamed project");
        Ok(())
    }

    /// Appends a file. An id still used by a file or by orphaned records is
    /// refused so records never move to a different file.
    pub fn add_file(&mut self, id: &str, file: DataFile) -> Result<(), StoreError> {
        let project = self.get_mut(id)?;
        if project.has_source(&file.id) {
            warn!(project = id, file = %file.id, "file id already taken");
            return Err(StoreError::DuplicateFile(file.id));
        }
        info!(project = id, file = %file.id, name = %file.name, "added data file");
        project.files.push(file);
        Ok(())
    }

    /// Drops the file entry. Its records stay in place and render as orphans.
    pub fn remove_file(&mut self, id: &str, file_id: &str) -> Result<bool, StoreError> {
        let project = self.get_mut(id)?;
        let before = project.files.len();
        project.files.retain(|f| f.id != file_id);
        let removed = project.files.len() != before;
        if removed {
            info!(project = id, file = file_id, "removed data file");
        }
        Ok(removed)
    }

    /// Relabels one record of project `id`. An unknown record is a no-op and
    /// yields `Ok(false)`.
    pub fn correct_sentiment(
        &mut self,
        id: &str,
        record_id: &str,
        sentiment: Sentiment,
    ) -> Result<bool, StoreError> {
        let project = self.get_mut(id)?;
        let changed = project.correct_sentiment(record_id, sentiment);
        if changed {
            info!(project = id, record = record_id, %sentiment, "corrected sentiment");
        } else {
            debug!(project = id, record = record_id, "correction left records unchanged");
        }
        Ok(changed)
    }
}
