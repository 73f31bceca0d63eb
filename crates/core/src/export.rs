//! Simulated CSV export. Nothing is written; the job waits a fixed delay and
//! reports what would have been exported.

use std::time::Duration;
use storage::models::Project;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("no files selected for export")]
    NothingSelected,
    #[error("unknown file: {0}")]
    UnknownFile(String),
}

/// Export dialog state. Unlike the browser's selector this one may be emptied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    selected: Vec<String>,
    pub merge: bool,
}

impl ExportPlan {
    pub fn for_project(project: &Project) -> Self {
        Self {
            selected: project.file_ids(),
            merge: true,
        }
    }

    /// Plan for an explicit set of file ids; repeats collapse and an empty
    /// list means the whole project. Ids that name no file are rejected.
    pub fn with_files<I, S>(project: &Project, ids: I) -> Result<Self, ExportError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected: Vec<String> = Vec::new();
        for id in ids {
            let id = id.as_ref();
            if project.file(id).is_none() {
                warn!(project = %project.id, file = id, "export refused: unknown file");
                return Err(ExportError::UnknownFile(id.to_string()));
            }
            if !selected.iter().any(|s| s == id) {
                selected.push(id.to_string());
            }
        }
        if selected.is_empty() {
            return Ok(Self::for_project(project));
        }
        Ok(Self {
            selected,
            merge: true,
        })
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_all_selected(&self, project: &Project) -> bool {
        !project.files.is_empty() && project.files.iter().all(|f| self.selected.contains(&f.id))
    }

    pub fn toggle_file(&mut self, file_id: &str) {
        if self.selected.iter().any(|id| id == file_id) {
            self.selected.retain(|id| id != file_id);
        } else {
            self.selected.push(file_id.to_string());
        }
    }

    pub fn toggle_all(&mut self, project: &Project) {
        if self.is_all_selected(project) {
            self.selected.clear();
        } else {
            self.selected = project.file_ids();
        }
    }

    pub fn dropdown_label(&self, project: &Project) -> String {
        match self.selected.as_slice() {
            [] => "Выберите файлы...".to_string(),
            _ if self.is_all_selected(project) => "Весь проект".to_string(),
            [only] => project
                .file(only)
                .map(|f| f.name.clone())
                .unwrap_or_else(|| "1 файл".to_string()),
            many => format!("Выбрано: {} файл(а)", many.len()),
        }
    }

    /// Operator message shown once the export finishes.
    pub fn completion_message(&self, project: &Project) -> String {
        let count = self.selected.len();
        let scope = if self.is_all_selected(project) {
            "Весь проект".to_string()
        } else {
            format!("{count} файл(а)")
        };
        let merged = if self.merge && count > 1 {
            " (объединенный)"
        } else {
            ""
        };
        format!("Экспорт успешно завершен!\nДанные: {scope}{merged}")
    }

    /// Waits `delay`, then reports success. Refuses an empty selection.
    pub async fn run(&self, project: &Project, delay: Duration) -> Result<String, ExportError> {
        if self.selected.is_empty() {
            warn!(project = %project.id, "export refused: empty selection");
            return Err(ExportError::NothingSelected);
        }
        tokio::time::sleep(delay).await;
        let message = self.completion_message(project);
        info!(project = %project.id, files = self.selected.len(), merge = self.merge, "export finished");
        Ok(message)
    }
}
