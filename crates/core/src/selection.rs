use storage::models::{DataFile, Project};
use tracing::debug;

/// Data sources the operator is looking at. Order follows the clicks.
///
/// Ids of removed files stay selected while records still point at them, so
/// those records keep showing up under the unknown-file label until the
/// operator deselects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    ids: Vec<String>,
}

impl FileSelection {
    pub fn all(files: &[DataFile]) -> Self {
        Self {
            ids: files.iter().map(|f| f.id.clone()).collect(),
        }
    }

    /// Explicit subset; ids that are not sources of `project` are dropped and
    /// an empty result selects every file.
    pub fn only<I, S>(ids: I, project: &Project) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self { ids: Vec::new() };
        for id in ids {
            let id = id.into();
            if !selection.contains(&id) {
                selection.ids.push(id);
            }
        }
        selection.sync(project);
        selection
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, file_id: &str) -> bool {
        self.ids.iter().any(|id| id == file_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Adds or removes `file_id`. The last selected file cannot be removed.
    /// Returns `true` when the selection changed.
    pub fn toggle(&mut self, file_id: &str) -> bool {
        if self.contains(file_id) {
            if self.ids.len() <= 1 {
                debug!(file = file_id, "refusing to deselect the last data source");
                return false;
            }
            self.ids.retain(|id| id != file_id);
        } else {
            self.ids.push(file_id.to_string());
        }
        true
    }

    /// Drops ids that are no longer a source of `project`; falls back to every
    /// file if nothing would be left. Returns `true` when the selection changed.
    pub fn sync(&mut self, project: &Project) -> bool {
        let before = self.ids.clone();
        self.ids.retain(|id| project.has_source(id));
        if self.ids.is_empty() {
            self.ids = project.file_ids();
        }
        self.ids != before
    }

    /// "Все данные" only when exactly the project's files are selected.
    pub fn label(&self, files: &[DataFile]) -> String {
        let everything =
            self.ids.len() == files.len() && files.iter().all(|f| self.contains(&f.id));
        if everything {
            "Все данные".to_string()
        } else {
            format!("Выбрано: {}", self.ids.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::models::{Channel, Kpi, Record, Sentiment};

    fn files(ids: &[&str]) -> Vec<DataFile> {
        ids.iter()
            .map(|id| DataFile {
                id: id.to_string(),
                name: format!("{id}.csv"),
                upload_date: String::new(),
                row_count: 0,
            })
            .collect()
    }

    fn project(file_ids: &[&str], record_files: &[&str]) -> Project {
        Project {
            id: "p".into(),
            title: "t".into(),
            description: String::new(),
            kpi: Kpi::default(),
            records: record_files
                .iter()
                .enumerate()
                .map(|(i, f)| Record {
                    id: format!("r{i}"),
                    text: "текст".into(),
                    source: Channel::Vk,
                    file_id: f.to_string(),
                    sentiment: Sentiment::Neutral,
                    confidence: 0.7,
                    date: String::new(),
                })
                .collect(),
            keywords: vec![],
            ai_insights: vec![],
            files: files(file_ids),
        }
    }

    #[test]
    fn last_file_stays_selected() {
        let files = files(&["f1", "f2"]);
        let mut sel = FileSelection::all(&files);
        assert_eq!(sel.label(&files), "Все данные");
        assert!(sel.toggle("f1"));
        assert_eq!(sel.label(&files), "Выбрано: 1");
        assert!(!sel.toggle("f2"));
        assert_eq!(sel.ids(), ["f2"]);
        assert!(sel.toggle("f1"));
        assert_eq!(sel.ids(), ["f2", "f1"]);
        assert_eq!(sel.label(&files), "Все данные");
    }

    #[test]
    fn explicit_subset_ignores_unknown_ids() {
        let p = project(&["f1", "f2", "f3"], &[]);
        let sel = FileSelection::only(["f3", "zz", "f3"], &p);
        assert_eq!(sel.ids(), ["f3"]);
        let sel = FileSelection::only(["zz"], &p);
        assert_eq!(sel.len(), 3);
    }

    #[test]
    fn sync_prunes_removed_files() {
        let mut sel = FileSelection::all(&files(&["f1", "f2", "f3"]));
        sel.toggle("f3");
        assert!(sel.sync(&project(&["f2", "f3"], &[])));
        assert_eq!(sel.ids(), ["f2"]);
        assert!(sel.sync(&project(&["f3", "f4"], &[])));
        assert_eq!(sel.ids(), ["f3", "f4"]);
        assert!(!sel.sync(&project(&["f3", "f4"], &[])));
    }

    #[test]
    fn removed_file_with_records_stays_selected() {
        let mut sel = FileSelection::all(&files(&["f1", "f2"]));
        let after = project(&["f1"], &["f1", "f2"]);
        assert!(!sel.sync(&after));
        assert_eq!(sel.ids(), ["f1", "f2"]);
        assert_eq!(sel.label(&after.files), "Выбрано: 2");

        assert!(sel.toggle("f2"));
        assert_eq!(sel.label(&after.files), "Все данные");
        assert_eq!(FileSelection::only(["f2"], &after).ids(), ["f2"]);
    }
}
