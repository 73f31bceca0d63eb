//! New-analysis creation and data-file upload. Files are never read: only
//! the name is checked and a declared row count is made up.

use chrono::{Local, Utc};
use rand::Rng;
use std::sync::atomic::{AtomicI64, Ordering};
use storage::models::{DataFile, Kpi, Project};
use thiserror::Error;
use tracing::warn;

pub const PENDING_INSIGHT: &str = "Анализ выполняется...";

/// Validation failures; the Display text is shown to the operator as is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Введите название анализа")]
    MissingTitle,
    #[error("Загрузите файл с данными")]
    MissingFile,
    #[error("Только формат .csv")]
    NotCsvForNewAnalysis,
    #[error("Пожалуйста, загрузите файл в формате .csv")]
    NotCsvForUpload,
}

#[derive(Debug, Clone, Default)]
pub struct NewAnalysis {
    pub title: String,
    pub description: String,
    pub file_name: Option<String>,
}

fn is_csv(name: &str) -> bool {
    name.ends_with(".csv")
}

fn today() -> String {
    Local::now().format("%d.%m.%Y").to_string()
}

static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp for new ids, strictly increasing within the process
/// so two intakes in the same millisecond never share an id.
fn stamp() -> i64 {
    let now = Utc::now().timestamp_millis();
    let previous = LAST_STAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
        .unwrap_or(now);
    now.max(previous + 1)
}

/// Builds a fresh project around one uploaded file. Records stay empty until
/// an external analysis fills them.
pub fn create_project<R: Rng>(request: &NewAnalysis, rng: &mut R) -> Result<Project, IntakeError> {
    if request.title.trim().is_empty() {
        warn!("new analysis refused: empty title");
        return Err(IntakeError::MissingTitle);
    }
    let name = request.file_name.as_deref().ok_or(IntakeError::MissingFile)?;
    if !is_csv(name) {
        warn!(file = name, "new analysis refused: not a csv");
        return Err(IntakeError::NotCsvForNewAnalysis);
    }

    let id = stamp();
    let file = DataFile {
        id: format!("f_{id}"),
        name: name.to_string(),
        upload_date: today(),
        row_count: rng.gen_range(100..1100),
    };
    Ok(Project {
        id: id.to_string(),
        title: request.title.clone(),
        description: request.description.clone(),
        kpi: Kpi {
            total_reviews: file.row_count,
            ..Kpi::default()
        },
        records: Vec::new(),
        keywords: Vec::new(),
        ai_insights: vec![PENDING_INSIGHT.to_string()],
        files: vec![file],
    })
}

/// Metadata for a file dropped onto an existing project.
pub fn upload_file<R: Rng>(name: &str, rng: &mut R) -> Result<DataFile, IntakeError> {
    if !is_csv(name) {
        warn!(file = name, "upload refused: not a csv");
        return Err(IntakeError::NotCsvForUpload);
    }
    Ok(DataFile {
        id: format!("new_{}", stamp()),
        name: name.to_string(),
        upload_date: today(),
        row_count: rng.gen_range(50..550),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(title: &str, file: Option<&str>) -> NewAnalysis {
        NewAnalysis {
            title: title.to_string(),
            description: "d".to_string(),
            file_name: file.map(str::to_string),
        }
    }

    #[test]
    fn title_is_checked_before_file() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            create_project(&request("  ", None), &mut rng).unwrap_err(),
            IntakeError::MissingTitle
        );
        assert_eq!(
            create_project(&request("Жалобы", None), &mut rng).unwrap_err(),
            IntakeError::MissingFile
        );
        let err = create_project(&request("Жалобы", Some("data.xlsx")), &mut rng).unwrap_err();
        assert_eq!(err.to_string(), "Только формат .csv");
    }

    #[test]
    fn new_project_starts_with_one_file_and_no_records() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = create_project(&request("Жалобы Декабрь", Some("dec.csv")), &mut rng).unwrap();
        assert_eq!(p.files.len(), 1);
        assert!(p.records.is_empty());
        assert!(p.keywords.is_empty());
        assert_eq!(p.ai_insights, [PENDING_INSIGHT]);
        let rows = p.files[0].row_count;
        assert!((100..1100).contains(&rows));
        assert_eq!(p.kpi.total_reviews, rows);
        assert_eq!(p.kpi.nps, 0);
        assert_eq!(p.files[0].upload_date.len(), 10);
    }

    #[test]
    fn upload_rejects_other_extensions() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(upload_file("notes.txt", &mut rng).unwrap_err(), IntakeError::NotCsvForUpload);
        let f = upload_file("more.csv", &mut rng).unwrap();
        assert!(f.id.starts_with("new_"));
        assert!((50..550).contains(&f.row_count));
    }

    #[test]
    fn back_to_back_intakes_get_distinct_ids() {
        let mut rng = StdRng::seed_from_u64(3);
        let ids: Vec<String> = (0..50)
            .map(|_| upload_file("batch.csv", &mut rng).unwrap().id)
            .collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());

        let a = create_project(&request("A", Some("a.csv")), &mut rng).unwrap();
        let b = create_project(&request("B", Some("b.csv")), &mut rng).unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a.files[0].id, b.files[0].id);
    }
}
