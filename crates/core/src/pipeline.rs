//! Record browser: filter, count, sort and paginate one project.

use crate::filter::{self, SentimentCounts, SentimentFilter};
use crate::paginate::{self, PageInfo};
use crate::sort;
use crate::view::ViewState;
use serde::Serialize;
use storage::models::{Project, Record};
use tracing::debug;

pub const EMPTY_RESULT_MESSAGE: &str = "Ничего не найдено по вашему запросу";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn of(confidence: f64) -> Self {
        if confidence > 0.8 {
            ConfidenceBand::High
        } else if confidence > 0.6 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowserRow<'a> {
    #[serde(flatten)]
    pub record: &'a Record,
    pub file_name: &'a str,
    pub band: ConfidenceBand,
    /// Width of the confidence bar, 0..=100.
    pub bar_percent: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Pill {
    pub filter: String,
    pub label: &'static str,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowserPage<'a> {
    pub counts: SentimentCounts,
    pub pills: Vec<Pill>,
    pub rows: Vec<BrowserRow<'a>>,
    pub page: PageInfo,
    pub selection_label: String,
}

impl BrowserPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_RESULT_MESSAGE)
    }
}

/// Derives everything the browser shows for `view` over `project`.
///
/// Pure: recomputed in full for every call.
pub fn run<'a>(project: &'a Project, view: &ViewState, page_size: usize) -> BrowserPage<'a> {
    let scope = view.scope();
    let counts = filter::count_by_sentiment(&project.records, &scope);
    let filtered = filter::filter_records(&project.records, &scope, view.sentiment());
    let sorted = sort::sort_by_confidence(&filtered, view.sort());
    let info = PageInfo::new(sorted.len(), page_size, view.page());
    let rows = paginate::paginate(&sorted, &info)
        .iter()
        .map(|&record| row(project, record))
        .collect::<Vec<_>>();

    debug!(
        project = %project.id,
        filtered = filtered.len(),
        visible = rows.len(),
        page = info.page,
        "recomputed browser page"
    );

    let pills = SentimentFilter::PILLS
        .iter()
        .map(|&pill| Pill {
            filter: pill.to_string(),
            label: pill.label(),
            count: counts.get(pill),
            active: pill == view.sentiment(),
        })
        .collect();

    BrowserPage {
        counts,
        pills,
        rows,
        page: info,
        selection_label: view.files().label(&project.files),
    }
}

fn row<'a>(project: &'a Project, record: &'a Record) -> BrowserRow<'a> {
    BrowserRow {
        record,
        file_name: project.file_name(&record.file_id),
        band: ConfidenceBand::of(record.confidence),
        bar_percent: (record.confidence.clamp(0.0, 1.0) * 100.0).round() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_split_at_point_six_and_point_eight() {
        assert_eq!(ConfidenceBand::of(0.81), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::of(0.8), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::of(0.61), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::of(0.6), ConfidenceBand::Low);
    }
}
