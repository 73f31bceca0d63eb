use std::fmt;
use std::str::FromStr;
use storage::models::Record;

/// Ordering applied to the confidence column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header click: ascending first, then flip. Never returns to `Unsorted`.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Unsorted | SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Unsorted => "",
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Unsorted => "none",
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort direction: {0} (expected none|asc|desc)")]
pub struct ParseSortError(pub String);

impl FromStr for SortDirection {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(SortDirection::Unsorted),
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(ParseSortError(other.to_string())),
        }
    }
}

/// Returns a reordered copy; `records` itself is left untouched.
///
/// `sort_by` is stable, so equal confidences keep their input order in both
/// directions.
pub fn sort_by_confidence<'r>(records: &[&'r Record], direction: SortDirection) -> Vec<&'r Record> {
    let mut sorted = records.to_vec();
    match direction {
        SortDirection::Unsorted => {}
        SortDirection::Ascending => sorted.sort_by(|a, b| a.confidence.total_cmp(&b.confidence)),
        SortDirection::Descending => sorted.sort_by(|a, b| b.confidence.total_cmp(&a.confidence)),
    }
    sorted
}
