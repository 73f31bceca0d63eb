use crate::search::SearchQuery;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use storage::models::{Record, Sentiment};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SentimentFilter {
    #[default]
    All,
    Only(Sentiment),
}

impl SentimentFilter {
    /// Pill order in the browser toolbar.
    pub const PILLS: [SentimentFilter; 4] = [
        SentimentFilter::All,
        SentimentFilter::Only(Sentiment::Negative),
        SentimentFilter::Only(Sentiment::Neutral),
        SentimentFilter::Only(Sentiment::Positive),
    ];

    pub fn admits(self, sentiment: Sentiment) -> bool {
        match self {
            SentimentFilter::All => true,
            SentimentFilter::Only(wanted) => wanted == sentiment,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SentimentFilter::All => "Все",
            SentimentFilter::Only(s) => s.label(),
        }
    }
}

impl fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentFilter::All => f.write_str("all"),
            SentimentFilter::Only(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for SentimentFilter {
    type Err = storage::models::ParseSentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(SentimentFilter::All);
        }
        s.parse().map(SentimentFilter::Only)
    }
}

/// File selection plus committed search: the part of the predicate shared by
/// the filter stage and the pill counts.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    files: HashSet<&'a str>,
    search: SearchQuery,
}

impl<'a> Scope<'a> {
    pub fn new<I>(files: I, search: SearchQuery) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            files: files.into_iter().collect(),
            search,
        }
    }

    pub fn contains(&self, record: &Record) -> bool {
        self.files.contains(record.file_id.as_str()) && self.search.matches(&record.text)
    }
}

/// Records inside `scope` whose label passes `sentiment`, in collection order.
pub fn filter_records<'r>(
    records: &'r [Record],
    scope: &Scope<'_>,
    sentiment: SentimentFilter,
) -> Vec<&'r Record> {
    records
        .iter()
        .filter(|r| scope.contains(r) && sentiment.admits(r.sentiment))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub total: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn get(&self, filter: SentimentFilter) -> usize {
        match filter {
            SentimentFilter::All => self.total,
            SentimentFilter::Only(Sentiment::Positive) => self.positive,
            SentimentFilter::Only(Sentiment::Neutral) => self.neutral,
            SentimentFilter::Only(Sentiment::Negative) => self.negative,
        }
    }

    fn add(&mut self, sentiment: Sentiment) {
        self.total += 1;
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }
}

/// Per-bucket counts over `scope`. The active sentiment filter is
/// deliberately not applied so every pill shows what it would reveal.
pub fn count_by_sentiment(records: &[Record], scope: &Scope<'_>) -> SentimentCounts {
    records
        .iter()
        .filter(|r| scope.contains(r))
        .fold(SentimentCounts::default(), |mut acc, r| {
            acc.add(r.sentiment);
            acc
        })
}
