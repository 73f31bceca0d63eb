//! Project overview: sentiment distribution over the selected files, KPI
//! cards, keyword highlights and AI insights.
//!
//! Keyword and insight content is static project data; only the sentiment
//! distribution is derived from records.

use crate::filter::{self, Scope, SentimentCounts};
use crate::kpi::{self, KpiCards};
use crate::search::SearchQuery;
use crate::selection::FileSelection;
use serde::Serialize;
use storage::models::{Keyword, Project, Sentiment, Tone};

pub const TOP_KEYWORDS: usize = 4;

const HEADLINES: [&str; 4] = ["Аномалия:", "Позитив:", "Успех:", "Критично:"];
const ALERT_MARKER: &str = "Аномалия";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Alert,
    Note,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight<'a> {
    pub kind: InsightKind,
    pub headline: Option<&'a str>,
    pub body: &'a str,
}

/// One row of the complaints/praise chart. Either side may be missing when
/// the lists differ in length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordRow<'a> {
    pub negative: Option<&'a Keyword>,
    pub positive: Option<&'a Keyword>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard<'a> {
    pub selection_label: String,
    pub distribution: SentimentCounts,
    pub slices: Vec<PieSlice>,
    pub kpi: KpiCards,
    pub insights: Vec<Insight<'a>>,
    pub keyword_rows: Vec<KeywordRow<'a>>,
}

pub fn color(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "#22c55e",
        Sentiment::Neutral => "#94a3b8",
        Sentiment::Negative => "#ef4444",
    }
}

/// Bucket counts over the selected files. No search, no sentiment filter.
pub fn sentiment_distribution(project: &Project, files: &FileSelection) -> SentimentCounts {
    let scope = Scope::new(files.iter(), SearchQuery::default());
    filter::count_by_sentiment(&project.records, &scope)
}

pub fn pie_slices(counts: &SentimentCounts) -> Vec<PieSlice> {
    [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive]
        .into_iter()
        .map(|s| PieSlice {
            label: s.label(),
            value: match s {
                Sentiment::Positive => counts.positive,
                Sentiment::Neutral => counts.neutral,
                Sentiment::Negative => counts.negative,
            },
            color: color(s),
        })
        .collect()
}

/// First `TOP_KEYWORDS` keywords of `tone`, in declaration order.
pub fn top_keywords(keywords: &[Keyword], tone: Tone) -> Vec<&Keyword> {
    keywords
        .iter()
        .filter(|k| k.tone == tone)
        .take(TOP_KEYWORDS)
        .collect()
}

pub fn keyword_rows(keywords: &[Keyword]) -> Vec<KeywordRow<'_>> {
    let negative = top_keywords(keywords, Tone::Negative);
    let positive = top_keywords(keywords, Tone::Positive);
    (0..negative.len().max(positive.len()))
        .map(|i| KeywordRow {
            negative: negative.get(i).copied(),
            positive: positive.get(i).copied(),
        })
        .collect()
}

/// Drill-in target for a clicked keyword.
pub fn find_keyword<'a>(project: &'a Project, name: &str) -> Option<&'a Keyword> {
    project
        .keywords
        .iter()
        .find(|k| k.name.to_lowercase() == name.trim().to_lowercase())
}

pub fn classify_insight(text: &str) -> Insight<'_> {
    let kind = if text.contains(ALERT_MARKER) {
        InsightKind::Alert
    } else {
        InsightKind::Note
    };
    for headline in HEADLINES {
        if let Some(rest) = text.strip_prefix(headline) {
            return Insight {
                kind,
                headline: Some(headline),
                body: rest.trim_start(),
            };
        }
    }
    Insight {
        kind,
        headline: None,
        body: text,
    }
}

pub fn build<'a>(project: &'a Project, files: &FileSelection) -> Dashboard<'a> {
    let distribution = sentiment_distribution(project, files);
    Dashboard {
        selection_label: files.label(&project.files),
        slices: pie_slices(&distribution),
        distribution,
        kpi: kpi::cards(&project.kpi),
        insights: project.ai_insights.iter().map(|s| classify_insight(s)).collect(),
        keyword_rows: keyword_rows(&project.keywords),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::sample::sample_projects;

    #[test]
    fn distribution_follows_file_selection() {
        let projects = sample_projects();
        let project = &projects[0];
        let mut files = FileSelection::all(&project.files);
        let all = sentiment_distribution(project, &files);
        assert_eq!(all.total, 50);
        // 30 records cycle the ten-label table three times: 6 neg, 3 pos, 1 neu per cycle
        files.toggle("f2");
        let f1 = sentiment_distribution(project, &files);
        assert_eq!((f1.negative, f1.positive, f1.neutral), (18, 9, 3));
    }

    #[test]
    fn slices_are_negative_neutral_positive() {
        let counts = SentimentCounts {
            total: 6,
            positive: 1,
            neutral: 2,
            negative: 3,
        };
        let slices = pie_slices(&counts);
        let labels: Vec<_> = slices.iter().map(|s| (s.label, s.value)).collect();
        assert_eq!(labels, [("Негатив", 3), ("Нейтрально", 2), ("Позитив", 1)]);
        assert_eq!(slices[0].color, "#ef4444");
    }

    #[test]
    fn keyword_rows_pad_the_shorter_side() {
        let projects = sample_projects();
        let rows = keyword_rows(&projects[0].keywords);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].negative.unwrap().name, "Опоздание");
        assert_eq!(rows[0].positive.unwrap().name, "Быстро");

        let mut keywords = projects[0].keywords.clone();
        keywords.retain(|k| k.tone == Tone::Negative);
        let rows = keyword_rows(&keywords);
        assert!(rows.iter().all(|r| r.positive.is_none()));
    }

    #[test]
    fn keyword_lookup_ignores_case() {
        let projects = sample_projects();
        let kw = find_keyword(&projects[0], "холодно").unwrap();
        assert_eq!(kw.related_word, "Печка");
        assert!(find_keyword(&projects[0], "Жара").is_none());
    }

    #[test]
    fn insights_split_headline_and_flag_anomalies() {
        let i = classify_insight("Аномалия: всплеск негатива");
        assert_eq!(i.kind, InsightKind::Alert);
        assert_eq!(i.headline, Some("Аномалия:"));
        assert_eq!(i.body, "всплеск негатива");

        let i = classify_insight("Проблема: темно");
        assert_eq!(i.kind, InsightKind::Note);
        assert_eq!(i.headline, None);
    }
}
