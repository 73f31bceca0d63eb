use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shown in place of a file name when a record points at a file the project
/// no longer has.
pub const UNKNOWN_FILE_LABEL: &str = "Неизвестный файл";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Operator-facing label used by pills, selects and chart legends.
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Позитив",
            Sentiment::Neutral => "Нейтрально",
            Sentiment::Negative => "Негатив",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sentiment: {0}")]
pub struct ParseSentimentError(pub String);

impl FromStr for Sentiment {
    type Err = ParseSentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "pos" => Ok(Sentiment::Positive),
            "neutral" | "neu" => Ok(Sentiment::Neutral),
            "negative" | "neg" => Ok(Sentiment::Negative),
            other => Err(ParseSentimentError(other.to_string())),
        }
    }
}

/// Channel the text was collected from. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "vk")]
    Vk,
    #[serde(rename = "mos.ru")]
    MosRu,
    #[serde(rename = "telegram")]
    Telegram,
    #[serde(rename = "portal")]
    Portal,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Vk => "vk",
            Channel::MosRu => "mos.ru",
            Channel::Telegram => "telegram",
            Channel::Portal => "portal",
        }
    }
}

/// One reviewable piece of text with its classifier output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub text: String,
    pub source: Channel,
    pub file_id: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFile {
    pub id: String,
    pub name: String,
    pub upload_date: String,
    /// Declared by the upload, never reconciled with the records present.
    pub row_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub total_reviews: u32,
    pub nps: i32,
    pub nps_delta: i32,
    pub avg_confidence: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub name: String,
    pub count: u32,
    pub tone: Tone,
    pub related_word: String,
    pub ai_context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kpi: Kpi,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default)]
    pub ai_insights: Vec<String>,
    #[serde(default)]
    pub files: Vec<DataFile>,
}

impl Project {
    pub fn file_ids(&self) -> Vec<String> {
        self.files.iter().map(|f| f.id.clone()).collect()
    }

    pub fn file(&self, file_id: &str) -> Option<&DataFile> {
        self.files.iter().find(|f| f.id == file_id)
    }

    pub fn file_name(&self, file_id: &str) -> &str {
        self.file(file_id)
            .map(|f| f.name.as_str())
            .unwrap_or(UNKNOWN_FILE_LABEL)
    }

    /// A file id is a source while the file exists or records still point at it.
    pub fn has_source(&self, file_id: &str) -> bool {
        self.file(file_id).is_some() || self.records.iter().any(|r| r.file_id == file_id)
    }

    pub fn record(&self, record_id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == record_id)
    }

    /// Relabels a single record in place. Returns `false` when no record has
    /// `record_id` or the label was already `sentiment`.
    pub fn correct_sentiment(&mut self, record_id: &str, sentiment: Sentiment) -> bool {
        match self.records.iter_mut().find(|r| r.id == record_id) {
            Some(record) if record.sentiment != sentiment => {
                record.sentiment = sentiment;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            id: "p".into(),
            title: "t".into(),
            description: String::new(),
            kpi: Kpi::default(),
            records: vec![Record {
                id: "r1".into(),
                text: "hello".into(),
                source: Channel::Vk,
                file_id: "gone".into(),
                sentiment: Sentiment::Negative,
                confidence: 0.7,
                date: "2023-11-20".into(),
            }],
            keywords: vec![],
            ai_insights: vec![],
            files: vec![DataFile {
                id: "f1".into(),
                name: "a.csv".into(),
                upload_date: "20.11.2023".into(),
                row_count: 10,
            }],
        }
    }

    #[test]
    fn orphaned_record_gets_fallback_file_name() {
        let p = project();
        assert_eq!(p.file_name("f1"), "a.csv");
        assert_eq!(p.file_name(&p.records[0].file_id), UNKNOWN_FILE_LABEL);
        assert!(p.has_source("f1"));
        assert!(p.has_source("gone"));
        assert!(!p.has_source("never"));
    }

    #[test]
    fn sentiment_parses_loosely() {
        assert_eq!("Negative".parse::<Sentiment>().unwrap(), Sentiment::Negative);
        assert_eq!(" pos ".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert!("angry".parse::<Sentiment>().is_err());
    }

    #[test]
    fn correction_reports_whether_anything_changed() {
        let mut p = project();
        assert!(p.correct_sentiment("r1", Sentiment::Positive));
        assert!(!p.correct_sentiment("r1", Sentiment::Positive));
        assert!(!p.correct_sentiment("missing", Sentiment::Neutral));
        assert_eq!(p.records[0].sentiment, Sentiment::Positive);
    }

    #[test]
    fn channel_uses_wire_names() {
        let json = serde_json::to_string(&Channel::MosRu).unwrap();
        assert_eq!(json, "\"mos.ru\"");
    }
}
