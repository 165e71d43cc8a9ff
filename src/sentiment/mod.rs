// ABOUTME: Sentiment module - keyword-focused polarity scoring over article blobs.
// ABOUTME: Result models, the analyzer seam, and the file aggregator.

mod aggregator;
mod sentences;
mod vader;


pub use aggregator::{AggregateReport, SentimentAggregator, SourceFilter};
pub use sentences::split_sentences;
pub use vader::{PolarityScores, VaderAnalyzer};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Scores text polarity.
pub trait PolarityAnalyzer: Send + Sync {
    /// Normalized polarity in `[-1, 1]`.
    fn compound(&self, text: &str) -> f64;
}

/// One keyword-matching sentence and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub sentence: String,
    pub compound: f64,
}

/// Scores for one input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    pub file: String,
    /// At most the configured cap; the average covers every match.
    pub sentences: Vec<SentimentRecord>,
    pub avg_compound: f64,
    pub snippet: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub avg_compound: f64,
}

/// Everything a run computes, as written to the output file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub sentiment_score_summary: BTreeMap<String, FileSummary>,
    pub articles: Vec<FileResult>,
}
