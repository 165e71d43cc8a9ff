// ABOUTME: SentimentAggregator - scores keyword sentences across article files
// ABOUTME: and writes a per-source JSON summary.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use super::{
    AggregateResult, FileResult, FileSummary, PolarityAnalyzer, SentimentRecord, VaderAnalyzer,
    split_sentences,
};
use crate::config::ToolsConfig;
use crate::error::SentimentError;
use crate::news::{Source, matches_any};

/// Which sources' files an aggregation run reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFilter {
    All,
    Only(BTreeSet<String>),
}

impl SourceFilter {
    /// Parse a comma separated filter; `all` admits every file.
    ///
    /// Every token must name a known source or `unknown`.
    pub fn parse(raw: &str) -> Result<Self, SentimentError> {
        let raw = raw.trim().to_lowercase();
        if raw == "all" {
            return Ok(SourceFilter::All);
        }
        let tokens: BTreeSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if tokens.is_empty() {
            return Err(SentimentError::InvalidSource(raw));
        }
        if let Some(bad) = tokens.iter().find(|t| !is_source_token(t)) {
            return Err(SentimentError::InvalidSource(bad.clone()));
        }
        Ok(SourceFilter::Only(tokens))
    }

    /// Name used in the output file, `sentiment_<label>.json`.
    pub fn label(&self) -> String {
        match self {
            SourceFilter::All => "all".to_string(),
            SourceFilter::Only(set) => set.iter().cloned().collect::<Vec<_>>().join(","),
        }
    }

    pub fn admits(&self, source: &str) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Only(set) => set.contains(source),
        }
    }
}

fn is_source_token(token: &str) -> bool {
    token == "unknown" || token.parse::<Source>().is_ok_and(|s| s != Source::All)
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub output_file: PathBuf,
    #[serde(flatten)]
    pub result: AggregateResult,
}

/// Scores every `*.txt` file in the input directory.
pub struct SentimentAggregator {
    input_dir: PathBuf,
    output_dir: PathBuf,
    max_sentences: usize,
    snippet_chars: usize,
    analyzer: Arc<dyn PolarityAnalyzer>,
}

impl SentimentAggregator {
    pub fn new(config: &ToolsConfig) -> Self {
        Self {
            input_dir: config.sentiment_input_dir(),
            output_dir: config.sentiment_output_dir(),
            max_sentences: config.sentiment.max_sentences,
            snippet_chars: config.sentiment.snippet_chars,
            analyzer: Arc::new(VaderAnalyzer::new()),
        }
    }

    /// Replace the polarity analyzer.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn PolarityAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Run over the input directory for files admitted by `source` and write
    /// `sentiment_<source>.json`.
    pub fn run(&self, source: &str, keywords: &[String]) -> Result<AggregateReport, SentimentError> {
        let filter = SourceFilter::parse(source).inspect_err(|e| {
            tracing::error!(source, error = %e, "rejected source filter");
        })?;

        let files = list_text_files(&self.input_dir).map_err(|e| {
            tracing::error!(dir = %self.input_dir.display(), error = %e, "Error accessing input directory");
            SentimentError::InputDir(e)
        })?;

        let mut articles = Vec::new();
        let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for name in files {
            let Some(mut item) = self.process_file(&name, keywords, &filter) else {
                continue;
            };
            let entry = totals.entry(name).or_default();
            entry.0 += item.avg_compound;
            entry.1 += 1;

            item.sentences.truncate(self.max_sentences);
            articles.push(item);
        }

        let sentiment_score_summary = totals
            .into_iter()
            .map(|(file, (sum, count))| {
                let avg_compound = if count > 0 { sum / count as f64 } else { 0.0 };
                (file, FileSummary { avg_compound })
            })
            .collect();
        let result = AggregateResult {
            sentiment_score_summary,
            articles,
        };

        let output_file = self.output_dir.join(format!("sentiment_{}.json", filter.label()));
        write_json(&output_file, &result)?;

        tracing::info!(file = %output_file.display(), articles = result.articles.len(), "Sentiment analysis saved");
        Ok(AggregateReport {
            output_file,
            result,
        })
    }

    /// Score the sentences of `text` that mention any keyword.
    pub fn score_text(&self, text: &str, keywords: &[String]) -> Vec<SentimentRecord> {
        split_sentences(text)
            .into_iter()
            .filter(|s| matches_any(&s.to_lowercase(), keywords))
            .map(|sentence| SentimentRecord {
                compound: self.analyzer.compound(&sentence),
                sentence,
            })
            .collect()
    }

    fn process_file(
        &self,
        name: &str,
        keywords: &[String],
        filter: &SourceFilter,
    ) -> Option<FileResult> {
        let source = Source::from_file_name(name).map_or("unknown", |s| s.as_str());
        if !filter.admits(source) {
            return None;
        }

        let path = self.input_dir.join(name);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Error reading file, skipping");
                return None;
            }
        };
        let content = content.trim();
        if content.is_empty() {
            tracing::debug!(file = name, "empty file, skipping");
            return None;
        }

        let sentences = self.score_text(content, keywords);
        if sentences.is_empty() {
            return None;
        }
        let avg_compound =
            sentences.iter().map(|r| r.compound).sum::<f64>() / sentences.len() as f64;

        Some(FileResult {
            file: name.to_string(),
            sentences,
            avg_compound,
            snippet: snippet(content, self.snippet_chars),
        })
    }
}

/// Sorted names of the regular `*.txt` files in `dir`.
fn list_text_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".txt") && entry.path().is_file() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// First `max_chars` characters, with `...` appended when text was cut.
fn snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn write_json(path: &Path, result: &AggregateResult) -> Result<(), SentimentError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(SentimentError::Write)?;
    }
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json).map_err(SentimentError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_filter() {
        assert_eq!(SourceFilter::parse(" ALL ").unwrap(), SourceFilter::All);
        let filter = SourceFilter::parse("nyt, Guardian,").unwrap();
        assert!(filter.admits("nyt"));
        assert!(filter.admits("guardian"));
        assert!(!filter.admits("aljazeera"));
        assert!(!filter.admits("unknown"));
        assert_eq!(filter.label(), "guardian,nyt");
        assert_eq!(SourceFilter::parse("unknown").unwrap().label(), "unknown");
    }

    #[test]
    fn test_source_filter_rejects_unknown_tokens() {
        for raw in ["bbc", "nyt,bbc", "../escaped", "nyt/../../x", "", " , ", "nyt,all"] {
            assert!(
                matches!(SourceFilter::parse(raw), Err(SentimentError::InvalidSource(_))),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn test_snippet() {
        assert_eq!(snippet("short", 200), "short");
        assert_eq!(snippet("abcdef", 3), "abc...");
        assert_eq!(snippet("abc", 3), "abc");
        assert_eq!(snippet("ééééé", 2), "éé...");
    }
}
