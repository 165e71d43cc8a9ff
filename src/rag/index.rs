// ABOUTME: In-memory TF-IDF index with cosine ranking over text chunks.
// ABOUTME: Rebuilt per request, or saved to and restored from a JSON file.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Document;
use crate::error::IndexError;

static TERM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("valid regex"));

type SparseVector = HashMap<String, f32>;

/// A ranked document.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub document: Document,
    pub score: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexicalIndex {
    documents: Vec<Document>,
    idf: HashMap<String, f32>,
    vectors: Vec<SparseVector>,
}

fn terms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TERM.find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| t.chars().count() > 1)
        .map(String::from)
        .collect()
}

fn term_counts(text: &str) -> HashMap<String, f32> {
    let mut counts = HashMap::new();
    for term in terms(text) {
        *counts.entry(term).or_insert(0.0) += 1.0;
    }
    counts
}

fn normalize(mut vector: SparseVector) -> SparseVector {
    let norm = vector.values().map(|w| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for w in vector.values_mut() {
            *w /= norm;
        }
    }
    vector
}

/// Dot product of two unit vectors.
fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum()
}

impl LexicalIndex {
    /// Index `documents`.
    pub fn build(documents: Vec<Document>) -> Self {
        let counts: Vec<_> = documents.iter().map(|d| term_counts(&d.content)).collect();

        let mut df: HashMap<&str, f32> = HashMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *df.entry(term.as_str()).or_insert(0.0) += 1.0;
            }
        }
        let n = documents.len() as f32;
        let idf: HashMap<String, f32> = df
            .into_iter()
            .map(|(term, df)| (term.to_string(), ((1.0 + n) / (1.0 + df)).ln() + 1.0))
            .collect();

        let vectors = counts
            .into_iter()
            .map(|tf| {
                normalize(
                    tf.into_iter()
                        .map(|(term, count)| {
                            let weight = count * idf.get(&term).copied().unwrap_or(0.0);
                            (term, weight)
                        })
                        .collect(),
                )
            })
            .collect();

        Self {
            documents,
            idf,
            vectors,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The `limit` best matches for `query`, best first. Documents sharing
    /// no term with the query are left out.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let query_vector = normalize(
            term_counts(query)
                .into_iter()
                .filter_map(|(term, count)| self.idf.get(&term).map(|idf| (term, count * idf)))
                .collect(),
        );
        if query_vector.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<SearchResult> = self
            .vectors
            .iter()
            .zip(&self.documents)
            .map(|(vector, doc)| SearchResult {
                document: doc.clone(),
                score: cosine_similarity(&query_vector, vector),
            })
            .filter(|r| r.score > 0.0)
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);
        results
    }

    /// Write the index as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_vec(self)?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let raw = std::fs::read(path)?;
        Ok(serde_json::from_slice(&raw)?)
    }
}
