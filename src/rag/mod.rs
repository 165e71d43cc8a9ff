// ABOUTME: Retrieval over documents loaded from arXiv and Wikipedia.
// ABOUTME: Loaders produce documents, chunking packs them, and the index ranks chunks.

mod arxiv;
mod chunk;
mod index;
mod wikipedia;

pub use arxiv::{ArxivLoader, ArxivOptions, parse_atom};
pub use chunk::chunk_documents;
pub use index::{LexicalIndex, SearchResult};
pub use wikipedia::{WikipediaLoader, WikipediaOptions};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A piece of text with descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Cut text to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

/// Chunk, index and query `documents`, joining the best chunks with blank
/// lines.
pub fn answer(documents: &[Document], query: &str, chunk_size: usize, top_k: usize) -> String {
    let index = LexicalIndex::build(chunk_documents(documents, chunk_size));
    join_results(&index.search(query, top_k))
}

/// Contents of ranked results separated by blank lines.
pub fn join_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.document.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
