// ABOUTME: arXiv loader - queries the Atom export API and turns entries into documents.
// ABOUTME: Abstracts are the document text; metadata mirrors the entry headers.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{Document, truncate_chars};
use crate::error::FetchError;

/// Longest query the export API is sent.
const MAX_QUERY_CHARS: usize = 300;

static ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<entry>(.*?)</entry>").expect("valid regex"));
static AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<author>\s*<name>(.*?)</name>").expect("valid regex"));
static CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<category[^>]*\sterm="([^"]+)""#).expect("valid regex"));
static PRIMARY_CATEGORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<arxiv:primary_category[^>]*\sterm="([^"]+)""#).expect("valid regex")
});
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Retrieval options, as accepted from tool arguments.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArxivOptions {
    pub top_k_results: usize,
    pub get_full_documents: bool,
    pub doc_content_chars_max: usize,
    pub load_all_available_meta: bool,
    pub continue_on_failure: bool,
}

impl Default for ArxivOptions {
    fn default() -> Self {
        Self {
            top_k_results: 3,
            get_full_documents: true,
            doc_content_chars_max: 4000,
            load_all_available_meta: false,
            continue_on_failure: true,
        }
    }
}

pub struct ArxivLoader {
    client: reqwest::Client,
    api_url: String,
}

impl ArxivLoader {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// Fetch the top entries for `query`.
    pub async fn load(&self, query: &str, options: &ArxivOptions) -> Result<Vec<Document>, FetchError> {
        if options.get_full_documents {
            tracing::info!("full-text retrieval is not available, using abstracts");
        }

        let query = truncate_chars(query, MAX_QUERY_CHARS);
        let max_results = options.top_k_results.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("search_query", query.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: self.api_url.clone(),
            });
        }

        let xml = response.text().await?;
        let documents = parse_atom(&xml, options)?;
        tracing::info!(count = documents.len(), "arXiv documents loaded");
        Ok(documents)
    }
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn clean(text: &str) -> String {
    WHITESPACE.replace_all(unescape(text).trim(), " ").into_owned()
}

fn tag(entry: &str, name: &str) -> Option<String> {
    let open = format!("<{}", name);
    let close = format!("</{}>", name);
    let start = entry.find(&open)?;
    let body_start = start + entry[start..].find('>')? + 1;
    let end = body_start + entry[body_start..].find(&close)?;
    Some(clean(&entry[body_start..end]))
}

/// Parse an Atom feed from the export API into documents.
///
/// An entry without a title or summary fails the whole parse unless
/// `continue_on_failure` is set, in which case it is skipped.
pub fn parse_atom(xml: &str, options: &ArxivOptions) -> Result<Vec<Document>, FetchError> {
    let mut documents = Vec::new();

    for captures in ENTRY.captures_iter(xml) {
        let entry = &captures[1];
        let (Some(title), Some(summary)) = (tag(entry, "title"), tag(entry, "summary")) else {
            if options.continue_on_failure {
                tracing::warn!("skipping arXiv entry without title or summary");
                continue;
            }
            return Err(FetchError::Decode(
                "arXiv entry without title or summary".to_string(),
            ));
        };

        let authors: Vec<String> = AUTHOR
            .captures_iter(entry)
            .map(|c| clean(&c[1]))
            .collect();
        let published = tag(entry, "published").unwrap_or_default();

        let mut doc = Document::new(truncate_chars(&summary, options.doc_content_chars_max))
            .with_meta("Published", published.split('T').next().unwrap_or_default())
            .with_meta("Title", title)
            .with_meta("Authors", authors.join(", "));

        if options.load_all_available_meta {
            if let Some(id) = tag(entry, "id") {
                doc = doc.with_meta("entry_id", id);
            }
            let categories: Vec<&str> = CATEGORY
                .captures_iter(entry)
                .filter_map(|c| c.get(1).map(|m| m.as_str()))
                .collect();
            doc = doc.with_meta("categories", categories.join(", "));
            if let Some(primary) = PRIMARY_CATEGORY.captures(entry) {
                doc = doc.with_meta("primary_category", &primary[1]);
            }
            for (meta, name) in [
                ("comment", "arxiv:comment"),
                ("journal_ref", "arxiv:journal_ref"),
                ("doi", "arxiv:doi"),
            ] {
                if let Some(value) = tag(entry, name) {
                    doc = doc.with_meta(meta, value);
                }
            }
        }

        documents.push(doc);
    }

    Ok(documents)
}
