// ABOUTME: Wikipedia loader - searches a topic through the MediaWiki API and
// ABOUTME: fetches plain-text extracts of the matching pages.

use std::collections::HashMap;

use serde::Deserialize;

use super::{Document, truncate_chars};
use crate::error::FetchError;

/// MediaWiki refuses larger search pages.
const MAX_SEARCH_RESULTS: usize = 300;

/// Loader options, as accepted from tool arguments.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WikipediaOptions {
    pub lang: String,
    pub load_max_docs: usize,
    pub doc_content_chars_max: usize,
}

impl Default for WikipediaOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            load_max_docs: 10,
            doc_content_chars_max: 1000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: SearchQuery,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    query: ExtractQuery,
}

#[derive(Debug, Default, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: Option<String>,
    extract: Option<String>,
}

pub struct WikipediaLoader {
    client: reqwest::Client,
    /// API endpoint with a `{lang}` placeholder.
    api_url: String,
}

impl WikipediaLoader {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// Load up to `load_max_docs` pages matching `topic`. Pages that fail to
    /// load are skipped.
    pub async fn load(&self, topic: &str, options: &WikipediaOptions) -> Result<Vec<Document>, FetchError> {
        let url = self.api_url.replace("{lang}", &options.lang);
        let limit = options.load_max_docs.min(MAX_SEARCH_RESULTS).to_string();

        let search: SearchResponse = self
            .get_json(
                &url,
                &[
                    ("action", "query"),
                    ("list", "search"),
                    ("srsearch", topic),
                    ("srlimit", limit.as_str()),
                    ("format", "json"),
                ],
            )
            .await?;

        let mut documents = Vec::new();
        for hit in search.query.search {
            match self.load_page(&url, &hit.title, options).await {
                Ok(Some(doc)) => documents.push(doc),
                Ok(None) => tracing::debug!(title = hit.title.as_str(), "page has no extract"),
                Err(e) => {
                    tracing::warn!(title = hit.title.as_str(), error = %e, "skipping Wikipedia page")
                }
            }
        }
        Ok(documents)
    }

    async fn load_page(
        &self,
        url: &str,
        title: &str,
        options: &WikipediaOptions,
    ) -> Result<Option<Document>, FetchError> {
        let response: ExtractResponse = self
            .get_json(
                url,
                &[
                    ("action", "query"),
                    ("prop", "extracts"),
                    ("explaintext", "1"),
                    ("redirects", "1"),
                    ("titles", title),
                    ("format", "json"),
                ],
            )
            .await?;

        let Some(page) = response.query.pages.into_values().next() else {
            return Ok(None);
        };
        let Some(extract) = page.extract.filter(|e| !e.trim().is_empty()) else {
            return Ok(None);
        };
        let title = page.title.unwrap_or_else(|| title.to_string());
        let summary = extract.split("\n\n").next().unwrap_or_default().trim().to_string();
        let source = format!(
            "https://{}.wikipedia.org/wiki/{}",
            options.lang,
            urlencoding::encode(&title.replace(' ', "_"))
        );

        Ok(Some(
            Document::new(truncate_chars(extract.trim(), options.doc_content_chars_max))
                .with_meta("title", title)
                .with_meta("summary", summary)
                .with_meta("source", source),
        ))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let response = self.client.get(url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_search(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/en/w/api.php"))
            .and(query_param("list", "search"))
            .and(query_param("srsearch", "Rust language"))
            .and(query_param("srlimit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"search": [{"title": "Rust (programming language)"}, {"title": "Broken page"}]}
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/en/w/api.php"))
            .and(query_param("titles", "Rust (programming language)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"pages": {"123": {
                    "title": "Rust (programming language)",
                    "extract": "Rust is a general-purpose language.\n\nIt emphasizes memory safety."
                }}}
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/en/w/api.php"))
            .and(query_param("titles", "Broken page"))
            .respond_with(ResponseTemplate::new(500))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_load_skips_failed_pages() {
        let server = MockServer::start().await;
        mount_search(&server).await;

        let loader = WikipediaLoader::new(
            reqwest::Client::new(),
            format!("{}/{{lang}}/w/api.php", server.uri()),
        );
        let options = WikipediaOptions {
            load_max_docs: 2,
            doc_content_chars_max: 20,
            ..WikipediaOptions::default()
        };
        let docs = loader.load("Rust language", &options).await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "Rust is a general-pu");
        assert_eq!(docs[0].metadata["summary"], "Rust is a general-purpose language.");
        assert_eq!(
            docs[0].metadata["source"],
            "https://en.wikipedia.org/wiki/Rust_%28programming_language%29"
        );
    }

    #[tokio::test]
    async fn test_search_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let loader = WikipediaLoader::new(reqwest::Client::new(), server.uri());
        let err = loader
            .load("anything", &WikipediaOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }
}
