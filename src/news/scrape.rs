// ABOUTME: ArticleScraper - downloads one article and extracts its body text.
// ABOUTME: Falls back to selector parsing, re-downloading when the first fetch failed.

use super::Source;
use super::extract::{extract_article, extract_with_selectors};
use crate::http;

/// Downloads articles and turns them into plain text.
#[derive(Clone)]
pub struct ArticleScraper {
    client: reqwest::Client,
}

impl ArticleScraper {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Extract the body of the article at `url`.
    ///
    /// Returns an empty string when neither extraction method produced text;
    /// failures are logged, never raised.
    pub async fn scrape(&self, url: &str, source: Source) -> String {
        let html = match http::get_text(&self.client, url).await {
            Ok(html) => {
                if let Some(text) = extract_article(&html) {
                    return text;
                }
                tracing::debug!(url, "primary extraction found no article body");
                html
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "primary download failed, retrying for fallback");
                match self.download_lenient(url).await {
                    Some(html) => html,
                    None => return String::new(),
                }
            }
        };

        extract_with_selectors(&html, source)
    }

    /// Fetch a body without judging the status code.
    async fn download_lenient(&self, url: &str) -> Option<String> {
        let result = match self.client.get(url).send().await {
            Ok(response) => response.text().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(url, error = %e, "fallback download failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn html(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html")
            .set_body_string(body.to_string())
    }

    #[tokio::test]
    async fn test_primary_extraction() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/story"))
            .respond_with(html(
                "<article><p>Ports reopened after a week of strikes disrupted global shipping.</p></article>",
            ))
            .mount(&server)
            .await;

        let scraper = ArticleScraper::new(reqwest::Client::new());
        let text = scraper
            .scrape(&format!("{}/story", server.uri()), Source::Guardian)
            .await;
        assert_eq!(text, "Ports reopened after a week of strikes disrupted global shipping.");
    }

    #[tokio::test]
    async fn test_selector_fallback_on_empty_primary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nyt"))
            .respond_with(html(
                r#"<section name="articleBody"><p>Short one.</p><p>Short two.</p></section>"#,
            ))
            .mount(&server)
            .await;

        let scraper = ArticleScraper::new(reqwest::Client::new());
        let text = scraper
            .scrape(&format!("{}/nyt", server.uri()), Source::Nyt)
            .await;
        assert_eq!(text, "Short one. Short two.");
    }

    #[tokio::test]
    async fn test_error_status_still_parsed_by_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/paywalled"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_string(r#"<div class="article-body"><p>Teaser text.</p></div>"#),
            )
            .expect(2)
            .mount(&server)
            .await;

        let scraper = ArticleScraper::new(reqwest::Client::new());
        let text = scraper
            .scrape(&format!("{}/paywalled", server.uri()), Source::Aljazeera)
            .await;
        assert_eq!(text, "Teaser text.");
    }

    #[tokio::test]
    async fn test_unreachable_url_yields_empty() {
        let scraper = ArticleScraper::new(reqwest::Client::new());
        let text = scraper.scrape("http://127.0.0.1:1/nothing", Source::Nyt).await;
        assert!(text.is_empty());
    }
}
