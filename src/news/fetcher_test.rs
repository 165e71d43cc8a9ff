// ABOUTME: Tests for NewsFetcher against mocked news upstreams.
// ABOUTME: Covers rate limits, transient retries, per-section failures, fallbacks, and combined runs.

use std::path::Path;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::config::{RetrySettings, ToolsConfig};

const BODY: &str = "Markets rallied as Acme Corp posted strong earnings for the quarter.";

fn test_config(server: &MockServer, base: &Path) -> ToolsConfig {
    let mut config = ToolsConfig::default();
    config.news.base_dir = base.to_path_buf();
    config.news.nyt_base_url = format!("{}/topstories", server.uri());
    config.news.nyt_sections = vec!["business".to_string()];
    config.news.guardian_base_url = format!("{}/search", server.uri());
    config.news.aljazeera_feeds.clear();
    config
        .news
        .aljazeera_feeds
        .insert("world".to_string(), format!("{}/rss.xml", server.uri()));
    config.news.article_delay_ms = 0;
    config.news.section_delay_ms = 0;
    config.news.rate_limit_grace_secs = 0;
    let fast = RetrySettings {
        max_attempts: 3,
        max_elapsed_secs: 5,
        initial_delay_ms: 10,
        max_delay_ms: 20,
    };
    config.news.section_retry = fast.clone();
    config.news.feed_retry = fast;
    config.credentials.nyt_api_key = Some("nyt-key".to_string());
    config.credentials.guardian_api_key = Some("guardian-key".to_string());
    config
}

fn article_page(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html")
        .set_body_string(format!("<html><body><article><p>{}</p></article></body></html>", text))
}

fn feed(server: &MockServer, items: &[(&str, &str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(title, summary, slug)| {
            format!(
                "<item><title>{}</title><description>{}</description><link>{}/{}</link></item>",
                title,
                summary,
                server.uri(),
                slug
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0"?><rss version="2.0"><channel><title>All</title><link>https://aj</link><description>d</description>{}</channel></rss>"#,
        items
    )
}

async fn mount_nyt_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/topstories/business.json"))
        .and(query_param("api-key", "nyt-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"title": "Acme beats forecasts", "abstract": "Shares up", "url": format!("{}/nyt/acme", server.uri())},
                {"title": "Weather", "abstract": "Rain", "url": format!("{}/nyt/rain", server.uri())}
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nyt/acme"))
        .respond_with(article_page(BODY))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_nyt_keeps_only_matching_stories() {
    let server = MockServer::start().await;
    mount_nyt_listing(&server).await;
    Mock::given(method("GET"))
        .and(path("/nyt/rain"))
        .respond_with(article_page("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));
    let outcome = fetcher.fetch(Source::Nyt, &["acme".to_string()]).await;

    let FetchOutcome::Single(report) = outcome else {
        panic!("expected a single-source report");
    };
    assert_eq!(report.saved_articles, 1);
    assert_eq!(report.status, RunStatus::Success);
    assert_eq!(
        report.file,
        dir.path().join("nyt_articles_output").join("nyt_articles.txt")
    );
    assert_eq!(
        std::fs::read_to_string(&report.file).unwrap(),
        format!("{}\n", BODY)
    );
}

#[tokio::test]
async fn test_nyt_waits_for_rate_limit_reset() {
    let server = MockServer::start().await;
    let reset = chrono::Utc::now().timestamp() + 1;
    Mock::given(method("GET"))
        .and(path("/topstories/business.json"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-rate-limit-remaining", "0")
                .insert_header("x-rate-limit-reset", reset.to_string().as_str()),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_nyt_listing(&server).await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));

    let started = Instant::now();
    let outcome = fetcher.fetch(Source::Nyt, &["acme".to_string()]).await;

    assert!(started.elapsed() >= Duration::from_millis(900));
    assert_eq!(outcome.saved_articles(), 1);
}

#[tokio::test]
async fn test_nyt_exhausted_quota_skips_section() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topstories/business.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("x-rate-limit-remaining", "0"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));
    let outcome = fetcher.fetch(Source::Nyt, &["acme".to_string()]).await;

    assert_eq!(outcome.saved_articles(), 0);
    assert_eq!(outcome.status(), RunStatus::Failed);
}

#[tokio::test]
async fn test_missing_key_reports_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&server, dir.path());
    config.credentials.nyt_api_key = None;

    let fetcher = NewsFetcher::new(&config);
    let FetchOutcome::Single(report) = fetcher.fetch(Source::Nyt, &["acme".to_string()]).await
    else {
        panic!("expected a single-source report");
    };

    assert_eq!(report.saved_articles, 0);
    assert_eq!(report.status, RunStatus::Failed);
    assert!(report.error.unwrap().contains("NYT API key"));
}

#[tokio::test]
async fn test_guardian_falls_back_to_api_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "trade"))
        .and(query_param("page-size", "50"))
        .and(query_param("show-fields", "bodyText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": {
                "results": [{
                    "webUrl": format!("{}/guardian/empty", server.uri()),
                    "fields": {"bodyText": "Trade talks resumed.\nBoth sides were hopeful."}
                }]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/guardian/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));
    let FetchOutcome::Single(report) = fetcher.fetch(Source::Guardian, &["trade".to_string()]).await
    else {
        panic!("expected a single-source report");
    };

    assert_eq!(report.saved_articles, 1);
    assert_eq!(
        std::fs::read_to_string(&report.file).unwrap(),
        "Trade talks resumed. Both sides were hopeful.\n"
    );
}

#[tokio::test]
async fn test_aljazeera_zero_matches_writes_empty_file() {
    let server = MockServer::start().await;
    let xml = feed(&server, &[("Football final", "A late goal", "aj/football")]);
    Mock::given(method("GET"))
        .and(path("/rss.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/aj/football"))
        .respond_with(article_page("The home side won after a dramatic late goal in extra time."))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));
    let FetchOutcome::Single(report) = fetcher.fetch(Source::Aljazeera, &["economy".to_string()]).await
    else {
        panic!("expected a single-source report");
    };

    assert_eq!(report.saved_articles, 0);
    assert_eq!(report.status, RunStatus::Failed);
    assert_eq!(std::fs::read_to_string(&report.file).unwrap(), "");
}

#[tokio::test]
async fn test_aljazeera_late_inclusion_by_body() {
    let server = MockServer::start().await;
    let xml = feed(&server, &[("Ports reopen", "Shipping resumes", "aj/ports")]);
    Mock::given(method("GET"))
        .and(path("/rss.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/aj/ports"))
        .respond_with(article_page("Analysts expect the economy to recover as ports reopen fully."))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));
    let outcome = fetcher.fetch(Source::Aljazeera, &["economy".to_string()]).await;

    assert_eq!(outcome.saved_articles(), 1);
}

#[tokio::test]
async fn test_combined_run_concatenates_sources() {
    let server = MockServer::start().await;
    mount_nyt_listing(&server).await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let xml = feed(&server, &[("Acme expands abroad", "New plant", "aj/acme")]);
    Mock::given(method("GET"))
        .and(path("/rss.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/aj/acme"))
        .respond_with(article_page("Acme opened a new plant that will employ two thousand workers."))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));
    let FetchOutcome::Combined(report) = fetcher.fetch(Source::All, &["acme".to_string()]).await
    else {
        panic!("expected a combined report");
    };

    let out = dir.path().join("all_articles_output");
    assert_eq!(report.saved_articles, 2);
    assert_eq!(report.status, RunStatus::Success);
    assert_eq!(report.guardian_file, out.join("guardian_articles.txt"));
    assert_eq!(report.combined_file, out.join("all_news_articles.txt"));

    let combined = std::fs::read_to_string(&report.combined_file).unwrap();
    assert_eq!(combined.lines().count(), 2);
    assert!(combined.starts_with(BODY));
}

fn listing(server: &MockServer) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "results": [
            {"title": "Acme beats forecasts", "abstract": "Shares up", "url": format!("{}/nyt/acme", server.uri())}
        ]
    }))
}

async fn mount_article(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/nyt/acme"))
        .respond_with(article_page(BODY))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_nyt_retries_bare_429() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topstories/business.json"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_nyt_listing(&server).await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));
    let outcome = fetcher.fetch(Source::Nyt, &["acme".to_string()]).await;

    assert_eq!(outcome.saved_articles(), 1);
    assert_eq!(outcome.status(), RunStatus::Success);
}

#[tokio::test]
async fn test_nyt_section_recovers_after_two_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topstories/business.json"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    mount_nyt_listing(&server).await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));
    let outcome = fetcher.fetch(Source::Nyt, &["acme".to_string()]).await;

    assert_eq!(outcome.saved_articles(), 1);
}

#[tokio::test]
async fn test_nyt_gives_up_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topstories/business.json"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));
    let outcome = fetcher.fetch(Source::Nyt, &["acme".to_string()]).await;

    assert_eq!(outcome.saved_articles(), 0);
    assert_eq!(outcome.status(), RunStatus::Failed);
}

#[tokio::test]
async fn test_nyt_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topstories/business.json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));
    let outcome = fetcher.fetch(Source::Nyt, &["acme".to_string()]).await;

    assert_eq!(outcome.saved_articles(), 0);
}

#[tokio::test]
async fn test_nyt_retries_timed_out_section() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topstories/business.json"))
        .respond_with(listing(&server).set_delay(Duration::from_secs(2)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/topstories/business.json"))
        .respond_with(listing(&server))
        .mount(&server)
        .await;
    mount_article(&server).await;

    let dir = TempDir::new().unwrap();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap();
    let fetcher = NewsFetcher::with_client(&test_config(&server, dir.path()), client);
    let outcome = fetcher.fetch(Source::Nyt, &["acme".to_string()]).await;

    assert_eq!(outcome.saved_articles(), 1);
}

#[tokio::test]
async fn test_failed_section_does_not_stop_the_others() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topstories/business.json"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/topstories/world.json"))
        .and(query_param("api-key", "nyt-key"))
        .respond_with(listing(&server))
        .expect(1)
        .mount(&server)
        .await;
    mount_article(&server).await;

    let dir = TempDir::new().unwrap();
    let mut config = test_config(&server, dir.path());
    config.news.nyt_sections = vec!["business".to_string(), "world".to_string()];
    let fetcher = NewsFetcher::new(&config);
    let FetchOutcome::Single(report) = fetcher.fetch(Source::Nyt, &["acme".to_string()]).await
    else {
        panic!("expected a single-source report");
    };

    assert_eq!(report.saved_articles, 1);
    assert_eq!(report.status, RunStatus::Success);
    assert_eq!(
        std::fs::read_to_string(&report.file).unwrap(),
        format!("{}\n", BODY)
    );
}

#[tokio::test]
async fn test_multi_paragraph_article_is_one_single_spaced_line() {
    let second = "Analysts had widely expected the result after a week of mixed data.";
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topstories/business.json"))
        .respond_with(listing(&server))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nyt/acme"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(format!(
                    "<html><body><article><p>{}</p><p>{}</p></article></body></html>",
                    BODY, second
                )),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let fetcher = NewsFetcher::new(&test_config(&server, dir.path()));
    let FetchOutcome::Single(report) = fetcher.fetch(Source::Nyt, &["acme".to_string()]).await
    else {
        panic!("expected a single-source report");
    };

    let blob = std::fs::read_to_string(&report.file).unwrap();
    assert_eq!(blob, format!("{} {}\n", BODY, second));
    assert!(!blob.contains("  "));
}
