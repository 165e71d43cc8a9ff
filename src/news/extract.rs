// ABOUTME: Article body extraction from downloaded HTML.
// ABOUTME: A container-density heuristic first, source-specific selectors as fallback.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::Source;

/// Paragraphs shorter than this are treated as captions, bylines or chrome.
const MIN_PARAGRAPH_CHARS: usize = 40;

static CONTAINERS: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"article, [itemprop="articleBody"], main"#));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static NYT_BODY: LazyLock<Selector> = LazyLock::new(|| selector(r#"section[name="articleBody"]"#));
static GENERIC_BODY: LazyLock<Selector> = LazyLock::new(|| selector("div.article-body"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Primary extraction: pick the article container carrying the most
/// paragraph text and return its substantial paragraphs joined by spaces.
///
/// Returns `None` when no container holds a substantial paragraph.
pub fn extract_article(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    let best = doc
        .select(&CONTAINERS)
        .map(|container| {
            container
                .select(&PARAGRAPH)
                .map(element_text)
                .filter(|p| p.chars().count() >= MIN_PARAGRAPH_CHARS)
                .collect::<Vec<_>>()
        })
        .max_by_key(|paragraphs| paragraphs.iter().map(String::len).sum::<usize>())?;

    if best.is_empty() {
        return None;
    }
    Some(best.join(" "))
}

/// Fallback extraction with fixed selectors.
///
/// NYT pages keep their body in `section[name="articleBody"]`; every other
/// source is read from the first `div.article-body`, or the whole document
/// when there is none. Paragraphs are joined with single spaces.
pub fn extract_with_selectors(html: &str, source: Source) -> String {
    let doc = Html::parse_document(html);

    let paragraphs: Vec<String> = match source {
        Source::Nyt => doc
            .select(&NYT_BODY)
            .flat_map(|section| section.select(&PARAGRAPH))
            .map(element_text)
            .collect(),
        _ => match doc.select(&GENERIC_BODY).next() {
            Some(body) => body.select(&PARAGRAPH).map(element_text).collect(),
            None => doc.select(&PARAGRAPH).map(element_text).collect(),
        },
    };

    paragraphs.join(" ").trim().to_string()
}
