// ABOUTME: Sentence splitting for article text.
// ABOUTME: Unicode sentence boundaries with abbreviation, initial, and lower-case continuation merges.

use std::collections::HashSet;
use std::sync::LazyLock;

use unicode_segmentation::UnicodeSegmentation;

static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "gen", "col", "lt", "sgt", "capt",
        "gov", "sen", "rep", "rev", "hon", "pres", "vs", "etc", "inc", "corp", "co", "ltd", "llc",
        "dept", "est", "fig", "no", "vol", "approx", "jan", "feb", "mar", "apr", "jun", "jul",
        "aug", "sep", "sept", "oct", "nov", "dec",
    ]
    .into_iter()
    .collect()
});

/// Split text into trimmed, non-empty sentences.
///
/// A line break always ends a sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.lines().flat_map(split_line).collect()
}

fn split_line(line: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut pending = String::new();

    for piece in line.unicode_sentences() {
        if !pending.trim().is_empty() && !continues(&pending, piece) {
            push_trimmed(&mut sentences, &pending);
            pending.clear();
        }
        pending.push_str(piece);
    }

    push_trimmed(&mut sentences, &pending);
    sentences
}

/// Whether `next` continues the sentence in `before` rather than starting a
/// new one. Only a trailing period can be a false boundary.
fn continues(before: &str, next: &str) -> bool {
    let Some(before) = before.trim_end().strip_suffix('.') else {
        return false;
    };

    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    let is_initial = word.chars().count() == 1 && word.chars().all(char::is_alphabetic);
    if is_initial || word.contains('.') || ABBREVIATIONS.contains(word.as_str()) {
        return true;
    }

    next.trim_start()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .chars()
        .next()
        .is_some_and(char::is_lowercase)
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_split() {
        assert_eq!(
            split_sentences("Stocks rose. Bonds fell! Why? Nobody knows."),
            vec!["Stocks rose.", "Bonds fell!", "Why?", "Nobody knows."]
        );
    }

    #[test]
    fn test_abbreviations_and_initials() {
        assert_eq!(
            split_sentences("Mr. Smith met J. R. Jones at Acme Inc. today. They agreed."),
            vec!["Mr. Smith met J. R. Jones at Acme Inc. today.", "They agreed."]
        );
        assert_eq!(
            split_sentences("The U.S. economy grew. Prices held."),
            vec!["The U.S. economy grew.", "Prices held."]
        );
    }

    #[test]
    fn test_decimals_and_lowercase_continuation() {
        assert_eq!(
            split_sentences("Growth was 3.5 percent. analysts were surprised."),
            vec!["Growth was 3.5 percent. analysts were surprised."]
        );
    }

    #[test]
    fn test_closing_quotes_stay_with_sentence() {
        assert_eq!(
            split_sentences(r#"He said "we won." Then he left."#),
            vec![r#"He said "we won.""#, "Then he left."]
        );
    }

    #[test]
    fn test_newlines_are_boundaries() {
        assert_eq!(
            split_sentences("First article without stop\n\n  Second one.  \n"),
            vec!["First article without stop", "Second one."]
        );
        assert!(split_sentences("   \n ").is_empty());
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(
            split_sentences("Él ganó la final. ¿Quién lo vio? Nadie."),
            vec!["Él ganó la final.", "¿Quién lo vio?", "Nadie."]
        );
    }

    #[test]
    fn test_title_abbreviation_joins_following_name() {
        assert_eq!(
            split_sentences("Shares of Acme Corp. rose. Dr. Lee sold."),
            vec!["Shares of Acme Corp. rose.", "Dr. Lee sold."]
        );
    }
}
