// ABOUTME: VADER polarity scoring backed by the vader_sentiment crate and its
// ABOUTME: full valence lexicon, exposed through the PolarityAnalyzer seam.

use std::collections::HashMap;

use super::PolarityAnalyzer;

/// Proportions of negative, neutral and positive content plus the
/// normalized compound score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl PolarityScores {
    fn from_map(scores: &HashMap<&str, f64>) -> Self {
        let field = |key: &str| round4(scores.get(key).copied().unwrap_or(0.0));
        Self {
            neg: field("neg"),
            neu: field("neu"),
            pos: field("pos"),
            compound: field("compound"),
        }
    }
}

/// Scores are reported to four decimal places.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Rule based analyzer over the standard VADER lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderAnalyzer;

impl VaderAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        if text.trim().is_empty() {
            return PolarityScores::default();
        }
        let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
        PolarityScores::from_map(&analyzer.polarity_scores(text))
    }
}

impl PolarityAnalyzer for VaderAnalyzer {
    fn compound(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }
}
