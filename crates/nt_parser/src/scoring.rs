pub const BASE_SCORE: f64 = 0.5;
pub const RECENCY_BONUS: f64 = 0.3;
pub const KEYWORD_BONUS: f64 = 0.1;
pub const MAX_SCORE: f64 = 1.0;

/// Dates mentioning this year count as recent.
pub const DEFAULT_RECENCY_MARKER: &str = "2025";

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "breaking",
    "urgent",
    "major",
    "significant",
    "important",
    "latest",
];

/// Heuristic priority of an article, from keyword presence and a crude
/// recency check on the date text. Scores stay within `[0.5, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelevanceScorer {
    recency_marker: String,
    keywords: Vec<String>,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(DEFAULT_RECENCY_MARKER, DEFAULT_KEYWORDS.iter().copied())
    }
}

impl RelevanceScorer {
    pub fn new<I, S>(recency_marker: &str, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            recency_marker: recency_marker.to_string(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn score(&self, title: &str, summary: &str, published_date: Option<&str>) -> f64 {
        let mut score = BASE_SCORE;

        if published_date.is_some_and(|date| date.contains(&self.recency_marker)) {
            score += RECENCY_BONUS;
        }

        let text = format!("{} {}", title, summary).to_lowercase();
        for keyword in &self.keywords {
            if text.contains(keyword.as_str()) {
                score += KEYWORD_BONUS;
            }
        }

        score.min(MAX_SCORE)
    }
}

/// Scores with the default recency marker and keyword list.
pub fn score(title: &str, summary: &str, published_date: Option<&str>) -> f64 {
    RelevanceScorer::default().score(title, summary, published_date)
}
