use lazy_static::lazy_static;
use nt_core::types::{DEFAULT_CATEGORY, UNKNOWN_SOURCE};
use nt_core::{CategoryCounts, Error, NewsArticle, ParseResult, RawReport, Result};
use regex::Regex;
use tracing::{debug, warn};

use crate::envelope::unwrap_report;
use crate::scoring::{RelevanceScorer, BASE_SCORE};

const HEADER_MARKER: &str = "### ";
const READ_MORE_MARKER: &str = "[Read more]";
const LINK_OPENER: char = '[';
const PREVIEW_CHARS: usize = 500;

lazy_static! {
    static ref ITEM_START: Regex =
        Regex::new(r"^\d+\.\s*\*\*(.+?)\*\*").expect("item pattern is valid");
    static ref READ_MORE_URL: Regex =
        Regex::new(r"\[Read more\]\(([^)]*)\)").expect("link pattern is valid");
    static ref SOURCE_GROUP: Regex =
        Regex::new(r"\)\s*\((.+?)\)").expect("source pattern is valid");
}

/// What the parser knows about the article it is currently filling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// No article, or one whose title came out empty.
    Empty,
    Titled,
    Summarized,
}

/// A trimmed line, classified by the first rule that matches it.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Header(&'a str),
    ItemStart(&'a str),
    Summary(&'a str),
    ReadMore(&'a str),
    Ignored,
}

fn classify(line: &str, slot: Slot) -> Result<LineKind<'_>> {
    if let Some(name) = line.strip_prefix(HEADER_MARKER) {
        return Ok(LineKind::Header(name.trim()));
    }

    if let Some(captures) = ITEM_START.captures(line) {
        let title = captures
            .get(1)
            .ok_or_else(|| Error::Parse(format!("Numbered item without a title: {}", line)))?;
        return Ok(LineKind::ItemStart(title.as_str().trim()));
    }

    if slot == Slot::Titled && !line.is_empty() && !line.starts_with(LINK_OPENER) {
        return Ok(LineKind::Summary(line));
    }

    if slot != Slot::Empty && line.contains(READ_MORE_MARKER) {
        return Ok(LineKind::ReadMore(line));
    }

    Ok(LineKind::Ignored)
}

/// Starts from a fully defaulted article and overwrites fields as the
/// report reveals them.
#[derive(Debug, Clone)]
struct ArticleBuilder {
    article: NewsArticle,
}

impl ArticleBuilder {
    fn new(id: usize, title: &str, category: &str) -> Self {
        Self {
            article: NewsArticle {
                id: id.to_string(),
                title: title.to_string(),
                summary: String::new(),
                category: category.to_string(),
                source: UNKNOWN_SOURCE.to_string(),
                url: String::new(),
                published_date: None,
                relevance_score: BASE_SCORE,
            },
        }
    }

    fn slot(&self) -> Slot {
        if self.article.title.is_empty() {
            Slot::Empty
        } else if self.article.summary.is_empty() {
            Slot::Titled
        } else {
            Slot::Summarized
        }
    }

    fn summary(&mut self, line: &str) {
        self.article.summary = line.to_string();
    }

    fn link(&mut self, line: &str, scorer: &RelevanceScorer) {
        if let Some(url) = READ_MORE_URL.captures(line).and_then(|c| c.get(1)) {
            self.article.url = url.as_str().trim().to_string();
        }

        if let Some(group) = SOURCE_GROUP.captures(line).and_then(|c| c.get(1)) {
            // Dates such as "May 1, 2025" carry their own comma, so only the
            // first one separates the source from the date.
            let mut parts = group.as_str().trim().splitn(2, ',');
            if let Some(source) = parts.next() {
                self.article.source = source.trim().to_string();
            }
            if let Some(date) = parts.next() {
                self.article.published_date = Some(date.trim().to_string());
            }
        }

        self.article.relevance_score = scorer.score(
            &self.article.title,
            &self.article.summary,
            self.article.published_date.as_deref(),
        );
    }

    fn build(self) -> NewsArticle {
        self.article
    }
}

struct ParseState<'s> {
    scorer: &'s RelevanceScorer,
    current_category: String,
    current: Option<ArticleBuilder>,
    categories: CategoryCounts,
    articles: Vec<NewsArticle>,
    next_id: usize,
}

impl<'s> ParseState<'s> {
    fn new(scorer: &'s RelevanceScorer) -> Self {
        Self {
            scorer,
            current_category: DEFAULT_CATEGORY.to_string(),
            current: None,
            categories: CategoryCounts::new(),
            articles: Vec::new(),
            next_id: 1,
        }
    }

    fn slot(&self) -> Slot {
        self.current.as_ref().map_or(Slot::Empty, ArticleBuilder::slot)
    }

    fn apply(&mut self, kind: LineKind<'_>) {
        match kind {
            LineKind::Header(name) => {
                debug!("Entering category {}", name);
                self.current_category = name.to_string();
                self.categories.ensure(name);
            }
            LineKind::ItemStart(title) => {
                self.finalize();
                debug!("Starting article {}: {}", self.next_id, title);
                if !title.is_empty() {
                    // Items before any header register the default category here.
                    self.categories.ensure(&self.current_category);
                }
                self.current = Some(ArticleBuilder::new(
                    self.next_id,
                    title,
                    &self.current_category,
                ));
                self.next_id += 1;
            }
            LineKind::Summary(line) => {
                if let Some(builder) = self.current.as_mut() {
                    builder.summary(line);
                }
            }
            LineKind::ReadMore(line) => {
                if let Some(builder) = self.current.as_mut() {
                    builder.link(line, self.scorer);
                }
            }
            LineKind::Ignored => {}
        }
    }

    /// Moves the current article to the output if it has a title.
    fn finalize(&mut self) {
        if let Some(builder) = self.current.take() {
            if builder.slot() != Slot::Empty {
                let article = builder.build();
                self.categories.increment(&article.category);
                self.articles.push(article);
            }
        }
    }

    fn finish(mut self) -> ParseResult {
        self.finalize();
        ParseResult::from_parts(self.articles, self.categories)
    }
}

/// Single-pass, line-oriented parser for structured news reports.
///
/// The expected layout is:
///
/// ```text
/// ### Category Name
/// 1. **Title**
///    Summary text
///    [Read more](url) (Source, Date)
/// ```
///
/// Missing pieces fall back to defaults. Lines that fit no rule are skipped.
#[derive(Debug, Clone, Default)]
pub struct NewsParser {
    scorer: RelevanceScorer,
}

impl NewsParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scorer(scorer: RelevanceScorer) -> Self {
        Self { scorer }
    }

    /// Parses the report text. Any failure yields an empty result.
    ///
    /// `requested_categories` is not used for filtering; every article found
    /// is returned and callers filter on [`NewsArticle::category`].
    pub fn parse(&self, text: &str, requested_categories: Option<&[String]>) -> ParseResult {
        if let Some(requested) = requested_categories {
            debug!("Parsing report, caller asked for categories {:?}", requested);
        }

        match self.try_parse(text) {
            Ok(result) => {
                debug!(
                    "Parsed {} articles in {} categories",
                    result.total_articles,
                    result.categories.len()
                );
                result
            }
            Err(e) => {
                let preview: String = text.chars().take(PREVIEW_CHARS).collect();
                warn!("Error parsing report: {}", e);
                warn!("Content preview: {}...", preview);
                ParseResult::empty()
            }
        }
    }

    pub fn try_parse(&self, text: &str) -> Result<ParseResult> {
        let mut state = ParseState::new(&self.scorer);
        for line in text.lines() {
            let kind = classify(line.trim(), state.slot())?;
            state.apply(kind);
        }
        Ok(state.finish())
    }
}

/// Parses with the default scorer.
pub fn parse(text: &str, requested_categories: Option<&[String]>) -> ParseResult {
    NewsParser::default().parse(text, requested_categories)
}

/// Unwraps a raw report and parses the result.
pub fn parse_report(report: &RawReport, requested_categories: Option<&[String]>) -> ParseResult {
    parse(&unwrap_report(report), requested_categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_wins_over_everything() {
        assert_eq!(
            classify("### Local News", Slot::Titled).unwrap(),
            LineKind::Header("Local News")
        );
    }

    #[test]
    fn test_item_start() {
        assert_eq!(
            classify("12. ** Spaced title ** extra", Slot::Summarized).unwrap(),
            LineKind::ItemStart("Spaced title")
        );
        assert_eq!(
            classify("3.**Tight**", Slot::Empty).unwrap(),
            LineKind::ItemStart("Tight")
        );
        assert_eq!(
            classify("Item 1. **Not numbered first**", Slot::Empty).unwrap(),
            LineKind::Ignored
        );
    }

    #[test]
    fn test_summary_needs_title_without_summary() {
        assert_eq!(
            classify("Something happened", Slot::Titled).unwrap(),
            LineKind::Summary("Something happened")
        );
        assert_eq!(classify("Something happened", Slot::Empty).unwrap(), LineKind::Ignored);
        assert_eq!(
            classify("Something else", Slot::Summarized).unwrap(),
            LineKind::Ignored
        );
        assert_eq!(classify("", Slot::Titled).unwrap(), LineKind::Ignored);
    }

    #[test]
    fn test_read_more_line() {
        let line = "[Read more](http://x.com/a) (Reuters, May 1, 2025)";
        assert_eq!(classify(line, Slot::Titled).unwrap(), LineKind::ReadMore(line));
        assert_eq!(classify(line, Slot::Summarized).unwrap(), LineKind::ReadMore(line));
        assert_eq!(classify(line, Slot::Empty).unwrap(), LineKind::Ignored);
    }

    #[test]
    fn test_unbracketed_line_with_link_is_a_summary_first() {
        let line = "Full story: [Read more](http://x) (AP, 2025)";
        assert_eq!(classify(line, Slot::Titled).unwrap(), LineKind::Summary(line));
        assert_eq!(classify(line, Slot::Summarized).unwrap(), LineKind::ReadMore(line));
    }

    #[test]
    fn test_link_extracts_url_source_and_date() {
        let scorer = RelevanceScorer::default();
        let mut builder = ArticleBuilder::new(1, "Title", "Politics");
        builder.link("[Read more]( http://x.com/a ) (Reuters , May 1, 2025)", &scorer);
        let article = builder.build();
        assert_eq!(article.url, "http://x.com/a");
        assert_eq!(article.source, "Reuters");
        assert_eq!(article.published_date.as_deref(), Some("May 1, 2025"));
        assert!((article.relevance_score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_link_without_source_group_keeps_defaults() {
        let scorer = RelevanceScorer::default();
        let mut builder = ArticleBuilder::new(4, "Breaking title", "Sports");
        builder.link("[Read more](http://x.com/b)", &scorer);
        let article = builder.build();
        assert_eq!(article.url, "http://x.com/b");
        assert_eq!(article.source, UNKNOWN_SOURCE);
        assert_eq!(article.published_date, None);
        assert!((article.relevance_score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_source_only_group() {
        let scorer = RelevanceScorer::default();
        let mut builder = ArticleBuilder::new(1, "T", "General");
        builder.link("[Read more](u) (BBC)", &scorer);
        let article = builder.build();
        assert_eq!(article.source, "BBC");
        assert_eq!(article.published_date, None);
    }

    #[test]
    fn test_empty_title_is_never_emitted() {
        let result = parse("1. **   **\nSummary\n[Read more](u) (S, 2025)", None);
        assert!(result.is_empty());
        assert!(result.categories.is_empty());
    }

    #[test]
    fn test_repeated_header_keeps_count() {
        let text = "### A\n1. **One**\n### B\n### A\n2. **Two**";
        let result = parse(text, None);
        assert_eq!(result.categories.get("A"), Some(2));
        assert_eq!(result.categories.get("B"), Some(0));
        assert_eq!(result.categories.names(), vec!["A", "B"]);
    }

    #[test]
    fn test_count_follows_article_category() {
        // The header after item One must not steal its count.
        let text = "### A\n1. **One**\n### B\n2. **Two**";
        let result = parse(text, None);
        assert_eq!(result.categories.get("A"), Some(1));
        assert_eq!(result.categories.get("B"), Some(1));
        assert_eq!(result.articles[0].category, "A");
        assert_eq!(result.articles[1].category, "B");
    }
}
