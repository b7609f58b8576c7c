//! Turns loosely formatted news reports into typed articles.
//!
//! A report goes through two steps: [`envelope::unwrap_report`] peels off any
//! response wrapper around the text, then [`parser::NewsParser`] walks the
//! lines once and collects articles grouped by category. Both are pure and
//! never fail outward; malformed input degrades to defaults or an empty
//! result.

pub mod envelope;
pub mod parser;
pub mod scoring;

pub use envelope::{unwrap_display, unwrap_report, unwrap_text};
pub use parser::{parse, parse_report, NewsParser};
pub use scoring::{score, RelevanceScorer};

pub mod prelude {
    pub use super::envelope::{unwrap_display, unwrap_report, unwrap_text};
    pub use super::parser::{parse, parse_report, NewsParser};
    pub use super::scoring::{score, RelevanceScorer};
    pub use nt_core::{CategoryCounts, NewsArticle, ParseResult, RawReport};
}
