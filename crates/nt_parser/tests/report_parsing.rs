use nt_core::RawReport;
use nt_parser::prelude::*;

const EPS: f64 = 1e-9;

fn build_report(layout: &[(&str, usize)]) -> String {
    let mut out = String::new();
    let mut n = 0;
    for (category, items) in layout {
        out.push_str(&format!("### {}\n", category));
        for i in 1..=*items {
            n += 1;
            out.push_str(&format!("{}. **{} story {}**\n", i, category, n));
            out.push_str(&format!("   Summary of story {}.\n", n));
            out.push_str(&format!(
                "   [Read more](https://example.com/{}) (Source {}, May {}, 2025)\n\n",
                n, n, n
            ));
        }
    }
    out
}

#[test]
fn test_single_article_with_all_fields() {
    let text = "### Politics\n1. **A** \n  Summary line\n  [Read more](http://x.com/a) (Reuters, May 1, 2025)";
    let result = parse(text, None);

    assert_eq!(result.total_articles, 1);
    let article = &result.articles[0];
    assert_eq!(article.id, "1");
    assert_eq!(article.title, "A");
    assert_eq!(article.category, "Politics");
    assert_eq!(article.summary, "Summary line");
    assert_eq!(article.source, "Reuters");
    assert_eq!(article.published_date.as_deref(), Some("May 1, 2025"));
    assert_eq!(article.url, "http://x.com/a");
    assert!(article.relevance_score >= 0.8 - EPS);
    assert_eq!(result.categories.get("Politics"), Some(1));
}

#[test]
fn test_empty_link_gives_empty_url() {
    let result = parse("1. **T**\nSum\n[Read more]() (Reuters, May 1, 2025)", None);

    let article = &result.articles[0];
    assert_eq!(article.url, "");
    assert_eq!(article.source, "Reuters");
    assert_eq!(article.published_date.as_deref(), Some("May 1, 2025"));
}

#[test]
fn test_item_without_link_keeps_defaults() {
    let text = "### Local News\n\
                1. **Park reopens**\n\
                   The park is open again.\n\
                   [Read more](https://news.example/park) (City Herald, May 20, 2025)\n\
                \n\
                2. **Road works**\n\
                   Lanes closed downtown.\n";
    let result = parse(text, None);

    assert_eq!(result.total_articles, 2);
    let second = &result.articles[1];
    assert_eq!(second.id, "2");
    assert_eq!(second.title, "Road works");
    assert_eq!(second.summary, "Lanes closed downtown.");
    assert_eq!(second.url, "");
    assert_eq!(second.source, "Unknown");
    assert_eq!(second.published_date, None);
    assert!((second.relevance_score - 0.5).abs() < EPS);
    assert_eq!(result.categories.get("Local News"), Some(2));
}

#[test]
fn test_wrapped_report_end_to_end() {
    let raw = r####"TeamRunResponse(content="### Sports\n1. **Win** \n [Read more](u) (S, 2024)", content_type='str')"####;
    let text = unwrap_text(raw);
    assert_eq!(text, "### Sports\n1. **Win** \n [Read more](u) (S, 2024)");

    let result = parse(&text, None);
    assert_eq!(result.total_articles, 1);
    let article = &result.articles[0];
    assert_eq!(article.category, "Sports");
    assert_eq!(article.title, "Win");
    assert_eq!(article.summary, "");
    assert_eq!(article.url, "u");
    assert_eq!(article.source, "S");
    assert_eq!(article.published_date.as_deref(), Some("2024"));
    assert!((article.relevance_score - 0.5).abs() < EPS);
}

#[test]
fn test_typed_wrapper_parses_directly() {
    let report = RawReport::wrapped(
        "TeamRunResponse",
        "### Business\n1. **Major merger**\nTwo banks combine.\n[Read more](https://b.example) (FT, June 2, 2025)",
    );
    let result = parse_report(&report, None);
    assert_eq!(result.total_articles, 1);
    assert!((result.articles[0].relevance_score - 0.9).abs() < EPS);
}

#[test]
fn test_empty_input() {
    let result = parse("", None);
    assert!(result.articles.is_empty());
    assert!(result.categories.is_empty());
    assert_eq!(result.total_articles, 0);
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!({"articles": [], "categories": {}, "total_articles": 0})
    );
}

#[test]
fn test_counts_match_layout() {
    let layout = [("Politics", 2), ("Sports", 1), ("Local News", 3), ("Business", 0)];
    let result = parse(&build_report(&layout), None);

    assert_eq!(result.total_articles, 6);
    assert_eq!(result.categories.total(), 6);
    for (category, items) in layout {
        assert_eq!(result.categories.get(category), Some(items));
    }
    assert_eq!(
        result.categories.names(),
        vec!["Politics", "Sports", "Local News", "Business"]
    );
}

#[test]
fn test_articles_keep_text_order_and_sequential_ids() {
    let layout = [("Sports", 2), ("Politics", 2)];
    let result = parse(&build_report(&layout), None);

    let titles: Vec<&str> = result.articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Sports story 1", "Sports story 2", "Politics story 3", "Politics story 4"]
    );
    let ids: Vec<&str> = result.articles.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[test]
fn test_last_item_without_trailing_newline() {
    let text = "### Politics\n1. **First**\nOne.\n[Read more](a) (A, 2025)\n2. **Last**\nTwo.\n[Read more](b) (B, 2025)";
    let result = parse(text, None);
    assert_eq!(result.total_articles, 2);
    assert_eq!(result.articles[1].title, "Last");
    assert_eq!(result.articles[1].url, "b");
}

#[test]
fn test_orphan_fragments_are_dropped() {
    let text = "Some preamble from the writer.\n[Read more](http://x) (Nobody, 2025)\n\nReport compiled by AI News Team";
    let result = parse(text, None);
    assert_eq!(result, ParseResult::empty());
}

#[test]
fn test_articles_before_any_header_are_general() {
    let text = "1. **Unfiled**\nNo header above.\n### Sports\n1. **Filed**";
    let result = parse(text, None);
    assert_eq!(result.articles[0].category, "General");
    assert_eq!(result.articles[1].category, "Sports");
    assert_eq!(result.categories.names(), vec!["General", "Sports"]);
}

#[test]
fn test_only_first_summary_line_is_kept() {
    let text = "1. **Title**\nFirst line.\nSecond line.\n[Read more](u) (S, 2023)";
    let result = parse(text, None);
    assert_eq!(result.articles[0].summary, "First line.");
    assert_eq!(result.articles[0].source, "S");
}

#[test]
fn test_requested_categories_do_not_filter() {
    let layout = [("Politics", 1), ("Sports", 1)];
    let requested = vec!["Sports".to_string()];
    let result = parse(&build_report(&layout), Some(&requested));
    assert_eq!(result.total_articles, 2);
    assert_eq!(result.categories.get("Politics"), Some(1));
}

#[test]
fn test_crlf_and_indentation_are_tolerated() {
    let text = "### Politics\r\n    1. **Indented**\r\n\t Summary\r\n  [Read more](http://x) (AP, Jan 2, 2025)\r\n";
    let result = parse(text, None);
    assert_eq!(result.total_articles, 1);
    assert_eq!(result.articles[0].summary, "Summary");
    assert_eq!(result.articles[0].published_date.as_deref(), Some("Jan 2, 2025"));
}

#[test]
fn test_keywords_raise_score_on_link() {
    let text = "1. **Breaking: major fire**\nLatest updates inside.\n[Read more](u) (S, 2025)";
    let result = parse(text, None);
    assert_eq!(result.articles[0].relevance_score, 1.0);
}

#[test]
fn test_score_stays_at_base_without_link_line() {
    let text = "1. **Breaking: major fire**\nLatest updates inside.";
    let result = parse(text, None);
    assert!((result.articles[0].relevance_score - 0.5).abs() < EPS);
}

#[test]
fn test_custom_scorer_is_used() {
    let parser = NewsParser::with_scorer(RelevanceScorer::new("2026", ["derby"]));
    let text = "### Sports\n1. **City derby**\nTied.\n[Read more](u) (S, Apr 4, 2026)";
    let result = parser.parse(text, None);
    assert!((result.articles[0].relevance_score - 0.9).abs() < EPS);
}

#[test]
fn test_unwrap_is_idempotent_on_plain_text() {
    let text = build_report(&[("Politics", 2)]);
    let once = unwrap_text(&text);
    assert_eq!(once, text);
    assert_eq!(unwrap_text(&once), once);
}
