//! Prompts sent to the report generator.

use nt_core::{LocationRequest, ReportPrompt};

/// Categories asked for when the caller names none.
pub const DEFAULT_CATEGORIES: &[&str] = &["Politics", "Sports", "Local News", "Business"];

/// Article target for the fixed-location test prompts.
const TEST_TARGET_ARTICLES: u32 = 8;

fn focus_suffix(categories: Option<&[String]>) -> String {
    match categories {
        Some(categories) if !categories.is_empty() => {
            format!(" focusing on {}", categories.join(", "))
        }
        _ => String::new(),
    }
}

fn category_list(categories: Option<&[String]>) -> String {
    match categories {
        Some(categories) if !categories.is_empty() => categories.join(", "),
        _ => DEFAULT_CATEGORIES.join(", "),
    }
}

fn structured_format_block(target_articles: u32, radius: Option<f64>) -> Vec<String> {
    let mut lines = vec![
        "Format Requirements:".to_string(),
        "- Use category headers: ### Category Name".to_string(),
        "- List articles as: 1. **Title** followed by summary and source".to_string(),
        "- Include full URLs and source attribution".to_string(),
        format!("- Target {} articles total", target_articles),
    ];
    if let Some(radius) = radius {
        lines.push(format!("- Focus on recent news within {}km", radius));
    }
    lines.extend([
        "- Use EXACTLY this format for each article:".to_string(),
        "  1. **Article Title Here**".to_string(),
        "     Brief summary of the article (1-2 sentences)".to_string(),
        "     [Read more](full_url_here) (Source Name, Date)".to_string(),
    ]);
    lines
}

pub fn narrative_prompt(location_name: &str, request: &LocationRequest) -> ReportPrompt {
    let lines = [
        format!(
            "Create a comprehensive news report for {}{}.",
            location_name,
            focus_suffix(request.categories.as_deref())
        ),
        String::new(),
        "Requirements:".to_string(),
        format!(
            "- Find the top {} most recent and relevant news articles",
            request.max_results
        ),
        format!(
            "- Cover news within approximately {}km of the area",
            request.radius
        ),
        "- Focus on breaking news, major developments, and significant local events".to_string(),
        "- Ensure all information is accurate and properly attributed".to_string(),
        "- Write an engaging, professional article suitable for publication".to_string(),
        String::new(),
        format!(
            "Location: {} (Coordinates: {}, {})",
            location_name, request.latitude, request.longitude
        ),
        format!("Search radius: {}km", request.radius),
        format!("Target articles: {}", request.max_results),
    ];
    ReportPrompt::narrative(lines.join("\n"))
}

pub fn structured_prompt(location_name: &str, request: &LocationRequest) -> ReportPrompt {
    let categories = request.categories.as_deref();
    let mut lines = vec![
        format!(
            "Create a structured news report for {}{}.",
            location_name,
            focus_suffix(categories)
        ),
        String::new(),
    ];
    lines.extend(structured_format_block(request.max_results, Some(request.radius)));
    lines.extend([
        String::new(),
        format!("Categories to include: {}", category_list(categories)),
        format!(
            "Location: {} (Coordinates: {}, {})",
            location_name, request.latitude, request.longitude
        ),
        format!("Search radius: {}km", request.radius),
    ]);
    ReportPrompt::structured(lines.join("\n"))
}

/// Narrative prompt for a named place, without coordinates.
pub fn fixed_location_narrative_prompt(location_name: &str) -> ReportPrompt {
    let lines = [
        format!("Create a comprehensive news report for {}.", location_name),
        String::new(),
        "Requirements:".to_string(),
        "- Find the top 5 most recent and relevant news articles".to_string(),
        "- Focus on breaking news, major developments, and significant events".to_string(),
        "- Ensure all information is accurate and properly attributed".to_string(),
        "- Write an engaging, professional article suitable for publication".to_string(),
        String::new(),
        format!("Location: {}", location_name),
    ];
    ReportPrompt::narrative(lines.join("\n"))
}

/// Structured prompt for a named place, without coordinates.
pub fn fixed_location_structured_prompt(location_name: &str) -> ReportPrompt {
    let mut lines = vec![
        format!("Create a structured news report for {}.", location_name),
        String::new(),
    ];
    lines.extend(structured_format_block(TEST_TARGET_ARTICLES, None));
    lines.extend([
        String::new(),
        format!("Categories to include: {}", category_list(None)),
        format!("Location: {}", location_name),
    ]);
    ReportPrompt::structured(lines.join("\n"))
}
