pub mod models;
pub mod prompt;

pub const DEFAULT_MODEL: &str = "openai";
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o";
pub const DEFAULT_MODEL_URL: &str = "https://api.openai.com/v1";

/// Selects and configures the report generator.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend name, `openai` or `dummy`.
    pub model: String,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub model_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            model_name: None,
            model_url: None,
        }
    }
}

impl Config {
    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL_NAME)
    }

    pub fn model_url(&self) -> &str {
        self.model_url.as_deref().unwrap_or(DEFAULT_MODEL_URL)
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::prompt::{
        fixed_location_narrative_prompt, fixed_location_structured_prompt, narrative_prompt,
        structured_prompt,
    };
    pub use super::Config;
    pub use nt_core::{Error, RawReport, ReportGenerator, ReportPrompt, ReportStyle, Result};
}

pub use models::create_model;
