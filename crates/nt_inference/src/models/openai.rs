use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use nt_core::{Error, RawReport, ReportGenerator, ReportPrompt, ReportStyle, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::Config;

const NARRATIVE_SYSTEM_PROMPT: &str = "You are a senior news editor. Research the most recent, \
reputable coverage for the requested area and write one professional news article in markdown: \
a headline, an executive summary, the main story, key developments, impact and analysis, key \
takeaways as a bullet list, and a list of sources with attribution.";

const STRUCTURED_SYSTEM_PROMPT: &str = "You are a news editor producing content that software \
will split into individual articles. Group articles under category headers written as \
`### Category Name`. Write every article in exactly this shape:\n\
1. **Article Title Here**\n\
   Brief summary of the article (1-2 sentences)\n\
   [Read more](full_url_here) (Source Name, Month Day, Year)\n\
Do not write anything outside this structure.";

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// Report generator backed by an OpenAI-compatible chat completions API.
pub struct OpenAIModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl OpenAIModel {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Inference("OpenAI API key is required".to_string()))?;

        let base_url = Url::parse(config.model_url())
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.model_url(), e)))?;

        Ok(Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            model_name: config.model_name().to_string(),
        })
    }

    fn build_request(&self, prompt: &ReportPrompt) -> ChatRequest {
        let system = match prompt.style {
            ReportStyle::Narrative => NARRATIVE_SYSTEM_PROMPT,
            ReportStyle::Structured => STRUCTURED_SYSTEM_PROMPT,
        };

        ChatRequest {
            model: self.model_name.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.text.clone(),
                },
            ],
        }
    }
}

impl fmt::Debug for OpenAIModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl ReportGenerator for OpenAIModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn generate(&self, prompt: &ReportPrompt) -> Result<RawReport> {
        let request = self.build_request(prompt);
        info!("🤖 Requesting {:?} report from {}", prompt.style, self.model_name);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Inference("Model returned no content".to_string()))?;

        debug!("Model returned {} bytes", content.len());
        Ok(RawReport::Text(content))
    }
}
