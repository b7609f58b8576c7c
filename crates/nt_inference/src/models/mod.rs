use std::sync::Arc;

use nt_core::{Error, ReportGenerator, Result};
use tracing::info;

use crate::Config;

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAIModel;

pub const AVAILABLE_MODELS: &[&str] = &["openai", "dummy"];

/// Builds the report generator named by `config.model`.
pub fn create_model(config: Option<Config>) -> Result<Arc<dyn ReportGenerator>> {
    let config = config.unwrap_or_default();
    let model: Arc<dyn ReportGenerator> = match config.model.to_lowercase().as_str() {
        "openai" => Arc::new(OpenAIModel::new(&config)?),
        "dummy" => Arc::new(DummyModel::new()),
        other => {
            return Err(Error::Inference(format!(
                "Unknown model '{}'. Available models: {}",
                other,
                AVAILABLE_MODELS.join(", ")
            )))
        }
    };
    info!("🧠 Report generator ready (using {})", model.name());
    Ok(model)
}
