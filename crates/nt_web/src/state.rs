use std::sync::Arc;

use nt_core::{Geocoder, ReportArchive, ReportGenerator};
use nt_parser::NewsParser;

pub struct AppState {
    pub generator: Arc<dyn ReportGenerator>,
    pub geocoder: Arc<dyn Geocoder>,
    pub archive: Arc<dyn ReportArchive>,
    pub parser: NewsParser,
    /// Whether an API key for the hosted model was supplied.
    pub openai_configured: bool,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn ReportGenerator>,
        geocoder: Arc<dyn Geocoder>,
        archive: Arc<dyn ReportArchive>,
    ) -> Self {
        Self {
            generator,
            geocoder,
            archive,
            parser: NewsParser::default(),
            openai_configured: false,
        }
    }

    pub fn with_openai_configured(mut self, configured: bool) -> Self {
        self.openai_configured = configured;
        self
    }
}
