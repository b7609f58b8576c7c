use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait ReportArchive: Send + Sync {
    /// Persist a raw report under a human-readable label.
    /// Returns where the report ended up, if the backend has such a notion.
    async fn save(&self, label: &str, raw_report: &str) -> Result<Option<String>>;

    /// Short backend description used in health output
    fn location(&self) -> String;
}
