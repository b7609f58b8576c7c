use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use nt_core::{Error, ReportArchive, Result};
use tracing::info;

/// Writes each raw report to its own markdown file.
#[derive(Debug, Clone)]
pub struct FileArchive {
    dir: PathBuf,
}

impl FileArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(label: &str, at: &DateTime<Local>) -> String {
        let label: String = label
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        format!("news_report_{}_{}.md", label, at.format("%Y%m%d_%H%M%S"))
    }

    fn render(label: &str, raw_report: &str, at: &DateTime<Local>) -> String {
        format!(
            "# News Report for {}\nGenerated at: {}\n\n{}",
            label,
            at.to_rfc3339(),
            raw_report
        )
    }
}

#[async_trait]
impl ReportArchive for FileArchive {
    async fn save(&self, label: &str, raw_report: &str) -> Result<Option<String>> {
        let now = Local::now();
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            Error::Storage(format!(
                "Failed to create archive directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.dir.join(Self::file_name(label, &now));
        tokio::fs::write(&path, Self::render(label, raw_report, &now)).await?;

        info!("💾 Response saved to: {}", path.display());
        Ok(Some(path.display().to_string()))
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }
}
