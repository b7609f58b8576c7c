use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use nt_core::{ReportArchive, Result};
use tokio::sync::RwLock;
use tracing::debug;

/// Reports kept by [`MemoryArchive::new`].
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedReport {
    pub label: String,
    pub raw_report: String,
}

#[derive(Debug)]
struct History {
    reports: VecDeque<ArchivedReport>,
    saved: usize,
}

/// Keeps the most recent reports in memory for the lifetime of the process.
/// Once `capacity` is reached the oldest report is dropped.
#[derive(Debug, Clone)]
pub struct MemoryArchive {
    history: Arc<RwLock<History>>,
    capacity: usize,
}

impl Default for MemoryArchive {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: Arc::new(RwLock::new(History {
                reports: VecDeque::new(),
                saved: 0,
            })),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained reports, oldest first.
    pub async fn reports(&self) -> Vec<ArchivedReport> {
        self.history.read().await.reports.iter().cloned().collect()
    }
}

#[async_trait]
impl ReportArchive for MemoryArchive {
    async fn save(&self, label: &str, raw_report: &str) -> Result<Option<String>> {
        let mut history = self.history.write().await;
        if history.reports.len() == self.capacity {
            if let Some(dropped) = history.reports.pop_front() {
                debug!("Dropping archived report for {}", dropped.label);
            }
        }
        history.reports.push_back(ArchivedReport {
            label: label.to_string(),
            raw_report: raw_report.to_string(),
        });
        let key = format!("memory://{}", history.saved);
        history.saved += 1;
        Ok(Some(key))
    }

    fn location(&self) -> String {
        "memory://".to_string()
    }
}
