use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::{Error, Result};

/// Category assigned to articles that appear before any header.
pub const DEFAULT_CATEGORY: &str = "General";

/// Source assigned to articles without a `(Source, Date)` group.
pub const UNKNOWN_SOURCE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub source: String,
    pub url: String,
    pub published_date: Option<String>,
    pub relevance_score: f64,
}

/// Article counts per category, kept in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts {
    entries: Vec<(String, usize)>,
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a category with a zero count. Existing counts are left alone.
    pub fn ensure(&mut self, category: &str) {
        if self.position(category).is_none() {
            self.entries.push((category.to_string(), 0));
        }
    }

    pub fn increment(&mut self, category: &str) {
        match self.position(category) {
            Some(idx) => self.entries[idx].1 += 1,
            None => self.entries.push((category.to_string(), 1)),
        }
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.position(category).map(|idx| self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    fn position(&self, category: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == category)
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    pub articles: Vec<NewsArticle>,
    pub categories: CategoryCounts,
    pub total_articles: usize,
}

impl ParseResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_parts(articles: Vec<NewsArticle>, categories: CategoryCounts) -> Self {
        let total_articles = articles.len();
        Self {
            articles,
            categories,
            total_articles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

fn default_radius() -> f64 {
    10.0
}

fn default_max_results() -> u32 {
    5
}

/// A request for news around a point on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in km.
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl LocationRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius: default_radius(),
            max_results: default_max_results(),
            categories: None,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::Validation(
                "Latitude must be between -90 and 90".to_string(),
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::Validation(
                "Longitude must be between -180 and 180".to_string(),
            ));
        }
        if !(self.radius > 0.0 && self.radius <= 1000.0) {
            return Err(Error::Validation(
                "Search radius must be greater than 0 and at most 1000 km".to_string(),
            ));
        }
        if !(1..=20).contains(&self.max_results) {
            return Err(Error::Validation(
                "Maximum number of results must be between 1 and 20".to_string(),
            ));
        }
        Ok(())
    }
}
