use async_trait::async_trait;

use crate::types::Coordinates;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve coordinates to a place name. Lookup failures yield `None`.
    async fn reverse(&self, coordinates: Coordinates) -> Option<String>;
}
