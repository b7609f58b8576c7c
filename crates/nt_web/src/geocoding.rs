use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nt_core::{Coordinates, Error, Geocoder, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = "news_app_v1.0";
const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl Address {
    /// Most specific non-empty place name.
    fn place_name(self) -> Option<String> {
        [self.city, self.town, self.village, self.state, self.country]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
    }
}

/// Reverse geocoding against a Nominatim server.
pub struct NominatimGeocoder {
    client: Client,
    base_url: Url,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn reverse_url(&self, coordinates: Coordinates) -> Result<Url> {
        let endpoint = self
            .base_url
            .join("reverse")
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Url::parse_with_params(
            endpoint.as_str(),
            &[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("format", "jsonv2".to_string()),
                ("accept-language", "en".to_string()),
            ],
        )
        .map_err(|e| Error::InvalidUrl(e.to_string()))
    }

    async fn lookup(&self, coordinates: Coordinates) -> Result<Option<String>> {
        let url = self.reverse_url(coordinates)?;
        debug!("Reverse geocoding {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::Geocoding(e.to_string()))?
            .json::<ReverseResponse>()
            .await
            .map_err(|e| Error::Geocoding(format!("Unreadable reverse lookup: {}", e)))?;
        Ok(response.address.and_then(Address::place_name))
    }
}

impl fmt::Debug for NominatimGeocoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NominatimGeocoder")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, coordinates: Coordinates) -> Option<String> {
        match self.lookup(coordinates).await {
            Ok(name) => name,
            Err(e) => {
                warn!("Geocoding error: {}", e);
                None
            }
        }
    }
}

/// Answers every lookup with the same place name.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    name: Option<String>,
}

impl StaticGeocoder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn reverse(&self, _coordinates: Coordinates) -> Option<String> {
        self.name.clone()
    }
}
