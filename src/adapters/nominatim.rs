use crate::adapters::http::{fetch_json, join_segments, parse_endpoint, string_or_number, HttpSettings};
use crate::core::candidate::{CandidateStrategy, FirstCandidate, GeocodeCandidate};
use crate::domain::fault::{ProviderFault, ProviderResult};
use crate::domain::model::{Coordinate, Place, Region};
use crate::domain::ports::Geocoder;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_COUNTRY: &str = "Brazil";

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(deserialize_with = "string_or_number")]
    lat: String,
    #[serde(deserialize_with = "string_or_number")]
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    importance: Option<f64>,
}

impl From<SearchHit> for GeocodeCandidate {
    fn from(hit: SearchHit) -> Self {
        GeocodeCandidate {
            coordinate: Coordinate::new(hit.lat, hit.lon),
            display_name: hit.display_name,
            importance: hit.importance,
        }
    }
}

/// Structured city/state/country search against Nominatim.
pub struct NominatimGeocoder {
    client: Client,
    base_url: Url,
    country: String,
    strategy: Box<dyn CandidateStrategy>,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, settings: &HttpSettings) -> Result<Self> {
        Ok(Self {
            client: settings.build_client()?,
            base_url: parse_endpoint("geocoder.endpoint", base_url)?,
            country: DEFAULT_COUNTRY.to_string(),
            strategy: Box::new(FirstCandidate),
        })
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_strategy(mut self, strategy: Box<dyn CandidateStrategy>) -> Self {
        self.strategy = strategy;
        self
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, place: &Place, region: &Region) -> ProviderResult<Coordinate> {
        let url = join_segments(&self.base_url, &["search"])?;
        let request = self.client.get(url).query(&[
            ("city", place.name()),
            ("state", region.code()),
            ("country", self.country.as_str()),
            ("format", "json"),
        ]);

        let hits: Vec<SearchHit> = fetch_json(request).await.inspect_err(|fault| {
            tracing::warn!("Could not geocode {}, {}: {}", place, region, fault)
        })?;

        let candidate_count = hits.len();
        let candidates = hits.into_iter().map(GeocodeCandidate::from).collect();

        match self.strategy.select(place, candidates) {
            Some(candidate)
                if candidate.coordinate.latitude.trim().is_empty()
                    || candidate.coordinate.longitude.trim().is_empty() =>
            {
                tracing::info!("Blank coordinates for {}, {}", place, region);
                Err(ProviderFault::not_found(format!(
                    "blank coordinates for {}, {}",
                    place, region
                )))
            }
            Some(candidate) => {
                tracing::debug!(
                    "Geocoded {}, {} to ({}, {}) using '{}' out of {} candidates",
                    place,
                    region,
                    candidate.coordinate.latitude,
                    candidate.coordinate.longitude,
                    self.strategy.name(),
                    candidate_count
                );
                Ok(candidate.coordinate)
            }
            None => {
                tracing::info!("No coordinates found for {}, {}", place, region);
                Err(ProviderFault::not_found(format!(
                    "no candidate for {}, {} ({} returned)",
                    place, region, candidate_count
                )))
            }
        }
    }
}
