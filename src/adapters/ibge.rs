use crate::adapters::http::{fetch_json, join_segments, parse_endpoint, HttpSettings};
use crate::domain::fault::ProviderResult;
use crate::domain::model::{Place, Region};
use crate::domain::ports::RegionDirectory;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

pub const IBGE_BASE_URL: &str = "https://servicodados.ibge.gov.br";

#[derive(Debug, Deserialize)]
struct Municipality {
    #[serde(rename = "nome", alias = "name")]
    name: String,
}

/// Municipalities of a Brazilian state, from the IBGE localities API.
pub struct IbgeDirectory {
    client: Client,
    base_url: Url,
}

impl IbgeDirectory {
    pub fn new(base_url: &str, settings: &HttpSettings) -> Result<Self> {
        Ok(Self {
            client: settings.build_client()?,
            base_url: parse_endpoint("directory.endpoint", base_url)?,
        })
    }

    fn municipalities_url(&self, region: &Region) -> ProviderResult<Url> {
        join_segments(
            &self.base_url,
            &[
                "api",
                "v1",
                "localidades",
                "estados",
                region.code(),
                "municipios",
            ],
        )
    }
}

#[async_trait]
impl RegionDirectory for IbgeDirectory {
    async fn list_places(&self, region: &Region) -> ProviderResult<Vec<Place>> {
        let url = self.municipalities_url(region)?;
        tracing::debug!("Listing places for region {} from {}", region, url);

        let municipalities: Vec<Municipality> = fetch_json(self.client.get(url))
            .await
            .inspect_err(|fault| {
                tracing::warn!("Could not list places for region {}: {}", region, fault)
            })?;

        tracing::info!(
            "Region {} has {} places",
            region,
            municipalities.len()
        );

        Ok(municipalities
            .into_iter()
            .map(|m| Place::new(m.name))
            .collect())
    }
}
