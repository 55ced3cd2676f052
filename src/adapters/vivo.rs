use crate::adapters::http::{fetch_json, parse_endpoint, value_as_f64, value_as_string, HttpSettings};
use crate::domain::fault::ProviderResult;
use crate::domain::model::{Coordinate, OpeningHours, StoreRecord};
use crate::domain::ports::StoreFinder;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

pub const STORE_LOCATOR_URL: &str = "https://www.vivo4g.com.br/api/stores/get-by-radius/1Fjs2otl1wEZtRF8JNHavRrzmSEBFgTJWwpPNPk_5nKQ/proprias";

/// Headers the locator expects from its own web client. Sent verbatim.
pub const BROWSER_HEADERS: [(&str, &str); 13] = [
    ("Accept", "application/json, text/plain, */*"),
    ("Accept-Language", "en-US,en;q=0.7"),
    ("Connection", "keep-alive"),
    ("Origin", "https://plataforma.portal.vivo.com.br"),
    ("Referer", "https://plataforma.portal.vivo.com.br/"),
    ("Sec-Fetch-Dest", "empty"),
    ("Sec-Fetch-Mode", "cors"),
    ("Sec-Fetch-Site", "cross-site"),
    ("Sec-GPC", "1"),
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    ),
    (
        "sec-ch-ua",
        "\"Brave\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
];

#[derive(Debug, Deserialize)]
struct LocatorResponse {
    #[serde(default)]
    data: Option<Vec<RawStore>>,
}

// The locator has shipped both English and Portuguese field names, so both
// are read and the English one wins.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStore {
    name: Option<String>,
    #[serde(rename = "nomeSite")]
    nome_site: Option<String>,
    address: Option<String>,
    endereco: Option<String>,
    distance: Option<Value>,
    #[serde(rename = "haversineDistance")]
    haversine_distance: Option<Value>,
    #[serde(rename = "idLoja")]
    id_loja: Option<Value>,
    whatsapp: Option<Value>,
    servicostelecomatend: Option<String>,
    #[serde(rename = "abreSegundaFeira")]
    abre_segunda_feira: Option<String>,
    #[serde(rename = "abreTercaFeira")]
    abre_terca_feira: Option<String>,
    #[serde(rename = "abreQuartaFeira")]
    abre_quarta_feira: Option<String>,
    #[serde(rename = "abreQuintaFeira")]
    abre_quinta_feira: Option<String>,
    #[serde(rename = "abreSextaFeira")]
    abre_sexta_feira: Option<String>,
    #[serde(rename = "abreSabado")]
    abre_sabado: Option<String>,
    #[serde(rename = "abreDomingo")]
    abre_domingo: Option<String>,
    #[serde(rename = "abreFeriado")]
    abre_feriado: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_yes(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|v| v.trim().eq_ignore_ascii_case("sim"))
        .unwrap_or(false)
}

impl From<RawStore> for StoreRecord {
    fn from(raw: RawStore) -> Self {
        let distance = raw
            .distance
            .as_ref()
            .and_then(value_as_f64)
            .or_else(|| raw.haversine_distance.as_ref().and_then(value_as_f64));

        let opening_hours = OpeningHours {
            monday: non_blank(raw.abre_segunda_feira),
            tuesday: non_blank(raw.abre_terca_feira),
            wednesday: non_blank(raw.abre_quarta_feira),
            thursday: non_blank(raw.abre_quinta_feira),
            friday: non_blank(raw.abre_sexta_feira),
            saturday: non_blank(raw.abre_sabado),
            open_on_sunday: is_yes(&raw.abre_domingo),
            open_on_holidays: is_yes(&raw.abre_feriado),
        };

        StoreRecord {
            name: raw.name.or(raw.nome_site).unwrap_or_default(),
            address: raw.address.or(raw.endereco).unwrap_or_default(),
            distance,
            store_id: raw.id_loja.as_ref().and_then(value_as_string),
            whatsapp: raw.whatsapp.as_ref().and_then(value_as_string),
            services: non_blank(raw.servicostelecomatend),
            opening_hours,
        }
    }
}

/// Radius search against the retailer's store locator.
pub struct VivoStoreLocator {
    client: Client,
    endpoint: Url,
}

impl VivoStoreLocator {
    pub fn new(endpoint: &str, settings: &HttpSettings) -> Result<Self> {
        Ok(Self {
            client: settings.build_client()?,
            endpoint: parse_endpoint("store_locator.endpoint", endpoint)?,
        })
    }
}

#[async_trait]
impl StoreFinder for VivoStoreLocator {
    async fn find_nearby(&self, coordinate: &Coordinate) -> ProviderResult<Vec<StoreRecord>> {
        let mut request = self.client.get(self.endpoint.clone()).query(&[
            ("fromLatitude", coordinate.latitude.as_str()),
            ("fromLongitude", coordinate.longitude.as_str()),
            ("ownStore", "false"),
        ]);
        for (name, value) in BROWSER_HEADERS {
            request = request.header(name, value);
        }

        let response: LocatorResponse = fetch_json(request).await.inspect_err(|fault| {
            tracing::warn!(
                "Store search failed at ({}, {}): {}",
                coordinate.latitude,
                coordinate.longitude,
                fault
            )
        })?;

        let stores: Vec<StoreRecord> = response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(StoreRecord::from)
            .collect();

        if stores.is_empty() {
            tracing::info!(
                "No stores found at ({}, {})",
                coordinate.latitude,
                coordinate.longitude
            );
        } else {
            tracing::debug!(
                "Found {} stores at ({}, {})",
                stores.len(),
                coordinate.latitude,
                coordinate.longitude
            );
        }

        Ok(stores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fault::FaultKind;
    use httpmock::prelude::*;

    const LOCATOR_PATH: &str = "/api/stores/get-by-radius/token/proprias";

    fn locator(server: &MockServer) -> VivoStoreLocator {
        VivoStoreLocator::new(&server.url(LOCATOR_PATH), &HttpSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_find_nearby_sends_query_and_browser_headers() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            let mut when = when
                .method(GET)
                .path(LOCATOR_PATH)
                .query_param("fromLatitude", "-22.9")
                .query_param("fromLongitude", "-47.0")
                .query_param("ownStore", "false");
            for (name, value) in BROWSER_HEADERS {
                // the HTTP client decides connection reuse on its own
                if name != "Connection" {
                    when = when.header(name.to_lowercase(), value);
                }
            }
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "data": [{"name": "Loja A", "address": "Rua X", "distance": 1.2}]
                }));
        });

        let stores = locator(&server)
            .find_nearby(&Coordinate::new("-22.9", "-47.0"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(stores, vec![StoreRecord::new("Loja A", "Rua X", 1.2)]);
    }

    #[tokio::test]
    async fn test_find_nearby_reads_portuguese_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(LOCATOR_PATH);
            then.status(200).json_body(serde_json::json!({
                "data": [{
                    "nomeSite": "Vivo Shopping Iguatemi",
                    "idLoja": 1042,
                    "endereco": "Av. Iguatemi, 777",
                    "haversineDistance": "3.456",
                    "whatsapp": "11999990000",
                    "abreSegundaFeira": "10:00 - 22:00",
                    "abreSabado": "10:00 - 22:00",
                    "abreTercaFeira": "",
                    "abreDomingo": "sim",
                    "abreFeriado": "nao",
                    "servicostelecomatend": "Troca de chip"
                }]
            }));
        });

        let stores = locator(&server)
            .find_nearby(&Coordinate::new("-22.9", "-47.0"))
            .await
            .unwrap();

        assert_eq!(stores.len(), 1);
        let store = &stores[0];
        assert_eq!(store.name, "Vivo Shopping Iguatemi");
        assert_eq!(store.address, "Av. Iguatemi, 777");
        assert_eq!(store.distance, Some(3.456));
        assert_eq!(store.store_id.as_deref(), Some("1042"));
        assert_eq!(store.whatsapp.as_deref(), Some("11999990000"));
        assert_eq!(store.services.as_deref(), Some("Troca de chip"));
        assert_eq!(store.opening_hours.monday.as_deref(), Some("10:00 - 22:00"));
        assert_eq!(store.opening_hours.tuesday, None);
        assert!(store.opening_hours.open_on_sunday);
        assert!(!store.opening_hours.open_on_holidays);
    }

    #[tokio::test]
    async fn test_find_nearby_empty_data_array() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(LOCATOR_PATH);
            then.status(200).json_body(serde_json::json!({"data": []}));
        });

        let stores = locator(&server)
            .find_nearby(&Coordinate::new("-22.9", "-47.0"))
            .await
            .unwrap();

        assert!(stores.is_empty());
    }

    #[tokio::test]
    async fn test_find_nearby_missing_data_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(LOCATOR_PATH);
            then.status(200)
                .json_body(serde_json::json!({"message": "no stores"}));
        });

        let stores = locator(&server)
            .find_nearby(&Coordinate::new("-22.9", "-47.0"))
            .await
            .unwrap();

        assert!(stores.is_empty());
    }

    #[tokio::test]
    async fn test_find_nearby_forbidden_is_status_fault() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(LOCATOR_PATH);
            then.status(403);
        });

        let fault = locator(&server)
            .find_nearby(&Coordinate::new("-22.9", "-47.0"))
            .await
            .unwrap_err();

        assert_eq!(fault.kind, FaultKind::ProviderStatus);
    }
}
