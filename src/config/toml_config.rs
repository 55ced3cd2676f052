use crate::adapters::ibge::IBGE_BASE_URL;
use crate::adapters::nominatim::{DEFAULT_COUNTRY, NOMINATIM_BASE_URL};
use crate::adapters::vivo::STORE_LOCATOR_URL;
use crate::adapters::{HttpSettings, IbgeDirectory, NominatimGeocoder, VivoStoreLocator};
use crate::core::candidate::StrategyKind;
use crate::core::pacing::pacer_for_interval;
use crate::core::pipeline::{AggregationPipeline, FaultPolicy};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_TIMEOUT_SECONDS: u64 = 600;
const MAX_INTERVAL_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub directory: DirectoryConfig,
    pub geocoder: GeocoderConfig,
    pub store_locator: StoreLocatorConfig,
    pub pacing: PacingConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: IBGE_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub country: String,
    pub strategy: StrategyKind,
    pub timeout_seconds: Option<u64>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: NOMINATIM_BASE_URL.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            strategy: StrategyKind::First,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreLocatorConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for StoreLocatorConfig {
    fn default() -> Self {
        Self {
            endpoint: STORE_LOCATOR_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub interval_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub on_fault: FaultPolicy,
    pub output_path: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            on_fault: FaultPolicy::SkipAndContinue,
            output_path: "./output".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScoutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoutError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("directory.endpoint", &self.directory.endpoint)?;
        validation::validate_url("geocoder.endpoint", &self.geocoder.endpoint)?;
        validation::validate_url("store_locator.endpoint", &self.store_locator.endpoint)?;
        validation::validate_non_empty_string("geocoder.country", &self.geocoder.country)?;
        validation::validate_path("run.output_path", &self.run.output_path)?;
        validation::validate_range("pacing.interval_ms", self.pacing.interval_ms, 0, MAX_INTERVAL_MS)?;

        for (field, timeout) in [
            ("directory.timeout_seconds", self.directory.timeout_seconds),
            ("geocoder.timeout_seconds", self.geocoder.timeout_seconds),
            ("store_locator.timeout_seconds", self.store_locator.timeout_seconds),
        ] {
            if let Some(timeout) = timeout {
                validation::validate_range(field, timeout, 1, MAX_TIMEOUT_SECONDS)?;
            }
        }

        Ok(())
    }

    /// Wires the HTTP providers, pacer and fault policy into a pipeline.
    pub fn build_pipeline(&self) -> Result<AggregationPipeline> {
        let directory = IbgeDirectory::new(
            &self.directory.endpoint,
            &HttpSettings::with_timeout_seconds(self.directory.timeout_seconds),
        )?;
        let geocoder = NominatimGeocoder::new(
            &self.geocoder.endpoint,
            &HttpSettings::with_timeout_seconds(self.geocoder.timeout_seconds),
        )?
        .with_country(self.geocoder.country.clone())
        .with_strategy(self.geocoder.strategy.into_strategy());
        let store_finder = VivoStoreLocator::new(
            &self.store_locator.endpoint,
            &HttpSettings::with_timeout_seconds(self.store_locator.timeout_seconds),
        )?;

        Ok(
            AggregationPipeline::new(Box::new(directory), Box::new(geocoder), Box::new(store_finder))
                .with_pacer(pacer_for_interval(self.pacing.interval_ms))
                .with_fault_policy(self.run.on_fault),
        )
    }
}

impl ConfigProvider for AppConfig {
    fn output_path(&self) -> &str {
        &self.run.output_path
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
