use crate::config::toml_config::AppConfig;
use crate::core::candidate::StrategyKind;
use crate::core::pipeline::FaultPolicy;
use crate::domain::model::Region;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_component, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "region-store-finder")]
#[command(about = "Lists the stores near every municipality of a Brazilian state")]
pub struct CliConfig {
    /// State code (UF), e.g. sp or RJ
    pub region: String,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the JSON report is written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Pause after each resolved place in milliseconds (0 disables pacing)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// What to do when a provider fails: skip or abort
    #[arg(long)]
    pub on_fault: Option<FaultPolicy>,

    /// How to pick among several geocoding matches: first or highest_importance
    #[arg(long)]
    pub strategy: Option<StrategyKind>,

    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn region(&self) -> Region {
        Region::new(&self.region)
    }

    /// Loads the configuration file (or defaults) and applies the flags on top.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(output_path) = &self.output_path {
            config.run.output_path = output_path.clone();
        }
        if let Some(interval_ms) = self.interval_ms {
            config.pacing.interval_ms = interval_ms;
        }
        if let Some(on_fault) = self.on_fault {
            config.run.on_fault = on_fault;
        }
        if let Some(strategy) = self.strategy {
            config.geocoder.strategy = strategy;
        }

        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_file_component("region", &self.region)
    }
}
