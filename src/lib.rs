pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use adapters::{HttpSettings, IbgeDirectory, LocalStorage, NominatimGeocoder, VivoStoreLocator};
pub use crate::core::{
    engine::ReportEngine,
    pacing::{FixedIntervalPacer, NoopPacer},
    pipeline::{AggregationPipeline, FaultPolicy},
};
pub use domain::fault::{FaultKind, ProviderFault, ProviderResult, Stage};
pub use domain::model::{Coordinate, Place, Region, Report, ReportEntry, RunOutcome, StoreRecord};
pub use utils::error::{Result, ScoutError};
