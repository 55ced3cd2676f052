use crate::core::pacing::FixedIntervalPacer;
use crate::domain::fault::{ProviderFault, Stage};
use crate::domain::model::{Place, PlaceFault, Region, Report, ReportEntry, RunOutcome, RunSummary};
use crate::domain::ports::{Geocoder, Pacer, RegionDirectory, StoreFinder};
use crate::utils::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};

/// What the pipeline does with a provider fault. `NotFound` is never
/// treated as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Record the fault, drop or empty the affected part, keep going.
    #[default]
    #[serde(alias = "skip")]
    SkipAndContinue,
    /// Stop the run and return the fault as an error.
    Abort,
}

impl std::str::FromStr for FaultPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" | "skip_and_continue" | "continue" => Ok(FaultPolicy::SkipAndContinue),
            "abort" | "stop" => Ok(FaultPolicy::Abort),
            other => Err(format!(
                "unknown fault policy '{}', expected 'skip' or 'abort'",
                other
            )),
        }
    }
}

/// Enumerate → geocode → store search, one place at a time.
pub struct AggregationPipeline {
    directory: Box<dyn RegionDirectory>,
    geocoder: Box<dyn Geocoder>,
    store_finder: Box<dyn StoreFinder>,
    pacer: Box<dyn Pacer>,
    policy: FaultPolicy,
}

impl AggregationPipeline {
    pub fn new(
        directory: Box<dyn RegionDirectory>,
        geocoder: Box<dyn Geocoder>,
        store_finder: Box<dyn StoreFinder>,
    ) -> Self {
        Self {
            directory,
            geocoder,
            store_finder,
            pacer: Box::new(FixedIntervalPacer::default()),
            policy: FaultPolicy::default(),
        }
    }

    pub fn with_pacer(mut self, pacer: Box<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn fault_policy(&self) -> FaultPolicy {
        self.policy
    }

    pub async fn run(&self, region: &Region) -> Result<RunOutcome> {
        let mut report = Report::new();
        let mut summary = RunSummary::default();

        tracing::info!("🚀 Collecting stores for region {}", region);

        let places = match self.directory.list_places(region).await {
            Ok(places) => places,
            Err(fault) => {
                self.absorb(region, None, Stage::Directory, fault, &mut summary)?;
                Vec::new()
            }
        };
        summary.places_listed = places.len();

        for (index, place) in places.iter().enumerate() {
            tracing::debug!("[{}/{}] Processing {}", index + 1, places.len(), place);

            let coordinate = match self.geocoder.geocode(place, region).await {
                Ok(coordinate) => coordinate,
                Err(fault) => {
                    summary.unresolved.push(place.name().to_string());
                    if !fault.is_not_found() {
                        self.absorb(region, Some(place), Stage::Geocoding, fault, &mut summary)?;
                    }
                    continue;
                }
            };

            let stores = match self.store_finder.find_nearby(&coordinate).await {
                Ok(stores) => stores,
                Err(fault) => {
                    self.absorb(region, Some(place), Stage::StoreSearch, fault, &mut summary)?;
                    Vec::new()
                }
            };

            tracing::info!(
                "[{}/{}] {}: {} stores",
                index + 1,
                places.len(),
                place,
                stores.len()
            );

            summary.places_resolved += 1;
            report.insert(
                place,
                ReportEntry {
                    coordinates: coordinate,
                    stores,
                },
            );

            self.pacer.pace().await;
        }

        tracing::info!(
            "✅ Region {}: {} of {} places resolved, {} stores, {} faults",
            region,
            summary.places_resolved,
            summary.places_listed,
            report.store_count(),
            summary.faults.len()
        );

        Ok(RunOutcome {
            region: region.clone(),
            generated_at: chrono::Utc::now(),
            report,
            summary,
        })
    }

    fn absorb(
        &self,
        region: &Region,
        place: Option<&Place>,
        stage: Stage,
        fault: ProviderFault,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let place = place.map(|p| p.name().to_string());

        if self.policy == FaultPolicy::Abort && !fault.is_not_found() {
            tracing::error!("❌ Aborting run for region {}: {} {}", region, stage, fault);
            return Err(ScoutError::ProviderError {
                region: region.code().to_string(),
                place,
                stage,
                fault,
            });
        }

        tracing::warn!(
            "⚠️ {} fault for {} skipped: {}",
            stage,
            place.as_deref().unwrap_or(region.code()),
            fault
        );
        summary.faults.push(PlaceFault {
            place,
            stage,
            fault,
        });
        Ok(())
    }
}
