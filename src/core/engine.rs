use crate::core::pipeline::AggregationPipeline;
use crate::domain::model::{Region, RunOutcome};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::validate_file_component;
use std::path::Path;

/// Runs the pipeline for a region and saves the report as JSON.
pub struct ReportEngine<S: Storage> {
    pipeline: AggregationPipeline,
    storage: S,
    output_path: String,
}

impl<S: Storage> ReportEngine<S> {
    pub fn new(pipeline: AggregationPipeline, storage: S, output_path: impl Into<String>) -> Self {
        Self {
            pipeline,
            storage,
            output_path: output_path.into(),
        }
    }

    pub fn report_file_name(region: &Region) -> String {
        format!("{}_stores.json", region.code())
    }

    /// Runs the pipeline without writing anything.
    pub async fn collect(&self, region: &Region) -> Result<RunOutcome> {
        let outcome = self.pipeline.run(region).await?;

        if !outcome.summary.unresolved.is_empty() {
            tracing::info!(
                "📍 {} places without coordinates: {}",
                outcome.summary.unresolved.len(),
                outcome.summary.unresolved.join(", ")
            );
        }
        for fault in &outcome.summary.faults {
            tracing::debug!(
                "Skipped {} fault at {}: {}",
                fault.stage,
                fault.place.as_deref().unwrap_or("-"),
                fault.fault
            );
        }

        Ok(outcome)
    }

    /// Runs the pipeline and writes `<region>_stores.json`, returning its path.
    pub async fn run(&self, region: &Region) -> Result<String> {
        validate_file_component("region", region.code())?;
        let outcome = self.collect(region).await?;

        let file_name = Self::report_file_name(region);
        let json = serde_json::to_string_pretty(&outcome.report)?;

        tracing::debug!("Writing report ({} bytes) to storage", json.len());
        self.storage.write_file(&file_name, json.as_bytes()).await?;

        let output_path = Path::new(&self.output_path)
            .join(&file_name)
            .to_string_lossy()
            .into_owned();
        tracing::info!("📁 Report saved to: {}", output_path);

        Ok(output_path)
    }
}
