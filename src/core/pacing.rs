use crate::domain::ports::Pacer;
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_PACING_INTERVAL: Duration = Duration::from_millis(1000);

/// Waits the same interval on every call.
#[derive(Debug, Clone, Copy)]
pub struct FixedIntervalPacer {
    interval: Duration,
}

impl FixedIntervalPacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedIntervalPacer {
    fn default() -> Self {
        Self::new(DEFAULT_PACING_INTERVAL)
    }
}

#[async_trait]
impl Pacer for FixedIntervalPacer {
    async fn pace(&self) {
        tracing::trace!("Pacing for {:?}", self.interval);
        tokio::time::sleep(self.interval).await;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pace(&self) {}
}

/// Zero means no pacing at all.
pub fn pacer_for_interval(interval_ms: u64) -> Box<dyn Pacer> {
    if interval_ms == 0 {
        Box::new(NoopPacer)
    } else {
        Box::new(FixedIntervalPacer::new(Duration::from_millis(interval_ms)))
    }
}
