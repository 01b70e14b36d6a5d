use crate::model::{Alert, Track};
use crate::prelude::LatLng;
use crate::summary::{Sitrep, SummaryStrategy};
use crate::telemetry::{LogManager, MetricsRecorder};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of asking the desk for a sitrep.
#[derive(Debug, Clone, PartialEq)]
pub enum SitrepOutcome {
    Ready(Sitrep),
    /// A request from the same trigger is already in flight.
    Busy,
}

/// Clears the loading flag when the request finishes or is dropped mid-flight.
struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Front desk for sitrep requests: one in flight at a time.
pub struct SitrepDesk {
    strategy: Arc<dyn SummaryStrategy>,
    loading: Arc<AtomicBool>,
    metrics: Arc<MetricsRecorder>,
    logger: LogManager,
}

impl SitrepDesk {
    pub fn new(strategy: Arc<dyn SummaryStrategy>, metrics: Arc<MetricsRecorder>) -> Self {
        Self {
            strategy,
            loading: Arc::new(AtomicBool::new(false)),
            metrics,
            logger: LogManager::new("sitrep"),
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub async fn request(&self, tracks: &[Track], alerts: &[Alert]) -> SitrepOutcome {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            self.logger.trace_step("sitrep already in flight");
            return SitrepOutcome::Busy;
        }
        let _guard = LoadingGuard(self.loading.clone());

        self.logger.record(&format!(
            "requesting {} sitrep over {} tracks / {} alerts",
            self.strategy.name(),
            tracks.len(),
            alerts.len()
        ));
        let sitrep = self.strategy.summarize(tracks, alerts).await;
        self.metrics.record_summary();
        if sitrep.degraded {
            self.metrics.record_fallback();
        }
        SitrepOutcome::Ready(sitrep)
    }

    pub async fn query_local_intel(&self, query: &str, location: LatLng) -> Sitrep {
        self.metrics.record_intel_query();
        let sitrep = self.strategy.query_local_intel(query, location).await;
        if sitrep.degraded {
            self.metrics.record_fallback();
        }
        sitrep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::local::LocalSummary;
    use crate::summary::INTEL_FALLBACK;
    use async_trait::async_trait;
    use std::time::Duration;

    struct SlowSummary;

    #[async_trait]
    impl SummaryStrategy for SlowSummary {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn summarize(&self, _tracks: &[Track], _alerts: &[Alert]) -> Sitrep {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Sitrep::new("done")
        }
    }

    fn desk(strategy: Arc<dyn SummaryStrategy>) -> (SitrepDesk, Arc<MetricsRecorder>) {
        let metrics = Arc::new(MetricsRecorder::new());
        (SitrepDesk::new(strategy, metrics.clone()), metrics)
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_request_reports_busy() {
        let (desk, metrics) = desk(Arc::new(SlowSummary));
        let (first, second) = tokio::join!(desk.request(&[], &[]), async {
            tokio::task::yield_now().await;
            desk.request(&[], &[]).await
        });
        assert_eq!(first, SitrepOutcome::Ready(Sitrep::new("done")));
        assert_eq!(second, SitrepOutcome::Busy);
        assert!(!desk.is_loading());
        assert_eq!(metrics.snapshot().summaries, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_request_releases_loading_flag() {
        let (desk, _metrics) = desk(Arc::new(SlowSummary));
        let timed_out =
            tokio::time::timeout(Duration::from_millis(100), desk.request(&[], &[])).await;
        assert!(timed_out.is_err());
        assert!(!desk.is_loading());
        assert!(matches!(desk.request(&[], &[]).await, SitrepOutcome::Ready(_)));
    }

    #[tokio::test]
    async fn local_strategy_cannot_answer_intel_queries() {
        let (desk, metrics) = desk(Arc::new(LocalSummary::new()));
        let sitrep = desk
            .query_local_intel(
                "water points",
                LatLng {
                    latitude: 0.0,
                    longitude: 0.0,
                },
            )
            .await;
        assert_eq!(sitrep.text, INTEL_FALLBACK);
        assert_eq!(metrics.snapshot().intel_queries, 1);
        assert_eq!(metrics.snapshot().summary_fallbacks, 1);
    }
}
