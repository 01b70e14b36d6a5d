use crate::generator::contacts::synthetic_contacts;
use crate::report::model::{CopSnapshot, FmvView, TrackView};
use crate::workflow::config::ScenarioConfig;
use anyhow::Context;
use copcore::filter::MarkerLedger;
use copcore::model::seed::{fmv_feeds, initial_alerts, initial_tracks};
use copcore::prelude::{LatLng, Millis};
use copcore::simulation::{zulu_time, DisplayClock, OrbitPlan, SimulationDriver};
use copcore::store::{snapshot, AlertStore, SharedTrackStore, TrackStore};
use copcore::summary::{build_strategy, Sitrep, SitrepDesk, SitrepOutcome};
use copcore::telemetry::{LogManager, MetricsRecorder};
use copcore::view::{ViewAction, ViewController};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// One running picture: stores, timers, view controller, and sitrep desk.
/// Everything is torn down by [`Session::shutdown`] or on drop.
pub struct Session {
    tracks: SharedTrackStore,
    controller: ViewController,
    driver: SimulationDriver,
    clock: DisplayClock,
    desk: Arc<SitrepDesk>,
    metrics: Arc<MetricsRecorder>,
    ledger: MarkerLedger,
    pending_sitrep: Option<JoinHandle<SitrepOutcome>>,
    logger: LogManager,
}

impl Session {
    pub fn new(config: &ScenarioConfig, now: Millis) -> anyhow::Result<Self> {
        let mut store = TrackStore::from_tracks(initial_tracks(now));
        for contact in synthetic_contacts(&config.contacts, now) {
            store.insert(contact);
        }
        let tracks = store.into_shared();

        let controller = ViewController::new(fmv_feeds(), AlertStore::new(initial_alerts(now)));
        let metrics = Arc::new(MetricsRecorder::new());
        let driver = SimulationDriver::new(
            OrbitPlan::new(config.orbit.clone()),
            tracks.clone(),
            controller.online_receiver(),
            config.tick_period(),
            metrics.clone(),
        );
        let clock = DisplayClock::new(config.clock_period());
        let strategy = build_strategy(&config.summary).context("building summary strategy")?;
        let desk = Arc::new(SitrepDesk::new(strategy, metrics.clone()));
        let logger = LogManager::new("session");
        logger.record(&format!("sitreps served by the {} strategy", desk.strategy_name()));

        Ok(Self {
            tracks,
            controller,
            driver,
            clock,
            desk,
            metrics,
            ledger: MarkerLedger::new(),
            pending_sitrep: None,
            logger,
        })
    }

    /// Starts the simulation and display timers. Requires a tokio runtime.
    pub fn start(&self) -> anyhow::Result<()> {
        self.driver.start().context("starting orbit simulation")?;
        self.clock.start().context("starting display clock")?;
        Ok(())
    }

    pub fn dispatch(&mut self, action: ViewAction) {
        self.controller.dispatch(action);
    }

    /// Advances the simulation one tick outside the timer.
    pub fn step(&self, now: Millis) -> anyhow::Result<bool> {
        self.driver.step(now).context("stepping orbit simulation")
    }

    pub fn snapshot(&mut self, now: Millis) -> anyhow::Result<CopSnapshot> {
        let tracks = snapshot(&self.tracks).context("reading track store")?;
        let state = self.controller.state();
        let visible = self.controller.visible(&tracks);
        let markers = self.ledger.reconcile(visible.iter().copied());

        let commander_alerts = if state.is_commander() {
            self.controller
                .alerts()
                .critical()
                .into_iter()
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        let fmv = if state.fmv_pip_enabled {
            self.controller.active_feed().map(|feed| FmvView {
                feed: feed.clone(),
                hud_heading: state
                    .hud_track(&tracks)
                    .and_then(|track| track.heading)
                    .unwrap_or_default(),
            })
        } else {
            None
        };

        Ok(CopSnapshot {
            zulu: zulu_time(now),
            network: if state.is_online { "ACTIVE" } else { "DEGRADED" },
            role: state.role,
            focus_mode: state.focus_mode,
            visible: visible
                .iter()
                .map(|track| TrackView::new(track, now))
                .collect(),
            selected: state.selected_track(&tracks).cloned(),
            commander_alerts,
            ticker: self.controller.alerts().ticker(3).to_vec(),
            fmv,
            markers,
            metrics: self.metrics.snapshot(),
        })
    }

    /// Wall-clock time last published by the display clock.
    pub fn clock_millis(&self) -> Millis {
        self.clock.current()
    }

    pub async fn sitrep(&self) -> anyhow::Result<SitrepOutcome> {
        let tracks = snapshot(&self.tracks).context("reading track store")?;
        Ok(self
            .desk
            .request(&tracks, self.controller.alerts().all())
            .await)
    }

    /// Requests a sitrep in the background so the timers keep running.
    pub fn spawn_sitrep(&mut self) -> anyhow::Result<()> {
        if self.pending_sitrep.is_some() || self.desk.is_loading() {
            self.logger.trace_step("sitrep already pending");
            return Ok(());
        }
        let tracks = snapshot(&self.tracks).context("reading track store")?;
        let alerts = self.controller.alerts().all().to_vec();
        let desk = self.desk.clone();
        self.pending_sitrep = Some(tokio::spawn(async move {
            desk.request(&tracks, &alerts).await
        }));
        Ok(())
    }

    /// Collects the background sitrep if it has completed.
    pub async fn take_finished_sitrep(&mut self) -> anyhow::Result<Option<SitrepOutcome>> {
        match self.pending_sitrep.take() {
            Some(handle) if handle.is_finished() => {
                let outcome = handle.await.context("joining sitrep task")?;
                Ok(Some(outcome))
            }
            other => {
                self.pending_sitrep = other;
                Ok(None)
            }
        }
    }

    pub async fn query_local_intel(&self, query: &str, location: LatLng) -> Sitrep {
        self.desk.query_local_intel(query, location).await
    }

    pub fn shutdown(&mut self) {
        self.driver.stop();
        self.clock.stop();
        if let Some(handle) = self.pending_sitrep.take() {
            handle.abort();
            self.logger.record("discarded in-flight sitrep");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copcore::filter::Freshness;
    use copcore::model::MapLayer;
    use copcore::summary::SummaryConfig;
    use std::time::Duration;

    const NOW: Millis = 1_704_116_707_900;

    fn session() -> Session {
        Session::new(&ScenarioConfig::default(), NOW).unwrap()
    }

    #[test]
    fn snapshot_lists_seed_picture() {
        let mut session = session();
        let snapshot = session.snapshot(NOW).unwrap();
        assert_eq!(snapshot.zulu, "13:45:07");
        assert_eq!(snapshot.network, "ACTIVE");
        assert_eq!(snapshot.visible.len(), 7);
        assert_eq!(snapshot.markers.added.len(), 7);
        assert!(snapshot.commander_alerts.is_empty());
        assert_eq!(snapshot.ticker.len(), 2);
        assert_eq!(snapshot.fmv.as_ref().unwrap().feed.id, "uas-1");
    }

    #[test]
    fn commander_sees_only_critical_alerts() {
        let mut session = session();
        session.dispatch(ViewAction::ToggleRole);
        let snapshot = session.snapshot(NOW).unwrap();
        assert!(snapshot.focus_mode);
        assert_eq!(snapshot.commander_alerts.len(), 1);
        assert_eq!(snapshot.commander_alerts[0].id, "a1");
    }

    #[test]
    fn hidden_layer_removes_markers() {
        let mut session = session();
        session.snapshot(NOW).unwrap();
        session.dispatch(ViewAction::ToggleLayer(MapLayer::Air));
        let snapshot = session.snapshot(NOW).unwrap();
        assert_eq!(snapshot.markers.removed, vec!["uas-1", "uas-2"]);
        assert_eq!(snapshot.visible.len(), 5);
    }

    #[test]
    fn offline_steps_move_only_orbiters() {
        let mut session = session();
        assert!(session.step(NOW + 100).unwrap());
        let snapshot = session.snapshot(NOW + 100).unwrap();
        let griffin = snapshot
            .visible
            .iter()
            .find(|view| view.track.id == "uas-1")
            .unwrap();
        assert_eq!(griffin.track.last_seen, NOW + 100);
        assert_eq!(griffin.freshness, Freshness::Fresh);
        assert_eq!(snapshot.metrics.ticks_applied, 1);
        assert_eq!(snapshot.fmv.unwrap().hud_heading, 90.0);
    }

    #[test]
    fn degraded_network_freezes_picture() {
        let mut session = session();
        session.dispatch(ViewAction::SetOnline(false));
        assert!(!session.step(NOW + 100).unwrap());
        let snapshot = session.snapshot(NOW + 10_000).unwrap();
        assert_eq!(snapshot.network, "DEGRADED");
        let griffin = snapshot
            .visible
            .iter()
            .find(|view| view.track.id == "uas-1")
            .unwrap();
        assert_eq!(griffin.freshness, Freshness::Stale);
    }

    #[tokio::test]
    async fn local_sitrep_reports_counts() {
        let session = session();
        match session.sitrep().await.unwrap() {
            SitrepOutcome::Ready(sitrep) => {
                assert!(sitrep.text.contains("3 friendly elements active"));
                assert!(sitrep.text.contains("2 red-force tracks identified"));
                assert!(sitrep.text.contains("ACTION REQUIRED: 1 critical"));
            }
            SitrepOutcome::Busy => panic!("desk should be idle"),
        }
    }

    #[tokio::test]
    async fn background_sitrep_is_collected() {
        let mut session = session();
        session.spawn_sitrep().unwrap();
        let mut outcome = None;
        for _ in 0..50 {
            if let Some(done) = session.take_finished_sitrep().await.unwrap() {
                outcome = Some(done);
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(matches!(outcome, Some(SitrepOutcome::Ready(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn live_timers_run_until_shutdown() {
        let mut session = session();
        session.start().unwrap();
        tokio::time::sleep(Duration::from_millis(450)).await;
        session.shutdown();
        let applied = session.snapshot(NOW).unwrap().metrics.ticks_applied;
        assert!(applied >= 4);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(session.snapshot(NOW).unwrap().metrics.ticks_applied, applied);
    }

    #[tokio::test]
    async fn delegated_without_key_still_answers() {
        let config = ScenarioConfig {
            summary: SummaryConfig::Delegated(copcore::summary::DelegatedConfig {
                api_key_env: "COPSIM_TEST_UNSET_KEY".into(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let session = Session::new(&config, NOW).unwrap();
        match session.sitrep().await.unwrap() {
            SitrepOutcome::Ready(sitrep) => {
                assert_eq!(sitrep.text, copcore::summary::SUMMARY_FALLBACK);
                assert!(sitrep.degraded);
            }
            SitrepOutcome::Busy => panic!("desk should be idle"),
        }
    }
}
