use crate::prelude::{now_millis, CopError, CopResult, Millis};
use crate::simulation::orbit::{OrbitPlan, OrbitState};
use crate::simulation::timer::PeriodicTask;
use crate::store::SharedTrackStore;
use crate::telemetry::{LogManager, MetricsRecorder};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

/// State touched on every tick, shared with the timer task.
#[derive(Clone)]
struct SimulationCore {
    plan: Arc<OrbitPlan>,
    tracks: SharedTrackStore,
    state: Arc<Mutex<OrbitState>>,
    online: watch::Receiver<bool>,
    metrics: Arc<MetricsRecorder>,
}

impl SimulationCore {
    /// Applies one tick unless the network is degraded. Returns whether the
    /// picture moved.
    fn tick(&self, now: Millis) -> CopResult<bool> {
        if !*self.online.borrow() {
            self.metrics.record_skipped_tick();
            return Ok(false);
        }

        let mut state = self
            .state
            .lock()
            .map_err(|err| CopError::Poisoned(err.to_string()))?;
        let mut tracks = self
            .tracks
            .write()
            .map_err(|err| CopError::Poisoned(err.to_string()))?;
        *state = self.plan.tick(*state, &mut tracks, now);
        self.metrics.record_tick();
        Ok(true)
    }
}

/// Drives the orbit simulation on a fixed period. At most one timer runs per
/// driver; the online flag gates every tick.
pub struct SimulationDriver {
    core: SimulationCore,
    period: Duration,
    task: Mutex<Option<PeriodicTask>>,
    logger: LogManager,
}

impl SimulationDriver {
    pub fn new(
        plan: OrbitPlan,
        tracks: SharedTrackStore,
        online: watch::Receiver<bool>,
        period: Duration,
        metrics: Arc<MetricsRecorder>,
    ) -> Self {
        Self {
            core: SimulationCore {
                plan: Arc::new(plan),
                tracks,
                state: Arc::new(Mutex::new(OrbitState::default())),
                online,
                metrics,
            },
            period,
            task: Mutex::new(None),
            logger: LogManager::new("simulation"),
        }
    }

    pub fn start(&self) -> CopResult<()> {
        let mut slot = self
            .task
            .lock()
            .map_err(|err| CopError::Poisoned(err.to_string()))?;
        if slot.as_ref().is_some_and(|task| !task.is_finished()) {
            return Err(CopError::AlreadyRunning);
        }

        let core = self.core.clone();
        let logger = self.logger.clone();
        *slot = Some(PeriodicTask::spawn(self.period, move || {
            if let Err(err) = core.tick(now_millis()) {
                logger.failure(&format!("tick failed: {err}"));
            }
        }));
        self.logger.record(&format!(
            "orbit simulation started at {:?} period, {} rad per tick",
            self.period,
            self.core.plan.config().step
        ));
        Ok(())
    }

    pub fn stop(&self) {
        if let Ok(mut slot) = self.task.lock() {
            if let Some(task) = slot.take() {
                task.cancel();
                self.logger.record("orbit simulation stopped");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|task| !task.is_finished()))
            .unwrap_or(false)
    }

    /// Runs a single tick synchronously, outside the timer.
    pub fn step(&self, now: Millis) -> CopResult<bool> {
        self.core.tick(now)
    }

    pub fn state(&self) -> OrbitState {
        self.core
            .state
            .lock()
            .map(|state| *state)
            .unwrap_or_default()
    }
}

impl Drop for SimulationDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
