use crate::prelude::{now_millis, CopError, CopResult, Millis};
use chrono::{DateTime, Utc};
use crate::simulation::timer::PeriodicTask;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

/// Wall-clock ticker for the header display.
pub struct DisplayClock {
    period: Duration,
    tx: Arc<watch::Sender<Millis>>,
    task: Mutex<Option<PeriodicTask>>,
}

impl DisplayClock {
    pub fn new(period: Duration) -> Self {
        let (tx, _rx) = watch::channel(now_millis());
        Self {
            period,
            tx: Arc::new(tx),
            task: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Millis> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Millis {
        *self.tx.borrow()
    }

    pub fn start(&self) -> CopResult<()> {
        let mut slot = self
            .task
            .lock()
            .map_err(|err| CopError::Poisoned(err.to_string()))?;
        if slot.as_ref().is_some_and(|task| !task.is_finished()) {
            return Err(CopError::AlreadyRunning);
        }
        let tx = self.tx.clone();
        *slot = Some(PeriodicTask::spawn(self.period, move || {
            tx.send_replace(now_millis());
        }));
        Ok(())
    }

    pub fn stop(&self) {
        if let Ok(mut slot) = self.task.lock() {
            slot.take();
        }
    }
}

impl Drop for DisplayClock {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Formats epoch millis as `HH:MM:SS` Zulu.
pub fn zulu_time(millis: Millis) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zulu_time_formats_time_of_day() {
        assert_eq!(zulu_time(0), "00:00:00");
        // 2024-01-01T13:45:07.900Z
        assert_eq!(zulu_time(1_704_116_707_900), "13:45:07");
    }

    #[test]
    fn zulu_time_handles_pre_epoch_and_out_of_range() {
        assert_eq!(zulu_time(-1_000), "23:59:59");
        assert_eq!(zulu_time(Millis::MAX), "--:--:--");
    }

    #[tokio::test(start_paused = true)]
    async fn clock_publishes_on_start() {
        let clock = DisplayClock::new(Duration::from_secs(1));
        let mut rx = clock.subscribe();
        rx.borrow_and_update();
        clock.start().unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(rx.has_changed().unwrap());
        clock.stop();
    }
}
