use crate::filter::engine::visible;
use crate::model::{Alert, FmvFeed, Track};
use crate::store::AlertStore;
use crate::telemetry::LogManager;
use crate::view::state::{ViewAction, ViewState};
use tokio::sync::watch;

/// Single owner of view state and alerts. Everyone else reads snapshots.
pub struct ViewController {
    state: ViewState,
    alerts: AlertStore,
    feeds: Vec<FmvFeed>,
    online_tx: watch::Sender<bool>,
    logger: LogManager,
}

impl ViewController {
    pub fn new(feeds: Vec<FmvFeed>, alerts: AlertStore) -> Self {
        let state = ViewState::initial(feeds.first().map(|feed| feed.id.as_str()));
        let (online_tx, _) = watch::channel(state.is_online);
        Self {
            state,
            alerts,
            feeds,
            online_tx,
            logger: LogManager::new("view"),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.clone()
    }

    /// Receiver the simulation driver watches for the online flag.
    pub fn online_receiver(&self) -> watch::Receiver<bool> {
        self.online_tx.subscribe()
    }

    pub fn dispatch(&mut self, action: ViewAction) -> &ViewState {
        self.logger.trace_step(&format!("applying {action:?}"));
        let next = self.state.clone().apply(action);
        if next.is_online != self.state.is_online {
            self.logger.record(if next.is_online {
                "network ACTIVE"
            } else {
                "network DEGRADED"
            });
            self.online_tx.send_replace(next.is_online);
        }
        self.state = next;
        &self.state
    }

    pub fn visible<'a>(&self, tracks: &'a [Track]) -> Vec<&'a Track> {
        visible(
            tracks,
            &self.state.active_layers,
            &self.state.filter_config,
            &self.state.search_query,
        )
    }

    pub fn feeds(&self) -> &[FmvFeed] {
        &self.feeds
    }

    pub fn active_feed(&self) -> Option<&FmvFeed> {
        self.state.active_feed(&self.feeds)
    }

    pub fn alerts(&self) -> &AlertStore {
        &self.alerts
    }

    pub fn raise_alert(&mut self, alert: Alert) {
        self.logger
            .warn(&format!("{:?} {:?}: {}", alert.severity, alert.alert_type, alert.message));
        self.alerts.push(alert);
    }

    pub fn acknowledge_alert(&mut self, id: &str) -> bool {
        self.alerts.acknowledge(id)
    }

    /// Selects the track an alert points at. Alerts without a track clear the
    /// selection.
    pub fn snap_to_alert_source(&mut self, alert_id: &str) -> bool {
        match self.alerts.linked_track(alert_id).map(str::to_string) {
            Some(track_id) => {
                self.dispatch(ViewAction::SelectTrack(track_id));
                true
            }
            None => {
                self.dispatch(ViewAction::ClearSelection);
                false
            }
        }
    }
}
