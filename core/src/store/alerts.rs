use crate::model::Alert;

/// Append-only list of alerts, oldest first as seeded.
#[derive(Debug, Clone, Default)]
pub struct AlertStore {
    alerts: Vec<Alert>,
}

impl AlertStore {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    pub fn all(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn push(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|alert| alert.id == id)
    }

    /// Alerts shown on the commander overlay.
    pub fn critical(&self) -> Vec<&Alert> {
        self.alerts.iter().filter(|alert| alert.is_critical()).collect()
    }

    /// Leading alerts shown in the ticker rail.
    pub fn ticker(&self, count: usize) -> &[Alert] {
        &self.alerts[..count.min(self.alerts.len())]
    }

    pub fn linked_track(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(|alert| alert.track_id.as_deref())
    }

    /// Marks an alert acknowledged. Returns false for an unknown id.
    pub fn acknowledge(&mut self, id: &str) -> bool {
        match self.alerts.iter_mut().find(|alert| alert.id == id) {
            Some(alert) => {
                alert.acknowledged = Some(true);
                true
            }
            None => false,
        }
    }
}
