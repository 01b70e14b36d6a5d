use crate::generator::contacts::ContactConfig;
use anyhow::Context;
use copcore::simulation::OrbitConfig;
use copcore::summary::SummaryConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Scenario settings loaded from YAML. Missing keys take the defaults of the
/// built-in brigade picture.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub tick_ms: u64,
    pub clock_ms: u64,
    pub orbit: OrbitConfig,
    pub summary: SummaryConfig,
    pub contacts: ContactConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            clock_ms: 1000,
            orbit: OrbitConfig::default(),
            summary: SummaryConfig::Local,
            contacts: ContactConfig::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario config {}", path_ref.display()))?;
        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scenario config {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.tick_ms > 0, "tick_ms must be positive");
        anyhow::ensure!(self.clock_ms > 0, "clock_ms must be positive");
        anyhow::ensure!(
            self.orbit.step.is_finite(),
            "orbit step must be a finite angle"
        );
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn clock_period(&self) -> Duration {
        Duration::from_millis(self.clock_ms)
    }
}
