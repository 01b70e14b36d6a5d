//! Sitrep generation behind a single strategy interface.
//!
//! The local strategy composes a fixed template from counts; the delegated
//! strategy asks a hosted text-generation service and falls back to a fixed
//! string on any failure. Which one runs is decided once, from
//! [`SummaryConfig`], by [`build_strategy`].

pub mod client;
pub mod delegated;
pub mod desk;
pub mod local;
pub mod prompt;

use crate::model::{Alert, Track};
use crate::prelude::{CopResult, LatLng};
use crate::telemetry::LogManager;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub use client::GenAiClient;
pub use delegated::DelegatedSummary;
pub use desk::{SitrepDesk, SitrepOutcome};
pub use local::LocalSummary;

pub const SUMMARY_FALLBACK: &str =
    "Intelligence summary unavailable. Check direct feeds for status.";
pub const INTEL_FALLBACK: &str = "Failed to query local intelligence baseline.";

/// Supporting citation returned by grounded queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingLink {
    pub uri: String,
    pub title: String,
}

/// Generated text plus any citations backing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sitrep {
    pub text: String,
    pub links: Vec<GroundingLink>,
    /// Set when `text` is a fallback rather than a generated answer.
    #[serde(default)]
    pub degraded: bool,
}

impl Sitrep {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            links: Vec::new(),
            degraded: false,
        }
    }

    pub fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            links: Vec::new(),
            degraded: true,
        }
    }
}

#[async_trait]
pub trait SummaryStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Never fails; failures surface as a degraded fallback sitrep.
    async fn summarize(&self, tracks: &[Track], alerts: &[Alert]) -> Sitrep;

    /// Location-grounded free-text query. Strategies without a grounded
    /// backend answer with the intel fallback.
    async fn query_local_intel(&self, _query: &str, _location: LatLng) -> Sitrep {
        Sitrep::fallback(INTEL_FALLBACK)
    }
}

/// Settings for the hosted generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegatedConfig {
    pub endpoint: String,
    pub model: String,
    pub intel_model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for DelegatedConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-3-flash-preview".into(),
            intel_model: "gemini-2.5-flash-lite-latest".into(),
            api_key_env: "API_KEY".into(),
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SummaryConfig {
    #[default]
    Local,
    Delegated(DelegatedConfig),
}

pub fn build_strategy(config: &SummaryConfig) -> CopResult<Arc<dyn SummaryStrategy>> {
    match config {
        SummaryConfig::Local => Ok(Arc::new(LocalSummary::new())),
        SummaryConfig::Delegated(settings) => {
            let api_key = std::env::var(&settings.api_key_env)
                .ok()
                .filter(|key| !key.trim().is_empty());
            let client = GenAiClient::new(
                &settings.endpoint,
                api_key,
                Duration::from_secs(settings.timeout_secs.max(1)),
            )?;
            if !client.has_credentials() {
                LogManager::new("sitrep").warn(&format!(
                    "{} is not set; delegated sitreps will use the fallback text",
                    settings.api_key_env
                ));
            }
            Ok(Arc::new(DelegatedSummary::new(
                client,
                settings.model.clone(),
                settings.intel_model.clone(),
            )))
        }
    }
}
