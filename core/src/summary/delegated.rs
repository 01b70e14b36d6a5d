use crate::model::{Alert, Track};
use crate::prelude::{CopResult, LatLng};
use crate::summary::client::{GenAiClient, GenerateRequest};
use crate::summary::prompt::{intel_prompt, summary_prompt};
use crate::summary::{Sitrep, SummaryStrategy, INTEL_FALLBACK, SUMMARY_FALLBACK};
use crate::telemetry::LogManager;
use async_trait::async_trait;

const EMPTY_INTEL_REPORT: &str = "No intelligence report generated.";

/// Sitrep written by the hosted generation service. Every failure degrades to
/// a fixed fallback text; nothing is retried.
pub struct DelegatedSummary {
    client: GenAiClient,
    model: String,
    intel_model: String,
    logger: LogManager,
}

impl DelegatedSummary {
    pub fn new(client: GenAiClient, model: impl Into<String>, intel_model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            intel_model: intel_model.into(),
            logger: LogManager::new("sitrep"),
        }
    }

    async fn request_summary(&self, tracks: &[Track], alerts: &[Alert]) -> CopResult<String> {
        let prompt = summary_prompt(tracks, alerts)?;
        let response = self
            .client
            .generate(&self.model, &GenerateRequest::text(prompt))
            .await?;
        Ok(response.text())
    }

    async fn request_intel(&self, query: &str, location: LatLng) -> CopResult<Sitrep> {
        let request = GenerateRequest::text(intel_prompt(query)).grounded_at(location);
        let response = self.client.generate(&self.intel_model, &request).await?;
        let text = response.text();
        Ok(Sitrep {
            text: if text.is_empty() {
                EMPTY_INTEL_REPORT.to_string()
            } else {
                text
            },
            links: response.map_links(),
            degraded: false,
        })
    }
}

#[async_trait]
impl SummaryStrategy for DelegatedSummary {
    fn name(&self) -> &'static str {
        "delegated"
    }

    async fn summarize(&self, tracks: &[Track], alerts: &[Alert]) -> Sitrep {
        match self.request_summary(tracks, alerts).await {
            Ok(text) => Sitrep::new(text),
            Err(err) => {
                self.logger.failure(&format!("summary generation failed: {err}"));
                Sitrep::fallback(SUMMARY_FALLBACK)
            }
        }
    }

    async fn query_local_intel(&self, query: &str, location: LatLng) -> Sitrep {
        match self.request_intel(query, location).await {
            Ok(sitrep) => sitrep,
            Err(err) => {
                self.logger.failure(&format!("grounded intel query failed: {err}"));
                Sitrep::fallback(INTEL_FALLBACK)
            }
        }
    }
}
