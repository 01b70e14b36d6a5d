//! Minimal client for a hosted `generateContent` text-generation endpoint.

use crate::prelude::{CopError, CopResult, LatLng};
use crate::summary::GroundingLink;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_LINK_TITLE: &str = "Map Location";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_maps: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    pub lat_lng: LatLng,
}

impl GenerateRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
            tools: Vec::new(),
            tool_config: None,
        }
    }

    /// Requests map-grounded retrieval around `location`.
    pub fn grounded_at(mut self, location: LatLng) -> Self {
        self.tools.push(Tool {
            google_maps: serde_json::Map::new(),
        });
        self.tool_config = Some(ToolConfig {
            retrieval_config: RetrievalConfig { lat_lng: location },
        });
        self
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize, Default)]
pub struct GroundingChunk {
    #[serde(default)]
    pub maps: Option<MapsChunk>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MapsChunk {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GenerateResponse {
    pub fn parse(body: &str) -> CopResult<Self> {
        serde_json::from_str(body).map_err(|err| CopError::MalformedResponse(err.to_string()))
    }

    /// Concatenated text parts of the first candidate; empty if there are none.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Map citations from the first candidate's grounding metadata.
    pub fn map_links(&self) -> Vec<GroundingLink> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.grounding_metadata.as_ref())
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.maps.as_ref())
                    .filter_map(|maps| {
                        let uri = maps.uri.clone()?;
                        let title = maps
                            .title
                            .clone()
                            .filter(|title| !title.is_empty())
                            .unwrap_or_else(|| DEFAULT_LINK_TITLE.to_string());
                        Some(GroundingLink { uri, title })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Connection settings for the generation service.
#[derive(Debug, Clone)]
pub struct GenAiClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GenAiClient {
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> CopResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn generate(&self, model: &str, request: &GenerateRequest) -> CopResult<GenerateResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| CopError::Config("no API key configured".into()))?;
        let url = format!("{}/models/{}:generateContent", self.endpoint, model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CopError::Status {
                status: status.as_u16(),
                body,
            });
        }
        GenerateResponse::parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_request_carries_maps_tool_and_location() {
        let request = GenerateRequest::text("Tactical Request: water").grounded_at(LatLng {
            latitude: 34.05,
            longitude: -117.2,
        });
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "Tactical Request: water");
        assert!(value["tools"][0]["googleMaps"].is_object());
        assert_eq!(
            value["toolConfig"]["retrievalConfig"]["latLng"]["latitude"],
            34.05
        );
    }

    #[test]
    fn plain_request_omits_tools() {
        let value = serde_json::to_value(GenerateRequest::text("sitrep")).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("toolConfig").is_none());
    }

    #[test]
    fn response_text_and_links_are_extracted() {
        let body = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Bridge at "}, {"text": "grid 4411."}]},
                "groundingMetadata": {"groundingChunks": [
                    {"maps": {"uri": "https://maps.example/1", "title": "Route Bridge"}},
                    {"web": {"uri": "https://ignored.example"}},
                    {"maps": {"uri": "https://maps.example/2"}},
                    {"maps": {"title": "no uri"}}
                ]}
            }]
        }"#;
        let response = GenerateResponse::parse(body).unwrap();
        assert_eq!(response.text(), "Bridge at grid 4411.");
        assert_eq!(
            response.map_links(),
            vec![
                GroundingLink {
                    uri: "https://maps.example/1".into(),
                    title: "Route Bridge".into()
                },
                GroundingLink {
                    uri: "https://maps.example/2".into(),
                    title: "Map Location".into()
                },
            ]
        );
    }

    #[test]
    fn empty_response_yields_empty_text() {
        let response = GenerateResponse::parse("{}").unwrap();
        assert_eq!(response.text(), "");
        assert!(response.map_links().is_empty());
    }

    #[test]
    fn malformed_body_is_reported() {
        assert!(matches!(
            GenerateResponse::parse("<html>quota</html>"),
            Err(CopError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        let client = GenAiClient::new("http://127.0.0.1:9", None, Duration::from_secs(1)).unwrap();
        let result = client.generate("model", &GenerateRequest::text("x")).await;
        assert!(matches!(result, Err(CopError::Config(_))));
    }
}
