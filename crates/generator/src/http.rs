//! HTTP-backed generator client.

use regex::Regex;
use reqwest::{Client, ClientBuilder};
use serde_json::json;
use tracing::{debug, warn};

use pathway_core::GenerationSpec;

use crate::output::GeneratedRoadmap;
use crate::prompt::build_prompt;
use crate::{GeneratorError, RoadmapGenerator};

/// Client for a remote content-synthesis endpoint.
///
/// Posts the prompt as `{"prompt": ...}` and expects `{"text": ...}` back,
/// where `text` is the roadmap JSON, possibly wrapped in markdown fences.
#[derive(Clone)]
pub struct HttpGenerator {
    /// HTTP client
    client: Client,

    /// Endpoint URL
    url: String,

    /// Optional bearer credential for the backend
    api_key: Option<String>,
}

impl HttpGenerator {
    /// Create a new generator client.
    pub fn new(url: String, api_key: Option<String>) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl RoadmapGenerator for HttpGenerator {
    async fn generate(&self, spec: &GenerationSpec) -> Result<GeneratedRoadmap, GeneratorError> {
        let prompt = build_prompt(spec);
        debug!(url = %self.url, prompt_chars = prompt.len(), "requesting roadmap generation");

        let mut request = self.client.post(&self.url).json(&json!({ "prompt": prompt }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "generation backend returned an error");
            return Err(GeneratorError::Backend { status: status.as_u16(), body });
        }

        #[derive(serde::Deserialize)]
        struct Response {
            text: String,
        }

        let data: Response = response.json().await?;
        parse_roadmap_text(&data.text)
    }
}

/// Strip markdown code fences and parse the roadmap JSON.
pub fn parse_roadmap_text(text: &str) -> Result<GeneratedRoadmap, GeneratorError> {
    let payload = match Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```") {
        Ok(fence) => fence
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or(text),
        Err(_) => text,
    }
    .trim();

    let roadmap: GeneratedRoadmap = serde_json::from_str(payload)?;
    if roadmap.modules.is_empty() {
        return Err(GeneratorError::Malformed("generator returned no modules".into()));
    }
    Ok(roadmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "roadmap_meta": {"title": "Plan"},
        "modules": [{"module_id": "M1", "topic": "Basics"}]
    }"#;

    #[test]
    fn parses_bare_json() {
        let parsed = parse_roadmap_text(BODY).unwrap();
        assert_eq!(parsed.roadmap_meta.title, "Plan");
    }

    #[test]
    fn strips_markdown_fences() {
        let fenced = format!("```json\n{}\n```", BODY);
        let parsed = parse_roadmap_text(&fenced).unwrap();
        assert_eq!(parsed.modules.len(), 1);

        let plain_fence = format!("```\n{}\n```", BODY);
        assert!(parse_roadmap_text(&plain_fence).is_ok());
    }

    #[test]
    fn empty_module_list_is_malformed() {
        let text = r#"{"roadmap_meta": {"title": "Empty"}, "modules": []}"#;
        assert!(matches!(
            parse_roadmap_text(text),
            Err(GeneratorError::Malformed(_))
        ));
    }

    #[test]
    fn non_json_is_a_parse_error() {
        assert!(matches!(
            parse_roadmap_text("sorry, I cannot help with that"),
            Err(GeneratorError::Parse(_))
        ));
    }
}
