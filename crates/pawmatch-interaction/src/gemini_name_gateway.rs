//! GeminiNameGateway - name generation over the Gemini REST API.
//!
//! Sends the Spanish prompt with a JSON response schema and parses the
//! returned `{ names: [...] }` document. Configuration is loaded from
//! secret.json or the environment.

use async_trait::async_trait;
use pawmatch_core::{GeneratedName, NameGateway, PawError, Result, Species};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::config::GeminiSettings;
use crate::prompt::{names_response_schema, render_names_prompt};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Name gateway backed by the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiNameGateway {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiNameGateway {
    /// Creates a new gateway with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn from_settings(settings: GeminiSettings) -> Self {
        Self::new(settings.api_key, settings.model)
    }

    /// Loads configuration from secret.json (or `path`) and the environment.
    pub fn try_from_config(path: Option<&Path>) -> Result<Self> {
        Ok(Self::from_settings(GeminiSettings::load(path)?))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Replaces the HTTP client (custom timeouts, proxies, ...).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Points the gateway at another endpoint (a proxy or a local test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(species: Species) -> Result<GenerateContentRequest> {
        Ok(GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: render_names_prompt(species)?,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: names_response_schema(),
            },
        })
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                // reqwest errors carry the URL, which contains the key
                PawError::generation(format!(
                    "Gemini API request failed: {}",
                    err.without_url()
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| PawError::generation(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl NameGateway for GeminiNameGateway {
    async fn generate(&self, species: Species) -> Result<Vec<GeneratedName>> {
        let request = Self::build_request(species)?;
        tracing::debug!(model = %self.model, %species, "requesting names from Gemini");

        let text = self.send_request(&request).await?;
        let names = parse_names(&text)?;

        tracing::info!(count = names.len(), %species, "Gemini returned names");
        Ok(names)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct NamesEnvelope {
    names: Vec<GeneratedName>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            PawError::generation("Gemini API returned no text in the response candidates")
        })
}

/// Parses the structured reply into names.
fn parse_names(text: &str) -> Result<Vec<GeneratedName>> {
    serde_json::from_str::<NamesEnvelope>(text.trim())
        .map(|envelope| envelope.names)
        .map_err(|err| PawError::generation(format!("Gemini returned malformed names: {err}")))
}

fn map_http_error(status: StatusCode, body: String) -> PawError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    tracing::warn!(status = status.as_u16(), "Gemini API error: {}", message);
    PawError::generation(format!("HTTP {}: {message}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one HTTP response and returns the raw request it received.
    async fn serve_once(
        status_line: &'static str,
        body: String,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{addr}"), handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn local_gateway(api_key: &str, model: &str, base_url: String) -> GeminiNameGateway {
        let client = Client::builder().no_proxy().build().unwrap();
        GeminiNameGateway::new(api_key, model)
            .with_client(client)
            .with_base_url(base_url)
    }

    fn gemini_reply(text: &str) -> String {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    #[test]
    fn test_parse_names() {
        let names = parse_names(
            r#"{"names": [{"name": "Canela", "meaning": "Color dulce", "tags": ["tierno", "clásico"]}]}"#,
        )
        .unwrap();
        assert_eq!(names, vec![GeneratedName::new("Canela", "Color dulce", &["tierno", "clásico"])]);
    }

    #[test]
    fn test_parse_names_rejects_missing_list() {
        let err = parse_names(r#"{"nombres": []}"#).unwrap_err();
        assert!(err.is_generation_failure());
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let response = GenerateContentResponse { candidates: None };
        assert!(extract_text_response(response).unwrap_err().is_generation_failure());
    }

    #[test]
    fn test_map_http_error_uses_status_text() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        assert_eq!(
            err.to_string(),
            "Name generation failed: HTTP 429: RESOURCE_EXHAUSTED: Quota exceeded"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = GeminiNameGateway::build_request(Species::Cat).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["required"][0], "names");
        assert!(
            body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("gato")
        );
    }

    #[tokio::test]
    async fn test_generate_against_local_server() {
        let names = json!({"names": [
            {"name": "Nube", "meaning": "Suave como el algodón", "tags": ["tierno"]},
            {"name": "Tornado", "meaning": "Pura energía", "tags": ["rudo", "divertido"]}
        ]})
        .to_string();
        let (base_url, server) = serve_once("HTTP/1.1 200 OK", gemini_reply(&names)).await;

        let gateway = local_gateway("test-key", "test-model", base_url);
        let generated = gateway.generate(Species::Dog).await.unwrap();

        assert_eq!(generated.len(), 2);
        assert_eq!(generated[0].name, "Nube");
        assert_eq!(generated[1].tags, vec!["rudo".to_string(), "divertido".to_string()]);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /test-model:generateContent?key=test-key"));
    }

    #[tokio::test]
    async fn test_generate_http_failure() {
        let body = r#"{"error": {"message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let (base_url, _server) =
            serve_once("HTTP/1.1 400 Bad Request", body.to_string()).await;

        let gateway = local_gateway("bad-key", DEFAULT_GEMINI_MODEL, base_url);
        let err = gateway.generate(Species::Cat).await.unwrap_err();
        assert!(err.is_generation_failure());
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_generate_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = local_gateway("key", DEFAULT_GEMINI_MODEL, format!("http://{addr}"));
        let err = gateway.generate(Species::Bird).await.unwrap_err();
        assert!(err.is_generation_failure());
        assert!(!err.to_string().contains("key=key"));
    }
}
