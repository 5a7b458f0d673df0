use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tldr_core::{Error, InferenceClient, InferenceTask, ModelSelector, Result};
use url::Url;

use crate::Config;

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Client for the hosted Hugging Face inference API.
pub struct HuggingFaceClient {
    client: Arc<Client>,
    api_key: String,
    base_url: Url,
}

impl fmt::Debug for HuggingFaceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl HuggingFaceClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        Ok(Self {
            client: Arc::new(Client::new()),
            api_key: api_key.into(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config("Hugging Face API key is required".to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: Arc::new(builder.build()?),
            api_key,
            base_url: normalize_base_url(&config.base_url)?,
        })
    }

    fn endpoint(&self, model: &ModelSelector) -> Result<Url> {
        Ok(self.base_url.join(&format!("models/{}", model.as_str()))?)
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Interprets a decoded response body.
///
/// `[{"summary_text": ...}]` (or `translation_text`) is a success, an object
/// carrying `error` is a remote failure, anything else is malformed.
pub fn parse_response(task: InferenceTask, body: &Value) -> Result<String> {
    if let Some(text) = body
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get(task.output_field()))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
    {
        return Ok(text.to_string());
    }

    match body.get("error").filter(|error| is_truthy(error)) {
        Some(Value::String(message)) => Err(Error::Remote(message.clone())),
        Some(other) => Err(Error::Remote(other.to_string())),
        None => Err(Error::MalformedResponse(task.malformed_message().to_string())),
    }
}

/// An `error` field only counts when it carries something: `null`, `false`,
/// `0` and `""` are ignored.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn infer(&self, task: InferenceTask, model: &ModelSelector, input: &str) -> Result<String> {
        let endpoint = self.endpoint(model)?;
        tracing::debug!("POST {} ({:?}, {} chars)", endpoint, task, input.chars().count());

        let response = self
            .client
            .post(endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&InferenceRequest { inputs: input })
            .send()
            .await?;

        let status = response.status();
        let status_error = response.error_for_status_ref().err();
        let bytes = response.bytes().await?;

        let body: Value = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(e) => {
                if let Some(status_error) = status_error {
                    return Err(Error::Http(status_error));
                }
                tracing::debug!("Undecodable {} response from {}: {}", status, model, e);
                return Err(Error::MalformedResponse(task.malformed_message().to_string()));
            }
        };

        let result = parse_response(task, &body);
        if let Err(e) = &result {
            tracing::warn!("Inference call to {} failed ({}): {}", model, status, e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tldr_core::ErrorKind;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_summary() {
        let body = json!([{ "summary_text": "Short version." }]);
        assert_eq!(parse_response(InferenceTask::Summarize, &body).unwrap(), "Short version.");
    }

    #[test]
    fn test_parse_uses_first_element() {
        let body = json!([{ "translation_text": "Hola." }, { "translation_text": "Adiós." }]);
        assert_eq!(parse_response(InferenceTask::Translate, &body).unwrap(), "Hola.");
    }

    #[test]
    fn test_parse_wrong_field_is_malformed() {
        let body = json!([{ "translation_text": "Hola." }]);
        let err = parse_response(InferenceTask::Summarize, &body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert_eq!(err.to_string(), "Unexpected response from Hugging Face API");

        let err = parse_response(InferenceTask::Translate, &json!({"foo": 1})).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected response from Hugging Face translation API");
    }

    #[test]
    fn test_parse_remote_error() {
        let body = json!({ "error": "Model is currently loading" });
        let err = parse_response(InferenceTask::Summarize, &body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.to_string(), "Model is currently loading");
    }

    #[test]
    fn test_parse_empty_error_is_malformed() {
        for body in [json!({ "error": "" }), json!({ "error": false }), json!({ "error": null }), json!({ "error": 0 })] {
            let err = parse_response(InferenceTask::Summarize, &body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedResponse, "body: {}", body);
            assert_eq!(err.to_string(), "Unexpected response from Hugging Face API");
        }

        let err = parse_response(InferenceTask::Translate, &json!({ "error": ["quota exceeded"] })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.to_string(), "[\"quota exceeded\"]");
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = HuggingFaceClient::new("hf_secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = HuggingFaceClient::with_base_url("k", "http://localhost:8080/proxy").unwrap();
        let endpoint = client.endpoint(&ModelSelector::new("facebook/bart-large-cnn")).unwrap();
        assert_eq!(endpoint.as_str(), "http://localhost:8080/proxy/models/facebook/bart-large-cnn");
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = Config::default();
        let err = HuggingFaceClient::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("API key is required"));
    }

    #[tokio::test]
    async fn test_infer_success() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/models/sshleifer/distilbart-cnn-12-6"))
            .and(matchers::header("Authorization", "Bearer test-key"))
            .and(matchers::body_json(json!({ "inputs": "Long article text." })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "summary_text": "Short." }])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HuggingFaceClient::with_base_url("test-key", &mock_server.uri()).unwrap();
        let output = client
            .infer(
                InferenceTask::Summarize,
                &ModelSelector::new("sshleifer/distilbart-cnn-12-6"),
                "Long article text.",
            )
            .await
            .unwrap();
        assert_eq!(output, "Short.");
    }

    #[tokio::test]
    async fn test_infer_remote_error_with_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(json!({ "error": "Model facebook/bart-large-cnn is currently loading" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HuggingFaceClient::with_base_url("test-key", &mock_server.uri()).unwrap();
        let err = client
            .infer(InferenceTask::Summarize, &ModelSelector::new("facebook/bart-large-cnn"), "text")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.to_string(), "Model facebook/bart-large-cnn is currently loading");
    }

    #[tokio::test]
    async fn test_infer_non_json_error_status_is_transport() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let client = HuggingFaceClient::with_base_url("test-key", &mock_server.uri()).unwrap();
        let err = client
            .infer(InferenceTask::Translate, &ModelSelector::new("Helsinki-NLP/opus-mt-en-fr"), "text")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_infer_non_json_success_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&mock_server)
            .await;

        let client = HuggingFaceClient::with_base_url("test-key", &mock_server.uri()).unwrap();
        let err = client
            .infer(InferenceTask::Translate, &ModelSelector::new("Helsinki-NLP/opus-mt-en-fr"), "text")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert_eq!(err.to_string(), "Unexpected response from Hugging Face translation API");
    }

    #[tokio::test]
    async fn test_infer_connection_refused_is_transport() {
        let client = HuggingFaceClient::with_base_url("test-key", "http://127.0.0.1:1").unwrap();
        let err = client
            .infer(InferenceTask::Summarize, &ModelSelector::new("m"), "text")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
