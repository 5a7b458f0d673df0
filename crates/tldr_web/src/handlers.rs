use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tldr_core::{ArticleText, CollectingSink, ErrorKind, TargetLanguage};
use tldr_inference::models::{self, ModelInfo, SUMMARIZATION_MODELS};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default)]
    pub language: TargetLanguage,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub language: TargetLanguage,
    pub progress: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub progress: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub default: &'static str,
    pub summarization: &'static [ModelInfo],
    pub translation: BTreeMap<String, String>,
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeRequest>,
) -> Response {
    let sink = CollectingSink::new();
    let text = ArticleText::from(request.text);

    let result = {
        let mut session = state.session.lock().await;
        session.summarize(&text, request.language, &sink).await
    };

    match result {
        Ok(summary) => Json(SummarizeResponse {
            summary,
            language: request.language,
            progress: sink.progress(),
        })
        .into_response(),
        Err(e) => {
            let status = match e.kind() {
                ErrorKind::Precondition => StatusCode::BAD_REQUEST,
                ErrorKind::Remote | ErrorKind::MalformedResponse | ErrorKind::Transport => StatusCode::BAD_GATEWAY,
                ErrorKind::Other => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let error = sink.last_error().unwrap_or_else(|| e.to_string());
            (status, Json(ErrorResponse { error, progress: sink.progress() })).into_response()
        }
    }
}

pub async fn clear_cache(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.lock().await.invalidate();
    tracing::info!("🧹 Summary cache cleared");
    StatusCode::NO_CONTENT
}

pub async fn list_models() -> impl IntoResponse {
    let translation = models::default_translation_models()
        .into_iter()
        .map(|(lang, model)| (lang.code().to_string(), model.to_string()))
        .collect();

    Json(ModelsResponse {
        default: models::DEFAULT_SUMMARIZATION_MODEL,
        summarization: SUMMARIZATION_MODELS,
        translation,
    })
}
