//! `GET /api/generate-text`.
//!
//! One linear pass: resolve the query, pick a template, make exactly one
//! provider call, return the text. Every failure collapses to the same
//! generic 500 body; the cause is only logged.

use crate::models::{build_prompt, GenerateTextParams, GenerateTextResponse};
use crate::services::metrics;
use crate::services::providers::ProviderError;
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Instant;
use thiserror::Error;

/// Body returned for every failure.
pub const GENERATE_ERROR_MESSAGE: &str = "Error generating text";

#[derive(Debug, Error)]
pub enum GenerateTextError {
    #[error("Provider call failed: {0}")]
    Provider(#[from] ProviderError),
}

impl IntoResponse for GenerateTextError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Error generating text");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": GENERATE_ERROR_MESSAGE })),
        )
            .into_response()
    }
}

pub async fn generate_text(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<GenerateTextResponse>, GenerateTextError> {
    let request = GenerateTextParams::from_pairs(pairs).resolve();
    let content_type = request.content_type.as_str();
    let prompt = build_prompt(&request);

    tracing::info!(
        content_type,
        word_limit = request.word_limit,
        word_count = %request.word_count,
        "Generating text"
    );

    let provider = &state.text_provider;
    let started = Instant::now();
    let result = provider.generate(&prompt, &state.generation_params()).await;
    metrics::record_provider_latency(
        provider.name(),
        provider.model(),
        started.elapsed().as_secs_f64(),
    );

    match result {
        Ok(response) => {
            metrics::record_request(content_type, "success");
            metrics::record_tokens(
                provider.model(),
                response.input_tokens,
                response.output_tokens,
            );

            tracing::info!(
                content_type,
                output_tokens = response.output_tokens,
                finish_reason = response.finish_reason.as_str(),
                "Text generated"
            );

            Ok(Json(GenerateTextResponse {
                text: response.text,
            }))
        }
        Err(e) => {
            metrics::record_request(content_type, "error");
            metrics::record_provider_error(provider.name(), e.kind());
            Err(e.into())
        }
    }
}
