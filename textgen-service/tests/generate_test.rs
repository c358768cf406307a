//! End-to-end tests for `GET /api/generate-text` against a mock provider.

mod common;

use common::TestApp;
use std::sync::Arc;
use textgen_service::services::providers::mock::MockTextProvider;

#[tokio::test]
async fn story_is_the_default() {
    let (app, provider) = TestApp::spawn().await;

    let response = app.generate(&[]).await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let text = body["text"].as_str().unwrap();
    assert!(text.starts_with("Mock response for: Write a short, engaging story with exactly 50 words."));
    assert!(body.get("error").is_none());
    assert_eq!(provider.prompts().len(), 1);
}

#[tokio::test]
async fn story_word_limit_passes_through_and_caps() {
    let (app, provider) = TestApp::spawn().await;

    app.generate(&[("wordLimit", "200"), ("type", "story")]).await;
    app.generate(&[("wordLimit", "16000"), ("type", "story")]).await;

    let prompts = provider.prompts();
    assert!(prompts[0].contains("exactly 200 words"));
    assert!(prompts[1].contains("exactly 500 words"));
}

#[tokio::test]
async fn vocabulary_divides_word_limit() {
    let (app, provider) = TestApp::spawn().await;

    app.generate(&[("wordLimit", "100"), ("type", "vocabulary")]).await;
    app.generate(&[("wordLimit", "20000"), ("type", "vocabulary")]).await;
    app.generate(&[("wordLimit", "7"), ("type", "vocabulary")]).await;

    let prompts = provider.prompts();
    assert!(prompts[0].contains("vocabulary list with exactly 20 words"));
    assert!(prompts[1].contains("vocabulary list with exactly 500 words"));
    assert!(prompts[2].contains("vocabulary list with exactly 1.4 words"));
}

#[tokio::test]
async fn custom_prompt_is_embedded() {
    let (app, provider) = TestApp::spawn().await;

    let response = app
        .generate(&[
            ("wordLimit", "80"),
            ("type", "custom"),
            ("prompt", "a robot learns to paint"),
        ])
        .await;
    assert_eq!(response.status(), 200);

    let prompt = &provider.prompts()[0];
    assert!(prompt.contains("\"a robot learns to paint\""));
    assert!(prompt.contains("80"));
}

#[tokio::test]
async fn custom_without_prompt_is_generic() {
    let (app, provider) = TestApp::spawn().await;

    app.generate(&[("wordLimit", "80"), ("type", "custom"), ("prompt", "")])
        .await;

    let prompt = &provider.prompts()[0];
    assert!(!prompt.contains("based on"));
    assert!(prompt.contains("engaging content that's exactly 80 words"));
}

#[tokio::test]
async fn non_numeric_word_limit_defaults_to_fifty() {
    let (app, provider) = TestApp::spawn().await;

    let response = app.generate(&[("wordLimit", "lots"), ("type", "gk")]).await;
    assert_eq!(response.status(), 200);

    assert!(provider.prompts()[0].contains("general knowledge with exactly 50 words"));
}

#[tokio::test]
async fn unknown_type_behaves_like_story() {
    let (app, provider) = TestApp::spawn().await;

    app.generate(&[("wordLimit", "120"), ("type", "poem")]).await;
    app.generate(&[("wordLimit", "120"), ("type", "story")]).await;

    let prompts = provider.prompts();
    assert_eq!(prompts[0], prompts[1]);
}

#[tokio::test]
async fn provider_failure_returns_generic_500() {
    let provider = Arc::new(MockTextProvider::failing());
    let app = TestApp::spawn_with_provider(provider.clone()).await;

    let response = app.generate(&[("wordLimit", "100")]).await;
    assert_eq!(response.status(), 500);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Error generating text");
    assert!(body.get("text").is_none());
    assert_eq!(provider.prompts().len(), 1);
}

#[tokio::test]
async fn repeated_type_falls_back_to_story() {
    let (app, provider) = TestApp::spawn().await;

    let response = app
        .generate(&[("wordLimit", "120"), ("type", "story"), ("type", "gk")])
        .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["text"].is_string());
    assert!(provider.prompts()[0].contains("story with exactly 120 words"));
}

#[tokio::test]
async fn repeated_word_limit_uses_leading_value() {
    let (app, provider) = TestApp::spawn().await;

    let response = app
        .generate(&[("wordLimit", "100"), ("wordLimit", "200"), ("type", "gk")])
        .await;
    assert_eq!(response.status(), 200);

    assert!(provider.prompts()[0].contains("general knowledge with exactly 100 words"));
}

#[tokio::test]
async fn repeated_prompt_is_joined() {
    let (app, provider) = TestApp::spawn().await;

    let response = app
        .generate(&[
            ("wordLimit", "80"),
            ("type", "custom"),
            ("prompt", "a"),
            ("prompt", "b"),
        ])
        .await;
    assert_eq!(response.status(), 200);

    assert!(provider.prompts()[0].contains("\"a,b\""));
}

#[tokio::test]
async fn responses_carry_request_id_and_cors_headers() {
    let (app, _provider) = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/api/generate-text", app.address))
        .header("origin", "http://frontend.test")
        .header("x-request-id", "req-42")
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}
