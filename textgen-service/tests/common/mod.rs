#![allow(dead_code)]

use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use textgen_service::config::{
    CorsConfig, GoogleConfig, ModelConfig, ObservabilityConfig, TextgenConfig,
};
use textgen_service::services::providers::mock::MockTextProvider;
use textgen_service::services::providers::TextProvider;
use textgen_service::startup::Application;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-2.0-flash-lite";

/// Configuration pointing at `api_base`, listening on a random port.
pub fn test_config(api_base: &str) -> TextgenConfig {
    TextgenConfig {
        common: CoreConfig { port: 0 },
        google: GoogleConfig {
            api_key: TEST_API_KEY.to_string(),
            api_base: api_base.to_string(),
        },
        models: ModelConfig {
            text_model: TEST_MODEL.to_string(),
            system_instruction: "You are an expert content creator.".to_string(),
            temperature: 0.7,
        },
        cors: CorsConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the service backed by the given provider.
    pub async fn spawn_with_provider(provider: Arc<dyn TextProvider>) -> Self {
        let app = Application::build_with_provider(test_config("http://127.0.0.1:9"), provider)
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    /// Spawn the service with the real Gemini client aimed at `api_base`.
    pub async fn spawn_with_gemini(api_base: &str) -> Self {
        let app = Application::build(test_config(api_base))
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    /// Spawn the service with an echoing mock provider.
    pub async fn spawn() -> (Self, Arc<MockTextProvider>) {
        let provider = Arc::new(MockTextProvider::new(true));
        let app = Self::spawn_with_provider(provider.clone()).await;
        (app, provider)
    }

    async fn start(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn generate(&self, query: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .get(format!("{}/api/generate-text", self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to send request")
    }
}
