use prompt_service::config::PromptConfig;
use prompt_service::services::providers::mock::MockTextProvider;
use prompt_service::services::providers::TextProvider;
use prompt_service::startup::Application;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub provider: Arc<MockTextProvider>,
}

impl TestApp {
    /// Spawn the app with a provider that returns the given envelope text.
    pub async fn spawn() -> Self {
        Self::spawn_with(MockTextProvider::from_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "mock reply" }] }
            }]
        })))
        .await
    }

    pub async fn spawn_with(provider: MockTextProvider) -> Self {
        std::env::set_var("GOOGLE_AI_STUDIO_API_KEY", "test-api-key");

        let mut config = PromptConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing

        let provider = Arc::new(provider);
        let dyn_provider: Arc<dyn TextProvider> = provider.clone();

        let app = Application::build_with_provider(config, dyn_provider)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, provider }
    }
}
