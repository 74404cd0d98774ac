//! Creates the service indexes and seeds `audio_urls` with sample entries when
//! the collection is empty.

use onboarding_service::config::OnboardingConfig;
use onboarding_service::services::{DocumentStore, MongoGateway};
use service_core::observability::init_tracing;

const SAMPLE_AUDIO_URLS: &[(&str, &str)] = &[
    ("english", "/audio/english-sample.mp3"),
    ("arabic", "/audio/arabic-sample.mp3"),
];

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = OnboardingConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;
    init_tracing("seed-audio", &config.common.log_level, None);

    let gateway = MongoGateway::new(&config.mongodb.uri, &config.mongodb.database);
    gateway
        .connect()
        .await
        .map_err(|e| std::io::Error::other(format!("Database connection error: {}", e)))?;

    let result = async {
        gateway.initialize_indexes().await?;
        gateway.seed_audio_urls(SAMPLE_AUDIO_URLS).await
    }
    .await;

    gateway.disconnect().await;

    match result {
        Ok(inserted) => {
            tracing::info!(inserted, "Database setup completed");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Database setup failed: {}", e);
            Err(std::io::Error::other(format!("Database setup error: {}", e)))
        }
    }
}
