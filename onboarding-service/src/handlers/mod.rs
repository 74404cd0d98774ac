pub mod audio;
pub mod health;
pub mod onboarding;

pub use audio::get_audio_url;
pub use health::{health_check, metrics_endpoint, readiness_check, root, route_not_found};
pub use onboarding::{create_onboarding_profile, get_onboarding_profile};

use service_core::error::AppError;

use crate::services::DocumentStore;

/// Resource handlers refuse to run against a disconnected store.
pub(crate) fn require_connected(store: &dyn DocumentStore) -> Result<(), AppError> {
    if store.is_connected() {
        Ok(())
    } else {
        tracing::warn!("Document store not connected, rejecting request");
        Err(AppError::ServiceUnavailable)
    }
}
