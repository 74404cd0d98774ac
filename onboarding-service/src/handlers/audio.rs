use axum::{extract::State, Json};
use mongodb::bson::doc;
use service_core::error::AppError;

use super::require_connected;
use crate::dtos::{parse_audio_query, AudioQuery, AudioResponse};
use crate::models::AudioEntry;
use crate::services::AUDIO_URLS_COLLECTION;
use crate::startup::AppState;
use crate::utils::QueryParams;

/// `GET /api/audio?lang=<code>`
#[tracing::instrument(skip(state))]
pub async fn get_audio_url(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AudioQuery>,
) -> Result<Json<AudioResponse>, AppError> {
    require_connected(&*state.store)?;
    let language = parse_audio_query(&query)?;

    let document = state
        .store
        .find_one(AUDIO_URLS_COLLECTION, doc! { "language": language.as_str() })
        .await?
        .ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!(
                "Audio URL not found for language: {}",
                query.lang.as_deref().unwrap_or_default().trim()
            ))
        })?;

    let entry = AudioEntry::try_from(document)?;
    tracing::debug!(language = %entry.language, "Audio URL resolved");

    Ok(Json(AudioResponse::from(entry)))
}
