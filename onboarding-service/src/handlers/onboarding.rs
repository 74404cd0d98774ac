use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use mongodb::bson::doc;
use service_core::error::AppError;

use super::require_connected;
use crate::dtos::{
    parse_id, parse_onboarding_input, profile_to_json, OnboardingInput, OnboardingResponse,
};
use crate::services::ONBOARDING_PROFILES_COLLECTION;
use crate::startup::AppState;
use crate::utils::JsonBody;

/// `POST /api/onboarding`
#[tracing::instrument(skip(state, input))]
pub async fn create_onboarding_profile(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<OnboardingInput>,
) -> Result<Json<OnboardingResponse>, AppError> {
    require_connected(&*state.store)?;

    // Nothing reaches the store unless the whole submission is valid.
    let profile = parse_onboarding_input(input)?;
    let document = profile.to_document(Utc::now());

    let inserted_id = state
        .store
        .insert_one(ONBOARDING_PROFILES_COLLECTION, document)
        .await?;

    let id = inserted_id.as_object_id().ok_or_else(|| {
        AppError::WriteError(anyhow::anyhow!("Failed to create profile"))
    })?;

    tracing::info!(user_id = %id, "Onboarding profile created");

    Ok(Json(OnboardingResponse::created(&id)))
}

/// `GET /api/onboarding/:user_id`
#[tracing::instrument(skip(state))]
pub async fn get_onboarding_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_connected(&*state.store)?;
    let id = parse_id(&user_id)?;

    let profile = state
        .store
        .find_one(ONBOARDING_PROFILES_COLLECTION, doc! { "_id": id })
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Profile not found")))?;

    Ok(Json(profile_to_json(profile)?))
}
