use crate::models::{OnboardingProfile, PersonalDetails};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

pub const PROFILE_CREATED_MESSAGE: &str = "Onboarding profile created successfully";

/// Body of `POST /api/onboarding`. Server-owned fields (`createdAt`,
/// `updatedAt`, `_id`) are not part of the input and are ignored if sent.
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingInput {
    pub theme: String,
    #[serde(rename = "personalDetails")]
    pub personal_details: PersonalDetailsInput,
    #[serde(rename = "referralSource")]
    pub referral_source: String,
    pub persona: String,
    #[serde(rename = "pricingPlan")]
    pub pricing_plan: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PersonalDetailsInput {
    pub name: String,
    /// Kept as raw JSON so a non-integer age is reported as a field error.
    #[validate(custom(function = "validate_integer"))]
    pub age: serde_json::Value,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
}

/// Whole-valued JSON numbers (`30` or `30.0`) that fit in an `i64`.
fn integer_value(value: &serde_json::Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn validate_integer(value: &serde_json::Value) -> Result<(), ValidationError> {
    if integer_value(value).is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("integer");
    error.message = Some(Cow::Borrowed("Age must be an integer"));
    Err(error)
}

/// Validates the submission and converts it into a profile ready to persist.
pub fn parse_onboarding_input(input: OnboardingInput) -> Result<OnboardingProfile, AppError> {
    input
        .personal_details
        .validate()
        .map_err(personal_details_errors)?;

    let OnboardingInput {
        theme,
        personal_details,
        referral_source,
        persona,
        pricing_plan,
    } = input;

    let age = integer_value(&personal_details.age).ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!("personalDetails.age must be an integer"))
    })?;

    Ok(OnboardingProfile {
        theme,
        personal_details: PersonalDetails {
            name: personal_details.name,
            age,
            email: personal_details.email,
        },
        referral_source,
        persona,
        pricing_plan,
    })
}

/// Re-keys field errors under the `personalDetails.` path the client sent.
fn personal_details_errors(errors: ValidationErrors) -> AppError {
    let mut keyed = ValidationErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let path = match &*field {
            "age" => "personalDetails.age",
            "email" => "personalDetails.email",
            "name" => "personalDetails.name",
            _ => "personalDetails",
        };
        for error in field_errors {
            keyed.add(path, error.clone());
        }
    }
    AppError::ValidationError(keyed)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub message: String,
    pub user_id: String,
    pub status: String,
}

impl OnboardingResponse {
    pub fn created(id: &ObjectId) -> Self {
        Self {
            message: PROFILE_CREATED_MESSAGE.to_string(),
            user_id: id_to_string(id),
            status: "success".to_string(),
        }
    }
}

pub fn id_to_string(id: &ObjectId) -> String {
    id.to_hex()
}

/// Parses the external 24-hex-digit form of a profile id.
pub fn parse_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid user ID format")))
}

/// Renders a stored profile as JSON with `_id` re-encoded as its hex string.
pub fn profile_to_json(mut document: Document) -> Result<serde_json::Value, AppError> {
    let id = document.get_object_id("_id").map_err(|e| {
        AppError::MappingError(anyhow::anyhow!("onboarding profile has no ObjectId: {}", e))
    })?;
    document.insert("_id", id_to_string(&id));
    Ok(Bson::Document(document).into_relaxed_extjson())
}
