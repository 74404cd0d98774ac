pub mod audio;
pub mod onboarding;

pub use audio::{normalize_language, parse_audio_query, AudioQuery, AudioResponse};
pub use onboarding::{
    id_to_string, parse_id, parse_onboarding_input, profile_to_json, OnboardingInput,
    OnboardingResponse, PersonalDetailsInput,
};
