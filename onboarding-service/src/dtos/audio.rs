use crate::models::AudioEntry;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

#[derive(Debug, Deserialize)]
pub struct AudioQuery {
    pub lang: Option<String>,
}

/// Languages are stored lower-cased and trimmed. No whitelist: an unknown
/// language simply misses the lookup.
pub fn normalize_language(language: &str) -> String {
    language.trim().to_lowercase()
}

pub fn parse_audio_query(query: &AudioQuery) -> Result<String, AppError> {
    let language = query
        .lang
        .as_deref()
        .map(normalize_language)
        .unwrap_or_default();

    if language.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Language parameter is required"
        )));
    }

    Ok(language)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioResponse {
    pub language: String,
    pub audio_url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AudioEntry> for AudioResponse {
    fn from(entry: AudioEntry) -> Self {
        Self {
            language: entry.language,
            audio_url: entry.url,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}
