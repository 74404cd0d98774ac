use mongodb::bson::{Bson, Document};
use service_core::error::AppError;

/// Playback URL for one language, as stored in `audio_urls`.
///
/// Entries are written by an external process; this service only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioEntry {
    pub language: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<Document> for AudioEntry {
    type Error = AppError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        Ok(Self {
            language: required_str(&doc, "language")?,
            url: required_str(&doc, "url")?,
            created_at: timestamp_or_empty(&doc, "createdAt"),
            updated_at: timestamp_or_empty(&doc, "updatedAt"),
        })
    }
}

fn required_str(doc: &Document, key: &str) -> Result<String, AppError> {
    doc.get_str(key).map(str::to_string).map_err(|e| {
        AppError::MappingError(anyhow::anyhow!(
            "audio_urls document is missing string field '{}': {}",
            key,
            e
        ))
    })
}

// Timestamps written by the seeding tool are strings; entries created through
// an ODM carry BSON datetimes instead.
fn timestamp_or_empty(doc: &Document, key: &str) -> String {
    match doc.get(key) {
        Some(Bson::String(s)) => s.clone(),
        Some(Bson::DateTime(dt)) => dt.try_to_rfc3339_string().unwrap_or_default(),
        _ => String::new(),
    }
}
