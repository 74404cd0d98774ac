use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::{doc, Document};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalDetails {
    pub name: String,
    pub age: i64,
    pub email: String,
}

/// A validated onboarding submission, before the server stamps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingProfile {
    pub theme: String,
    pub personal_details: PersonalDetails,
    pub referral_source: String,
    pub persona: String,
    pub pricing_plan: String,
}

impl OnboardingProfile {
    /// Builds the `onboarding_profiles` document. `createdAt` and `updatedAt`
    /// are both set to `now`; `_id` is left for the store to generate.
    pub fn to_document(&self, now: DateTime<Utc>) -> Document {
        let timestamp = format_timestamp(now);
        doc! {
            "theme": self.theme.clone(),
            "personalDetails": {
                "name": self.personal_details.name.clone(),
                "age": self.personal_details.age,
                "email": self.personal_details.email.clone(),
            },
            "referralSource": self.referral_source.clone(),
            "persona": self.persona.clone(),
            "pricingPlan": self.pricing_plan.clone(),
            "createdAt": timestamp.clone(),
            "updatedAt": timestamp,
        }
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
