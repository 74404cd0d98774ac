pub mod audio;
pub mod profile;

pub use audio::AudioEntry;
pub use profile::{OnboardingProfile, PersonalDetails};
