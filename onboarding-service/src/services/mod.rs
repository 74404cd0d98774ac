pub mod database;
pub mod memory;

pub use database::{
    DocumentStore, MongoGateway, AUDIO_URLS_COLLECTION, ONBOARDING_PROFILES_COLLECTION,
};
pub use memory::InMemoryStore;
