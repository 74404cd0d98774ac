use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    bson::{doc, Bson, Document},
    options::IndexOptions,
    Client as MongoClient, Database, IndexModel,
};
use service_core::error::AppError;
use std::sync::RwLock;

use crate::models::profile::format_timestamp;

pub const AUDIO_URLS_COLLECTION: &str = "audio_urls";
pub const ONBOARDING_PROFILES_COLLECTION: &str = "onboarding_profiles";

/// Document-store operations the handlers depend on.
///
/// Every data operation fails with [`AppError::ServiceUnavailable`] while the
/// store is disconnected.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Opens the connection. Calling it on a connected store is a no-op.
    async fn connect(&self) -> Result<(), AppError>;

    /// Releases the connection. Safe to call when never connected.
    async fn disconnect(&self);

    fn is_connected(&self) -> bool;

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError>;

    /// Inserts `document` and returns the id the store generated for it.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
struct Connection {
    client: MongoClient,
    db: Database,
}

/// MongoDB-backed [`DocumentStore`] owning the process-wide client.
pub struct MongoGateway {
    uri: String,
    database_name: String,
    connection: RwLock<Option<Connection>>,
}

impl MongoGateway {
    pub fn new(uri: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database_name: database_name.into(),
            connection: RwLock::new(None),
        }
    }

    fn database(&self) -> Result<Database, AppError> {
        let guard = self.connection.read().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("MongoDB connection lock poisoned: {}", e))
        })?;
        guard
            .as_ref()
            .map(|conn| conn.db.clone())
            .ok_or(AppError::ServiceUnavailable)
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for onboarding-service");
        let db = self.database()?;

        let language_index = IndexModel::builder()
            .keys(doc! { "language": 1 })
            .options(
                IndexOptions::builder()
                    .name("language_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        db.collection::<Document>(AUDIO_URLS_COLLECTION)
            .create_index(language_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create language index on audio_urls: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on audio_urls.language");

        let email_index = IndexModel::builder()
            .keys(doc! { "personalDetails.email": 1 })
            .options(
                IndexOptions::builder()
                    .name("email_lookup".to_string())
                    .build(),
            )
            .build();

        db.collection::<Document>(ONBOARDING_PROFILES_COLLECTION)
            .create_index(email_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create email index on onboarding_profiles: {}",
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created index on onboarding_profiles.personalDetails.email");

        Ok(())
    }

    /// Inserts `(language, url)` pairs into an empty `audio_urls` collection.
    /// A collection that already holds entries is left untouched.
    pub async fn seed_audio_urls(&self, entries: &[(&str, &str)]) -> Result<usize, AppError> {
        let collection = self.database()?.collection::<Document>(AUDIO_URLS_COLLECTION);

        let existing = collection.count_documents(doc! {}, None).await?;
        if existing > 0 {
            tracing::info!(existing, "audio_urls already populated, skipping seed");
            return Ok(0);
        }

        let timestamp = format_timestamp(Utc::now());
        let docs: Vec<Document> = entries
            .iter()
            .map(|(language, url)| {
                doc! {
                    "language": language.trim().to_lowercase(),
                    "url": url.trim(),
                    "createdAt": timestamp.clone(),
                    "updatedAt": timestamp.clone(),
                }
            })
            .collect();

        if docs.is_empty() {
            return Ok(0);
        }

        let result = collection
            .insert_many(docs, None)
            .await
            .map_err(|e| AppError::WriteError(anyhow::Error::new(e)))?;
        Ok(result.inserted_ids.len())
    }
}

#[async_trait]
impl DocumentStore for MongoGateway {
    async fn connect(&self) -> Result<(), AppError> {
        if self.is_connected() {
            return Ok(());
        }

        tracing::info!(database = %self.database_name, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(&self.uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::ConnectionError(anyhow::Error::new(e))
        })?;
        let db = client.database(&self.database_name);

        // The driver connects lazily; a ping proves the server is reachable.
        db.run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB is unreachable: {}", e);
                AppError::ConnectionError(anyhow::Error::new(e))
            })?;

        let mut guard = self.connection.write().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("MongoDB connection lock poisoned: {}", e))
        })?;
        if guard.is_none() {
            *guard = Some(Connection { client, db });
        }
        tracing::info!(database = %self.database_name, "Successfully connected to MongoDB database");
        Ok(())
    }

    async fn disconnect(&self) {
        let connection = match self.connection.write() {
            Ok(mut guard) => guard.take(),
            Err(e) => {
                tracing::error!("MongoDB connection lock poisoned: {}", e);
                None
            }
        };

        if let Some(conn) = connection {
            conn.client.shutdown().await;
            tracing::info!("Disconnected from MongoDB");
        }
    }

    fn is_connected(&self) -> bool {
        self.connection
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        self.database()?
            .collection::<Document>(collection)
            .find_one(filter, None)
            .await
            .map_err(|e| {
                tracing::error!(collection, "MongoDB find_one failed: {}", e);
                AppError::from(e)
            })
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, AppError> {
        self.database()?
            .collection::<Document>(collection)
            .insert_one(document, None)
            .await
            .map(|result| result.inserted_id)
            .map_err(|e| {
                tracing::error!(collection, "MongoDB insert_one failed: {}", e);
                AppError::WriteError(anyhow::Error::new(e))
            })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.database()?
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
