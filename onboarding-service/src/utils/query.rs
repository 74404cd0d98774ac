use axum::{
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// `Query<T>` whose rejections (duplicate or mistyped parameters) are
/// reported as [`AppError::BadRequest`] with the JSON error body.
pub struct QueryParams<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| {
                AppError::BadRequest(anyhow::anyhow!("Query parse error: {}", e.body_text()))
            })?;

        Ok(QueryParams(value))
    }
}
