//! Path parameter extractors
//!
//! Type-safe extraction of numeric resource ids from path parameters.

use std::str::FromStr;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::response::ApiError;

/// A single typed id taken from the path, e.g. `ProductId` from
/// `/api/product/{id}/`
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: FromStr + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        raw.parse::<T>()
            .map(IdPath)
            .map_err(|_| ApiError::invalid_path(format!("\"{raw}\" is not a valid id")))
    }
}
