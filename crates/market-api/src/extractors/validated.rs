//! JSON bodies checked with `validator` before the handler sees them

use std::error::Error as _;

use axum::{
    async_trait,
    extract::{
        rejection::{JsonDataError, JsonRejection},
        FromRequest, Request,
    },
    Json,
};
use market_service::ServiceError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// `Json<T>` followed by `T::validate`
///
/// Malformed JSON becomes `INVALID_BODY`. A field whose value cannot be
/// converted (an unknown choice, a wrong type) and rule violations become a
/// `VALIDATION_ERROR` with per-field messages.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => field_rejection(&err)
                .unwrap_or_else(|| ApiError::invalid_body(err.body_text())),
            other => ApiError::invalid_body(other.body_text()),
        }
    }
}

type PathError = serde_path_to_error::Error<serde_json::Error>;

/// Attribute a data error to the field it occurred in
///
/// Errors at the document root (missing fields, a non-object body) have no
/// field to report against and stay `INVALID_BODY`.
fn field_rejection(err: &JsonDataError) -> Option<ApiError> {
    let located = std::iter::successors(err.source(), |&e| e.source())
        .find_map(|e| e.downcast_ref::<PathError>())?;

    let field = located.path().to_string();
    if field == "." {
        return None;
    }

    let inner = located.inner();
    let message = inner.to_string();
    let position = format!(" at line {} column {}", inner.line(), inner.column());
    let message = message.strip_suffix(&position).unwrap_or(&message);

    Some(ServiceError::field(&field, message).into())
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
