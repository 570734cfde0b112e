//! Custom Axum extractors
//!
//! Rejections are turned into [`ApiError`] so every 400 has the same body.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use foosball_core::models::validation::check_id;
use foosball_core::models::{PaginationParams, ValidationError};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Extract a non-blank record id from the path
pub struct ValidId(pub String);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        check_id("id", &id)?;
        Ok(Self(id))
    }
}

/// Listing parameters from the query string
pub struct Pagination(pub PaginationParams);

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| ApiError::Malformed {
                message: rejection.body_text(),
            })?;
        Ok(Self(params))
    }
}

/// JSON body whose decoding failures answer 400
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::Malformed {
                message: rejection.body_text(),
            })?;
        Ok(Self(value))
    }
}
