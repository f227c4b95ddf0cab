//! Extractors whose rejections render as `ApiError` bodies.

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use log::debug;
use pokereview_core::EntityId;
use serde::de::DeserializeOwned;

/// Single numeric id from the route.
pub struct IdPath(pub EntityId);

/// JSON request body.
pub struct JsonBody<T>(pub T);

/// Deserialized query string.
pub struct QueryParams<T>(pub T);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<EntityId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!("event=request_rejected module=api part=path uri={}", parts.uri);
                ApiError::from(rejection)
            })?;
        Ok(Self(id))
    }
}

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!("event=request_rejected module=api part=query uri={}", parts.uri);
                ApiError::from(rejection)
            })?;
        Ok(Self(params))
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(
                    "event=request_rejected module=api part=body status={}",
                    rejection.status().as_u16()
                );
                ApiError::from(rejection)
            })?;
        Ok(Self(payload))
    }
}
