//! Acting-user extraction for audit fields
//!
//! Authentication lives in front of this service; the upstream gateway
//! forwards the acting admin/super-vendor user as an opaque id in the
//! `X-Actor-Id` header. The core only records it in `created_by` audit
//! columns.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use uuid::Uuid;

/// The acting user's opaque id, if the gateway supplied one
#[derive(Clone, Copy, Debug)]
pub struct CurrentActor(pub Option<Uuid>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts
            .headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok());
        Ok(CurrentActor(actor))
    }
}
