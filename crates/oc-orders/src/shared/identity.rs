//! Caller Identity
//!
//! Extracts the raw bearer token from the `Authorization` header. The
//! token is not verified here: this service forwards the caller's
//! credentials opaquely inside published envelopes, it does not
//! authenticate requests. Identity is resolved once, at request time, and
//! threaded as a value into event creation.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// The caller's bearer token, when one was presented.
#[derive(Debug, Clone, Default)]
pub struct CallerIdentity(pub Option<String>);

impl CallerIdentity {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").filter(|token| !token.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
            .map(String::from);

        Ok(Self(token))
    }
}
