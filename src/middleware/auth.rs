use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::TokenService;
use crate::error::ApiError;

/// Authenticated caller identity extracted from a bearer token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Resolves the caller's identity from `Authorization: Bearer <token>`.
///
/// Never rejects: a missing or invalid token leaves the request
/// unauthenticated, and routes that need an identity ask for [`AuthUser`].
/// Runs at most once per request; an already attached identity is kept.
pub async fn authenticate(State(tokens): State<Arc<TokenService>>, mut request: Request, next: Next) -> Response {
    if request.extensions().get::<AuthUser>().is_none() {
        if let Some(user) = identify(&tokens, request.headers()) {
            request.extensions_mut().insert(user);
        }
    }

    next.run(request).await
}

fn identify(tokens: &TokenService, headers: &HeaderMap) -> Option<AuthUser> {
    let token = extract_bearer(headers)?;

    let Ok(claims) = tokens.decode(token) else {
        tracing::debug!("Ignoring invalid bearer token");
        return None;
    };
    let user_id = Uuid::parse_str(&claims.sub).ok()?;
    Some(AuthUser { user_id, email: claims.email })
}

/// Extract JWT token from Authorization header
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let token = headers.get(AUTHORIZATION)?.to_str().ok()?.strip_prefix("Bearer ")?;
    if token.trim().is_empty() {
        None
    } else {
        Some(token)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))
    }
}
