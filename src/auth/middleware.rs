//! Request authentication filter and authorization middleware.
//!
//! The filter reconstructs an identity from a bearer token and attaches it
//! to the request as an explicit, request-scoped value; the authorization
//! middleware then checks that identity against the access policy. The
//! filter itself never rejects a request: absence of a valid token just
//! means the request proceeds anonymous, and the policy decides.

use crate::{
    auth::{jwt::JwtService, policy::AccessPolicy},
    error::AppError,
    models::user::Role,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated identity, carried in request extensions from the filter to
/// the policy check and the handlers. Role is normalized exactly once, here.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

// Allow handlers to take AuthContext as an extractor
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Extract the bearer token from the Authorization header, if present and
/// well-formed.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

/// Authentication filter. Runs once per request, before authorization.
/// Invalid or expired tokens are logged and ignored; the request always
/// continues. Never overwrites an identity that is already installed.
pub async fn authenticate(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Response {
    let validated = match extract_token(req.headers()) {
        Some(token) => match jwt_service.validate(token) {
            Ok(claims) => Some(claims),
            Err(_) => {
                tracing::warn!(uri = %req.uri().path(), "Bearer token rejected");
                None
            }
        },
        None => None,
    };

    if let Some(claims) = validated {
        if req.extensions().get::<AuthContext>().is_none() {
            match claims.sub.parse::<i64>() {
                Ok(user_id) => {
                    let context = AuthContext {
                        user_id,
                        name: claims.name,
                        email: claims.email,
                        role: Role::normalize(Some(&claims.role)),
                    };
                    req.extensions_mut().insert(context);
                }
                Err(_) => {
                    tracing::warn!(sub = %claims.sub, "Token subject is not a user id");
                }
            }
        }
    }

    next.run(req).await
}

/// Authorization middleware. Consults the policy table with whatever
/// identity the filter installed; rejects before the handler runs.
pub async fn authorize(
    State(policy): State<Arc<AccessPolicy>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = req.extensions().get::<AuthContext>();
    policy.check(req.method(), req.uri().path(), identity)?;

    Ok(next.run(req).await)
}
