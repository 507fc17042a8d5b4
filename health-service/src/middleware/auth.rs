use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::AppState;

/// Raw `Authorization` header value of an authenticated request.
///
/// `auth_middleware` stores it in request extensions after verification so
/// handlers can forward it to the person registry unchanged.
#[derive(Debug, Clone)]
pub struct AuthHeader(pub String);

/// Middleware gating every record route: the request must carry
/// `Authorization: Bearer <token>` with a valid, unexpired signature.
/// Handlers never run when this fails.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    let header_value = match header_value {
        Some(value) => value,
        None => {
            return Err(AppError::Unauthorized(anyhow::anyhow!(
                "authorization required"
            )))
        }
    };

    let token = match header_value.strip_prefix("Bearer ") {
        Some(token) => token,
        None => {
            return Err(AppError::Unauthorized(anyhow::anyhow!(
                "authorization required"
            )))
        }
    };

    if let Err(e) = state.jwt.verify(token) {
        tracing::debug!(error = %e, "token verification failed");
        return Err(AppError::Unauthorized(anyhow::anyhow!("invalid token")));
    }

    // The subject is deliberately not inspected: any valid, unexpired token
    // authorizes every operation.
    req.extensions_mut().insert(AuthHeader(header_value));

    Ok(next.run(req).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthHeader
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthHeader>().cloned().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "auth header missing from request extensions"
            ))
        })
    }
}
