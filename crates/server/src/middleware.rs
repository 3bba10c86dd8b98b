use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use crate::errors::ApiError;
use crate::routes::auth::TOKEN_COOKIE;
use crate::state::AppState;

/// Guard for endpoints that need an authenticated caller. Reads the session
/// cookie, verifies it, and attaches the decoded claims to the request for
/// downstream handlers. A missing or bad token short-circuits with 401.
pub async fn require_token(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(cookie) = jar.get(TOKEN_COOKIE) else {
        return Err(ApiError::Unauthorized);
    };
    let claims = state.tokens.verify(cookie.value()).map_err(|e| {
        warn!(path = %req.uri().path(), error = %e, "token verification failed");
        ApiError::Unauthorized
    })?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
