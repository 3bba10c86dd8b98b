use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use serde_json::Value;

use crate::errors::ApiError;
use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

#[derive(Serialize)]
pub struct SuccessOutput {
    pub success: bool,
}

/// Sign the request body as token claims and set the session cookie. No
/// credential check happens here; any claims object mints a valid token.
/// That is the documented client contract, not an oversight to patch.
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(claims): Json<Value>,
) -> Result<(CookieJar, Json<SuccessOutput>), ApiError> {
    let token = state.tokens.issue(&claims)?;
    let mut cookie = Cookie::new(TOKEN_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_max_age(time::Duration::seconds(state.tokens.ttl().num_seconds()));
    Ok((jar.add(cookie), Json(SuccessOutput { success: true })))
}

/// Expire the session cookie. Previously issued tokens stay valid until
/// their natural expiry; there is no server-side revocation.
pub async fn clear_token(jar: CookieJar) -> (CookieJar, Json<SuccessOutput>) {
    let mut removal = Cookie::from(TOKEN_COOKIE);
    removal.set_path("/");
    (jar.remove(removal), Json(SuccessOutput { success: true }))
}
