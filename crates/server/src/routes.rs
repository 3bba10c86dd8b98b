pub mod auth;
pub mod bookings;
pub mod catalog;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post};
use axum::Router;
use mongodb::bson::oid::ObjectId;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use crate::errors::ApiError;
use crate::middleware::require_token;
use crate::state::AppState;

pub async fn root() -> &'static str {
    "Car doctor is running"
}

/// Build the full application router. Only the booking listing sits behind
/// the token guard; every other endpoint is public.
pub fn build_router(cors: CorsLayer, state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/jwt", post(auth::issue_token))
        .route("/logout", post(auth::clear_token))
        .route("/services", get(catalog::list_services))
        .route("/services/:id", get(catalog::get_service))
        .route(
            "/bookings",
            post(bookings::create_booking).merge(
                get(bookings::list_bookings)
                    .route_layer(from_fn_with_state(state.clone(), require_token)),
            ),
        )
        .route(
            "/bookings/:id",
            delete(bookings::delete_booking).patch(bookings::update_booking_status),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        .layer(CatchPanicLayer::new())
}

/// Cross-origin policy: exactly one allowed browser origin, with cookies.
pub fn build_cors(cfg: &configs::CorsConfig) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = cfg.allowed_origin.parse()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}

pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest("invalid id".into()))
}
