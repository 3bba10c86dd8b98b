use service::bookings::service::BookingService;
use service::catalog::service::CatalogService;
use service::token::TokenCodec;

/// Shared request context, built once at startup and cloned per handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub bookings: BookingService,
    pub tokens: TokenCodec,
}
