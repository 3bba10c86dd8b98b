use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use dotenvy::dotenv;
use tracing::info;

use service::bookings::mongo::MongoBookingRepository;
use service::bookings::service::BookingService;
use service::catalog::mongo::MongoCatalogRepository;
use service::catalog::service::CatalogService;
use service::token::TokenCodec;

use crate::routes;
use crate::state::AppState;

/// Initialize logging via shared common utils; `LOG_FORMAT=json` switches
/// to structured output.
fn init_logging() {
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => init_logging_json(),
        _ => init_logging_default(),
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()?;

    let db = store::db::connect(&cfg.database).await?;
    let collections = store::db::Collections::new(&db);

    let catalog =
        CatalogService::new(Arc::new(MongoCatalogRepository::new(collections.services)));
    let bookings =
        BookingService::new(Arc::new(MongoBookingRepository::new(collections.bookings)));
    let tokens = TokenCodec::new(cfg.auth.token_secret.clone());
    let state = AppState { catalog, bookings, tokens };

    let cors = routes::build_cors(&cfg.cors)?;
    let app: Router = routes::build_router(cors, state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, origin = %cfg.cors.allowed_origin, "starting booking api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
