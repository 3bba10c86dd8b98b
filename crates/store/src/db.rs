use configs::DatabaseConfig;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database};
use tracing::info;

pub const SERVICES: &str = "services";
pub const BOOKINGS: &str = "bookings";

/// Connect to the document store and verify the connection with a ping.
/// The Stable API is pinned to V1 so driver upgrades cannot change server
/// behavior underneath us.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Database> {
    let mut options = ClientOptions::parse(cfg.connection_uri()).await?;
    options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
    options.app_name = Some("garage_api".to_string());
    let client = Client::with_options(options)?;
    let db = client.database(&cfg.database);
    db.run_command(doc! { "ping": 1 }).await?;
    info!(database = %cfg.database, "connected to document store");
    Ok(db)
}

/// Handles to the collections this service works with.
#[derive(Clone)]
pub struct Collections {
    pub services: Collection<Document>,
    pub bookings: Collection<Document>,
}

impl Collections {
    pub fn new(db: &Database) -> Self {
        Self {
            services: db.collection(SERVICES),
            bookings: db.collection(BOOKINGS),
        }
    }
}
