use std::error::Error;

use tracing::info;

use viewer_helper_backend::{
    config::Config,
    routes,
    services::{catalog::Catalogs, storage::SqliteStorage},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let storage = SqliteStorage::connect(&config.database_url).await?;
    let catalogs = Catalogs::new(&config.catalog);

    let app = routes::app(storage, catalogs).await;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Started server on {}.", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
