use std::sync::Arc;

use chatterbox_api::{build_app, config::Config, db, logging, store::SqliteMessageStore, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let pool = db::connect(&config.database_url, config.max_connections).await?;
    db::run_migrations(&pool).await?;

    let store = Arc::new(SqliteMessageStore::new(pool));
    let bind_socket = config.bind_socket()?;
    let state = AppState::new(store, config.expose_store_errors);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
