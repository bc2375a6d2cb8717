use std::sync::Arc;

use chrono_tz::Tz;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "dealerbook={level},server={level},store={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let timezone: Tz = settings
        .app
        .timezone
        .parse()
        .map_err(|err| format!("invalid timezone {:?}: {err}", settings.app.timezone))?;

    tracing::info!(
        data_dir = %settings.store.data_dir,
        %timezone,
        "opening dealership books"
    );
    let books = store::JsonStore::new(&settings.store.data_dir);
    let state = server::ServerState::new(Arc::new(books), timezone);

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(state, listener).await?;

    Ok(())
}
