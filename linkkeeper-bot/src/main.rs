mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use handler_registry::HandlerRegistry;
use linkkeeper_core::init_tracing;
use linkkeeper_store::{LinkStoreClient, LinkStoreHandler, MetadataResolver, SearchClient};
use linkkeeper_telegram::{update_channel, TelegramBotAdapter, TelegramListener};
use tracing::{error, info, warn};

use crate::config::Config;

/// Debounce window for grouping near-simultaneous updates (multi-photo posts).
const FLUSH_INTERVAL: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("failed to load config")?;
    init_tracing(config.log_file.as_deref())?;

    info!("starting app");
    tokio::spawn(serve_health(config.http_port));

    let tg_bot = teloxide::Bot::new(&config.telegram_token);
    let adapter = Arc::new(TelegramBotAdapter::new(tg_bot.clone()));

    let search = match (&config.search_url, &config.search_token) {
        (Some(url), Some(token)) => Some(SearchClient::new(url.clone(), token.clone())),
        _ => {
            warn!("search endpoint not configured, duplicate detection disabled");
            None
        }
    };
    let handler = LinkStoreHandler::new(
        LinkStoreClient::new(config.link_store_url.clone(), config.dry_mode),
        MetadataResolver::new(),
        search,
    );
    let registry = Arc::new(HandlerRegistry::new().register(Arc::new(handler)));

    let listener = TelegramListener::new(
        config.super_users.clone(),
        FLUSH_INTERVAL,
        adapter,
        registry,
    );

    info!(dry_mode = config.dry_mode, "bot is starting");
    let updates = update_channel(tg_bot);
    if let Err(err) = listener.run(updates).await {
        error!(error = %err, "listener terminated");
        return Err(err.into());
    }

    Ok(())
}

async fn serve_health(port: u16) {
    let app = Router::new().route("/health", get(|| async { "UP" }));
    let addr = format!("0.0.0.0:{port}");

    info!(addr = %addr, "starting health check server");
    match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => {
            if let Err(err) = axum::serve(listener, app).await {
                error!(error = %err, "health check server failed");
            }
        }
        Err(err) => error!(error = %err, "failed to bind health check server"),
    }
}
