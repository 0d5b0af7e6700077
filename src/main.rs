use std::sync::Arc;

use futures::StreamExt;
use secrecy::ExposeSecret;

use uni_assist::channels::{Channel, TelegramChannel};
use uni_assist::config::BotConfig;
use uni_assist::dialog::event::{Outgoing, Reply};
use uni_assist::dialog::{Dialog, texts};
use uni_assist::store::{CatalogStore, LibSqlBackend, ProfileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = BotConfig::from_env()?;

    eprintln!("🎓 Uni Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Profile DB: {}", config.profile_db_path.display());
    eprintln!("   Catalog DB: {}", config.catalog_db_path.display());
    eprintln!(
        "   Allowed users: {}",
        if config.allowed_users.iter().any(|u| u == "*") {
            "everyone".to_string()
        } else {
            config.allowed_users.join(", ")
        }
    );

    // ── Stores ──────────────────────────────────────────────────────
    let profiles: Arc<dyn ProfileStore> =
        Arc::new(LibSqlBackend::new_local(&config.profile_db_path).await?);
    let catalog: Arc<dyn CatalogStore> =
        Arc::new(LibSqlBackend::new_local(&config.catalog_db_path).await?);

    let dialog = Dialog::new(profiles, catalog);

    // ── Channel ─────────────────────────────────────────────────────
    let channel = TelegramChannel::new(
        config.bot_token.expose_secret().to_string(),
        config.allowed_users.clone(),
    );
    channel.health_check().await?;
    let mut events = channel.start().await?;

    // One event at a time: the transport delivers a user's updates in
    // order, and that ordering is the only per-user discipline the dialog
    // relies on.
    while let Some(event) = events.next().await {
        match dialog.handle(&event).await {
            Ok(outputs) => {
                for out in outputs {
                    if let Err(e) = channel.respond(&event, out).await {
                        tracing::error!(user_id = %event.user_id, error = %e, "Failed to deliver reply");
                    }
                }
            }
            Err(e) => {
                tracing::error!(user_id = %event.user_id, error = %e, "Event handling failed");
                let fallback = Outgoing::Reply(Reply::new(texts::GENERIC_FAILURE));
                if let Err(e) = channel.respond(&event, fallback).await {
                    tracing::error!(user_id = %event.user_id, error = %e, "Failed to deliver failure notice");
                }
            }
        }
    }

    channel.shutdown().await?;
    Ok(())
}
