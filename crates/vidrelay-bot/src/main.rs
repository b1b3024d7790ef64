//! Vidrelay: Telegram channel-video relay bot.
//!
//! Wires the storage, gate, and delivery layers to a teloxide dispatcher
//! and an axum status surface. With `WEBHOOK_DOMAIN` set the bot receives
//! updates over HTTPS on the shared listener; otherwise it long-polls and
//! serves only the status endpoints.

use std::sync::Arc;

use teloxide::dispatching::Dispatcher;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::update_listeners::webhooks;
use teloxide::{dptree, Bot};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidrelay_bot::config::BotConfig;
use vidrelay_bot::http::{self, HttpState};
use vidrelay_bot::transport::TelegramTransport;
use vidrelay_bot::handlers;
use vidrelay_delivery::{DeliveryConfig, DeliveryService};
use vidrelay_gate::{ChannelGate, GateConfig};
use vidrelay_store::open_store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vidrelay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting vidrelay");

    // Configuration errors are the only fatal failure class.
    let config = Arc::new(BotConfig::from_env()?);
    tracing::info!(
        source_channel = %config.source_channel,
        required_channel = %config.required_channel,
        listen_addr = %config.listen_addr,
        webhook = config.webhook_domain.is_some(),
        durable = config.data_dir.is_some(),
        "configuration loaded"
    );

    // Storage mode is decided here, once, for the process lifetime.
    let store = open_store(config.data_dir.as_deref());

    let bot = Bot::new(&config.bot_token);

    let gate = Arc::new(ChannelGate::new(
        bot.clone(),
        GateConfig {
            channel_handle: config.required_channel.clone(),
        },
    ));
    let transport = Arc::new(TelegramTransport::new(bot.clone(), config.source_channel));
    let service = Arc::new(DeliveryService::new(
        store.clone(),
        gate,
        transport,
        DeliveryConfig {
            source_channel: config.source_channel,
        },
    ));

    let status_router = http::router(HttpState { store });

    let mut dispatcher = Dispatcher::builder(bot.clone(), handlers::schema())
        .dependencies(dptree::deps![service, Arc::clone(&config)])
        .default_handler(|update| async move {
            tracing::trace!(update_id = update.id.0, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "an error occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build();

    if let Some(webhook_url) = config.webhook_url() {
        tracing::info!(url = %webhook_url, "registering webhook");

        let options = webhooks::Options::new(config.listen_addr, webhook_url.parse()?);
        let (listener, stop_flag, webhook_router) =
            webhooks::axum_to_router(bot, options).await?;

        let app = webhook_router.merge(status_router);
        let tcp = tokio::net::TcpListener::bind(config.listen_addr).await?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(tcp, app)
                .with_graceful_shutdown(stop_flag)
                .await
            {
                tracing::error!(error = %e, "HTTP server terminated");
            }
        });

        dispatcher
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("an error from the update listener"),
            )
            .await;
    } else {
        tracing::info!("no webhook domain configured, starting long polling");

        let tcp = tokio::net::TcpListener::bind(config.listen_addr).await?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(tcp, status_router).await {
                tracing::error!(error = %e, "HTTP server terminated");
            }
        });

        dispatcher.dispatch().await;
    }

    tracing::info!("vidrelay stopped");
    Ok(())
}
