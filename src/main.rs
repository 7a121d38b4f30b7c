mod app;
mod auth;
mod board;
mod config;
mod db;
mod error;
mod handlers;
mod response;

use anyhow::Context;
use app::{AppState, build_router};
use auth::google::GoogleClient;
use auth::jwt::JwtManager;
use auth::services::AuthService;
use auth::mailer::build_mailer;
use board::services::BoardService;
use config::Config;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Si RUST_LOG n'est pas défini, utiliser ces règles par défaut
        tracing_subscriber::EnvFilter::new("info,qna_board=debug,hyper_util=warn,tower_http=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// ----------------- Main -----------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    tracing::info!("Starting qna-board...");

    let config = Config::from_env()?;
    if config.environment.is_production() {
        tracing::info!("Serving production traffic");
    }

    let pool = db::connection::create_pool(&config.database_url, config.db_pool_size)?;
    let applied = db::connection::run_migrations(&pool)?;
    tracing::info!(applied, "Database ready");

    let mailer = build_mailer(config.mail.as_ref()).context("Failed to configure mail delivery")?;
    tracing::info!(transport = %mailer.describe(), "Verification mail");

    let jwt_manager = JwtManager::new(&config.jwt_secret, config.jwt_expiration_hours);
    let state = AppState {
        jwt_manager: jwt_manager.clone(),
        auth: Arc::new(AuthService::new(
            pool.clone(),
            jwt_manager,
            mailer,
            config.public_base_url.clone(),
        )),
        board: Arc::new(BoardService::new(pool)),
        google: GoogleClient::new(config.google_userinfo_url.clone())
            .context("Failed to build HTTP client")?,
    };
    let app = build_router(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("🚀 Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
