use anyhow::Context as _;
use chrono::Duration;
use sea_orm::Database;
use tracing::info;

use mol_api::config::ApiConfig;
use mol_api::domain::types::Recipient;
use mol_api::infra::mail::HttpNotifier;
use mol_api::router::build_router;
use mol_api::state::AppState;
use mol_api::usecase::password::PasswordHasher;
use mol_core::config::Config;
use mol_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ApiConfig::from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
        portal_base: config.portal_base().to_owned(),
        hasher: PasswordHasher::new(config.password_hash_iterations),
        notifier: HttpNotifier::new(&config.smtp_send_mail_url, &config.smtp_api_key),
        contact_recipient: Recipient {
            name: config.contact_name.clone(),
            email: config.contact_email.clone(),
        },
        access_token_ttl: Duration::minutes(config.access_token_ttl_minutes),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("mol api listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
