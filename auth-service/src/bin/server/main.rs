use std::sync::Arc;

use auth::TokenIssuer;
use auth_service::config::Config;
use auth_service::domain::user::authenticator::Authenticator;
use auth_service::domain::user::guard::AccessGuard;
use auth_service::domain::user::ports::AccessGuardPort;
use auth_service::domain::user::ports::AuthenticatorPort;
use auth_service::domain::user::ports::UserRepository;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        cors_origins = ?config.cors.allowed_origins,
        persistent = config.database.url.is_some(),
        "Configuration loaded"
    );

    let issuer = Arc::new(TokenIssuer::with_ttl(
        config.jwt.secret.as_bytes(),
        chrono::Duration::minutes(config.jwt.expiration_minutes),
    ));

    let (authenticator, access_guard) = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_services(Arc::new(PostgresUserRepository::new(pg_pool)), issuer)
        }
        None => {
            tracing::warn!("No database.url configured, users are kept in memory");
            build_services(Arc::new(InMemoryUserRepository::new()), issuer)
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        authenticator,
        access_guard,
        &config.cors.allowed_origins,
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn build_services<UR: UserRepository>(
    repository: Arc<UR>,
    issuer: Arc<TokenIssuer>,
) -> (Arc<dyn AuthenticatorPort>, Arc<dyn AccessGuardPort>) {
    let authenticator = Arc::new(Authenticator::new(
        Arc::clone(&repository),
        Arc::clone(&issuer),
    ));
    let access_guard = Arc::new(AccessGuard::new(repository, issuer));

    (authenticator, access_guard)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
