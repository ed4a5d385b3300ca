use std::sync::Arc;
use std::time::Duration;

use journal_service::config::Config;
use journal_service::domain::auth::service::AuthService;
use journal_service::inbound::http::router::create_router;
use journal_service::outbound::repositories::PostgresUserRepository;
use journal_service::outbound::security::Argon2PasswordHasher;
use journal_service::outbound::security::GoogleIdentityValidator;
use journal_service::outbound::security::JwtTokenCodec;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_DB_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "journal_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "journal-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        google_tokeninfo_url = %config.google.tokeninfo_url,
        call_timeout_secs = config.auth.call_timeout_secs,
        "Configuration loaded"
    );

    // An empty signing key is refused here, before anything is served
    let token_codec = Arc::new(JwtTokenCodec::new(config.jwt.secret.as_bytes())?);
    let identity_validator = Arc::new(GoogleIdentityValidator::new(
        &config.google.tokeninfo_url,
        Duration::from_secs(config.google.timeout_secs),
    )?);

    let pg_pool = PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = MAX_DB_CONNECTIONS,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        password_hasher,
        Arc::clone(&token_codec),
        identity_validator,
        config.auth_config(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, token_codec);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
