use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use mc_api::app::configure_app;
use mc_api::config::Config;
use mc_api::middleware::{create_cors, TokenVerifier};
use mc_api::routes::auth::AppState;
use mc_api::telemetry::init_tracing;
use mc_core::services::{AuthService, TokenService, TokenServiceConfig};
use mc_infra::{BcryptPasswordHasher, DatabasePool, MySqlTokenRepository, MySqlUserRepository};

type UserRepo = MySqlUserRepository;
type TokenRepo = MySqlTokenRepository;
type Hasher = BcryptPasswordHasher;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&config.logging);

    config.validate().map_err(anyhow::Error::msg)?;
    if config.jwt.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the development signing key");
    }

    tracing::info!(environment = %config.environment, "Starting MiniCommerce API");

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the database")?;
    database
        .run_migrations()
        .await
        .context("failed to run database migrations")?;
    anyhow::ensure!(
        database.health_check().await?,
        "database health check returned an unexpected result"
    );
    tracing::info!(stats = %database.get_statistics(), "Database ready");

    let pool = database.get_pool().clone();
    let user_repository = Arc::new(UserRepo::new(pool.clone()));
    let token_service = Arc::new(
        TokenService::new(
            TokenRepo::new(pool),
            TokenServiceConfig::from(&config.jwt),
        )
        .context("failed to initialise the token service")?,
    );
    let password_hasher = Arc::new(Hasher::new(config.bcrypt_cost));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::clone(&token_service),
        password_hasher,
    ));

    let state = web::Data::new(AppState::new(auth_service, config.environment));
    let verifier: Arc<dyn TokenVerifier> = token_service;
    let verifier = web::Data::new(verifier);

    let bind_address = config.server.bind_address();
    let cors_config = config.server.cors.clone();
    tracing::info!(address = %bind_address, "HTTP server listening");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(create_cors(&cors_config))
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .app_data(verifier.clone())
            .configure(configure_app::<UserRepo, TokenRepo, Hasher>)
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
