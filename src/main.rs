//! Marketplace Service Server
//!
//! Binds the HTTP API: loads configuration, connects to PostgreSQL, runs
//! migrations, wires the services together, and serves the router.

use std::sync::Arc;

use dotenv::dotenv;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use marketplace_service::{
    api::{create_routes, AppState},
    config::AppConfig,
    service::{AuthService, EmailService, ImageStore, JwtService, ProductService},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv().ok();
    env_logger::init();

    log::info!(
        "starting marketplace service v{}",
        marketplace_service::VERSION
    );

    let config = AppConfig::from_env()?;
    config.validate()?;

    let database_pool = config.database.create_pool().await?;

    log::info!("running database migrations");
    sqlx::migrate!("./migrations").run(&database_pool).await?;

    // Process-lifetime collaborators, immutable after this point.
    let jwt_service = Arc::new(JwtService::new(config.jwt.secret.clone()));

    let email_service = match &config.email {
        Some(email_config) => {
            let service = EmailService::new(email_config.clone())?;
            log::info!("mail transport configured ({})", email_config.smtp_host);
            Some(Arc::new(service))
        }
        None => {
            log::warn!("mail transport not configured; password-reset emails will fail");
            None
        }
    };

    let image_store = Arc::new(ImageStore::new(&config.images.dir));
    image_store.ensure_dir().await?;

    let auth_service = Arc::new(AuthService::new(
        database_pool.clone(),
        jwt_service.clone(),
        email_service,
    ));
    let product_service = Arc::new(ProductService::new(
        database_pool.clone(),
        image_store.clone(),
    ));

    let state = AppState {
        auth_service,
        product_service,
        jwt_service,
        db_pool: database_pool,
    };

    let app = create_routes(state, &config.images.dir).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .into_inner(),
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
