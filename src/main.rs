mod auth;
mod cache;
mod db;
mod error;
mod mail;
mod middleware;
mod routes;
mod state;
mod task;

use auth::auth_service::AuthService;
use auth::user_repository::UserRepository;
use cache::TokenStore;
use mail::SmtpMailer;
use routes::create_router;
use state::{AppState, Config};
use std::sync::Arc;
use task::task_repository::TaskRepository;
use task::task_service::TaskService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todo_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    // All three collaborators are constructed once here and injected; no
    // lazily initialized globals.
    tracing::info!("Connecting to document store...");
    let db = db::connect(&config.mongo_url, &config.mongo_db_name).await?;

    tracing::info!("Connecting to token registry...");
    let redis_conn = cache::connect(&config.redis_url).await?;
    let token_store = TokenStore::new(redis_conn);

    let mailer: Arc<dyn mail::Mailer> = Arc::new(SmtpMailer::from_config(&config)?);

    // Repositories
    let user_repository = UserRepository::new(db.clone());
    let task_repository = TaskRepository::new(db.clone());

    // Services
    let auth_service = AuthService::new(
        user_repository,
        token_store.clone(),
        mailer.clone(),
        config.jwt_secret.clone(),
        config.public_base_url.clone(),
    );
    let task_service = TaskService::new(task_repository, mailer);

    let state = AppState {
        config: config.clone(),
        token_store,
        auth_service,
        task_service,
    };

    let app = create_router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8888".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
