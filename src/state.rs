use crate::auth::auth_service::AuthService;
use crate::cache::TokenStore;
use crate::task::task_service::TaskService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub token_store: TokenStore,
    pub auth_service: AuthService,
    pub task_service: TaskService,
}

#[derive(Clone)]
pub struct Config {
    pub mongo_url: String,
    pub mongo_db_name: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_use_tls: bool,
    pub smtp_from: String,
    /// Base URL embedded in password reset links.
    pub public_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_url: std::env::var("MONGODB_URL")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: std::env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "todo_db".to_string()),
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .expect("SMTP_PORT must be a number"),
            smtp_username: std::env::var("SMTP_USERNAME").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            smtp_use_tls: std::env::var("SMTP_USE_TLS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            smtp_from: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "noreply@localhost".to_string()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8888".to_string()),
        }
    }
}
