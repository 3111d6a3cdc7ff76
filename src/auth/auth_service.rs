use crate::auth::jwt::create_session_token;
use crate::auth::password::{generate_password, hash_password, verify_password};
use crate::auth::user_repository::UserRepository;
use crate::cache::TokenStore;
use crate::error::{AppError, Result};
use crate::mail::Mailer;
use std::sync::Arc;
use uuid::Uuid;

/// Registry TTL for live session tokens, matching the signed token's expiry.
const SESSION_TTL_SECS: u64 = 3600;

/// Registry TTL for password reset tokens.
const RESET_TOKEN_TTL_SECS: u64 = 900;

/// Owns registration, login, logout, password reset and token refresh.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    token_store: TokenStore,
    mailer: Arc<dyn Mailer>,
    jwt_secret: String,
    public_base_url: String,
}

impl AuthService {
    pub fn new(
        users: UserRepository,
        token_store: TokenStore,
        mailer: Arc<dyn Mailer>,
        jwt_secret: String,
        public_base_url: String,
    ) -> Self {
        Self {
            users,
            token_store,
            mailer,
            jwt_secret,
            public_base_url,
        }
    }

    /// Register a new user and mail them a generated password.
    ///
    /// The mail goes out before the record is persisted, so an insert failure
    /// leaves a mailed password with no account behind it. The inconsistency
    /// is accepted; the next registration attempt simply mails a new password.
    pub async fn register(&self, email: &str) -> Result<()> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::BadRequest("User already exists".to_string()));
        }

        let raw_password = generate_password();
        let password_hash = hash_password(&raw_password)?;

        self.mailer
            .send(
                email,
                "Your To-Do App Password",
                &format!("Welcome!\nYour password: {}", raw_password),
            )
            .await?;

        self.users.insert(email, &password_hash).await?;

        tracing::info!(email, "user registered");
        Ok(())
    }

    /// Check credentials and issue a live session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("User not found".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        let token = create_session_token(email, &self.jwt_secret)?;
        self.token_store.mark_live(&token, SESSION_TTL_SECS).await?;

        Ok(token)
    }

    /// Drop the registry marker for a token. Idempotent.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.token_store.invalidate(token).await
    }

    /// Exchange a live token for a fresh one.
    ///
    /// The new marker is stored before the old one is deleted, so the two
    /// tokens briefly overlap; the two registry calls are not atomic.
    pub async fn refresh(&self, old_token: &str) -> Result<String> {
        if !self.token_store.is_live(old_token).await? {
            return Err(AppError::Authentication(
                "Token is invalid or expired".to_string(),
            ));
        }

        let claims = crate::auth::jwt::verify_jwt(old_token, &self.jwt_secret)?;

        let new_token = create_session_token(&claims.email, &self.jwt_secret)?;
        self.token_store
            .mark_live(&new_token, SESSION_TTL_SECS)
            .await?;
        self.token_store.invalidate(old_token).await?;

        Ok(new_token)
    }

    /// Store a one-time reset token and mail the reset link.
    pub async fn initiate_password_reset(&self, email: &str) -> Result<()> {
        if self.users.find_by_email(email).await?.is_none() {
            return Err(AppError::BadRequest("User not found".to_string()));
        }

        let token = Uuid::new_v4().to_string();
        self.token_store
            .store_value(&token, email, RESET_TOKEN_TTL_SECS)
            .await?;

        self.mailer
            .send(
                email,
                "Password Reset Link",
                &format!(
                    "Click the link to reset your password:\n{}",
                    reset_link(&self.public_base_url, &token)
                ),
            )
            .await?;

        Ok(())
    }

    /// Consume a reset token and set the new password.
    ///
    /// Live sessions for the user are not revoked here; only the reset token
    /// itself is deleted.
    pub async fn complete_password_reset(&self, token: &str, new_password: &str) -> Result<()> {
        let email = self
            .token_store
            .value(token)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid or expired token".to_string()))?;

        let password_hash = hash_password(new_password)?;
        self.users
            .update_password_hash(&email, &password_hash)
            .await?;
        self.token_store.invalidate(token).await?;

        tracing::info!(email, "password reset completed");
        Ok(())
    }
}

fn reset_link(base_url: &str, token: &str) -> String {
    format!("{}/api/reset-password?token={}", base_url, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_link_format() {
        assert_eq!(
            reset_link("http://localhost:8888", "abc-123"),
            "http://localhost:8888/api/reset-password?token=abc-123"
        );
    }

    #[test]
    fn test_session_ttl_matches_token_expiry() {
        assert_eq!(
            SESSION_TTL_SECS as i64,
            crate::auth::jwt::SESSION_TOKEN_MINUTES * 60
        );
    }
}
