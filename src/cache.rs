use crate::error::Result;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// Registry marker stored against live auth session tokens.
const LIVE_MARKER: &str = "valid";

/// Connect to the key-value store used as the session token registry.
///
/// The `ConnectionManager` reconnects on its own, so a single clone-able
/// handle is shared across the whole process.
pub async fn connect(url: &str) -> redis::RedisResult<ConnectionManager> {
    let client = redis::Client::open(url)?;
    let manager = ConnectionManager::new(client).await?;

    // Verify the connection with a PING before serving traffic.
    let mut conn = manager.clone();
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;

    Ok(manager)
}

/// Session token registry.
///
/// A registry entry and its TTL are the sole source of truth for token
/// liveness: a signed token with no entry here is dead, which is what makes
/// logout and refresh revoke tokens that would otherwise still verify.
#[derive(Clone)]
pub struct TokenStore {
    conn: ConnectionManager,
}

impl TokenStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Mark an auth session token live for `ttl_secs` seconds.
    pub async fn mark_live(&self, token: &str, ttl_secs: u64) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(token, LIVE_MARKER, ttl_secs).await?;
        Ok(())
    }

    /// Store an arbitrary value under a token key (used for password reset
    /// tokens, where the value is the target user's email).
    pub async fn store_value(&self, token: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(token, value, ttl_secs).await?;
        Ok(())
    }

    /// Whether an auth session token is still live.
    pub async fn is_live(&self, token: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(token).await?;
        Ok(value.as_deref() == Some(LIVE_MARKER))
    }

    /// Fetch the value stored under a token key, if any.
    pub async fn value(&self, token: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(token).await?;
        Ok(value)
    }

    /// Delete a token entry. Idempotent; deleting an absent key is not an
    /// error.
    pub async fn invalidate(&self, token: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(token).await?;
        Ok(())
    }
}
