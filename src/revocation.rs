use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

use crate::errors::AppError;

/// Each call gets one bounded round trip; a hung backend surfaces as a
/// store error instead of stalling the request.
const CALL_TIMEOUT: Duration = Duration::from_secs(5);

const REVOKED: &str = "revoked";

/// Tracks token strings that must be treated as invalid until their own
/// expiry. An entry's lifetime equals the remaining token lifetime, so the
/// ledger only ever holds currently-live revoked tokens; absence after the
/// TTL reads as "not revoked".
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    async fn revoke(&self, token: &str, ttl_seconds: i64) -> Result<(), AppError>;
    async fn is_revoked(&self, token: &str) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct RedisLedger {
    conn: ConnectionManager,
}

impl RedisLedger {
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl RevocationLedger for RedisLedger {
    async fn revoke(&self, token: &str, ttl_seconds: i64) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let ttl = ttl_seconds.max(0) as u64;
        tokio::time::timeout(CALL_TIMEOUT, conn.set_ex::<_, _, ()>(token, REVOKED, ttl))
            .await
            .map_err(|_| AppError::Db("revocation ledger timeout".into()))??;
        tracing::debug!(ttl_seconds = ttl, "token revoked");
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        let exists = tokio::time::timeout(CALL_TIMEOUT, conn.exists::<_, bool>(token))
            .await
            .map_err(|_| AppError::Db("revocation ledger timeout".into()))??;
        Ok(exists)
    }
}
