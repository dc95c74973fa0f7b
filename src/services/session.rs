use std::sync::Arc;

use chrono::Utc;

use crate::errors::AppError;
use crate::password::{hash_password, verify_password};
use crate::revocation::RevocationLedger;
use crate::store::AccountStore;
use crate::token::TokenCodec;

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// The credential lifecycle state machine. Both transport adapters call the
/// same instance, so behavior cannot diverge between protocols. Stateless
/// between calls; all shared mutable state lives in the two backing stores.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn AccountStore>,
    ledger: Arc<dyn RevocationLedger>,
    codec: TokenCodec,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    enforce_refresh_expiry: bool,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        ledger: Arc<dyn RevocationLedger>,
        codec: TokenCodec,
        access_ttl_seconds: i64,
        refresh_ttl_seconds: i64,
        enforce_refresh_expiry: bool,
    ) -> Self {
        Self {
            store,
            ledger,
            codec,
            access_ttl_seconds,
            refresh_ttl_seconds,
            enforce_refresh_expiry,
        }
    }

    /// Create an account. No tokens are issued here.
    pub async fn register(&self, email: &str, password: &str) -> Result<i64, AppError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::Validation("email required".into()));
        }

        let password_hash = hash_password(password)?;
        let id = self.store.create_user(&email, &password_hash).await?;
        tracing::debug!(user_id = id, "user registered");
        Ok(id)
    }

    /// Password login. Absent account and wrong password are indistinguishable
    /// to the caller. On success issues an access/refresh pair and persists
    /// the refresh token.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let email = email.trim().to_lowercase();

        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        // Credentials are confirmed from here on: any failure is a
        // server-side error, never InvalidCredentials.
        let access = self
            .codec
            .issue(user.id, self.access_ttl_seconds)
            .map_err(|e| AppError::Internal(format!("issue access token: {e}")))?;
        let refresh = self
            .codec
            .issue(user.id, self.refresh_ttl_seconds)
            .map_err(|e| AppError::Internal(format!("issue refresh token: {e}")))?;

        self.store
            .save_refresh_token(user.id, &refresh)
            .await
            .map_err(|e| AppError::Internal(format!("persist refresh token: {e}")))?;

        tracing::debug!(user_id = user.id, "session established");
        Ok(TokenPair { access, refresh })
    }

    /// Exchange a stored refresh token for a fresh access token. The refresh
    /// token itself is neither rotated nor invalidated.
    pub async fn renew(&self, refresh_token: &str) -> Result<String, AppError> {
        let rt = self
            .store
            .find_refresh_token(refresh_token)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if self.enforce_refresh_expiry {
            let claims = self
                .codec
                .verify(refresh_token)
                .map_err(|_| AppError::InvalidToken)?;
            if claims.exp <= Utc::now().timestamp() {
                return Err(AppError::InvalidToken);
            }
        }

        let access = self
            .codec
            .issue(rt.user_id, self.access_ttl_seconds)
            .map_err(|e| AppError::Internal(format!("issue access token: {e}")))?;
        tracing::debug!(user_id = rt.user_id, "access token renewed");
        Ok(access)
    }

    /// Blacklist a token string for the access-token lifetime, after which
    /// the token would have expired anyway. Idempotent, and deliberately
    /// indifferent to whether the string is well-formed or already revoked.
    pub async fn revoke(&self, access_token: &str) -> Result<(), AppError> {
        self.ledger
            .revoke(access_token, self.access_ttl_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("revocation ledger: {e}")))?;
        Ok(())
    }

    /// Full acceptance check for an access token: signature verifies, expiry
    /// is in the future, and the string is absent from the revocation
    /// ledger. Returns the owning user id.
    pub async fn authorize(&self, access_token: &str) -> Result<i64, AppError> {
        let claims = self
            .codec
            .verify(access_token)
            .map_err(|_| AppError::InvalidToken)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(AppError::InvalidToken);
        }

        if self.ledger.is_revoked(access_token).await? {
            return Err(AppError::InvalidToken);
        }

        Ok(claims.sub)
    }
}
