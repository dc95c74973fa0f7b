//! Shared test helpers — in-memory stand-ins for the two backing stores,
//! available to all `#[cfg(test)]` modules in the crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::errors::AppError;
use crate::models::{refresh_token::RefreshToken, user::User};
use crate::revocation::RevocationLedger;
use crate::services::session::SessionService;
use crate::store::AccountStore;
use crate::token::TokenCodec;

pub const TEST_SECRET: &str = "test-secret";

/// Account store backed by plain vectors.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    tokens: Mutex<Vec<RefreshToken>>,
    fail_refresh_saves: AtomicBool,
}

impl MemoryStore {
    /// Make every subsequent `save_refresh_token` fail, for exercising the
    /// partial-failure path after credentials were validated.
    pub fn fail_refresh_saves(&self, fail: bool) {
        self.fail_refresh_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<i64, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::Conflict("user already exists".into()));
        }
        let id = users.len() as i64 + 1;
        users.push(User {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        });
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn save_refresh_token(&self, user_id: i64, token: &str) -> Result<(), AppError> {
        if self.fail_refresh_saves.load(Ordering::SeqCst) {
            return Err(AppError::Db("refresh token store is down".into()));
        }
        let mut tokens = self.tokens.lock().unwrap();
        let id = tokens.len() as i64 + 1;
        tokens.push(RefreshToken {
            id,
            user_id,
            token: token.to_string(),
        });
        Ok(())
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        let tokens = self.tokens.lock().unwrap();
        Ok(tokens.iter().find(|t| t.token == token).cloned())
    }
}

/// Revocation ledger as a deadline map: an entry counts as present only
/// until its deadline, reproducing the expiry-as-absence semantics of a
/// store with native per-key TTL.
#[derive(Default)]
pub struct MemoryLedger {
    entries: Mutex<HashMap<String, DateTime<Utc>>>,
}

#[async_trait]
impl RevocationLedger for MemoryLedger {
    async fn revoke(&self, token: &str, ttl_seconds: i64) -> Result<(), AppError> {
        let deadline = Utc::now() + Duration::seconds(ttl_seconds.max(0));
        self.entries
            .lock()
            .unwrap()
            .insert(token.to_string(), deadline);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, AppError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(token).is_some_and(|deadline| *deadline > Utc::now()))
    }
}

pub fn test_store_and_ledger(
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    enforce_refresh_expiry: bool,
) -> (SessionService, Arc<MemoryStore>, Arc<MemoryLedger>) {
    let store = Arc::new(MemoryStore::default());
    let ledger = Arc::new(MemoryLedger::default());
    let svc = SessionService::new(
        store.clone(),
        ledger.clone(),
        TokenCodec::new(TEST_SECRET),
        access_ttl_seconds,
        refresh_ttl_seconds,
        enforce_refresh_expiry,
    );
    (svc, store, ledger)
}

pub fn test_service_with_ttls(
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    enforce_refresh_expiry: bool,
) -> SessionService {
    test_store_and_ledger(access_ttl_seconds, refresh_ttl_seconds, enforce_refresh_expiry).0
}

/// A service over fresh in-memory backends with the production defaults
/// (1 h access, 24 h refresh, no refresh-expiry enforcement).
pub fn test_service() -> SessionService {
    test_service_with_ttls(60 * 60, 24 * 60 * 60, false)
}
