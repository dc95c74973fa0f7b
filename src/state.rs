use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppError,
    revocation::RedisLedger,
    services::session::SessionService,
    store::PgStore,
    token::TokenCodec,
};

/// Shared handles for both transport adapters. The session service inside is
/// the single instance every request goes through.
#[derive(Clone)]
pub struct AppState {
    pub service: SessionService,
}

impl AppState {
    pub async fn new(cfg: &Config) -> Result<Self, AppError> {
        let store = PgStore::connect(&cfg.database_url).await?;
        let ledger = RedisLedger::connect(&cfg.redis_url).await?;

        let service = SessionService::new(
            Arc::new(store),
            Arc::new(ledger),
            TokenCodec::new(&cfg.jwt_secret),
            cfg.jwt_access_ttl_seconds,
            cfg.jwt_refresh_ttl_seconds,
            cfg.enforce_refresh_expiry,
        );

        Ok(Self { service })
    }
}
