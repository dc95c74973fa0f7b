pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{refresh_token::RefreshToken, user::User};

pub use postgres::PgStore;

/// Persistence seam for accounts and refresh tokens. Absent rows come back
/// as `None`; the session service decides which domain error that means.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account, returning its assigned id. A taken email is a
    /// `Conflict`, not a generic store error.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<i64, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn save_refresh_token(&self, user_id: i64, token: &str) -> Result<(), AppError>;

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError>;
}
