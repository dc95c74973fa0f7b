use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A renewal capability bound to one user. Rows are only ever inserted;
/// several can be live for the same user at once.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
}
