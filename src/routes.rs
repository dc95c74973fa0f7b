use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers::auth as auth_handlers, state::AppState};

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/signup", post(auth_handlers::signup))
        .route("/login", post(auth_handlers::login))
        .route("/refresh", post(auth_handlers::refresh))
        .route("/logout", post(auth_handlers::logout))
        .route("/introspect", post(auth_handlers::introspect))
        .with_state(state)
}
