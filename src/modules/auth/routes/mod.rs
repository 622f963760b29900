mod activate;
mod change_password;
mod password_reset;
mod sign_in;
mod sign_out;
mod sign_up;

use crate::types::Context;
use axum::routing::{get, post, Router};
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/sign-up", post(sign_up::handler))
        .route("/sign-in", post(sign_in::handler))
        .route("/sign-out", post(sign_out::handler))
        .route("/activate/:uidb64/:token", get(activate::handler))
        .route("/change-password", post(change_password::handler))
        .nest("/password-reset", password_reset::get_router())
}
