mod delete;
mod profile;

use crate::types::Context;
use axum::routing::{delete, get, put, Router};
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route(
            "/profile",
            get(profile::get::handler).put(profile::update::handler),
        )
        .route("/profile/picture", put(profile::update_picture::handler))
        .route("/:id", delete(delete::handler))
}
