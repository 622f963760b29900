mod create;
mod get;
mod list;
mod menu;
mod rate;

use crate::types::Context;
use axum::routing::{get, post, Router};
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route("/:id", get(get::handler))
        .route("/:id/menu", get(menu::handler))
        .route("/:id/rating", post(rate::handler))
}
