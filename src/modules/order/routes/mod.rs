mod assign_delivery_person;
mod confirm;
mod deliver;
mod get;
mod history;
mod place;
mod start_preparing;
mod status;

use crate::types::Context;
use axum::routing::{get, post, put, Router};
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(history::handler))
        .route("/restaurant/:restaurant_id", post(place::handler))
        .route("/:id", get(get::handler))
        .route("/:id/status", get(status::handler))
        .route("/:id/confirmation", put(confirm::handler))
        .route("/:id/preparing", put(start_preparing::handler))
        .route(
            "/:id/delivery-person",
            post(assign_delivery_person::handler),
        )
        .route("/:id/delivered", put(deliver::handler))
}
