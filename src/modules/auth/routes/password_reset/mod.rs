mod confirm;
mod request;
mod verify;

use crate::types::Context;
use axum::routing::{get, post, Router};
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", post(request::handler))
        .route(
            "/:uidb64/:token",
            get(verify::handler).post(confirm::handler),
        )
}
