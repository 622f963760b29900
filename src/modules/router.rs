use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use super::{auth, contact, delivery_person, menu_item, order, restaurant, user};
use crate::types::Context;
use std::sync::Arc;

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "message": "Welcome to Khana API" })),
    )
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(health_check))
        .nest("/auth", auth::get_router())
        .nest("/users", user::get_router())
        .nest("/restaurants", restaurant::get_router())
        .nest("/menu-items", menu_item::get_router())
        .nest("/delivery-persons", delivery_person::get_router())
        .nest("/orders", order::get_router())
        .nest("/contact", contact::get_router())
}
