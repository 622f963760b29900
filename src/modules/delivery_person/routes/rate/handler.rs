use crate::{
    modules::{
        auth::middleware::Auth,
        review::{self, rate::types::request, repository::TargetType},
    },
    types::Context,
    utils::json::Json,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    auth: Auth,
    Path(id): Path<String>,
    Json(body): Json<request::Body>,
) -> impl IntoResponse {
    review::rate::service(
        ctx,
        request::Payload {
            target_type: TargetType::DeliveryPerson,
            target_id: id,
            body,
            auth,
        },
    )
    .await
}
