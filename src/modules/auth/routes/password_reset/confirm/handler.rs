use super::{service::service, types::request};
use crate::{types::Context, utils::json::Json};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Path((uidb64, token)): Path<(String, String)>,
    Json(body): Json<request::Body>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            uidb64,
            token,
            body,
        },
    )
    .await
}
