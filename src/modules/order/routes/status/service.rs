use super::types::{request, response};
use crate::{
    modules::order::{
        repository,
        service::{ensure_can_view, AccessError},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let order = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToFetchOrder)?
        .ok_or(response::Error::OrderNotFound)?;

    ensure_can_view(ctx, &payload.auth.user, &order)
        .await
        .map_err(|err| match err {
            AccessError::Forbidden => response::Error::Forbidden,
            AccessError::UnexpectedError => response::Error::FailedToFetchOrder,
        })?;

    Ok(response::Success::Status {
        order_id: order.id,
        status: order.status,
    })
}
