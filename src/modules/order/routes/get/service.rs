use super::types::{request, response};
use crate::{
    modules::{
        order::{
            repository::{self, FullOrder},
            service::{ensure_can_view, AccessError},
        },
        payment,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let order = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToFetchOrder)?
        .ok_or(response::Error::OrderNotFound)?;

    ensure_can_view(ctx.clone(), &payload.auth.user, &order)
        .await
        .map_err(|err| match err {
            AccessError::Forbidden => response::Error::Forbidden,
            AccessError::UnexpectedError => response::Error::FailedToFetchOrder,
        })?;

    let items = repository::find_items_by_order_id(&ctx.db_conn.pool, order.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchOrder)?;

    let payment = payment::repository::find_by_order_id(&ctx.db_conn.pool, order.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchOrder)?;

    Ok(response::Success::Order(FullOrder {
        order,
        items,
        payment,
    }))
}
