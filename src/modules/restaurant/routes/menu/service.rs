use super::types::{request, response};
use crate::{
    modules::{menu_item, restaurant::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant = repository::find_by_id(&ctx.db_conn.pool, payload.restaurant_id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchMenu)?
        .ok_or(response::Error::RestaurantNotFound)?;

    let items =
        menu_item::repository::find_many_by_restaurant_id(&ctx.db_conn.pool, payload.restaurant_id)
            .await
            .map_err(|_| response::Error::FailedToFetchMenu)?;

    Ok(response::Success::Menu { restaurant, items })
}
