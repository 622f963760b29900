use super::types::{request, response};
use crate::{
    modules::{
        menu_item::{self, repository::MenuItem},
        order::{
            repository,
            service::{compute_total, Line},
        },
        payment, restaurant,
        user::repository::is_customer,
    },
    types::Context,
};
use std::{collections::HashMap, sync::Arc};
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let user = payload.auth.user;

    if !is_customer(&user) {
        return Err(response::Error::OnlyCustomersCanOrder);
    }

    let delivery_address = user
        .address
        .clone()
        .filter(|address| !address.trim().is_empty())
        .ok_or(response::Error::MissingDeliveryAddress)?;

    let restaurant =
        restaurant::repository::find_by_id(&ctx.db_conn.pool, payload.restaurant_id.clone())
            .await
            .map_err(|_| response::Error::FailedToPlaceOrder)?
            .ok_or(response::Error::RestaurantNotFound)?;

    let requested_ids = payload
        .body
        .items
        .iter()
        .map(|item| item.item_id.clone())
        .collect::<Vec<_>>();

    let menu = menu_item::repository::find_many_by_ids_in_restaurant(
        &ctx.db_conn.pool,
        restaurant.id.clone(),
        requested_ids,
    )
    .await
    .map_err(|_| response::Error::FailedToPlaceOrder)?
    .into_iter()
    .map(|item| (item.id.clone(), item))
    .collect::<HashMap<String, MenuItem>>();

    let mut menu_item_ids = Vec::with_capacity(payload.body.items.len());
    let mut lines = Vec::with_capacity(payload.body.items.len());
    for item in payload.body.items {
        let menu_item = menu
            .get(&item.item_id)
            .ok_or_else(|| response::Error::MenuItemNotFound(item.item_id.clone()))?;

        if !menu_item.availability {
            return Err(response::Error::MenuItemUnavailable(menu_item.name.clone()));
        }

        menu_item_ids.push(menu_item.id.clone());
        lines.push(Line {
            price: menu_item.price.clone(),
            quantity: item.quantity,
        });
    }

    let total_amount = compute_total(&lines);

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToPlaceOrder
    })?;

    let order = repository::create(
        &mut *tx,
        repository::CreateOrderPayload {
            user_id: user.id.clone(),
            restaurant_id: restaurant.id.clone(),
            delivery_address,
            total_amount: total_amount.clone(),
        },
    )
    .await
    .map_err(|_| response::Error::FailedToPlaceOrder)?;

    for (menu_item_id, line) in menu_item_ids.into_iter().zip(lines) {
        repository::create_item(
            &mut *tx,
            repository::CreateOrderItemPayload {
                order_id: order.id.clone(),
                menu_item_id,
                quantity: line.quantity,
                price: line.price,
            },
        )
        .await
        .map_err(|_| response::Error::FailedToPlaceOrder)?;
    }

    payment::repository::create_pending(&mut *tx, order.id.clone(), total_amount.clone())
        .await
        .map_err(|_| response::Error::FailedToPlaceOrder)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToPlaceOrder
    })?;

    tracing::info!(
        "Order {} placed by {} at restaurant {}",
        order.id,
        user.id,
        restaurant.id
    );

    Ok(response::Success::OrderPlaced {
        user_id: user.id,
        restaurant_id: restaurant.id,
        order_id: order.id,
        total_amount,
    })
}
