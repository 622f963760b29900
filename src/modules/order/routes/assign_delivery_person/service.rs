use super::types::{request, response};
use crate::{
    modules::{
        delivery_person,
        order::{
            repository,
            service::{can_assign_delivery_person, ensure_restaurant_owner, AccessError},
        },
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let order = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToAssignDeliveryPerson)?
        .ok_or(response::Error::OrderNotFound)?;

    ensure_restaurant_owner(ctx.clone(), &payload.auth.user, &order)
        .await
        .map_err(|err| match err {
            AccessError::Forbidden => response::Error::NotRestaurantOwner,
            AccessError::UnexpectedError => response::Error::FailedToAssignDeliveryPerson,
        })?;

    if !can_assign_delivery_person(&order) {
        return Err(response::Error::OrderNotAssignable);
    }

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToAssignDeliveryPerson
    })?;

    let delivery_person = delivery_person::repository::claim_available(&mut *tx)
        .await
        .map_err(|_| response::Error::FailedToAssignDeliveryPerson)?
        .ok_or(response::Error::NoAvailableDeliveryPerson)?;

    // Returning early rolls the claim back.
    let order =
        repository::set_delivery_person(&mut *tx, order.id.clone(), delivery_person.id.clone())
            .await
            .map_err(|_| response::Error::FailedToAssignDeliveryPerson)?
            .ok_or(response::Error::OrderNotAssignable)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToAssignDeliveryPerson
    })?;

    tracing::info!(
        "Delivery person {} assigned to order {}",
        delivery_person.id,
        order.id
    );

    Ok(response::Success::DeliveryPersonAssigned {
        order,
        delivery_person,
    })
}
