use super::types::{request, response};
use crate::{
    modules::{
        delivery_person,
        user::repository::{self, UserType},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = payload.auth.user;

    if user.id != payload.id {
        return Err(response::Error::CannotDeleteAnotherUser);
    }

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToDeleteUser
    })?;

    repository::soft_delete_by_id(&mut *tx, user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToDeleteUser)?;

    match user.user_type {
        UserType::Customer => {
            repository::soft_delete_customer_detail(&mut *tx, user.id.clone()).await
        }
        UserType::RestaurantOwner => {
            repository::soft_delete_restaurant_owner(&mut *tx, user.id.clone()).await
        }
        UserType::DeliveryPerson => {
            delivery_person::repository::soft_delete_by_user_id(&mut *tx, user.id.clone())
                .await
                .map_err(|_| repository::Error::UnexpectedError)
        }
    }
    .map_err(|_| response::Error::FailedToDeleteUser)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToDeleteUser
    })?;

    tracing::info!("User {} deleted their account", user.id);

    Ok(response::Success::UserDeleted)
}
