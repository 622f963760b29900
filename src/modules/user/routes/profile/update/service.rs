use super::types::{request, response};
use crate::{
    modules::{delivery_person, user::repository},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let user = payload.auth.user;
    let body = payload.body;
    let username = body.username.map(|username| username.trim().to_string());

    if let Some(username) = username.clone() {
        let taken = repository::find_by_username(&ctx.db_conn.pool, username)
            .await
            .map_err(|_| response::Error::FailedToUpdateProfile)?
            .is_some_and(|existing| existing.id != user.id);

        if taken {
            return Err(response::Error::UsernameAlreadyInUse);
        }
    }

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToUpdateProfile
    })?;

    let updated_user = repository::update_by_id(
        &mut *tx,
        user.id.clone(),
        repository::UpdateUserPayload {
            username,
            name: body.name,
            phone_number: body.phone_number,
            address: body.address,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateProfile)?;

    if repository::is_delivery_person(&user) {
        delivery_person::repository::update_by_user_id(
            &mut *tx,
            user.id.clone(),
            delivery_person::repository::UpdateDeliveryPersonPayload {
                vehicle_details: body.vehicle_details,
                availability_status: body.availability_status,
            },
        )
        .await
        .map_err(|_| response::Error::FailedToUpdateProfile)?;
    }

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToUpdateProfile
    })?;

    Ok(response::Success::ProfileUpdated(updated_user))
}
