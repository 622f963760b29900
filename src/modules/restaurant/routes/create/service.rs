use super::types::{request, response};
use crate::{
    modules::{restaurant::repository, user},
    types::Context,
    utils::storage,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let owner = user::repository::find_restaurant_owner_by_user_id(
        &ctx.db_conn.pool,
        payload.auth.user.id.clone(),
    )
    .await
    .map_err(|_| response::Error::RestaurantCreationFailed)?
    .ok_or(response::Error::NotARestaurantOwner)?;

    let body = payload.body;

    let profile_picture = match body.profile_picture {
        Some(file) => {
            let buf = storage::read_upload(file).map_err(|_| response::Error::ImageUploadFailed)?;
            Some(
                storage::upload_file(ctx.storage.clone(), buf)
                    .await
                    .map_err(|_| response::Error::ImageUploadFailed)?,
            )
        }
        None => None,
    };

    let restaurant = repository::create(
        &ctx.db_conn.pool,
        repository::CreateRestaurantPayload {
            owner_id: owner.id,
            name: body.name,
            address: body.address,
            phone_number: body.phone_number,
            email: body.email.to_lowercase(),
            description: body.description,
            gst_number: body.gst_number.to_uppercase(),
            profile_picture,
        },
    )
    .await
    .map_err(|_| response::Error::RestaurantCreationFailed)?;

    tracing::info!(
        "Restaurant {} created by user {}",
        restaurant.id,
        payload.auth.user.id
    );

    Ok(response::Success::RestaurantCreated {
        restaurant_id: restaurant.id,
    })
}
