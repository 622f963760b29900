use super::types::{request, response};
use crate::{
    modules::{menu_item::repository, restaurant},
    types::Context,
    utils::{storage, validation},
};
use std::sync::Arc;
use validator::{Validate, ValidationError, ValidationErrors};

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let body = payload.body;

    let price = validation::parse_price(&body.price).ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.add("price", ValidationError::new("INVALID_PRICE"));
        response::Error::FailedToValidate(errors)
    })?;

    restaurant::repository::find_by_id(&ctx.db_conn.pool, body.restaurant_id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateMenuItem)?
        .ok_or(response::Error::RestaurantNotFound)?;

    let is_owner = restaurant::repository::is_owned_by_user(
        &ctx.db_conn.pool,
        body.restaurant_id.clone(),
        payload.auth.user.id.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToCreateMenuItem)?;

    if !is_owner {
        return Err(response::Error::NotRestaurantOwner);
    }

    let picture = match body.picture {
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

    repository::create(
        &ctx.db_conn.pool,
        repository::CreateMenuItemPayload {
            restaurant_id: body.restaurant_id,
            name: body.name,
            description: body.description,
            price,
            preparation_time: body.preparation_time,
            availability: body.availability.unwrap_or(true),
            picture,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateMenuItem)
    .map(response::Success::MenuItemCreated)
}
