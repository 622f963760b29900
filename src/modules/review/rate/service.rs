use super::types::{request, response};
use crate::{
    modules::{review::service as review, user},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    if !user::repository::is_customer(&payload.auth.user) {
        return Err(response::Error::OnlyCustomersCanRate);
    }

    let (review, aggregate) = review::rate(
        ctx,
        review::RatePayload {
            user_id: payload.auth.user.id,
            target_type: payload.target_type,
            target_id: payload.target_id,
            rating: payload.body.rating,
            comment: payload.body.comment,
        },
    )
    .await
    .map_err(|err| match err {
        review::Error::TargetNotFound => response::Error::TargetNotFound,
        review::Error::InvalidRating | review::Error::UnexpectedError => {
            response::Error::FailedToRate
        }
    })?;

    Ok(response::Success::Rated { review, aggregate })
}
