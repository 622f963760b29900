use super::types::{request, response};
use crate::{modules::contact::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let message = repository::create(
        &ctx.db_conn.pool,
        repository::CreateContactMessagePayload {
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_lowercase(),
            message: payload.message,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToSendMessage)?;

    tracing::info!("Contact message {} received", message.id);

    Ok(response::Success::MessageSent)
}
