use super::types::{request, response};
use crate::{
    modules::{auth::service, user},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let user = user::repository::find_by_email(
        &ctx.db_conn.pool,
        payload.email.trim().to_lowercase(),
    )
    .await
    .map_err(|_| response::Error::UnexpectedError)?
    .ok_or(response::Error::UserNotFound)?;

    service::send_password_reset_email(ctx, user)
        .await
        .map_err(|_| response::Error::FailedToSendEmail)
        .map(|_| response::Success::ResetEmailSent)
}
