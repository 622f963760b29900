use super::types::{request, response};
use crate::{
    modules::{
        auth::{repository, service},
        user,
    },
    types::Context,
    utils::password,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let user = service::find_user_by_uidb64(ctx.clone(), &payload.uidb64)
        .await
        .map_err(|_| response::Error::UnexpectedError)?
        .ok_or(response::Error::InvalidLink)?;

    if !service::check_password_reset_token(&ctx, &user, &payload.token) {
        return Err(response::Error::InvalidLink);
    }

    let password_hash = password::hash(&payload.body.new_password)
        .map_err(|_| response::Error::UnexpectedError)?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    user::repository::set_password_hash(&mut *tx, user.id.clone(), password_hash)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    repository::clear_failed_logins(&mut *tx, user.id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    user::repository::clear_access_token(&mut *tx, user.id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    tracing::info!("User {} reset their password", user.id);

    Ok(response::Success::PasswordReset)
}
