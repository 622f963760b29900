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
    .ok_or(response::Error::InvalidCredentials)?;

    if password::verify(&payload.password, &user.password_hash).is_err() {
        let failed_attempts =
            repository::record_failed_login(&ctx.db_conn.pool, user.id.clone())
                .await
                .map_err(|_| response::Error::UnexpectedError)?;

        if service::is_locked_out(failed_attempts) {
            tracing::warn!(
                "User {} reached {} failed login attempts",
                user.id,
                failed_attempts
            );

            let user_id = user.id.clone();
            if service::send_password_reset_email(ctx.clone(), user)
                .await
                .is_err()
            {
                tracing::warn!("Failed to send lockout reset email to user {}", user_id);
            }

            return Err(response::Error::TooManyFailedAttempts);
        }

        return Err(response::Error::InvalidCredentials);
    }

    if !user.is_active {
        return Err(response::Error::AccountNotActivated);
    }

    repository::clear_failed_logins(&ctx.db_conn.pool, user.id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    let access_token = service::issue_access_token(ctx.clone(), &user)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    Ok(response::Success::SignedIn {
        access_token,
        user_type: user.user_type,
    })
}
