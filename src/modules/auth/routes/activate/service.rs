use super::types::{request, response};
use crate::{
    modules::{auth::service, user},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = service::find_user_by_uidb64(ctx.clone(), &payload.uidb64)
        .await
        .map_err(|_| response::Error::UnexpectedError)?
        .ok_or(response::Error::InvalidLink)?;

    if !service::check_activation_token(&ctx, &user, &payload.token) {
        return Err(response::Error::InvalidLink);
    }

    user::repository::activate(&ctx.db_conn.pool, user.id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    tracing::info!("User {} activated their account", user.id);

    Ok(response::Success::AccountActivated)
}
