use super::types::{request, response};
use crate::{modules::auth::service, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = service::find_user_by_uidb64(ctx.clone(), &payload.uidb64)
        .await
        .map_err(|_| response::Error::UnexpectedError)?
        .ok_or(response::Error::InvalidLink)?;

    match service::check_password_reset_token(&ctx, &user, &payload.token) {
        true => Ok(response::Success::LinkIsValid),
        false => Err(response::Error::InvalidLink),
    }
}
