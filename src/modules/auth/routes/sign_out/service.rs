use super::types::{request, response};
use crate::{modules::user, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    user::repository::clear_access_token(&ctx.db_conn.pool, payload.auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToSignOut)
        .map(|_| response::Success::SignedOut)
}
