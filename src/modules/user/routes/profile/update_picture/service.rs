use super::types::{request, response};
use crate::{modules::user::repository, types::Context, utils::storage};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let buf = storage::read_upload(payload.body.profile_picture)
        .map_err(|_| response::Error::ImageUploadFailed)?;

    let profile_picture = storage::upload_file(ctx.storage.clone(), buf)
        .await
        .map_err(|_| response::Error::ImageUploadFailed)?;

    repository::set_profile_picture(
        &ctx.db_conn.pool,
        payload.auth.user.id.clone(),
        profile_picture.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateProfilePicture)?;

    if let Some(previous) = payload.auth.user.profile_picture {
        tokio::spawn(storage::delete_file(ctx.storage.clone(), previous.0));
    }

    Ok(response::Success::ProfilePictureUpdated(profile_picture))
}
