use super::types::{request, response};
use crate::{
    modules::order::service::{apply_transition, Transition},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    apply_transition(ctx, &payload.auth.user, payload.id, Transition::Deliver)
        .await
        .map_err(response::Error::from)
        .map(response::Success::OrderDelivered)
}
