use super::types::{request, response};
use crate::{
    modules::order::service::{apply_transition, Transition},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let transition = match payload.body.status {
        request::Decision::Confirmed => Transition::Confirm,
        request::Decision::Rejected => Transition::Reject,
    };

    let order = apply_transition(ctx, &payload.auth.user, payload.id, transition).await?;

    Ok(match transition {
        Transition::Reject => response::Success::OrderRejected(order),
        _ => response::Success::OrderConfirmed(order),
    })
}
