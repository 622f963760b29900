use super::types::{request, response};
use crate::{
    modules::{
        delivery_person,
        user::repository::{self, UserType},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = payload.auth.user;
    let pool = &ctx.db_conn.pool;

    let details = match user.user_type {
        UserType::Customer => repository::find_customer_detail_by_user_id(pool, user.id.clone())
            .await
            .map_err(|_| response::Error::FailedToFetchProfile)?
            .map(response::Details::Customer),
        UserType::RestaurantOwner => {
            repository::find_restaurant_owner_by_user_id(pool, user.id.clone())
                .await
                .map_err(|_| response::Error::FailedToFetchProfile)?
                .map(response::Details::RestaurantOwner)
        }
        UserType::DeliveryPerson => {
            delivery_person::repository::find_by_user_id(pool, user.id.clone())
                .await
                .map_err(|_| response::Error::FailedToFetchProfile)?
                .map(response::Details::DeliveryPerson)
        }
    }
    .ok_or(response::Error::ProfileNotFound)?;

    Ok(response::Success::Profile { user, details })
}
