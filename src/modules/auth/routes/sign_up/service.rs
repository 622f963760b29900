use super::types::{request, response};
use crate::{
    modules::{
        auth::service,
        delivery_person,
        user::{self, repository::UserType},
    },
    types::Context,
    utils::{aadhaar, password},
};
use std::{borrow::Cow, sync::Arc};
use validator::{Validate, ValidationError, ValidationErrors};

fn validate_role_fields(payload: &request::Payload) -> Result<(), ValidationErrors> {
    if payload.requires_aadhaar_number() && payload.aadhaar_number.is_none() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "aadhaar_number",
            ValidationError::new("REQUIRED")
                .with_message(Cow::from("Aadhaar number is required for this account type.")),
        );
        return Err(errors);
    }

    Ok(())
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .validate()
        .and_then(|_| validate_role_fields(&payload))
        .map_err(|errors| {
            tracing::warn!("Failed to validate payload: {errors}");
            response::Error::FailedToValidate(errors)
        })?;

    let email = payload.email.trim().to_lowercase();
    let username = payload.username.trim().to_string();

    if let Some(existing) = user::repository::find_by_username_or_email(
        &ctx.db_conn.pool,
        user::repository::FindByUsernameOrEmail {
            username: username.clone(),
            email: email.clone(),
        },
    )
    .await
    .map_err(|_| response::Error::FailedToFetchUser)?
    {
        if existing.username == username {
            return Err(response::Error::UsernameAlreadyInUse);
        }
        return Err(response::Error::EmailAlreadyInUse);
    }

    let password_hash =
        password::hash(&payload.password).map_err(|_| response::Error::UnexpectedError)?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    let user = user::repository::create(
        &mut *tx,
        user::repository::CreateUserPayload {
            username,
            email,
            name: payload.name.clone(),
            phone_number: payload.phone_number.clone(),
            address: payload.address.clone(),
            user_type: payload.user_type,
            password_hash,
        },
    )
    .await
    .map_err(|_| response::Error::SignupFailed)?;

    let aadhaar_card_number = payload
        .aadhaar_number
        .as_deref()
        .map(aadhaar::compact)
        .unwrap_or_default();

    match payload.user_type {
        UserType::Customer => user::repository::create_customer_detail(
            &mut *tx,
            user.id.clone(),
            payload.date_of_birth,
        )
        .await
        .map(|_| ()),
        UserType::RestaurantOwner => user::repository::create_restaurant_owner(
            &mut *tx,
            user.id.clone(),
            aadhaar_card_number,
        )
        .await
        .map(|_| ()),
        UserType::DeliveryPerson => delivery_person::repository::create(
            &mut *tx,
            delivery_person::repository::CreateDeliveryPersonPayload {
                user_id: user.id.clone(),
                aadhaar_card_number,
                vehicle_details: payload.vehicle_details.clone(),
            },
        )
        .await
        .map(|_| ())
        .map_err(|_| user::repository::Error::UnexpectedError),
    }
    .map_err(|_| response::Error::SignupFailed)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    tracing::info!("User {} signed up as {}", user.id, user.user_type);

    let user_id = user.id.clone();

    tokio::spawn(service::send_activation_email(ctx.clone(), user));

    Ok(response::Success::SignedUp { user_id })
}
