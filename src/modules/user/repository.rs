use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use sqlx::{types::Json, PgExecutor};
use ulid::Ulid;

use crate::utils::storage::UploadedMedia;

type Result<T> = std::result::Result<T, Error>;

crate::text_enum! {
    pub enum UserType {
        Customer => "customer",
        RestaurantOwner => "restaurant_owner",
        DeliveryPerson => "delivery_person",
    }
}

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub user_type: UserType,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub is_deleted: bool,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    #[serde(skip_serializing)]
    pub access_token_expires_at: Option<NaiveDateTime>,
    pub profile_picture: Option<Json<UploadedMedia>>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct CustomerDetail {
    pub id: String,
    pub user_id: String,
    pub date_of_birth: Option<NaiveDate>,
    pub is_deleted: bool,
}

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct RestaurantOwner {
    pub id: String,
    pub user_id: String,
    pub aadhaar_card_number: String,
    pub is_deleted: bool,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub struct CreateUserPayload {
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub user_type: UserType,
    pub password_hash: String,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateUserPayload) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
        INSERT INTO users (
            id,
            username,
            email,
            name,
            phone_number,
            address,
            user_type,
            password_hash,
            is_active
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.username)
    .bind(payload.email)
    .bind(payload.name)
    .bind(payload.phone_number)
    .bind(payload.address)
    .bind(payload.user_type)
    .bind(payload.password_hash)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating a user account: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_email<'e, E: PgExecutor<'e>>(e: E, email: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1 AND is_deleted = FALSE")
        .bind(email)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_email: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_username<'e, E: PgExecutor<'e>>(
    e: E,
    username: String,
) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_username: {}", err);
            Error::UnexpectedError
        })
}

pub struct FindByUsernameOrEmail {
    pub username: String,
    pub email: String,
}

pub async fn find_by_username_or_email<'e, E: PgExecutor<'e>>(
    e: E,
    payload: FindByUsernameOrEmail,
) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1 OR email = $2")
        .bind(payload.username)
        .bind(payload.email)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_username_or_email: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_access_token<'e, E: PgExecutor<'e>>(
    e: E,
    access_token: String,
) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE access_token = $1")
        .bind(access_token)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_access_token: {}", err);
            Error::UnexpectedError
        })
}

pub struct UpdateUserPayload {
    pub username: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateUserPayload,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            username = COALESCE($1, username),
            name = COALESCE($2, name),
            phone_number = COALESCE($3, phone_number),
            address = COALESCE($4, address),
            updated_at = NOW()
        WHERE
            id = $5
        RETURNING *
        ",
    )
    .bind(payload.username)
    .bind(payload.name)
    .bind(payload.phone_number)
    .bind(payload.address)
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while updating user {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn set_profile_picture<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    profile_picture: UploadedMedia,
) -> Result<()> {
    sqlx::query("UPDATE users SET profile_picture = $1, updated_at = NOW() WHERE id = $2")
        .bind(Json(profile_picture))
        .bind(id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while setting profile picture of user {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn set_access_token<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    access_token: String,
    expires_at: NaiveDateTime,
) -> Result<()> {
    sqlx::query(
        "UPDATE users SET access_token = $1, access_token_expires_at = $2 WHERE id = $3",
    )
    .bind(access_token)
    .bind(expires_at)
    .bind(id.clone())
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Error occurred while caching token of user {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn clear_access_token<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<()> {
    sqlx::query(
        "UPDATE users SET access_token = NULL, access_token_expires_at = NULL WHERE id = $1",
    )
    .bind(id.clone())
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Error occurred while clearing token of user {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn activate<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<()> {
    sqlx::query("UPDATE users SET is_active = TRUE, updated_at = NOW() WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while activating user {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn set_password_hash<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    password_hash: String,
) -> Result<()> {
    sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
        .bind(password_hash)
        .bind(id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while updating password of user {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn soft_delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<()> {
    sqlx::query(
        "
        UPDATE users SET
            is_deleted = TRUE,
            access_token = NULL,
            access_token_expires_at = NULL,
            updated_at = NOW()
        WHERE
            id = $1
        ",
    )
    .bind(id.clone())
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Error occurred while deleting user {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn create_customer_detail<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
    date_of_birth: Option<NaiveDate>,
) -> Result<CustomerDetail> {
    sqlx::query_as::<_, CustomerDetail>(
        "
        INSERT INTO customer_details (id, user_id, date_of_birth)
        VALUES ($1, $2, $3)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(user_id)
    .bind(date_of_birth)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating customer details: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_customer_detail_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<Option<CustomerDetail>> {
    sqlx::query_as::<_, CustomerDetail>(
        "SELECT * FROM customer_details WHERE user_id = $1 AND is_deleted = FALSE",
    )
    .bind(user_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred in find_customer_detail_by_user_id: {}", err);
        Error::UnexpectedError
    })
}

pub async fn soft_delete_customer_detail<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<()> {
    sqlx::query("UPDATE customer_details SET is_deleted = TRUE WHERE user_id = $1")
        .bind(user_id)
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while deleting customer details: {}", err);
            Error::UnexpectedError
        })
}

pub async fn create_restaurant_owner<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
    aadhaar_card_number: String,
) -> Result<RestaurantOwner> {
    sqlx::query_as::<_, RestaurantOwner>(
        "
        INSERT INTO restaurant_owners (id, user_id, aadhaar_card_number)
        VALUES ($1, $2, $3)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(user_id)
    .bind(aadhaar_card_number)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating restaurant owner: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_restaurant_owner_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<Option<RestaurantOwner>> {
    sqlx::query_as::<_, RestaurantOwner>(
        "SELECT * FROM restaurant_owners WHERE user_id = $1 AND is_deleted = FALSE",
    )
    .bind(user_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred in find_restaurant_owner_by_user_id: {}", err);
        Error::UnexpectedError
    })
}

pub async fn soft_delete_restaurant_owner<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<()> {
    sqlx::query("UPDATE restaurant_owners SET is_deleted = TRUE WHERE user_id = $1")
        .bind(user_id)
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while deleting restaurant owner: {}", err);
            Error::UnexpectedError
        })
}

pub fn is_customer(user: &User) -> bool {
    user.user_type == UserType::Customer
}

pub fn is_restaurant_owner(user: &User) -> bool {
    user.user_type == UserType::RestaurantOwner
}

pub fn is_delivery_person(user: &User) -> bool {
    user.user_type == UserType::DeliveryPerson
}

/// Whether the user still holds a cached access token that has not expired.
pub fn has_live_access_token(user: &User, now: NaiveDateTime) -> bool {
    match (&user.access_token, user.access_token_expires_at) {
        (Some(_), Some(expires_at)) => expires_at > now,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn user(access_token: Option<&str>, expires_at: Option<NaiveDateTime>) -> User {
        User {
            id: String::from("01HZY3T1C8P4"),
            username: String::from("asha"),
            email: String::from("asha@example.com"),
            name: None,
            phone_number: None,
            address: None,
            user_type: UserType::Customer,
            password_hash: String::from("hash"),
            is_active: true,
            is_deleted: false,
            access_token: access_token.map(String::from),
            access_token_expires_at: expires_at,
            profile_picture: None,
            created_at: now(),
            updated_at: None,
        }
    }

    #[test]
    fn cached_token_is_live_until_it_expires() {
        let user = user(Some("token"), Some(now() + Duration::hours(1)));
        assert!(has_live_access_token(&user, now()));
        assert!(!has_live_access_token(&user, now() + Duration::hours(2)));
    }

    #[test]
    fn missing_token_is_never_live() {
        assert!(!has_live_access_token(&user(None, None), now()));
        assert!(!has_live_access_token(
            &user(None, Some(now() + Duration::hours(1))),
            now()
        ));
    }

    #[test]
    fn serialized_user_hides_credentials() {
        let json = serde_json::to_value(user(Some("token"), Some(now()))).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("access_token").is_none());
        assert_eq!(json["user_type"], "customer");
    }
}
